use anyhow::Result;
use clap::Parser;

use crickbuzz::cli::{self, Cli};
use crickbuzz::logging::init_logging;
use crickbuzz::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Cli::parse();

    init_logging(&args.log4rs)?;
    let settings = Settings::load(&args.config)?.with_api_url(args.api_url.clone());
    log::info!("Using backend at {}", settings.api.base_url);

    cli::run(args, settings).await.inspect_err(|e| log::error!("{}", e))
}
