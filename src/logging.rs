use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::fs;
use std::path::Path;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "logs/crickbuzz.log";
const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Initializes log4rs from `path`. When the file is missing, falls back to
/// warnings on stderr plus everything from info up in `logs/crickbuzz.log`.
pub fn init_logging(path: &str) -> Result<(), anyhow::Error> {
    if !Path::new(LOG_DIR).exists() {
        fs::create_dir(LOG_DIR)?;
    }

    if Path::new(path).exists() {
        return log4rs::init_file(path, Default::default())
            .map_err(|e| anyhow::anyhow!("Could not initialize logging: {}", e));
    }

    log4rs::init_config(fallback_config()?)?;
    log::debug!("{} not found, using built-in logging config", path);
    Ok(())
}

fn fallback_config() -> Result<Config, anyhow::Error> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}{n}")))
        .build();
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(LOG_FILE)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build("stderr", Box::new(stderr)),
        )
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Info),
        )?;

    Ok(config)
}
