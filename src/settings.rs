use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const FALLBACK_UPI_ID: &str = "crickbuzz@sbi";

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub name: String,
    pub currency: String,
    pub merchant_name: String,
    pub upi_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Polling {
    pub match_refresh_secs: u64,
    pub cooldown_sync_secs: u64,
    pub jitter_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Session {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: Api,
    pub app: App,
    pub polling: Polling,
    #[serde(default)]
    pub session: Session,
}

impl Settings {
    /// Loads defaults, then `path` if it exists, then `CRICKBUZZ__*` variables.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("api.base_url", DEFAULT_API_URL)?
            .set_default("api.timeout_secs", 15)?
            .set_default("app.name", "CrickBuzz")?
            .set_default("app.currency", "₹")?
            .set_default("app.merchant_name", "CrickBuzz")?
            .set_default(
                "app.upi_ids",
                vec![
                    "sktigpta@sbi",
                    "sktigpta@paytm",
                    "crickbuzz@phonepe",
                    "sktigpta@ybl",
                    "sktigpta@axl",
                ],
            )?
            .set_default("polling.match_refresh_secs", 30)?
            .set_default("polling.cooldown_sync_secs", 60)?
            .set_default("polling.jitter_ms", 2000)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CRICKBUZZ")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("app.upi_ids")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = config.try_deserialize()?;
        settings.app.upi_ids = settings
            .app
            .upi_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .collect();

        Ok(settings)
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::load("does-not-exist.toml").unwrap();

        assert_eq!(settings.api.base_url, DEFAULT_API_URL);
        assert_eq!(settings.polling.match_refresh_secs, 30);
        assert_eq!(settings.polling.cooldown_sync_secs, 60);
        assert_eq!(settings.app.upi_ids.len(), 5);
        assert!(settings.session.path.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://backend:9000/api\"\n\n[app]\nupi_ids = [\" a@upi \", \"\"]"
        )
        .unwrap();

        let settings = Settings::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(settings.api.base_url, "http://backend:9000/api");
        assert_eq!(settings.api.timeout_secs, 15);
        assert_eq!(settings.app.upi_ids, vec!["a@upi".to_string()]);
    }

    #[test]
    fn api_url_flag_wins() {
        let settings = Settings::load("does-not-exist.toml")
            .unwrap()
            .with_api_url(Some("http://other/api".to_string()));

        assert_eq!(settings.api.base_url, "http://other/api");
    }
}
