use serde::Deserialize;
use std::env;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub source: SourceConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    pub base_url: String,
    pub flights_path: String,
    /// Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl SourceConfig {
    pub fn flights_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.flights_path.trim_start_matches('/')
        )
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            flights_path: "/flights".to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub filter: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .set_default("source.base_url", DEFAULT_BASE_URL)?
            .set_default("source.flights_path", "/flights")?
            .set_default("log.filter", "flightdesk=info")?
            .add_source(file("default"))
            .add_source(file(&run_mode))
            // Not checked in.
            .add_source(file("local"))
            // Eg. `FLIGHTDESK__SOURCE__BASE_URL=http://flights.internal/api`
            .add_source(
                config::Environment::with_prefix("FLIGHTDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
