use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub api: ApiConfig,
    pub fixtures: FixturesConfig,
    pub session: SessionConfig,
    pub features: FeatureFlags,
    pub list: ListConfig,
}

/// Which repository backend the pages run against. `Memory` also selects
/// the mock credential list for login.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Memory,
    Remote,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub source: DataSource,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixturesConfig {
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub file: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FeatureFlags {
    #[serde(default)]
    pub status_modal: bool,
    #[serde(default)]
    pub category_management: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    5
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Layered sources: required defaults, optional per-run-mode and
        // local files, then environment overrides like
        // `SIMARU__DATA__SOURCE=remote`.
        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("SIMARU").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
