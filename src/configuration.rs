use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://rl.insider.gg/pc";
pub const DEFAULT_OUTPUT_PATH: &str = "Prices.json";
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub source: SourceSettings,
    pub output: OutputSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct OutputSettings {
    pub path: PathBuf,
}

/// Built-in defaults, overridden by a `configuration.{yaml,toml,json}` file in
/// the working directory when there is one.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("source.url", DEFAULT_SOURCE_URL)?
        .set_default("source.timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("output.path", DEFAULT_OUTPUT_PATH)?
        .add_source(config::File::with_name("configuration").required(false))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_pc_price_page() {
        let settings = get_configuration().unwrap();
        assert_eq!(settings.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(settings.source.timeout(), Duration::from_secs(30));
        assert_eq!(settings.output.path, PathBuf::from("Prices.json"));
    }
}
