pub mod batch;
pub mod config;
pub mod ingest;
pub mod list;
pub mod process;
pub mod show;

use std::path::Path;

use insight_core::InsightConfig;

/// Load the configuration from `path`, the default location, or defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<InsightConfig> {
    if let Some(path) = path {
        return Ok(InsightConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(InsightConfig::from_file(&default_path)?)
    } else {
        Ok(InsightConfig::default())
    }
}

/// Serialize as JSON, pretty-printed when configured.
pub fn to_json<T: serde::Serialize>(value: &T, config: &InsightConfig) -> anyhow::Result<String> {
    if config.output.pretty_json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}
