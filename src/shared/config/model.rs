use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub index: IndexConfig,
    pub logging: LoggingConfig,
}

/// Defaults applied to indexes built through `IndexSchemaBuilder::from_config`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Upper bound on distinct fact rows held by one in-memory index.
    pub max_rows_in_memory: usize,
    pub rollup: bool,
    /// One of none, second, minute, fifteen_minute, hour, day, all.
    pub query_granularity: String,
    /// One of sorted_array, sorted_set, array.
    pub multi_value_handling: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

pub const CONFIG_PATH_ENV: &str = "ROLLUP_INDEX_CONFIG";

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

/// Built-in defaults, overridden by the optional file at `config_path`, overridden by
/// `ROLLUP_INDEX__<SECTION>__<KEY>` environment variables.
pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .set_default("index.max_rows_in_memory", 1_000_000i64)?
        .set_default("index.rollup", true)?
        .set_default("index.query_granularity", "none")?
        .set_default("index.multi_value_handling", "sorted_array")?
        .set_default("logging.log_dir", "logs")?
        .set_default("logging.stdout_level", "info")?
        .set_default("logging.file_level", "debug")?
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ROLLUP_INDEX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
