use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use rand::Rng;

#[derive(Debug, Clone)]
pub struct Config {
    pub instance_id: String,
    pub api_port: u16,
    pub logger: LoggerConfig,
    /// Directory with scene documents and the metadata index.
    pub scene_storage_path: Arc<Path>,
    pub persist_metadata: bool,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub stdio_level: String,
    pub format: LoggerFormat,
    pub log_file: Option<Arc<Path>>,
    pub file_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerFormat {
    Pretty,
    Json,
    Compact,
}

impl FromStr for LoggerFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(LoggerFormat::Json),
            "pretty" => Ok(LoggerFormat::Pretty),
            "compact" => Ok(LoggerFormat::Compact),
            _ => Err("invalid logger format, expected one of \"json\", \"pretty\" or \"compact\""),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid value \"{value}\" of {variable}: {reason}.")]
pub struct ConfigError {
    variable: &'static str,
    value: String,
    reason: String,
}

const DEFAULT_API_PORT: u16 = 3000;
const DEFAULT_SCENE_STORAGE_PATH: &str = "./public/scenes";

pub fn read_config() -> Result<Config, ConfigError> {
    config_from_env(|name| env::var(name).ok())
}

/// Builds the config from variables returned by `var`.
pub fn config_from_env(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let api_port = match var("STAGECRAFT_API_PORT") {
        Some(port) => parse_value("STAGECRAFT_API_PORT", &port)?,
        None => DEFAULT_API_PORT,
    };

    let instance_id = match var("STAGECRAFT_INSTANCE_ID") {
        Some(instance_id) => instance_id,
        None => format!("stagecraft_{}", rand::rng().random::<u32>()),
    };

    let scene_storage_path = var("STAGECRAFT_SCENE_STORAGE_PATH")
        .or_else(|| var("SCENE_STORAGE_PATH"))
        .unwrap_or_else(|| DEFAULT_SCENE_STORAGE_PATH.to_string());

    let persist_metadata = match var("STAGECRAFT_PERSIST_METADATA") {
        Some(value) => parse_bool("STAGECRAFT_PERSIST_METADATA", &value)?,
        None => true,
    };

    let stdio_level = var("STAGECRAFT_LOGGER_LEVEL").unwrap_or_else(|| "info".to_string());
    let file_level = var("STAGECRAFT_LOG_FILE_LEVEL").unwrap_or_else(|| "info".to_string());
    let format = match var("STAGECRAFT_LOGGER_FORMAT") {
        Some(format) => LoggerFormat::from_str(&format).map_err(|reason| ConfigError {
            variable: "STAGECRAFT_LOGGER_FORMAT",
            value: format.clone(),
            reason: reason.to_string(),
        })?,
        None => LoggerFormat::Compact,
    };
    let log_file = var("STAGECRAFT_LOG_FILE").map(|path| PathBuf::from(path).into());

    Ok(Config {
        instance_id,
        api_port,
        logger: LoggerConfig {
            stdio_level,
            format,
            log_file,
            file_level,
        },
        scene_storage_path: PathBuf::from(scene_storage_path).into(),
        persist_metadata,
    })
}

fn parse_value<T>(variable: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError {
        variable,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(ConfigError {
            variable,
            value: value.to_string(),
            reason: "expected \"true\" or \"false\"".to_string(),
        }),
    }
}
