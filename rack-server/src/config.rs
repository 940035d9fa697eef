use rack_types::RACK_SIZE;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_DATAMUSE_URL: &str = "https://api.datamuse.com/words";
pub const DEFAULT_KATEGLO_URL: &str = "https://kateglo.com/api.php";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {name}: {value:?} ({message})")]
    Invalid {
        name: &'static str,
        value: String,
        message: String,
    },

    #[error("MIN_WORD_LENGTH ({min}) must not exceed MAX_WORD_LENGTH ({max})")]
    LengthRange { min: usize, max: usize },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub words_directory: String,
    pub source_timeout: Duration,
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub datamuse_url: String,
    pub kateglo_url: String,
    pub profile_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; unset variables take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let config = Self {
            host: text("HOST", "127.0.0.1"),
            port: parse_var(&lookup, "PORT", 8080)?,
            database_url: text("DATABASE_URL", "sqlite://word_master.db?mode=rwc"),
            words_directory: text("WORDS_DIRECTORY", "./shared/words"),
            source_timeout: Duration::from_millis(parse_var(&lookup, "SOURCE_TIMEOUT_MS", 5000)?),
            min_word_length: parse_var(&lookup, "MIN_WORD_LENGTH", 3)?,
            max_word_length: parse_var(&lookup, "MAX_WORD_LENGTH", RACK_SIZE)?,
            datamuse_url: text("DATAMUSE_URL", DEFAULT_DATAMUSE_URL),
            kateglo_url: text("KATEGLO_URL", DEFAULT_KATEGLO_URL),
            profile_id: text("PROFILE_ID", "default"),
        };

        if config.min_word_length > config.max_word_length {
            return Err(ConfigError::LengthRange {
                min: config.min_word_length,
                max: config.max_word_length,
            });
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
            value,
        }),
    }
}
