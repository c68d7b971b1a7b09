use crate::domain::{Decimal, FeeConfig};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_path: Option<String>,
    pub fees: FeeConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let store_backend = match env_map
            .get("STORE_BACKEND")
            .map(|s| s.as_str())
            .unwrap_or("sqlite")
        {
            "sqlite" => StoreBackend::Sqlite,
            "memory" => StoreBackend::Memory,
            other => {
                return Err(ConfigError::InvalidValue(
                    "STORE_BACKEND".to_string(),
                    format!("must be sqlite or memory, got {}", other),
                ))
            }
        };

        let database_path = env_map.get("DATABASE_PATH").cloned();
        if store_backend == StoreBackend::Sqlite && database_path.is_none() {
            return Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()));
        }

        let defaults = FeeConfig::default();
        let fees = FeeConfig {
            buy_fee_enabled: parse_bool(&env_map, "BUY_FEE_ENABLED", defaults.buy_fee_enabled)?,
            buy_fee_percent: parse_percent(&env_map, "BUY_FEE_PERCENT", defaults.buy_fee_percent)?,
            sell_fee_enabled: parse_bool(
                &env_map,
                "SELL_FEE_ENABLED",
                defaults.sell_fee_enabled,
            )?,
            sell_fee_percent: parse_percent(
                &env_map,
                "SELL_FEE_PERCENT",
                defaults.sell_fee_percent,
            )?,
        };

        Ok(Config {
            port,
            store_backend,
            database_path,
            fees,
        })
    }
}

fn parse_bool(
    env_map: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    match env_map.get(key).map(|s| s.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(value) => match value.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidValue(
                key.to_string(),
                format!("must be true or false, got {}", other),
            )),
        },
    }
}

fn parse_percent(
    env_map: &HashMap<String, String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let Some(raw) = env_map.get(key) else {
        return Ok(default);
    };
    let value = Decimal::from_str_canonical(raw.trim()).map_err(|_| {
        ConfigError::InvalidValue(key.to_string(), "must be a decimal number".to_string())
    })?;
    if !is_valid_fee_percent(value) {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must be between 0 and 100".to_string(),
        ));
    }
    Ok(value)
}

/// Fee percents are accepted in the closed range `[0, 100]`.
pub fn is_valid_fee_percent(value: Decimal) -> bool {
    value >= Decimal::zero() && value <= Decimal::hundred()
}
