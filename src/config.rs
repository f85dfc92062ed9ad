//! Настройки из переменных окружения

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "car_database.xlsx";
pub const DEFAULT_MODEL_PATH: &str = "car_price_model.bin";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Исходная таблица (`CAR_PRICE_DATA`)
    pub data_path: PathBuf,
    /// Файл модели (`CAR_PRICE_MODEL`)
    pub model_path: PathBuf,
    /// Адрес сервера (`CAR_PRICE_ADDR`)
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_path = lookup("CAR_PRICE_DATA").unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        let model_path = lookup("CAR_PRICE_MODEL").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let addr = lookup("CAR_PRICE_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let bind_addr = addr.parse::<SocketAddr>().map_err(|source| ConfigError::InvalidAddr {
            var: "CAR_PRICE_ADDR",
            value: addr.clone(),
            source,
        })?;

        Ok(Self {
            data_path: PathBuf::from(data_path),
            model_path: PathBuf::from(model_path),
            bind_addr,
        })
    }
}

/// Логирование в stdout; уровень из `RUST_LOG`, по умолчанию info
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
