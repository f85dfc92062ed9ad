//! Car Price - обучение модели цен подержанных автомобилей и сервис предсказаний

pub mod config;
pub mod error;
pub mod models;
pub mod preprocessing;
pub mod service;
pub mod types;

pub use error::{ConfigError, DatasetError, ModelError, PredictError, SpreadsheetError};
pub use models::*;
pub use preprocessing::*;
pub use types::*;

pub use service::PredictionService;
