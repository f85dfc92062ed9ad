//! Ошибки библиотеки

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("cannot open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook {0} has no worksheets")]
    NoWorksheet(PathBuf),
    #[error("cannot read first worksheet: {0}")]
    Read(#[source] calamine::Error),
    #[error("worksheet has no header row")]
    Empty,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("required column `{0}` not found")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("empty training set")]
    EmptyTrainingSet,
    #[error("feature/target length mismatch: {features} rows vs {targets} targets")]
    LengthMismatch { features: usize, targets: usize },
    #[error("expected {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
    #[error("metric computation failed: {0}")]
    Metric(#[from] linfa::Error),
    #[error("artifact I/O failed for {path}: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("artifact {path} is corrupt: {source}")]
    ArtifactFormat {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// Ошибка обработки одного запроса, с указанием этапа
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("missing form field `{0}`")]
    Extraction(&'static str),
    #[error("invalid literal for {field}: '{value}'")]
    Coercion { field: &'static str, value: String },
    #[error("prediction failed: {0}")]
    Inference(String),
}

impl From<ModelError> for PredictError {
    fn from(e: ModelError) -> Self {
        PredictError::Inference(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var} value '{value}': {source}")]
    InvalidAddr {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
