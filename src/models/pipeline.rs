//! Пайплайн: кодирование признаков + случайный лес, сохраняемый одним файлом

#![allow(non_snake_case)]

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use linfa::prelude::SingleTargetRegression;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::models::encoder::ColumnEncoder;
use crate::models::forest::RandomForestRegressor;
use crate::models::training::TrainingConfig;
use crate::types::CarRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarPricePipeline {
    encoder: ColumnEncoder,
    regressor: RandomForestRegressor,
}

impl CarPricePipeline {
    pub fn fit(
        records: &[CarRecord],
        prices: &Array1<f64>,
        config: &TrainingConfig,
    ) -> Result<Self, ModelError> {
        if records.len() != prices.len() {
            return Err(ModelError::LengthMismatch {
                features: records.len(),
                targets: prices.len(),
            });
        }

        let encoder = ColumnEncoder::fit(records)?;
        let X = encoder.transform(records);

        let mut regressor = RandomForestRegressor::new(
            config.n_estimators,
            config.max_depth,
            config.min_samples_split,
            config.seed,
        );
        regressor.fit(&X, prices)?;

        Ok(Self { encoder, regressor })
    }

    pub fn encoder(&self) -> &ColumnEncoder {
        &self.encoder
    }

    pub fn predict(&self, records: &[CarRecord]) -> Result<Array1<f64>, ModelError> {
        let X = self.encoder.transform(records);
        self.regressor.predict(&X)
    }

    pub fn predict_one(&self, record: &CarRecord) -> Result<f64, ModelError> {
        let predictions = self.predict(std::slice::from_ref(record))?;
        Ok(predictions[0])
    }

    /// Коэффициент детерминации R² на переданных данных
    pub fn score(&self, records: &[CarRecord], prices: &Array1<f64>) -> Result<f64, ModelError> {
        let predictions = self.predict(records)?;
        Ok(predictions.r2(prices)?)
    }

    /// Перезаписывает файл без проверок
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let io_err = |source| ModelError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
        bincode::serialize_into(&mut writer, self).map_err(|source| ModelError::ArtifactFormat {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|source| ModelError::ArtifactIo {
            path: path.to_path_buf(),
            source,
        })?;
        bincode::deserialize_from(BufReader::new(file)).map_err(|source| ModelError::ArtifactFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}
