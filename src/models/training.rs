//! Обучение: разбиение train/test, подгонка пайплайна, метрики

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::ModelError;
use crate::models::pipeline::CarPricePipeline;
use crate::preprocessing::CleanDataset;
use crate::types::CarRecord;

/// Гиперпараметры обучения
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub seed: u64,
    pub test_ratio: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_estimators: 300,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
            test_ratio: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    pub train_r2: f64,
    pub test_r2: Option<f64>,
}

/// Перемешивает индексы строк и возвращает (train, test)
pub fn train_test_split(n_samples: usize, test_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_samples as f64) * test_ratio.clamp(0.0, 1.0)).ceil() as usize;
    // хотя бы одна строка остаётся для обучения
    let n_test = n_test.min(n_samples.saturating_sub(1));

    let train = indices.split_off(n_test);
    (train, indices)
}

fn select(dataset: &CleanDataset, indices: &[usize]) -> (Vec<CarRecord>, Array1<f64>) {
    let records = indices.iter().map(|&i| dataset.records[i].clone()).collect();
    let prices = indices.iter().map(|&i| dataset.prices[i]).collect();
    (records, prices)
}

/// Подгонка на train, оценка R² на train и test
pub fn train(
    dataset: &CleanDataset,
    config: &TrainingConfig,
) -> Result<(CarPricePipeline, TrainingReport), ModelError> {
    if dataset.is_empty() {
        return Err(ModelError::EmptyTrainingSet);
    }

    let (train_idx, test_idx) = train_test_split(dataset.len(), config.test_ratio, config.seed);
    let (train_records, train_prices) = select(dataset, &train_idx);
    let (test_records, test_prices) = select(dataset, &test_idx);

    tracing::info!(
        "Training model: {} train rows, {} test rows, {} trees",
        train_records.len(),
        test_records.len(),
        config.n_estimators
    );

    let pipeline = CarPricePipeline::fit(&train_records, &train_prices, config)?;

    let train_r2 = pipeline.score(&train_records, &train_prices)?;
    let test_r2 = if test_records.is_empty() {
        None
    } else {
        Some(pipeline.score(&test_records, &test_prices)?)
    };

    tracing::info!("Train R²: {:.4}", train_r2);
    match test_r2 {
        Some(r2) => tracing::info!("Test R²: {:.4}", r2),
        None => tracing::warn!("Test set is empty, holdout R² not computed"),
    }

    let report = TrainingReport {
        n_train: train_records.len(),
        n_test: test_records.len(),
        train_r2,
        test_r2,
    };

    Ok((pipeline, report))
}
