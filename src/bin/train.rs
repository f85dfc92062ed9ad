//! Обучение модели: таблица -> очистка -> train/test -> случайный лес -> файл модели

use anyhow::Context;

use car_price::config::{init_tracing, Config};
use car_price::models::{train, TrainingConfig};
use car_price::preprocessing::{load_table, DatasetBuilder};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    tracing::info!("Loading dataset from {}", config.data_path.display());
    let table = load_table(&config.data_path)
        .with_context(|| format!("cannot read {}", config.data_path.display()))?;
    tracing::info!("Original columns: {:?}", table.headers);

    let dataset = DatasetBuilder::build(&table)?;

    let (pipeline, report) = train(&dataset, &TrainingConfig::default())?;
    tracing::debug!("Training report: {}", serde_json::to_string(&report)?);

    pipeline.save(&config.model_path)?;
    tracing::info!("Model saved as {}", config.model_path.display());

    Ok(())
}
