//! Сервер предсказаний цен

use std::sync::Arc;

use anyhow::Context;

use car_price::config::{init_tracing, Config};
use car_price::service::{router, PredictionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    // Без модели сервер не запускается
    let service = PredictionService::load(&config.model_path)
        .with_context(|| format!("cannot load model from {}", config.model_path.display()))?;

    let app = router(Arc::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.bind_addr))?;
    tracing::info!("Server listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
