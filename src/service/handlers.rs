use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::{Html, Json};
use axum::Form;

use crate::service::render::{error_fragment, index_page, result_page};
use crate::service::PredictionService;
use crate::types::PredictForm;

pub async fn index(State(service): State<Arc<PredictionService>>) -> Html<String> {
    Html(index_page(service.pipeline().encoder()))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Любая ошибка запроса отображается в ответе, статус остаётся 200
pub async fn predict(
    State(service): State<Arc<PredictionService>>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Html<String> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::warn!("Rejected predict request: {}", rejection);
            return Html(error_fragment(&rejection.body_text()));
        }
    };

    tracing::info!(
        "Predict request: brand={:?} model={:?} year={:?} kms={:?}",
        form.brand,
        form.model,
        form.year,
        form.kms_driven
    );

    match service.predict(&form) {
        Ok(output) => {
            tracing::info!("Predicted price: {:.2}", output.price);
            Html(result_page(&output))
        }
        Err(e) => {
            tracing::warn!("Prediction error: {}", e);
            Html(error_fragment(&e.to_string()))
        }
    }
}
