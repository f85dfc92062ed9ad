//! Сервис предсказаний: загруженный один раз пайплайн и HTTP обработчики

pub mod handlers;
pub mod render;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::{ModelError, PredictError};
use crate::models::CarPricePipeline;
use crate::types::{CarRecord, PredictForm, PredictionOutput};

/// Неизменяемый контекст сервиса; после загрузки модель не меняется
#[derive(Debug)]
pub struct PredictionService {
    pipeline: CarPricePipeline,
}

impl PredictionService {
    pub fn new(pipeline: CarPricePipeline) -> Self {
        Self { pipeline }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let pipeline = CarPricePipeline::load(path)?;
        tracing::info!(
            "Model loaded from {} ({} features)",
            path.display(),
            pipeline.encoder().n_features()
        );
        Ok(Self::new(pipeline))
    }

    pub fn pipeline(&self) -> &CarPricePipeline {
        &self.pipeline
    }

    pub fn predict(&self, form: &PredictForm) -> Result<PredictionOutput, PredictError> {
        let record = parse_form(form)?;
        let raw = self.pipeline.predict_one(&record)?;
        if !raw.is_finite() {
            return Err(PredictError::Inference(format!("non-finite prediction {raw}")));
        }

        Ok(PredictionOutput {
            price: round_price(raw),
            record,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, PredictError> {
    value.as_deref().ok_or(PredictError::Extraction(field))
}

/// Поля формы -> запись; Year и Kms_Driven приводятся к целым
pub fn parse_form(form: &PredictForm) -> Result<CarRecord, PredictError> {
    let year_raw = required(&form.year, "Year")?;
    let year = year_raw.trim().parse::<i32>().map_err(|_| PredictError::Coercion {
        field: "Year",
        value: year_raw.to_string(),
    })?;

    let kms_raw = required(&form.kms_driven, "Kms_Driven")?;
    let kms_driven = kms_raw.trim().parse::<u64>().map_err(|_| PredictError::Coercion {
        field: "Kms_Driven",
        value: kms_raw.to_string(),
    })?;

    Ok(CarRecord {
        brand: required(&form.brand, "brand")?.to_string(),
        model: required(&form.model, "model")?.to_string(),
        year,
        kms_driven,
        fuel_type: required(&form.fuel_type, "fuel_type")?.to_string(),
        city: required(&form.city, "city")?.to_string(),
        owner: required(&form.owner, "owner")?.to_string(),
    })
}

pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn router(service: Arc<PredictionService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(year: &str, kms: &str) -> PredictForm {
        PredictForm {
            brand: Some("maruti".into()),
            model: Some("swift".into()),
            year: Some(year.into()),
            kms_driven: Some(kms.into()),
            fuel_type: Some("Petrol".into()),
            city: Some("Unknown".into()),
            owner: Some("1".into()),
        }
    }

    #[test]
    fn parses_valid_form() {
        let record = parse_form(&form(" 2015 ", "45000")).unwrap();
        assert_eq!(record.year, 2015);
        assert_eq!(record.kms_driven, 45000);
        assert_eq!(record.brand, "maruti");
    }

    #[test]
    fn bad_integers_are_coercion_errors() {
        assert!(matches!(
            parse_form(&form("abc", "45000")),
            Err(PredictError::Coercion { field: "Year", .. })
        ));
        assert!(matches!(
            parse_form(&form("2015", "45,000")),
            Err(PredictError::Coercion { field: "Kms_Driven", .. })
        ));
        assert!(matches!(
            parse_form(&form("2015", "-5")),
            Err(PredictError::Coercion { field: "Kms_Driven", .. })
        ));
    }

    #[test]
    fn missing_field_is_extraction_error() {
        let mut incomplete = form("2015", "45000");
        incomplete.city = None;
        assert!(matches!(
            parse_form(&incomplete),
            Err(PredictError::Extraction("city"))
        ));
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_price(123456.789), 123456.79);
        assert_eq!(round_price(0.004), 0.0);
    }
}
