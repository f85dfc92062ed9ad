//! Типы данных для модели цен автомобилей

use serde::{Deserialize, Serialize};

/// Город, подставляемый при обучении (в исходной таблице его нет)
pub const DEFAULT_CITY: &str = "Unknown";
/// Владелец, подставляемый при обучении (в исходной таблице его нет)
pub const DEFAULT_OWNER: &str = "1";

/// Одна запись об автомобиле без целевой переменной
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub kms_driven: u64,
    pub fuel_type: String,
    pub city: String,
    pub owner: String,
}

/// Категориальные признаки в порядке one-hot блоков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoricalColumn {
    Brand,
    Model,
    FuelType,
    City,
    Owner,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; 5] = [
        CategoricalColumn::Brand,
        CategoricalColumn::Model,
        CategoricalColumn::FuelType,
        CategoricalColumn::City,
        CategoricalColumn::Owner,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::Brand => "brand",
            CategoricalColumn::Model => "model",
            CategoricalColumn::FuelType => "fuel_type",
            CategoricalColumn::City => "city",
            CategoricalColumn::Owner => "owner",
        }
    }

    pub fn value(self, record: &CarRecord) -> &str {
        match self {
            CategoricalColumn::Brand => &record.brand,
            CategoricalColumn::Model => &record.model,
            CategoricalColumn::FuelType => &record.fuel_type,
            CategoricalColumn::City => &record.city,
            CategoricalColumn::Owner => &record.owner,
        }
    }
}

/// Числовые признаки, которые передаются в модель без изменений
pub const PASSTHROUGH_COLUMNS: [&str; 2] = ["Year", "Kms_Driven"];

/// Ячейка исходной таблицы
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    /// Текстовое представление ячейки; целые числа без дробной части
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Number(n) => Some(n.to_string()),
        }
    }
}

/// Таблица как она прочитана из файла: заголовок и строки
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

/// Поля формы предсказания (имена совпадают с полями HTML формы)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictForm {
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Kms_Driven")]
    pub kms_driven: Option<String>,
    pub fuel_type: Option<String>,
    pub city: Option<String>,
    pub owner: Option<String>,
}

/// Результат предсказания вместе с введёнными данными
#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutput {
    pub price: f64,
    pub record: CarRecord,
}
