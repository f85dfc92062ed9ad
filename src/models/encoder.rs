//! One-hot кодирование категориальных колонок

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::{CarRecord, CategoricalColumn, PASSTHROUGH_COLUMNS};

/// Кодировщик признаков: one-hot блоки категорий, затем Year и Kms_Driven как есть.
///
/// Неизвестная на этапе предсказания категория даёт нулевой блок.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnEncoder {
    /// Отсортированные категории для каждой колонки из `CategoricalColumn::ALL`
    categories: Vec<Vec<String>>,
}

impl ColumnEncoder {
    pub fn fit(records: &[CarRecord]) -> Result<Self, ModelError> {
        if records.is_empty() {
            return Err(ModelError::EmptyTrainingSet);
        }

        let categories = CategoricalColumn::ALL
            .iter()
            .map(|column| {
                let mut seen: Vec<String> = records
                    .iter()
                    .map(|r| column.value(r).to_string())
                    .collect();
                seen.sort();
                seen.dedup();
                seen
            })
            .collect();

        Ok(Self { categories })
    }

    pub fn n_features(&self) -> usize {
        self.categories.iter().map(Vec::len).sum::<usize>() + PASSTHROUGH_COLUMNS.len()
    }

    pub fn categories(&self, column: CategoricalColumn) -> &[String] {
        let idx = CategoricalColumn::ALL
            .iter()
            .position(|c| *c == column)
            .unwrap_or_default();
        &self.categories[idx]
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.n_features());
        for (column, cats) in CategoricalColumn::ALL.iter().zip(&self.categories) {
            names.extend(cats.iter().map(|c| format!("{}_{}", column.name(), c)));
        }
        names.extend(PASSTHROUGH_COLUMNS.iter().map(|s| s.to_string()));
        names
    }

    pub fn transform(&self, records: &[CarRecord]) -> Array2<f64> {
        let mut features = Array2::zeros((records.len(), self.n_features()));

        for (i, record) in records.iter().enumerate() {
            let mut offset = 0;
            for (column, cats) in CategoricalColumn::ALL.iter().zip(&self.categories) {
                if let Ok(pos) = cats.binary_search_by(|c| c.as_str().cmp(column.value(record))) {
                    features[[i, offset + pos]] = 1.0;
                }
                offset += cats.len();
            }
            features[[i, offset]] = record.year as f64;
            features[[i, offset + 1]] = record.kms_driven as f64;
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(brand: &str, model: &str, fuel: &str) -> CarRecord {
        CarRecord {
            brand: brand.into(),
            model: model.into(),
            year: 2015,
            kms_driven: 45000,
            fuel_type: fuel.into(),
            city: "Unknown".into(),
            owner: "1".into(),
        }
    }

    #[test]
    fn layout_is_one_hot_blocks_then_passthrough() {
        let records = vec![
            record("maruti", "swift", "Petrol"),
            record("hyundai", "i20", "Diesel"),
        ];
        let encoder = ColumnEncoder::fit(&records).unwrap();

        assert_eq!(
            encoder.feature_names(),
            vec![
                "brand_hyundai", "brand_maruti", "model_i20", "model_swift",
                "fuel_type_Diesel", "fuel_type_Petrol", "city_Unknown", "owner_1",
                "Year", "Kms_Driven",
            ]
        );

        let x = encoder.transform(&records[..1]);
        assert_eq!(
            x.row(0).to_vec(),
            vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 2015.0, 45000.0]
        );
    }

    #[test]
    fn unknown_category_encodes_as_zeros() {
        let encoder = ColumnEncoder::fit(&[record("maruti", "swift", "Petrol")]).unwrap();
        let mut unseen = record("tesla", "model s", "Electric");
        unseen.city = "Pune".into();
        unseen.owner = "3".into();

        let x = encoder.transform(&[unseen]);
        let one_hot_width = encoder.n_features() - PASSTHROUGH_COLUMNS.len();
        assert!(x.row(0).iter().take(one_hot_width).all(|v| *v == 0.0));
        assert_eq!(x[[0, one_hot_width]], 2015.0);
    }

    #[test]
    fn fitting_on_nothing_fails() {
        assert!(matches!(
            ColumnEncoder::fit(&[]),
            Err(ModelError::EmptyTrainingSet)
        ));
    }
}
