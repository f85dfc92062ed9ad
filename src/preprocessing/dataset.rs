//! Подготовка обучающей выборки из сырой таблицы

use ndarray::Array1;

use crate::error::DatasetError;
use crate::preprocessing::cleaning::{clean_kms, clean_price, clean_year};
use crate::types::{CarRecord, RawCell, RawTable, DEFAULT_CITY, DEFAULT_OWNER};

/// Соответствие колонок исходного файла каноническим именам
const COLUMN_RENAMES: [(&str, &str); 6] = [
    ("company", "brand"),
    ("name", "model"),
    ("year", "Year"),
    ("kms_driven", "Kms_Driven"),
    ("fuel_type", "fuel_type"),
    ("Price", "Price"),
];

/// Очищенная выборка: признаки и цены
#[derive(Debug, Clone)]
pub struct CleanDataset {
    pub records: Vec<CarRecord>,
    pub prices: Array1<f64>,
    pub dropped: usize,
}

impl CleanDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct ColumnIndex {
    brand: usize,
    model: usize,
    year: usize,
    kms: usize,
    fuel: usize,
    price: usize,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        let canonical: Vec<&str> = headers
            .iter()
            .map(|h| {
                let h = h.trim();
                COLUMN_RENAMES
                    .iter()
                    .find(|(source, _)| *source == h)
                    .map_or(h, |(_, target)| *target)
            })
            .collect();

        let find = |name: &'static str| {
            canonical
                .iter()
                .position(|c| *c == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            brand: find("brand")?,
            model: find("model")?,
            year: find("Year")?,
            kms: find("Kms_Driven")?,
            fuel: find("fuel_type")?,
            price: find("Price")?,
        })
    }
}

pub struct DatasetBuilder;

impl DatasetBuilder {
    /// Переименование колонок, очистка, удаление строк без цены/года/пробега
    pub fn build(table: &RawTable) -> Result<CleanDataset, DatasetError> {
        let columns = ColumnIndex::resolve(&table.headers)?;

        let before = table.rows.len();
        let mut records = Vec::with_capacity(before);
        let mut prices = Vec::with_capacity(before);

        for row in &table.rows {
            let text = |idx: usize| row.get(idx).and_then(RawCell::as_text);

            let price = text(columns.price).and_then(|s| clean_price(&s));
            let year = text(columns.year).and_then(|s| clean_year(&s));
            let kms_driven = text(columns.kms).and_then(|s| clean_kms(&s));

            let (Some(price), Some(year), Some(kms_driven)) = (price, year, kms_driven) else {
                continue;
            };

            records.push(CarRecord {
                brand: text(columns.brand).unwrap_or_default(),
                model: text(columns.model).unwrap_or_default(),
                year,
                kms_driven,
                fuel_type: text(columns.fuel).unwrap_or_default(),
                city: DEFAULT_CITY.to_string(),
                owner: DEFAULT_OWNER.to_string(),
            });
            prices.push(price);
        }

        let dropped = before - records.len();
        tracing::info!(
            "Dropped {} rows with missing/invalid Price, Year, or Kms ({} kept)",
            dropped,
            records.len()
        );

        Ok(CleanDataset {
            records,
            prices: Array1::from(prices),
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_string())
    }

    fn sample_table() -> RawTable {
        RawTable {
            headers: ["name", "company", "year", "Price", "kms_driven", "fuel_type"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![text("Swift"), text("Maruti"), RawCell::Number(2015.0), text("4,25,000"), text("45,000 kms"), text("Petrol")],
                vec![text("i20"), text("Hyundai"), RawCell::Number(2014.0), text("Ask For Price"), text("30,000 kms"), text("Petrol")],
                vec![text("Jeep"), text("Mahindra"), text("2012"), RawCell::Number(325000.0), text("kms"), text("Diesel")],
                vec![text("Alto"), text("Maruti"), RawCell::Empty, text("150000"), text("12,000 kms"), text("Petrol")],
                vec![text("Innova"), text("Toyota"), RawCell::Number(2010.0), RawCell::Number(550000.0), RawCell::Number(120000.0), text("Diesel")],
            ],
        }
    }

    #[test]
    fn drops_rows_missing_price_year_or_kms() {
        let dataset = DatasetBuilder::build(&sample_table()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped, 3);
        assert_eq!(dataset.prices.to_vec(), vec![425000.0, 550000.0]);
        assert!(dataset.len() <= sample_table().rows.len());
    }

    #[test]
    fn renames_columns_and_injects_defaults() {
        let dataset = DatasetBuilder::build(&sample_table()).unwrap();
        let first = &dataset.records[0];

        assert_eq!(first.brand, "Maruti");
        assert_eq!(first.model, "Swift");
        assert_eq!(first.year, 2015);
        assert_eq!(first.kms_driven, 45000);
        assert_eq!(first.city, DEFAULT_CITY);
        assert_eq!(first.owner, DEFAULT_OWNER);
        assert_eq!(dataset.records[1].kms_driven, 120000);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let mut table = sample_table();
        table.headers[3] = "Cost".to_string();
        let err = DatasetBuilder::build(&table).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("Price")));
    }

    #[test]
    fn short_rows_are_dropped_not_panicking() {
        let mut table = sample_table();
        table.rows.push(vec![text("Nano")]);
        let dataset = DatasetBuilder::build(&table).unwrap();
        assert_eq!(dataset.dropped, 4);
    }
}
