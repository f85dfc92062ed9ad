/// Модуль предобработки данных

pub mod cleaning;
pub mod dataset;
pub mod spreadsheet;

pub use cleaning::{clean_kms, clean_price, clean_year};
pub use dataset::{CleanDataset, DatasetBuilder};
pub use spreadsheet::load_table;
