/// ML модели

pub mod encoder;
pub mod forest;
pub mod pipeline;
pub mod training;

pub use encoder::ColumnEncoder;
pub use forest::RandomForestRegressor;
pub use pipeline::CarPricePipeline;
pub use training::{train, train_test_split, TrainingConfig, TrainingReport};
