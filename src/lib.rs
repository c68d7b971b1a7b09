pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod store;

pub use config::Config;
pub use domain::{Decimal, FeeConfig, Lot, LotBook, LotField};
pub use engine::{Aggregate, CalculatorReport, ProfitProjection, SpendRow};
pub use error::AppError;
pub use orchestration::Session;
pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
