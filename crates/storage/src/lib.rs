#![forbid(unsafe_code)]

pub mod csv_source;
pub mod repository;

pub use csv_source::{ColumnMap, ColumnPreset, CsvSource};
pub use repository::{DataFormatError, DatasetSource, Datasets, InMemorySource};
