//! Data module - CSV loading, reshaping and aggregation

mod aggregator;
mod loader;
mod processor;
mod records;

pub use aggregator::{AggregateError, Aggregator};
pub use loader::{DataLoader, LoaderError};
pub use processor::DataProcessor;
pub use records::{
    BoroughYearRecord, CrimeTables, LongRecord, RawRecord, WideTable, YearMonth,
    YearMonthParseError, YearlyRecord,
};
