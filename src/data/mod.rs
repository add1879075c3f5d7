//! Data module - CSV loading, caching and filtering

mod cache;
mod dates;
mod filter;
mod loader;
mod table;

pub use cache::{DatasetCache, FileFingerprint};
pub use dates::{month_bucket, parse_order_date};
pub use filter::RecordFilter;
pub use loader::{
    decode_text, DataLoader, Dataset, LoadError, LoadOptions, LoadWarning, DEFAULT_ENCODING,
    DEFAULT_INFER_SCHEMA_LENGTH,
};
pub use table::{display_cell, numeric_values, text_values, TableError};

pub const COUNTRY: &str = "COUNTRY";
pub const PRODUCT_LINE: &str = "PRODUCTLINE";
pub const SALES: &str = "SALES";
pub const QUANTITY_ORDERED: &str = "QUANTITYORDERED";
pub const PRICE_EACH: &str = "PRICEEACH";
pub const ORDER_DATE: &str = "ORDERDATE";
pub const MONTH: &str = "MONTH";

/// Month bucket used when the source has no order date column.
pub const UNKNOWN_MONTH: &str = "Unknown";
