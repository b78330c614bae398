//! Table catalog
//!
//! Availability filtering by required seat count and the live text filter
//! applied on top of it.

mod availability;
mod table_catalog;

pub use availability::available_tables;
pub use table_catalog::{filter_tables, EmptyMatch, TableCatalog, MIN_QUERY_LEN};
