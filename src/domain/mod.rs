pub mod date_range;

pub use date_range::{DateRange, DateRangeQuery};
