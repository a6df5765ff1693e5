//! Reindexing of the yearly/weekly/country aggregation.
//!
//! The raw search response is first scanned for the full country set, then
//! traversed again to file each weekly record under its calendar year,
//! country and ISO week number.

pub mod calendar;
pub mod countries;
pub mod transform;
pub mod types;
