//! # Domain Module
//!
//! Business rules for day records: default-record synthesis on read,
//! `lastModified` stamping on save and summary aggregation for listings.
//! Storage is reached only through the [`DayStorage`](crate::storage::DayStorage)
//! trait object the service is built with.

pub mod clock;
pub mod day_record_service;
pub mod summary;

pub use clock::{Clock, SystemClock};
pub use day_record_service::DayRecordService;
pub use summary::{block_minutes, summarize_stored_day, MINUTES_PER_SLOT};
