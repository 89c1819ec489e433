//! # REST API Interface Layer
//!
//! HTTP endpoints for the day tracker:
//!
//! - `GET /api/day/:date` - the record for a date (default if none)
//! - `POST /api/day/:date` - replace the record for a date
//! - `GET /api/days` - summaries of every stored date, newest first
//! - `DELETE /api/day/:date` - remove the record for a date
//!
//! Handlers only translate between HTTP and the domain service; error detail
//! goes to the log, never to the client.

pub mod day_apis;

pub use day_apis::*;
