//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain service: routing,
//! JSON (de)serialisation and mapping domain outcomes to status codes.

pub mod rest;

pub use rest::*;
