//! Core types shared across apicompat facilities
//!
//! This crate holds the canonical schema constants used by the logging
//! facility and by anything that inspects its structured events.

pub mod schema;
