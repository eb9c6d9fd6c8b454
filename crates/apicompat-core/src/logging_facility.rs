//! Structured logging facility for apicompat
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use apicompat_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! Public entry points (`compare_snapshots`, `process_changes`,
//! `parse_snapshot_bytes`, `parse_policy_str`) own the start/end events.
//! Checkers and utilities stay silent; the comparator only adds
//! `tracing::warn!` for qualified-name collisions.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
