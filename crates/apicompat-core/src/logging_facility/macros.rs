//! Canonical logging macros
//!
//! Every public entry point brackets its work with one start event and
//! exactly one end or end_error event.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use apicompat_core::log_op_start;
/// log_op_start!("compare_snapshots");
/// log_op_start!("compare_snapshots", before_version = "1.0.0");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apicompat_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apicompat_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use apicompat_core::log_op_end;
/// log_op_end!("compare_snapshots", duration_ms = 42);
/// log_op_end!("compare_snapshots", duration_ms = 42, change_count = 7u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apicompat_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apicompat_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError) and
/// records its kind, stable code and, when present, the change code.
///
/// # Example
///
/// ```
/// # use apicompat_core::{log_op_error, errors::ApiCompatError};
/// let err = ApiCompatError::UnknownChangeCode { code: "bogus".to_string() };
/// log_op_error!("parse_policy_str", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = apicompat_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            change_code = ex_err.change_code().unwrap_or(""),
        );
    }};
}
