//! Versioned API snapshot and its JSON decoder.

#![allow(clippy::result_large_err)]

use crate::errors::{ExError, ExErrorKind};
use crate::model::signature::Signature;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One release of a library's public API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    pub signatures: Vec<Signature>,
}

impl Snapshot {
    pub fn new(version: impl Into<String>, signatures: Vec<Signature>) -> Self {
        Self {
            version: version.into(),
            signatures,
        }
    }
}

/// Decode extractor output into a [`Snapshot`].
///
/// # Errors
///
/// - `InvalidSnapshot` — bytes are not valid UTF-8, not valid JSON, the root is
///   not an object, or a signature does not match the wire format
/// - `MissingField` — `version` or `signatures` is absent
pub fn parse_snapshot_bytes(bytes: &[u8]) -> Result<Snapshot, ExError> {
    log_op_start!("parse_snapshot_bytes", byte_len = bytes.len() as u64);
    let start = std::time::Instant::now();

    let result = parse_snapshot_bytes_impl(bytes).map_err(|e| {
        log_op_error!(
            "parse_snapshot_bytes",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "parse_snapshot_bytes",
        duration_ms = start.elapsed().as_millis() as u64,
        signature_count = result.signatures.len() as u64
    );

    Ok(result)
}

fn parse_snapshot_bytes_impl(bytes: &[u8]) -> Result<Snapshot, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("snapshot is not valid UTF-8: {}", e))
    })?;

    let raw: Value = serde_json::from_str(text).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("snapshot is not valid JSON: {}", e))
    })?;

    let obj = raw.as_object().ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message("snapshot JSON root must be an object")
    })?;

    for field in ["version", "signatures"] {
        if !obj.contains_key(field) {
            return Err(ExError::new(ExErrorKind::MissingField)
                .with_op("parse_snapshot_bytes")
                .with_message(format!("required field `{}` is absent", field)));
        }
    }

    serde_json::from_value(raw).map_err(|e| {
        ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot_bytes")
            .with_message(format!("failed to deserialize snapshot: {}", e))
    })
}
