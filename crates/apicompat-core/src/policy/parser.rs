//! Policy parser with validation
//!
//! Parses YAML and validates schema version, override names and change codes.

#![allow(clippy::result_large_err)]

use crate::errors::{ApiCompatError, ExError, ExErrorKind};
use crate::policy::format_v0::PolicyV0;
use crate::registry::ChangeCode;
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a policy file from a path
pub fn parse_policy_file(path: &Path) -> Result<PolicyV0, ExError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("parse_policy_file")
            .with_path(path.display().to_string())
            .with_message(format!("failed to read policy file: {}", e))
    })?;

    parse_policy_str(&content)
}

/// Parse a policy from a string
///
/// # Errors
///
/// - `InvalidPolicy` — YAML does not match the v0 format, unsupported
///   `schema_version`, an override without a name or codes, or a duplicate
///   override name
/// - `UnknownChangeCode` — a listed code is not in the registry
pub fn parse_policy_str(content: &str) -> Result<PolicyV0, ExError> {
    log_op_start!("parse_policy_str", byte_len = content.len() as u64);
    let start = std::time::Instant::now();

    let result = serde_yaml::from_str::<PolicyV0>(content)
        .map_err(|e| ApiCompatError::InvalidPolicy {
            reason: format!("YAML parse error: {}", e),
        })
        .and_then(|policy| validate_policy(&policy).map(|()| policy))
        .map_err(|e| {
            log_op_error!(
                "parse_policy_str",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            ExError::from(e).with_op("parse_policy_str")
        })?;

    log_op_end!(
        "parse_policy_str",
        duration_ms = start.elapsed().as_millis() as u64,
        override_count = result.overrides.len() as u64
    );

    Ok(result)
}

/// Validate a parsed policy
pub fn validate_policy(policy: &PolicyV0) -> Result<(), ApiCompatError> {
    if policy.schema_version != 0 {
        return Err(ApiCompatError::InvalidPolicy {
            reason: format!(
                "Unsupported schema_version: {}. Expected 0",
                policy.schema_version
            ),
        });
    }

    let mut names = HashSet::new();
    for entry in &policy.overrides {
        if entry.name.trim().is_empty() {
            return Err(ApiCompatError::InvalidPolicy {
                reason: "override name must not be empty".to_string(),
            });
        }
        if !names.insert(entry.name.as_str()) {
            return Err(ApiCompatError::InvalidPolicy {
                reason: format!("Duplicate override name: {}", entry.name),
            });
        }
        if entry.codes.is_empty() {
            return Err(ApiCompatError::InvalidPolicy {
                reason: format!("Override '{}' lists no codes", entry.name),
            });
        }
        parse_codes(&entry.codes)?;
    }

    parse_codes(&policy.filters.exclude_codes)?;

    Ok(())
}

/// Resolve code strings against the registry
pub fn parse_codes(codes: &[String]) -> Result<Vec<ChangeCode>, ApiCompatError> {
    codes.iter().map(|code| code.parse()).collect()
}
