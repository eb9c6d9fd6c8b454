//! Policy format v0
//!
//! Declarative YAML form of the updater/filter configuration.

use crate::registry::ChangeStatus;
use serde::{Deserialize, Serialize};

/// Top-level policy document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Status overrides, each becoming one updater
    #[serde(default)]
    pub overrides: Vec<OverrideV0>,

    #[serde(default)]
    pub filters: FiltersV0,
}

/// One override: reclassify changes with any of `codes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverrideV0 {
    /// Unique updater name, reported on conflicts
    pub name: String,

    /// Change codes the override claims
    pub codes: Vec<String>,

    pub status: ChangeStatus,

    /// Why the change is reclassified
    pub reason: String,

    /// Replacement message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Qualified-name prefixes the override is limited to
    #[serde(default)]
    pub members: Vec<String>,
}

/// Filters; all configured filters must accept a change for it to be kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersV0 {
    #[serde(default)]
    pub exclude_no_change: bool,

    /// Keep only these effective statuses; empty keeps every status
    #[serde(default)]
    pub statuses: Vec<ChangeStatus>,

    #[serde(default)]
    pub exclude_codes: Vec<String>,

    /// Qualified-name prefixes to drop
    #[serde(default)]
    pub exclude_members: Vec<String>,
}
