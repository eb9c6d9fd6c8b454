//! Declarative updater/filter policy.
//!
//! A [`Policy`] owns the updaters and filters handed to
//! [`process_changes`]. It is built in code or from a YAML document:
//!
//! ```yaml
//! schema_version: 0
//! overrides:
//!   - name: allow-enum-additions
//!     codes: [enum_values_added]
//!     status: compatible
//!     reason: enum is closed
//! filters:
//!   exclude_no_change: true
//! ```

#![allow(clippy::result_large_err)]

pub mod format_v0;
pub mod parser;

pub use format_v0::{FiltersV0, OverrideV0, PolicyV0};
pub use parser::{parse_policy_file, parse_policy_str, validate_policy};

use crate::compare::ComparisonResult;
use crate::errors::{ApiCompatError, ExError};
use crate::processor::{
    process_changes, ChangeFilter, ChangeUpdater, CodeFilter, CodeOverride, ExcludeNoChange,
    MemberFilter, ProcessedChange, StatusFilter,
};
use std::fmt;
use std::path::Path;

#[derive(Default)]
pub struct Policy {
    updaters: Vec<Box<dyn ChangeUpdater>>,
    filters: Vec<Box<dyn ChangeFilter>>,
}

impl Policy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_updater(mut self, updater: impl ChangeUpdater + 'static) -> Self {
        self.updaters.push(Box::new(updater));
        self
    }

    pub fn with_filter(mut self, filter: impl ChangeFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Build the updaters and filters a validated document describes.
    pub fn from_document(document: &PolicyV0) -> Result<Self, ApiCompatError> {
        validate_policy(document)?;

        let mut policy = Policy::new();
        for entry in &document.overrides {
            let mut updater = CodeOverride::new(
                entry.name.clone(),
                parser::parse_codes(&entry.codes)?,
                entry.status,
                entry.reason.clone(),
            )
            .with_members(entry.members.clone());
            if let Some(message) = &entry.message {
                updater = updater.with_message(message.clone());
            }
            policy = policy.with_updater(updater);
        }

        let filters = &document.filters;
        if filters.exclude_no_change {
            policy = policy.with_filter(ExcludeNoChange);
        }
        if !filters.statuses.is_empty() {
            policy = policy.with_filter(StatusFilter::new(filters.statuses.clone()));
        }
        if !filters.exclude_codes.is_empty() {
            policy = policy.with_filter(CodeFilter::new(parser::parse_codes(&filters.exclude_codes)?));
        }
        if !filters.exclude_members.is_empty() {
            policy = policy.with_filter(MemberFilter::new(filters.exclude_members.clone()));
        }

        Ok(policy)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ExError> {
        let document = parse_policy_str(content)?;
        Ok(Self::from_document(&document)?)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, ExError> {
        let document = parse_policy_file(path)?;
        Ok(Self::from_document(&document)?)
    }

    pub fn updater_count(&self) -> usize {
        self.updaters.len()
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Run the change processor with this policy's updaters and filters.
    pub fn process<'a>(
        &self,
        result: ComparisonResult<'a>,
    ) -> Result<Vec<ProcessedChange<'a>>, ExError> {
        let updaters: Vec<&dyn ChangeUpdater> = self.updaters.iter().map(|u| u.as_ref()).collect();
        let filters: Vec<&dyn ChangeFilter> = self.filters.iter().map(|f| f.as_ref()).collect();
        process_changes(result, &updaters, &filters)
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.updaters.iter().map(|u| u.name()).collect();
        f.debug_struct("Policy")
            .field("updaters", &names)
            .field("filter_count", &self.filters.len())
            .finish()
    }
}
