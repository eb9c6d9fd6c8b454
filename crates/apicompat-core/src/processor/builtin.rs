//! Built-in filters, the code override updater and the release verdict.

use crate::compare::Change;
use crate::processor::{ChangeFilter, ChangeUpdate, ChangeUpdater, ProcessedChange};
use crate::registry::{ChangeCode, ChangeStatus};
use serde::Serialize;
use std::collections::HashSet;

/// True if `qualified_name` is `prefix` itself or declared inside it.
fn within(qualified_name: &str, prefix: &str) -> bool {
    qualified_name == prefix
        || qualified_name
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Drops `no_change` sentinels.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeNoChange;

impl ChangeFilter for ExcludeNoChange {
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool {
        !change.change.is_no_change()
    }
}

/// Keeps only changes whose effective status is listed.
#[derive(Debug, Clone, Default)]
pub struct StatusFilter {
    statuses: Vec<ChangeStatus>,
}

impl StatusFilter {
    pub fn new(statuses: Vec<ChangeStatus>) -> Self {
        Self { statuses }
    }
}

impl ChangeFilter for StatusFilter {
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool {
        self.statuses.contains(&change.effective_status())
    }
}

/// Drops changes with any of the given codes.
#[derive(Debug, Clone, Default)]
pub struct CodeFilter {
    excluded: HashSet<ChangeCode>,
}

impl CodeFilter {
    pub fn new(excluded: impl IntoIterator<Item = ChangeCode>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }
}

impl ChangeFilter for CodeFilter {
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool {
        !self.excluded.contains(&change.change.code())
    }
}

/// Drops changes on members at or below any of the given qualified-name
/// prefixes (`Internal` matches `Internal` and `Internal.x`, not `Internals`).
#[derive(Debug, Clone, Default)]
pub struct MemberFilter {
    prefixes: Vec<String>,
}

impl MemberFilter {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }
}

impl ChangeFilter for MemberFilter {
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool {
        let name = change.change.qualified_name();
        !self.prefixes.iter().any(|prefix| within(&name, prefix))
    }
}

/// Reclassifies every change with one of `codes`, optionally restricted to
/// members at or below `members`.
#[derive(Debug, Clone)]
pub struct CodeOverride {
    pub name: String,
    pub codes: HashSet<ChangeCode>,
    /// Qualified-name prefixes; empty applies to every member
    pub members: Vec<String>,
    pub status: ChangeStatus,
    pub reason: String,
    pub message: Option<String>,
}

impl CodeOverride {
    pub fn new(
        name: impl Into<String>,
        codes: impl IntoIterator<Item = ChangeCode>,
        status: ChangeStatus,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            codes: codes.into_iter().collect(),
            members: Vec::new(),
            status,
            reason: reason.into(),
            message: None,
        }
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ChangeUpdater for CodeOverride {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_applicable(&self, change: &Change<'_>) -> bool {
        if !self.codes.contains(&change.code()) {
            return false;
        }
        if self.members.is_empty() {
            return true;
        }
        let name = change.qualified_name();
        self.members.iter().any(|prefix| within(&name, prefix))
    }

    fn update(&self, _change: &Change<'_>) -> ChangeUpdate {
        ChangeUpdate {
            status: self.status,
            message: self.message.clone(),
            update_reason: self.reason.clone(),
        }
    }
}

/// Counts by effective status, the input to release gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReleaseVerdict {
    pub breaking: usize,
    pub compatible: usize,
    /// `no_change` sentinels
    pub unchanged: usize,
}

impl ReleaseVerdict {
    pub fn from_changes(changes: &[ProcessedChange<'_>]) -> Self {
        let mut verdict = Self::default();
        for change in changes {
            if change.change.is_no_change() {
                verdict.unchanged += 1;
                continue;
            }
            match change.effective_status() {
                ChangeStatus::Breaking => verdict.breaking += 1,
                ChangeStatus::Compatible => verdict.compatible += 1,
            }
        }
        verdict
    }

    /// Any breaking change requires a major version bump.
    pub fn requires_major(&self) -> bool {
        self.breaking > 0
    }
}
