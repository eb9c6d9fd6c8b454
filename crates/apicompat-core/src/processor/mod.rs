//! Change processor
//!
//! Post-processing of a [`ComparisonResult`](crate::compare::ComparisonResult):
//! every change is annotated with the compared versions, at most one
//! [`ChangeUpdater`] may reclassify it, and the result is narrowed by the
//! conjunction of all [`ChangeFilter`]s.

pub mod builtin;
pub mod engine;

pub use builtin::{CodeFilter, CodeOverride, ExcludeNoChange, MemberFilter, ReleaseVerdict, StatusFilter};
pub use engine::process_changes;

use crate::compare::{Change, Versions};
use crate::registry::ChangeStatus;
use serde::Serialize;

/// Override hook that may reclassify a change.
///
/// An updater declares which changes it claims through
/// [`is_applicable`](ChangeUpdater::is_applicable). Two updaters claiming the
/// same change is a configuration error.
pub trait ChangeUpdater: Send + Sync {
    /// Name used to identify the updater in conflict reports
    fn name(&self) -> &str;

    fn is_applicable(&self, change: &Change<'_>) -> bool;

    fn update(&self, change: &Change<'_>) -> ChangeUpdate;
}

/// Accept/reject predicate over processed changes.
pub trait ChangeFilter: Send + Sync {
    /// `true` keeps the change
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool;
}

impl<F> ChangeFilter for F
where
    F: Fn(&ProcessedChange<'_>) -> bool + Send + Sync,
{
    fn is_applicable(&self, change: &ProcessedChange<'_>) -> bool {
        self(change)
    }
}

/// Reclassification produced by an updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeUpdate {
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub update_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedChange<'a> {
    #[serde(flatten)]
    pub change: Change<'a>,
    pub versions: Versions,
    pub is_updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<ChangeUpdate>,
}

impl<'a> ProcessedChange<'a> {
    pub fn new(change: Change<'a>, versions: Versions) -> Self {
        Self {
            change,
            versions,
            is_updated: false,
            update: None,
        }
    }

    pub fn with_update(mut self, update: ChangeUpdate) -> Self {
        self.is_updated = true;
        self.update = Some(update);
        self
    }

    /// Status after any update.
    pub fn effective_status(&self) -> ChangeStatus {
        self.update
            .as_ref()
            .map(|u| u.status)
            .unwrap_or(self.change.info.status)
    }

    /// Message after any update; an update without a message keeps the
    /// checker's.
    pub fn effective_message(&self) -> Option<&str> {
        self.update
            .as_ref()
            .and_then(|u| u.message.as_deref())
            .or(self.change.message.as_deref())
    }
}
