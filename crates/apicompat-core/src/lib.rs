//! apicompat core - API backward-compatibility detection engine
//!
//! This crate compares two snapshots of a library's public API and classifies
//! every detected difference as breaking or compatible:
//! - Signature model for exported members (functions, constants, classes,
//!   enums, interfaces, type aliases) and its JSON snapshot decoder
//! - Type-compatibility and parameter/method matching predicates
//! - Change registry and the checker set built from reusable rule factories
//! - Deterministic snapshot comparator
//! - Change processor with updater/filter hooks and a YAML policy format
//!
//! ```ignore
//! use apicompat_core::{compare_snapshots, parse_snapshot_bytes, CheckerSet, Policy};
//!
//! let before = parse_snapshot_bytes(&before_bytes)?;
//! let after = parse_snapshot_bytes(&after_bytes)?;
//! let result = compare_snapshots(&before, &after, CheckerSet::builtin());
//! let changes = Policy::from_yaml_str(policy_yaml)?.process(result)?;
//! ```

pub mod checkers;
pub mod compare;
pub mod compat;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod processor;
pub mod registry;

// Re-export commonly used types
pub use checkers::{Checker, CheckerSet};
pub use compare::{compare_snapshots, Change, ComparisonResult, Versions};
pub use errors::{ApiCompatError, ExError, ExErrorKind, Result};
pub use model::{parse_snapshot_bytes, MemberType, Signature, SignatureKind, Snapshot};
pub use policy::{parse_policy_file, parse_policy_str, Policy};
pub use processor::{
    process_changes, ChangeFilter, ChangeUpdate, ChangeUpdater, ProcessedChange, ReleaseVerdict,
};
pub use registry::{ChangeAction, ChangeCode, ChangeInfo, ChangeStatus};
