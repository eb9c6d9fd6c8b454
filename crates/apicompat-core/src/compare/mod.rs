//! Snapshot comparator.
//!
//! Matches signatures of two snapshots by qualified name and runs every
//! checker against every matched pair.
//!
//! ## Entry point
//!
//! ```ignore
//! use apicompat_core::{compare_snapshots, CheckerSet};
//!
//! let result = compare_snapshots(&before, &after, CheckerSet::builtin());
//! let digest = result.digest()?;
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: changes are ordered by before-signature order, then by
//!   checker registration order.
//! - **One change per cell**: every (signature, checker) cell yields exactly
//!   one change, `no_change` included.
//! - **Name collisions**: duplicate qualified names in the after snapshot
//!   resolve last-write-wins and are logged at `warn`.

pub mod engine;
pub mod model;

pub use engine::compare_snapshots;
pub use model::{Change, ChangeSignatures, ComparisonResult, Versions};
