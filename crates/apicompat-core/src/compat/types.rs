//! Assignability checks over textual type descriptions.
//!
//! A type is treated as a set of `|`-separated alternatives. `after` is a
//! compatible replacement for `before` when it accepts at least everything
//! `before` accepted.

use std::collections::BTreeSet;

/// The universal type.
pub const ANY_TYPE: &str = "any";

/// Trimmed, non-empty alternatives of a sum type.
pub fn type_alternatives(ty: &str) -> BTreeSet<&str> {
    ty.split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .collect()
}

/// True if `after` can replace `before` without breaking consumers.
pub fn are_compatible(before: &str, after: &str) -> bool {
    let before = before.trim();
    let after = after.trim();

    if before == after || after == ANY_TYPE {
        return true;
    }
    if before == ANY_TYPE {
        return false;
    }

    type_alternatives(before).is_subset(&type_alternatives(after))
}

pub fn are_not_compatible(before: &str, after: &str) -> bool {
    !are_compatible(before, after)
}

/// True if `after` strictly widens `before` (proper superset of alternatives).
pub fn is_more_applicable(before: &str, after: &str) -> bool {
    let before = before.trim();
    let after = after.trim();

    if before == after || before == ANY_TYPE {
        return false;
    }
    if after == ANY_TYPE {
        return true;
    }

    let before = type_alternatives(before);
    let after = type_alternatives(after);
    before.len() < after.len() && before.is_subset(&after)
}
