use crate::checkers::CheckerSet;
use crate::compare::model::{Change, ComparisonResult, Versions};
use crate::model::{Signature, Snapshot};
use crate::{log_op_end, log_op_start};
use std::collections::HashMap;

/// Compare two snapshots with the given checker set.
///
/// Never fails: checkers are total over well-formed signatures.
pub fn compare_snapshots<'a>(
    before: &'a Snapshot,
    after: &'a Snapshot,
    checkers: &CheckerSet,
) -> ComparisonResult<'a> {
    log_op_start!(
        "compare_snapshots",
        before_version = before.version.as_str(),
        after_version = after.version.as_str(),
        signature_count = before.signatures.len() as u64,
        checker_count = checkers.len() as u64
    );
    let start = std::time::Instant::now();

    let lookup = index_by_qualified_name(&after.signatures);

    let mut changes: Vec<Change<'a>> =
        Vec::with_capacity(before.signatures.len() * checkers.len());
    for signature in &before.signatures {
        let counterpart = lookup.get(&signature.qualified_name()).copied();
        changes.extend(
            checkers
                .iter()
                .map(|checker| checker.check(signature, counterpart)),
        );
    }

    let result = ComparisonResult {
        versions: Versions {
            before: before.version.clone(),
            after: after.version.clone(),
        },
        changes,
    };

    log_op_end!(
        "compare_snapshots",
        duration_ms = start.elapsed().as_millis() as u64,
        change_count = result.changes.len() as u64,
        breaking_count = result.breaking().count() as u64
    );

    result
}

/// Last write wins on duplicate names; each collision is logged.
fn index_by_qualified_name(signatures: &[Signature]) -> HashMap<String, &Signature> {
    let mut lookup = HashMap::with_capacity(signatures.len());
    for signature in signatures {
        let name = signature.qualified_name();
        if lookup.insert(name.clone(), signature).is_some() {
            tracing::warn!(
                qualified_name = name.as_str(),
                path = signature.path.as_str(),
                "duplicate qualified name in after snapshot; keeping the last signature"
            );
        }
    }
    lookup
}
