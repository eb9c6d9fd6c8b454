#![allow(clippy::result_large_err)]

use crate::compare::{Change, ComparisonResult};
use crate::errors::{ApiCompatError, ExError};
use crate::processor::{ChangeFilter, ChangeUpdater, ProcessedChange};
use crate::{log_op_end, log_op_error, log_op_start};

/// Annotate, update and filter the changes of a comparison.
///
/// # Errors
///
/// - `ConflictingUpdaters` — two or more updaters are applicable to one
///   change. The whole call fails; no partial result is returned.
pub fn process_changes<'a>(
    result: ComparisonResult<'a>,
    updaters: &[&dyn ChangeUpdater],
    filters: &[&dyn ChangeFilter],
) -> Result<Vec<ProcessedChange<'a>>, ExError> {
    log_op_start!(
        "process_changes",
        change_count = result.changes.len() as u64,
        updater_count = updaters.len() as u64,
        filter_count = filters.len() as u64
    );
    let start = std::time::Instant::now();

    let processed = process_changes_impl(result, updaters, filters).map_err(|e| {
        log_op_error!(
            "process_changes",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "process_changes",
        duration_ms = start.elapsed().as_millis() as u64,
        change_count = processed.len() as u64
    );

    Ok(processed)
}

fn process_changes_impl<'a>(
    result: ComparisonResult<'a>,
    updaters: &[&dyn ChangeUpdater],
    filters: &[&dyn ChangeFilter],
) -> Result<Vec<ProcessedChange<'a>>, ExError> {
    let ComparisonResult { versions, changes } = result;

    let mut updated = Vec::with_capacity(changes.len());
    for change in changes {
        let update = match applicable_updater(&change, updaters)? {
            Some(updater) => {
                tracing::debug!(
                    change_code = change.code().as_str(),
                    updater = updater.name(),
                    "updater applied"
                );
                Some(updater.update(&change))
            }
            None => None,
        };

        let processed = ProcessedChange::new(change, versions.clone());
        updated.push(match update {
            Some(update) => processed.with_update(update),
            None => processed,
        });
    }

    Ok(updated
        .into_iter()
        .filter(|change| filters.iter().all(|f| f.is_applicable(change)))
        .collect())
}

fn applicable_updater<'u>(
    change: &Change<'_>,
    updaters: &[&'u dyn ChangeUpdater],
) -> Result<Option<&'u dyn ChangeUpdater>, ExError> {
    let applicable: Vec<&'u dyn ChangeUpdater> = updaters
        .iter()
        .copied()
        .filter(|u| u.is_applicable(change))
        .collect();

    match applicable.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        many => {
            let after = change.signatures.after;
            let err: ExError = ApiCompatError::ConflictingUpdaters {
                code: change.code().as_str().to_string(),
                updaters: many.iter().map(|u| u.name().to_string()).collect(),
                member: after.map(|s| s.qualified_name()),
                path: after.map(|s| s.path.clone()),
            }
            .into();
            Err(err.with_op("process_changes"))
        }
    }
}
