#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::processor::{CodeFilter, CodeOverride, ExcludeNoChange, MemberFilter, StatusFilter};
use apicompat_core::{
    compare_snapshots, process_changes, Change, ChangeCode, ChangeFilter, ChangeStatus,
    ChangeUpdate, ChangeUpdater, CheckerSet, ComparisonResult, ExErrorKind, ProcessedChange,
    ReleaseVerdict, Snapshot,
};
use common::snapshot;
use serde_json::json;

/// Claims every change it sees.
struct Always {
    name: &'static str,
}

impl ChangeUpdater for Always {
    fn name(&self) -> &str {
        self.name
    }

    fn is_applicable(&self, _change: &Change<'_>) -> bool {
        true
    }

    fn update(&self, _change: &Change<'_>) -> ChangeUpdate {
        ChangeUpdate {
            status: ChangeStatus::Compatible,
            message: Some(format!("accepted by {}", self.name)),
            update_reason: "reviewed".to_string(),
        }
    }
}

fn snapshots() -> (Snapshot, Snapshot) {
    let before = snapshot(
        "1.0.0",
        vec![
            json!({"memberType": "constant", "memberName": "a", "type": "number", "path": "src/a.ts"}),
            json!({"memberType": "constant", "memberName": "b", "namespace": "Internal", "type": "number"}),
        ],
    );
    let after = snapshot(
        "2.0.0",
        vec![json!({"memberType": "constant", "memberName": "a", "type": "string", "path": "src/a.ts"})],
    );
    (before, after)
}

fn compare<'a>(before: &'a Snapshot, after: &'a Snapshot) -> ComparisonResult<'a> {
    compare_snapshots(before, after, CheckerSet::builtin())
}

#[test]
fn test_without_updaters_every_change_passes_through() {
    let (before, after) = snapshots();
    let result = compare(&before, &after);
    let total = result.changes.len();

    let processed = process_changes(result, &[], &[]).unwrap();

    assert_eq!(processed.len(), total);
    assert!(processed.iter().all(|c| !c.is_updated && c.update.is_none()));
    assert!(processed
        .iter()
        .all(|c| c.versions.before == "1.0.0" && c.versions.after == "2.0.0"));
}

#[test]
fn test_single_applicable_updater_is_attached() {
    let (before, after) = snapshots();
    let updater = CodeOverride::new(
        "allow-constant-retype",
        [ChangeCode::ConstantTypeChanged],
        ChangeStatus::Compatible,
        "constant is documented as opaque",
    );

    let processed = process_changes(compare(&before, &after), &[&updater], &[&ExcludeNoChange]).unwrap();

    let retyped = processed
        .iter()
        .find(|c| c.change.code() == ChangeCode::ConstantTypeChanged)
        .unwrap();
    assert!(retyped.is_updated);
    assert_eq!(
        retyped.update,
        Some(updater.update(&retyped.change))
    );
    assert_eq!(retyped.effective_status(), ChangeStatus::Compatible);
    // no replacement message keeps the checker's
    assert_eq!(
        retyped.effective_message(),
        Some("Constant changed type:\n    from 'number' to 'string'")
    );

    let removed = processed
        .iter()
        .find(|c| c.change.code() == ChangeCode::MemberRemoval)
        .unwrap();
    assert!(!removed.is_updated);
    assert_eq!(removed.effective_status(), ChangeStatus::Breaking);
}

#[test]
fn test_two_applicable_updaters_fail_the_whole_call() {
    let (before, after) = snapshots();
    let first = Always { name: "first" };
    let second = Always { name: "second" };

    let err = process_changes(compare(&before, &after), &[&first, &second], &[]).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConflictingUpdaters);
    assert_eq!(err.op(), Some("process_changes"));
    assert_eq!(
        err.updaters(),
        Some(&["first".to_string(), "second".to_string()][..])
    );
    assert_eq!(err.member(), Some("a"));
    assert_eq!(err.path(), Some("src/a.ts"));
    let text = err.to_string();
    assert!(text.contains("first"));
    assert!(text.contains("second"));
}

#[test]
fn test_conflict_on_removed_member_has_no_location() {
    let before = snapshot("1.0.0", vec![json!({"memberType": "constant", "memberName": "gone", "type": "number"})]);
    let after = snapshot("2.0.0", vec![]);
    let first = Always { name: "first" };
    let second = Always { name: "second" };

    let err = process_changes(compare(&before, &after), &[&first, &second], &[]).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConflictingUpdaters);
    assert_eq!(err.member(), None);
    assert_eq!(err.path(), None);
}

#[test]
fn test_filters_combine_with_and() {
    let (before, after) = snapshots();
    let breaking_only = StatusFilter::new(vec![ChangeStatus::Breaking]);
    let public_only = MemberFilter::new(vec!["Internal".to_string()]);

    let both = process_changes(compare(&before, &after), &[], &[&ExcludeNoChange, &breaking_only, &public_only]).unwrap();
    let codes: Vec<ChangeCode> = both.iter().map(|c| c.change.code()).collect();
    assert_eq!(codes, vec![ChangeCode::ConstantTypeChanged]);

    // dropping the member filter lets the Internal.b removal back in
    let status_only = process_changes(compare(&before, &after), &[], &[&ExcludeNoChange, &breaking_only]).unwrap();
    let codes: Vec<ChangeCode> = status_only.iter().map(|c| c.change.code()).collect();
    assert_eq!(codes, vec![ChangeCode::ConstantTypeChanged, ChangeCode::MemberRemoval]);
}

#[test]
fn test_closure_filter_and_code_filter() {
    let (before, after) = snapshots();
    let only_a = |change: &ProcessedChange<'_>| change.change.qualified_name() == "a";
    let no_retype = CodeFilter::new([ChangeCode::ConstantTypeChanged]);
    let filters: [&dyn ChangeFilter; 3] = [&ExcludeNoChange, &only_a, &no_retype];

    let processed = process_changes(compare(&before, &after), &[], &filters).unwrap();
    assert!(processed.is_empty());
}

#[test]
fn test_status_filter_sees_updated_status() {
    let (before, after) = snapshots();
    let updater = CodeOverride::new(
        "allow-constant-retype",
        [ChangeCode::ConstantTypeChanged],
        ChangeStatus::Compatible,
        "opaque",
    )
    .with_message("Constant retyped");
    let breaking_only = StatusFilter::new(vec![ChangeStatus::Breaking]);

    let processed =
        process_changes(compare(&before, &after), &[&updater], &[&ExcludeNoChange, &breaking_only]).unwrap();
    let codes: Vec<ChangeCode> = processed.iter().map(|c| c.change.code()).collect();
    assert_eq!(codes, vec![ChangeCode::MemberRemoval]);
}

#[test]
fn test_override_member_scope() {
    let (before, after) = snapshots();
    let updater = CodeOverride::new(
        "internal-removals",
        [ChangeCode::MemberRemoval],
        ChangeStatus::Compatible,
        "internal namespace",
    )
    .with_members(vec!["Internal".to_string()]);

    let processed = process_changes(compare(&before, &after), &[&updater], &[&ExcludeNoChange]).unwrap();
    let verdict = ReleaseVerdict::from_changes(&processed);

    assert_eq!(verdict.breaking, 1);
    assert_eq!(verdict.compatible, 1);
    assert_eq!(verdict.unchanged, 0);
    assert!(verdict.requires_major());
}

#[test]
fn test_verdict_counts_sentinels() {
    let (before, after) = snapshots();
    let result = compare(&before, &after);
    let total = result.changes.len();

    let processed = process_changes(result, &[], &[]).unwrap();
    let verdict = ReleaseVerdict::from_changes(&processed);

    assert_eq!(verdict.breaking, 2);
    assert_eq!(verdict.compatible, 0);
    assert_eq!(verdict.unchanged, total - 2);
}

#[test]
fn test_processed_change_serializes_flat() {
    let (before, after) = snapshots();
    let processed = process_changes(compare(&before, &after), &[], &[&ExcludeNoChange]).unwrap();

    let value = serde_json::to_value(&processed[0]).unwrap();
    assert_eq!(value["info"]["code"], "constant_type_changed");
    assert_eq!(value["isUpdated"], false);
    assert_eq!(value["versions"]["after"], "2.0.0");
    assert!(value.get("update").is_none());
}
