#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use apicompat_core::{
    compare_snapshots, parse_snapshot_bytes, ChangeCode, CheckerSet, ExErrorKind, MemberType,
};
use common::{fired, fired_codes, snapshot};
use serde_json::json;

#[test]
fn test_member_type_change_is_the_only_fired_change() {
    let before = snapshot("1.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "number"})]);
    let after = snapshot("2.0.0", vec![json!({"memberType": "function", "memberName": "a", "returnType": "number"})]);

    let result = compare_snapshots(&before, &after, CheckerSet::builtin());
    let changes = fired(&result);

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].code(), ChangeCode::ChangedMemberType);
    assert_eq!(
        changes[0].message.as_deref(),
        Some("Member type changed from 'constant' to 'function'")
    );
}

#[test]
fn test_same_member_type_yields_no_change_from_member_type_checker() {
    let before = snapshot("1.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "number"})]);
    let after = snapshot("2.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "string"})]);

    let result = compare_snapshots(&before, &after, CheckerSet::builtin());

    // first registered checker is the member-type rule
    assert!(result.changes[0].is_no_change());
    assert_eq!(fired_codes(&result), vec![ChangeCode::ConstantTypeChanged]);
}

#[test]
fn test_removed_member_reports_qualified_name() {
    let after = snapshot("2.0.0", vec![]);

    let plain = snapshot("1.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "number"})]);
    let result = compare_snapshots(&plain, &after, CheckerSet::builtin());
    let changes = fired(&result);
    assert_eq!(changes.len(), 1);
    assert_eq!(
        changes[0].message.as_deref(),
        Some("Member 'a' removed from package")
    );
    assert!(changes[0].signatures.after.is_none());

    let namespaced = snapshot(
        "1.0.0",
        vec![json!({"memberType": "constant", "memberName": "a", "namespace": "Test", "type": "number"})],
    );
    let result = compare_snapshots(&namespaced, &after, CheckerSet::builtin());
    assert_eq!(
        fired(&result)[0].message.as_deref(),
        Some("Member 'Test.a' removed from package")
    );
}

#[test]
fn test_every_checker_runs_for_every_before_signature() {
    let before = snapshot(
        "1.0.0",
        vec![
            json!({"memberType": "constant", "memberName": "a", "type": "number"}),
            json!({"memberType": "type", "memberName": "B", "type": "string"}),
        ],
    );
    let after = snapshot("2.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "number"})]);
    let checkers = CheckerSet::builtin();

    let result = compare_snapshots(&before, &after, checkers);

    assert_eq!(result.changes.len(), 2 * checkers.len());
    let (first, second) = result.changes.split_at(checkers.len());
    assert!(first.iter().all(|c| c.signatures.before.member_name == "a"));
    assert!(second.iter().all(|c| c.signatures.before.member_name == "B"));
    for (change, checker) in second.iter().zip(checkers.iter()) {
        assert!(change.is_no_change() || change.code() == checker.code());
    }
}

#[test]
fn test_added_members_are_not_reported() {
    let before = snapshot("1.0.0", vec![]);
    let after = snapshot("2.0.0", vec![json!({"memberType": "constant", "memberName": "a", "type": "number"})]);

    let result = compare_snapshots(&before, &after, CheckerSet::builtin());
    assert!(result.changes.is_empty());
    assert_eq!(result.versions.before, "1.0.0");
    assert_eq!(result.versions.after, "2.0.0");
}

#[test]
fn test_breaking_and_compatible_views() {
    let before = snapshot(
        "1.0.0",
        vec![
            json!({"memberType": "constant", "memberName": "a", "type": "number"}),
            json!({"memberType": "constant", "memberName": "b", "type": "number"}),
        ],
    );
    let after = snapshot(
        "2.0.0",
        vec![json!({"memberType": "constant", "memberName": "a", "type": "number | string"})],
    );

    let result = compare_snapshots(&before, &after, CheckerSet::builtin());

    let breaking: Vec<ChangeCode> = result.breaking().map(|c| c.code()).collect();
    let compatible: Vec<ChangeCode> = result.compatible().map(|c| c.code()).collect();
    assert_eq!(breaking, vec![ChangeCode::MemberRemoval]);
    assert_eq!(compatible, vec![ChangeCode::ConstantTypeWidened]);
}

#[test]
fn test_digest_is_deterministic_and_order_sensitive() {
    let before = snapshot(
        "1.0.0",
        vec![
            json!({"memberType": "constant", "memberName": "a", "type": "number"}),
            json!({"memberType": "constant", "memberName": "b", "type": "number"}),
        ],
    );
    let after = snapshot("2.0.0", vec![]);

    let first = compare_snapshots(&before, &after, CheckerSet::builtin());
    let second = compare_snapshots(&before, &after, CheckerSet::builtin());
    let digest = first.digest().unwrap();
    assert_eq!(digest, second.digest().unwrap());
    assert_eq!(digest.len(), 64);

    let mut reversed = first.clone();
    reversed.changes.reverse();
    assert_ne!(reversed.digest().unwrap(), digest);
}

#[test]
fn test_parse_snapshot_then_compare() {
    let before = parse_snapshot_bytes(
        br#"{"version": "1.0.0", "signatures": [
            {"memberType": "enum", "memberName": "Color", "path": "src/color.ts",
             "values": [{"name": "Red", "type": "number", "value": 0}]}
        ]}"#,
    )
    .unwrap();
    let after = parse_snapshot_bytes(
        br#"{"version": "1.1.0", "signatures": [
            {"memberType": "enum", "memberName": "Color", "path": "src/color.ts",
             "values": [{"name": "Red", "type": "number", "value": 0},
                        {"name": "Blue", "type": "number", "value": 1}]}
        ]}"#,
    )
    .unwrap();

    assert_eq!(before.signatures[0].member_type(), MemberType::Enum);
    let result = compare_snapshots(&before, &after, CheckerSet::builtin());
    assert_eq!(fired_codes(&result), vec![ChangeCode::EnumValuesAdded]);
}

#[test]
fn test_parse_snapshot_errors() {
    let err = parse_snapshot_bytes(b"[1, 2]").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);

    let err = parse_snapshot_bytes(br#"{"signatures": []}"#).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::MissingField);

    let err = parse_snapshot_bytes(
        br#"{"version": "1", "signatures": [{"memberType": "macro", "memberName": "x", "path": "a.ts"}]}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert_eq!(err.op(), Some("parse_snapshot_bytes"));
}
