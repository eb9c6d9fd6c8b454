#![allow(dead_code)]

use apicompat_core::{
    compare_snapshots, Change, ChangeCode, CheckerSet, ComparisonResult, Signature, Snapshot,
};
use serde_json::{json, Value};

/// Decode a signature fixture, defaulting `path` to `src/index.ts`.
pub fn sig(mut value: Value) -> Signature {
    if let Some(obj) = value.as_object_mut() {
        obj.entry("path").or_insert_with(|| json!("src/index.ts"));
    }
    serde_json::from_value(value).expect("signature fixture must decode")
}

pub fn snapshot(version: &str, signatures: Vec<Value>) -> Snapshot {
    Snapshot::new(version, signatures.into_iter().map(sig).collect())
}

/// Run the built-in checker registered for `code` against one pair and
/// return its message if it fired.
pub fn check(code: ChangeCode, before: &Signature, after: Option<&Signature>) -> Option<String> {
    let checker = CheckerSet::builtin()
        .iter()
        .find(|c| c.code() == code)
        .expect("code must be registered");
    let change = checker.check(before, after);
    if change.is_no_change() {
        None
    } else {
        assert_eq!(change.code(), code);
        change.message
    }
}

/// Codes of every change that fired, in result order.
pub fn fired_codes(result: &ComparisonResult<'_>) -> Vec<ChangeCode> {
    fired(result).iter().map(|c| c.code()).collect()
}

pub fn fired<'r, 'a>(result: &'r ComparisonResult<'a>) -> Vec<&'r Change<'a>> {
    result.changes.iter().filter(|c| !c.is_no_change()).collect()
}

/// Compare two single-signature snapshots with the built-in checker set.
pub fn compare_pair(before: Value, after: Value) -> Vec<ChangeCode> {
    let before = snapshot("1.0.0", vec![before]);
    let after = snapshot("2.0.0", vec![after]);
    let result = compare_snapshots(&before, &after, CheckerSet::builtin());
    fired_codes(&result)
}

pub fn class(members: Value) -> Value {
    let mut value = json!({"memberType": "class", "memberName": "Store"});
    if let (Some(target), Some(source)) = (value.as_object_mut(), members.as_object()) {
        for (k, v) in source {
            target.insert(k.clone(), v.clone());
        }
    }
    value
}

pub fn param(name: &str, ty: &str, optional: bool) -> Value {
    json!({"name": name, "type": ty, "isOptional": optional})
}

pub fn method(name: &str, access: &str, params: Vec<Value>, return_type: &str) -> Value {
    json!({
        "name": name,
        "modifier": {"access": access, "usage": "instance"},
        "parameters": params,
        "returnType": return_type
    })
}

pub fn property(name: &str, ty: &str, access: &str, readonly: bool) -> Value {
    let mut modifiers = json!({"access": access, "usage": "instance"});
    if readonly {
        modifiers["write"] = json!("readonly");
    }
    json!({"name": name, "type": ty, "modifiers": modifiers})
}
