//! Parameter and method matching through the public API.

use apicompat_core::compat::{
    get_changed_required, get_changed_to_optional, get_changed_to_required, get_common_methods,
    method_key_without_access, MethodMatchOptions,
};
use apicompat_core::model::{Access, ClassMethod, MethodModifier, Parameter, Usage};

fn p(name: &str, optional: bool) -> Parameter {
    Parameter {
        name: name.to_string(),
        ty: "string".to_string(),
        is_optional: optional,
    }
}

#[test]
fn test_constructor_required_example() {
    let before = vec![p("a", false), p("b", false)];
    let after = vec![p("a", false), p("c", false), p("d", false), p("e", true)];
    let changes = get_changed_required(&before, &after);
    let added: Vec<&str> = changes.added.iter().map(|p| p.name.as_str()).collect();
    let removed: Vec<&str> = changes.removed.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(added, vec!["c", "d"]);
    assert_eq!(removed, vec!["b"]);
}

#[test]
fn test_optionality_ignores_missing_names() {
    let before = vec![p("a", false), p("gone", false)];
    let after = vec![p("a", true)];
    assert_eq!(get_changed_to_optional(&before, &after).len(), 1);
    assert!(get_changed_to_required(&before, &after).is_empty());
}

fn m(name: &str, access: Access) -> ClassMethod {
    ClassMethod {
        name: name.to_string(),
        modifier: MethodModifier {
            access,
            usage: Usage::Instance,
        },
        parameters: vec![p("id", false)],
        return_type: "void".to_string(),
    }
}

#[test]
fn test_common_methods_custom_key_matches_across_visibility() {
    let before = vec![m("find", Access::Public)];
    let after = vec![m("find", Access::Protected)];

    let default = get_common_methods(&before, &after, &MethodMatchOptions::default());
    assert!(default.is_empty());

    let options = MethodMatchOptions {
        resolve_key: method_key_without_access,
        is_applicable: |_| true,
    };
    let pairs = get_common_methods(&before, &after, &options);
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].after.modifier.access, Access::Protected);
}
