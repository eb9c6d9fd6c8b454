//! Parameter and method matching helpers.

use crate::model::{Access, ClassMethod, Parameter};
use std::collections::{BTreeSet, HashMap};

/// Required parameters introduced or dropped between two parameter lists.
#[derive(Debug, Default, PartialEq)]
pub struct RequiredChanges<'a> {
    /// Required in `after`, not required in `before`
    pub added: Vec<&'a Parameter>,
    /// Required in `before`, not required in `after`
    pub removed: Vec<&'a Parameter>,
}

impl RequiredChanges<'_> {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

fn required_names(params: &[Parameter]) -> BTreeSet<&str> {
    params
        .iter()
        .filter(|p| !p.is_optional)
        .map(|p| p.name.as_str())
        .collect()
}

/// Partition required parameters by name into added and removed sets.
pub fn get_changed_required<'a>(before: &'a [Parameter], after: &'a [Parameter]) -> RequiredChanges<'a> {
    let before_required = required_names(before);
    let after_required = required_names(after);

    RequiredChanges {
        added: after
            .iter()
            .filter(|p| !p.is_optional && !before_required.contains(p.name.as_str()))
            .collect(),
        removed: before
            .iter()
            .filter(|p| !p.is_optional && !after_required.contains(p.name.as_str()))
            .collect(),
    }
}

fn changed_optionality<'a>(before: &'a [Parameter], after: &[Parameter], to_optional: bool) -> Vec<&'a Parameter> {
    let after_by_name: HashMap<&str, &Parameter> =
        after.iter().map(|p| (p.name.as_str(), p)).collect();

    before
        .iter()
        .filter(|p| p.is_optional != to_optional)
        .filter(|p| {
            after_by_name
                .get(p.name.as_str())
                .is_some_and(|a| a.is_optional == to_optional)
        })
        .collect()
}

/// Parameters of `before` that are required there and optional in `after`.
pub fn get_changed_to_optional<'a>(before: &'a [Parameter], after: &[Parameter]) -> Vec<&'a Parameter> {
    changed_optionality(before, after, true)
}

/// Parameters of `before` that are optional there and required in `after`.
pub fn get_changed_to_required<'a>(before: &'a [Parameter], after: &[Parameter]) -> Vec<&'a Parameter> {
    changed_optionality(before, after, false)
}

fn param_names(method: &ClassMethod, separator: &str) -> String {
    method
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Full signature key: usage, access, name and parameter names.
pub fn method_key(method: &ClassMethod) -> String {
    format!(
        "{}{}{}({})",
        method.modifier.usage.as_str(),
        method.modifier.access.as_str(),
        method.name,
        param_names(method, ",")
    )
}

/// Signature key that ignores visibility, so an access change still matches.
pub fn method_key_without_access(method: &ClassMethod) -> String {
    format!(
        "{}{}({})",
        method.modifier.usage.as_str(),
        method.name,
        param_names(method, ",")
    )
}

/// Key by usage and name only, pairing a method whose parameter list changed.
/// Only meaningful for names without overloads; it never contains `(`, so it
/// cannot collide with [`method_key`].
pub fn method_name_key(method: &ClassMethod) -> String {
    format!("{}{}", method.modifier.usage.as_str(), method.name)
}

/// Human-readable method identity, e.g. `instance public find(id, options)`.
pub fn method_label(method: &ClassMethod) -> String {
    format!(
        "{} {} {}({})",
        method.modifier.usage.as_str(),
        method.modifier.access.as_str(),
        method.name,
        param_names(method, ", ")
    )
}

fn is_not_private(method: &ClassMethod) -> bool {
    method.modifier.access != Access::Private
}

/// How [`get_common_methods`] keys and selects methods.
#[derive(Debug, Clone, Copy)]
pub struct MethodMatchOptions {
    pub resolve_key: fn(&ClassMethod) -> String,
    pub is_applicable: fn(&ClassMethod) -> bool,
}

impl Default for MethodMatchOptions {
    fn default() -> Self {
        Self {
            resolve_key: method_key,
            is_applicable: is_not_private,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodPair<'a> {
    pub before: &'a ClassMethod,
    pub after: &'a ClassMethod,
}

/// Pair up methods present on both sides under the same key.
///
/// Duplicate keys on the `after` side (overloads sharing a key) resolve to
/// the first occurrence in declaration order.
pub fn get_common_methods<'a>(
    before: &'a [ClassMethod],
    after: &'a [ClassMethod],
    options: &MethodMatchOptions,
) -> Vec<MethodPair<'a>> {
    let mut lookup: HashMap<String, &'a ClassMethod> = HashMap::new();
    for method in after.iter().filter(|m| (options.is_applicable)(m)) {
        lookup.entry((options.resolve_key)(method)).or_insert(method);
    }

    before
        .iter()
        .filter(|m| (options.is_applicable)(m))
        .filter_map(|m| {
            lookup
                .get(&(options.resolve_key)(m))
                .map(|after| MethodPair { before: m, after: *after })
        })
        .collect()
}

pub fn is_less_visible(before: Access, after: Access) -> bool {
    after.rank() < before.rank()
}

pub fn is_more_visible(before: Access, after: Access) -> bool {
    after.rank() > before.rank()
}

/// Write access is preserved when both sides agree or the property becomes
/// readonly; losing readonly is the incompatible direction.
pub fn is_write_compatible(before_readonly: bool, after_readonly: bool) -> bool {
    before_readonly == after_readonly || after_readonly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodModifier, Usage};

    fn param(name: &str, optional: bool) -> Parameter {
        Parameter {
            name: name.to_string(),
            ty: "string".to_string(),
            is_optional: optional,
        }
    }

    fn method(name: &str, access: Access, params: &[&str], return_type: &str) -> ClassMethod {
        ClassMethod {
            name: name.to_string(),
            modifier: MethodModifier {
                access,
                usage: Usage::Instance,
            },
            parameters: params.iter().map(|p| param(p, false)).collect(),
            return_type: return_type.to_string(),
        }
    }

    fn names(params: &[&Parameter]) -> Vec<String> {
        params.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_changed_required_excludes_optional() {
        let before = vec![param("a", false), param("b", false)];
        let after = vec![
            param("a", false),
            param("c", false),
            param("d", false),
            param("e", true),
        ];
        let changes = get_changed_required(&before, &after);
        assert_eq!(names(&changes.added), vec!["c", "d"]);
        assert_eq!(names(&changes.removed), vec!["b"]);
    }

    #[test]
    fn test_optionality_transitions() {
        let before = vec![param("a", false), param("b", true), param("c", false)];
        let after = vec![param("a", true), param("b", false)];
        assert_eq!(names(&get_changed_to_optional(&before, &after)), vec!["a"]);
        assert_eq!(names(&get_changed_to_required(&before, &after)), vec!["b"]);
    }

    #[test]
    fn test_common_methods_first_wins_and_skips_private() {
        let before = vec![
            method("find", Access::Public, &["id"], "A"),
            method("secret", Access::Private, &[], "void"),
        ];
        let after = vec![
            method("find", Access::Public, &["id"], "B"),
            method("find", Access::Public, &["id"], "C"),
            method("secret", Access::Private, &[], "void"),
        ];
        let pairs = get_common_methods(&before, &after, &MethodMatchOptions::default());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].after.return_type, "B");
    }

    #[test]
    fn test_overloads_key_separately() {
        let a = method("find", Access::Public, &["id"], "A");
        let b = method("find", Access::Public, &["id", "opts"], "A");
        assert_ne!(method_key(&a), method_key(&b));
        assert_eq!(method_label(&b), "instance public find(id, opts)");
    }

    #[test]
    fn test_visibility_and_readonly() {
        assert!(is_less_visible(Access::Public, Access::Protected));
        assert!(is_more_visible(Access::Private, Access::Public));
        assert!(!is_less_visible(Access::Public, Access::Public));
        assert!(is_write_compatible(false, true));
        assert!(!is_write_compatible(true, false));
        assert!(is_write_compatible(true, true));
    }
}
