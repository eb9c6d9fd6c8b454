//! Reusable rule factories.
//!
//! A rule is data plus one shared algorithm: which elements to project out of
//! a member, which predicate to apply, and which code to attach. The same
//! factory parameterized with [`incompatible`] and [`widened`] yields the
//! breaking and the compatible variant of every type-bearing rule.
//!
//! No factory-built rule mutates its inputs or fails; a rule that finds
//! nothing yields no message and the checker reports `no_change`.

use super::{typed, Checker};
use crate::compat::{
    are_not_compatible, get_changed_required, get_changed_to_optional, get_changed_to_required,
    is_more_applicable, ANY_TYPE,
};
use crate::model::{Access, GenericParam, Member, Parameter};
use crate::registry::ChangeCode;
use std::collections::{HashMap, HashSet};

const INDENT: &str = "    ";

/// `'a', 'b'`
pub fn quoted<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Header line followed by indented detail lines.
pub fn block(header: &str, lines: &[String]) -> String {
    let mut out = format!("{}:", header);
    for line in lines {
        out.push('\n');
        out.push_str(INDENT);
        out.push_str(line);
    }
    out
}

fn labelled(label: &str, text: String) -> String {
    if label.is_empty() {
        text
    } else {
        format!("{}: {}", label, text)
    }
}

fn transition_line(label: &str, from: &str, to: &str) -> String {
    if label.is_empty() {
        format!("from '{}' to '{}'", from, to)
    } else {
        format!("{} from '{}' to '{}'", label, from, to)
    }
}

// ---------------------------------------------------------------------------
// Type predicates
// ---------------------------------------------------------------------------

/// The new type no longer covers everything the old one did.
pub fn incompatible(before: &str, after: &str) -> bool {
    are_not_compatible(before, after)
}

/// The new type strictly covers more.
pub fn widened(before: &str, after: &str) -> bool {
    is_more_applicable(before, after)
}

pub fn literal_changed(before: &str, after: &str) -> bool {
    before != after
}

// ---------------------------------------------------------------------------
// Added / removed elements
// ---------------------------------------------------------------------------

/// Named element projected out of a member for add/remove diffing.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Identity used for matching across sides
    pub key: String,
    /// Text used in the message
    pub label: String,
    pub optional: bool,
    pub private: bool,
}

impl Element {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            label: name,
            optional: false,
            private: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }
}

pub fn keep_all(_: &Element) -> bool {
    true
}

pub fn keep_public_api(element: &Element) -> bool {
    !element.private
}

/// Message shape for element lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Values added: 'a', 'b'`
    Inline,
    /// `Methods added:` then one indented line per element
    Block,
}

pub struct ElementDiff<M> {
    pub elements_name: &'static str,
    pub get_elements: fn(&M) -> Vec<Element>,
    /// Applied to the elements being reported
    pub keep: fn(&Element) -> bool,
    pub layout: Layout,
}

fn missing_labels<M>(config: &ElementDiff<M>, from: &M, against: &M) -> Vec<String> {
    let known: HashSet<String> = (config.get_elements)(against)
        .into_iter()
        .map(|e| e.key)
        .collect();
    (config.get_elements)(from)
        .into_iter()
        .filter(|e| !known.contains(&e.key) && (config.keep)(e))
        .map(|e| e.label)
        .collect()
}

fn element_message(name: &str, verb: &str, labels: Vec<String>, layout: Layout) -> String {
    match layout {
        Layout::Inline => format!("{} {}: {}", name, verb, quoted(&labels)),
        Layout::Block => block(&format!("{} {}", name, verb), &labels),
    }
}

/// Elements of `after` with no counterpart in `before`.
pub fn added_elements<M: Member + 'static>(code: ChangeCode, config: ElementDiff<M>) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let labels = missing_labels(&config, after, before);
        (!labels.is_empty())
            .then(|| element_message(config.elements_name, "added", labels, config.layout))
    })
}

/// Elements of `before` with no counterpart in `after`.
pub fn removed_elements<M: Member + 'static>(code: ChangeCode, config: ElementDiff<M>) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let labels = missing_labels(&config, before, after);
        (!labels.is_empty())
            .then(|| element_message(config.elements_name, "removed", labels, config.layout))
    })
}

// ---------------------------------------------------------------------------
// Type changes
// ---------------------------------------------------------------------------

/// Element carrying a textual type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedElement {
    pub key: String,
    pub label: String,
    pub ty: String,
}

pub struct TypedChange<M> {
    pub header: &'static str,
    pub get_elements: fn(&M) -> Vec<TypedElement>,
    /// `(before, after)`; true flags the element
    pub compare: fn(&str, &str) -> bool,
}

fn typed_checker<M, G>(
    code: ChangeCode,
    header: &'static str,
    get_elements: G,
    compare: fn(&str, &str) -> bool,
) -> Checker
where
    M: Member + 'static,
    G: Fn(&M) -> Vec<TypedElement> + Send + Sync + 'static,
{
    typed::<M, _>(code, move |before, after| {
        let after_elements = get_elements(after);
        let mut lookup: HashMap<&str, &TypedElement> = HashMap::new();
        for element in &after_elements {
            lookup.entry(element.key.as_str()).or_insert(element);
        }

        let lines: Vec<String> = get_elements(before)
            .iter()
            .filter_map(|b| {
                let a = lookup.get(b.key.as_str())?;
                compare(&b.ty, &a.ty).then(|| transition_line(&b.label, &b.ty, &a.ty))
            })
            .collect();

        (!lines.is_empty()).then(|| block(header, &lines))
    })
}

/// Elements matched by key whose types satisfy `compare`.
pub fn typed_element_change<M: Member + 'static>(code: ChangeCode, config: TypedChange<M>) -> Checker {
    typed_checker(code, config.header, config.get_elements, config.compare)
}

// ---------------------------------------------------------------------------
// Function-shaped entities
// ---------------------------------------------------------------------------

/// One function-shaped entity of a member (the function itself, a
/// constructor, a method, a call or construct signature).
#[derive(Debug, Clone, PartialEq)]
pub struct Callable<'s> {
    pub key: String,
    pub label: String,
    pub parameters: &'s [Parameter],
    pub return_type: &'s str,
}

pub type CallablesFn<M> = for<'s> fn(&'s M) -> Vec<Callable<'s>>;

/// Pair callables by key; duplicate keys on the `after` side resolve to the
/// first occurrence.
fn matched<'c, 's>(
    before: &'c [Callable<'s>],
    after: &'c [Callable<'s>],
) -> Vec<(&'c Callable<'s>, &'c Callable<'s>)> {
    let mut lookup: HashMap<&str, &Callable<'s>> = HashMap::new();
    for callable in after {
        lookup.entry(callable.key.as_str()).or_insert(callable);
    }
    before
        .iter()
        .filter_map(|b| lookup.get(b.key.as_str()).map(|a| (b, *a)))
        .collect()
}

pub fn return_type_change<M: Member + 'static>(
    code: ChangeCode,
    header: &'static str,
    callables: CallablesFn<M>,
    compare: fn(&str, &str) -> bool,
) -> Checker {
    let get_elements = move |member: &M| -> Vec<TypedElement> {
        callables(member)
            .into_iter()
            .map(|c| TypedElement {
                key: c.key,
                label: c.label,
                ty: c.return_type.to_string(),
            })
            .collect()
    };
    typed_checker(code, header, get_elements, compare)
}

/// Parameter types, matched by callable key and parameter name.
pub fn params_type_change<M: Member + 'static>(
    code: ChangeCode,
    header: &'static str,
    callables: CallablesFn<M>,
    compare: fn(&str, &str) -> bool,
) -> Checker {
    let get_elements = move |member: &M| -> Vec<TypedElement> {
        callables(member)
            .iter()
            .flat_map(|c| {
                c.parameters.iter().map(move |p| {
                    let label = if c.label.is_empty() {
                        format!("parameter '{}'", p.name)
                    } else {
                        format!("{} parameter '{}'", c.label, p.name)
                    };
                    TypedElement {
                        key: format!("{}:{}", c.key, p.name),
                        label,
                        ty: p.ty.clone(),
                    }
                })
            })
            .collect()
    };
    typed_checker(code, header, get_elements, compare)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Optionality {
    ToOptional,
    ToRequired,
}

/// Parameters whose optionality flipped in the given direction.
pub fn opt_req_modifier_change<M: Member + 'static>(
    code: ChangeCode,
    header: &'static str,
    callables: CallablesFn<M>,
    direction: Optionality,
) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let before = callables(before);
        let after = callables(after);
        let lines: Vec<String> = matched(&before, &after)
            .into_iter()
            .filter_map(|(b, a)| {
                let changed = match direction {
                    Optionality::ToOptional => get_changed_to_optional(b.parameters, a.parameters),
                    Optionality::ToRequired => get_changed_to_required(b.parameters, a.parameters),
                };
                (!changed.is_empty())
                    .then(|| labelled(&b.label, quoted(changed.iter().map(|p| p.name.as_str()))))
            })
            .collect();
        (!lines.is_empty()).then(|| block(header, &lines))
    })
}

/// Required parameters introduced or dropped, by name.
pub fn required_params_change<M: Member + 'static>(
    code: ChangeCode,
    header: &'static str,
    callables: CallablesFn<M>,
) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let before = callables(before);
        let after = callables(after);
        let mut lines = Vec::new();
        for (b, a) in matched(&before, &after) {
            let changes = get_changed_required(b.parameters, a.parameters);
            let prefix = if b.label.is_empty() {
                String::new()
            } else {
                format!("{} ", b.label)
            };
            if !changes.added.is_empty() {
                let names = quoted(changes.added.iter().map(|p| p.name.as_str()));
                lines.push(format!("{}added: {}", prefix, names));
            }
            if !changes.removed.is_empty() {
                let names = quoted(changes.removed.iter().map(|p| p.name.as_str()));
                lines.push(format!("{}removed: {}", prefix, names));
            }
        }
        (!lines.is_empty()).then(|| block(header, &lines))
    })
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityElement {
    pub key: String,
    pub label: String,
    pub access: Access,
}

/// Elements matched by key whose access satisfies `compare(before, after)`.
pub fn visibility_change<M: Member + 'static>(
    code: ChangeCode,
    header: &'static str,
    get_elements: fn(&M) -> Vec<VisibilityElement>,
    compare: fn(Access, Access) -> bool,
) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let after_elements = get_elements(after);
        let mut lookup: HashMap<&str, Access> = HashMap::new();
        for element in &after_elements {
            lookup.entry(element.key.as_str()).or_insert(element.access);
        }
        let lines: Vec<String> = get_elements(before)
            .iter()
            .filter_map(|b| {
                let access = *lookup.get(b.key.as_str())?;
                compare(b.access, access)
                    .then(|| transition_line(&b.label, b.access.as_str(), access.as_str()))
            })
            .collect();
        (!lines.is_empty()).then(|| block(header, &lines))
    })
}

// ---------------------------------------------------------------------------
// Generics
// ---------------------------------------------------------------------------

pub type GenericsFn<M> = fn(&M) -> &[GenericParam];

/// Generic parameters new in `after`; `required` selects those without a
/// default, otherwise those with one.
pub fn added_generics<M: Member + 'static>(
    code: ChangeCode,
    get_generics: GenericsFn<M>,
    required: bool,
) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let known: HashSet<&str> = get_generics(before).iter().map(|g| g.name.as_str()).collect();
        let added: Vec<&str> = get_generics(after)
            .iter()
            .filter(|g| !known.contains(g.name.as_str()) && g.is_optional() != required)
            .map(|g| g.name.as_str())
            .collect();
        let kind = if required { "Required" } else { "Optional" };
        (!added.is_empty()).then(|| format!("{} generic types added: {}", kind, quoted(added)))
    })
}

pub fn removed_generics<M: Member + 'static>(code: ChangeCode, get_generics: GenericsFn<M>) -> Checker {
    typed::<M, _>(code, move |before, after| {
        let kept: HashSet<&str> = get_generics(after).iter().map(|g| g.name.as_str()).collect();
        let removed: Vec<&str> = get_generics(before)
            .iter()
            .filter(|g| !kept.contains(g.name.as_str()))
            .map(|g| g.name.as_str())
            .collect();
        (!removed.is_empty()).then(|| format!("Generic types removed: {}", quoted(removed)))
    })
}

/// Bound changes on generics present on both sides; an absent bound is `any`.
pub fn generic_extends_change<M: Member + 'static>(
    code: ChangeCode,
    get_generics: GenericsFn<M>,
    compare: fn(&str, &str) -> bool,
) -> Checker {
    let get_elements = move |member: &M| -> Vec<TypedElement> {
        get_generics(member)
            .iter()
            .map(|g| TypedElement {
                key: g.name.clone(),
                label: format!("generic '{}'", g.name),
                ty: g.extends.clone().unwrap_or_else(|| ANY_TYPE.to_string()),
            })
            .collect()
    };
    typed_checker(code, "Generic type bounds changed", get_elements, compare)
}
