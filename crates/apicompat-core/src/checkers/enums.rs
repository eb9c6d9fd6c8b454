//! Enum rules. Values are matched by name; a value whose literal changed is
//! reported whatever its declared type.

use super::factories::{
    added_elements, keep_all, literal_changed, removed_elements, typed_element_change, Element,
    ElementDiff, Layout, TypedChange, TypedElement,
};
use super::Checker;
use crate::model::EnumSignature;
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![
        added_elements(ChangeCode::EnumValuesAdded, values_diff()),
        removed_elements(ChangeCode::EnumValuesRemoved, values_diff()),
        typed_element_change(
            ChangeCode::EnumValueChanged,
            TypedChange {
                header: "Values changed",
                get_elements: value_literals,
                compare: literal_changed,
            },
        ),
    ]
}

fn values_diff() -> ElementDiff<EnumSignature> {
    ElementDiff {
        elements_name: "Values",
        get_elements: value_names,
        keep: keep_all,
        layout: Layout::Inline,
    }
}

fn value_names(signature: &EnumSignature) -> Vec<Element> {
    signature
        .values
        .iter()
        .map(|v| Element::named(v.name.as_str()))
        .collect()
}

fn value_literals(signature: &EnumSignature) -> Vec<TypedElement> {
    signature
        .values
        .iter()
        .map(|v| TypedElement {
            key: v.name.clone(),
            label: format!("value '{}'", v.name),
            ty: v.value.to_string(),
        })
        .collect()
}
