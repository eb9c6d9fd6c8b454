//! Interface rules
//!
//! Call and construct signatures have no declared name; they are keyed by
//! their parameter list, `(a, b)` and `new (a, b)` respectively.

use super::factories::{
    added_elements, added_generics, generic_extends_change, incompatible, keep_all,
    opt_req_modifier_change, removed_elements, removed_generics, return_type_change,
    typed_element_change, widened, Callable, Element, ElementDiff, Layout, Optionality,
    TypedChange, TypedElement,
};
use super::{typed, Checker};
use crate::compat::are_not_compatible;
use crate::model::{GenericParam, InterfaceSignature};
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![
        added_generics(ChangeCode::InterfaceRequiredGenericAdded, generics, true),
        added_generics(ChangeCode::InterfaceOptionalGenericAdded, generics, false),
        removed_generics(ChangeCode::InterfaceGenericRemoved, generics),
        generic_extends_change(ChangeCode::InterfaceGenericExtendsChanged, generics, incompatible),
        added_elements(
            ChangeCode::InterfaceRequiredPropertiesAdded,
            ElementDiff {
                elements_name: "Required properties",
                get_elements: property_elements,
                keep: |e| !e.optional,
                layout: Layout::Inline,
            },
        ),
        added_elements(
            ChangeCode::InterfaceOptionalPropertiesAdded,
            ElementDiff {
                elements_name: "Optional properties",
                get_elements: property_elements,
                keep: |e| e.optional,
                layout: Layout::Inline,
            },
        ),
        removed_elements(
            ChangeCode::InterfacePropertiesRemoved,
            ElementDiff {
                elements_name: "Properties",
                get_elements: property_elements,
                keep: keep_all,
                layout: Layout::Inline,
            },
        ),
        typed_element_change(
            ChangeCode::InterfacePropertyTypeChanged,
            TypedChange {
                header: "Properties changed type",
                get_elements: property_types,
                compare: incompatible,
            },
        ),
        typed_element_change(
            ChangeCode::InterfacePropertyTypeWidened,
            TypedChange {
                header: "Properties type widened",
                get_elements: property_types,
                compare: widened,
            },
        ),
        added_elements(ChangeCode::InterfaceCallableTypesAdded, callables_diff()),
        removed_elements(ChangeCode::InterfaceCallableTypesRemoved, callables_diff()),
        return_type_change(
            ChangeCode::InterfaceCallableReturnTypeChanged,
            "Callable types changed return type",
            callables,
            incompatible,
        ),
        opt_req_modifier_change(
            ChangeCode::InterfaceCallableParamsChangedToOptional,
            "Callable types parameters changed to optional",
            callables,
            Optionality::ToOptional,
        ),
        opt_req_modifier_change(
            ChangeCode::InterfaceCallableParamsChangedToRequired,
            "Callable types parameters changed to required",
            callables,
            Optionality::ToRequired,
        ),
        index_signature_change(),
    ]
}

fn generics(interface: &InterfaceSignature) -> &[GenericParam] {
    &interface.generics
}

fn property_elements(interface: &InterfaceSignature) -> Vec<Element> {
    interface
        .properties
        .iter()
        .map(|(name, property)| Element::named(name.as_str()).with_optional(property.is_optional))
        .collect()
}

fn property_types(interface: &InterfaceSignature) -> Vec<TypedElement> {
    interface
        .properties
        .iter()
        .map(|(name, property)| TypedElement {
            key: name.clone(),
            label: format!("property '{}'", name),
            ty: property.ty.render(),
        })
        .collect()
}

fn callables(interface: &InterfaceSignature) -> Vec<Callable<'_>> {
    let calls = interface.callable_types.iter().map(|f| (f.derived_name(), f));
    let constructs = interface
        .constructor_types
        .iter()
        .map(|f| (format!("new {}", f.derived_name()), f));

    calls
        .chain(constructs)
        .map(|(key, f)| Callable {
            label: key.clone(),
            key,
            parameters: &f.parameters,
            return_type: &f.return_type,
        })
        .collect()
}

fn callables_diff() -> ElementDiff<InterfaceSignature> {
    ElementDiff {
        elements_name: "Callable types",
        get_elements: callable_elements,
        keep: keep_all,
        layout: Layout::Inline,
    }
}

fn callable_elements(interface: &InterfaceSignature) -> Vec<Element> {
    callables(interface)
        .into_iter()
        .map(|c| Element::named(c.key))
        .collect()
}

/// Fires when the index signature disappears, changes its index type, or
/// stops accepting the value type it accepted before.
fn index_signature_change() -> Checker {
    typed::<InterfaceSignature, _>(ChangeCode::InterfaceIndexSignatureChanged, |before, after| {
        let before_index = before.indexed.as_ref()?;
        match after.indexed.as_ref() {
            None => Some(format!(
                "Index signature removed: '{}'",
                before_index.render()
            )),
            Some(after_index)
                if after_index.index != before_index.index
                    || are_not_compatible(&before_index.ty, &after_index.ty) =>
            {
                Some(format!(
                    "Index signature changed from '{}' to '{}'",
                    before_index.render(),
                    after_index.render()
                ))
            }
            Some(_) => None,
        }
    })
}
