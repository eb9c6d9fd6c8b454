//! Type alias rules, built from the same factories as the other kinds.

use super::factories::{
    added_generics, incompatible, removed_generics, typed_element_change, widened, TypedChange,
    TypedElement,
};
use super::Checker;
use crate::model::{GenericParam, TypeAliasSignature};
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![
        typed_element_change(
            ChangeCode::TypeAliasTypeChanged,
            TypedChange {
                header: "Type alias changed type",
                get_elements: aliased_type,
                compare: incompatible,
            },
        ),
        typed_element_change(
            ChangeCode::TypeAliasTypeWidened,
            TypedChange {
                header: "Type alias widened",
                get_elements: aliased_type,
                compare: widened,
            },
        ),
        added_generics(ChangeCode::TypeAliasRequiredGenericAdded, generics, true),
        added_generics(ChangeCode::TypeAliasOptionalGenericAdded, generics, false),
        removed_generics(ChangeCode::TypeAliasGenericRemoved, generics),
    ]
}

fn aliased_type(alias: &TypeAliasSignature) -> Vec<TypedElement> {
    vec![TypedElement {
        key: String::new(),
        label: String::new(),
        ty: alias.ty.clone(),
    }]
}

fn generics(alias: &TypeAliasSignature) -> &[GenericParam] {
    &alias.generics
}
