//! Class rules
//!
//! Constructors pair positionally and a class without constructors has an
//! implicit parameterless one. Methods pair by full signature key, so each
//! overload is compared with its own counterpart. The required-parameter rule
//! pairs a method by usage and name when that name has a single public
//! overload, since a changed parameter list is exactly what it looks for;
//! overloaded names keep the full signature key. Private members are never reported as added, removed or
//! changed, but visibility transitions into or out of `private` are.

use super::factories::{
    added_elements, added_generics, block, generic_extends_change, incompatible, keep_public_api,
    opt_req_modifier_change, params_type_change, quoted, removed_elements, removed_generics,
    required_params_change, return_type_change,
    typed_element_change, visibility_change, widened, Callable, Element, ElementDiff, Layout,
    Optionality, TypedChange, TypedElement, VisibilityElement,
};
use super::{typed, Checker};
use crate::compat::{
    get_common_methods, is_less_visible, is_more_visible, is_write_compatible, method_key,
    method_key_without_access, method_label, method_name_key, MethodMatchOptions,
};
use crate::model::{Access, ClassMethod, ClassProperty, ClassSignature, GenericParam, Parameter};
use crate::registry::ChangeCode;
use std::collections::HashMap;

pub fn checkers() -> Vec<Checker> {
    vec![
        required_params_change(
            ChangeCode::ClassConstructorRequiredParamsChanged,
            "Constructor required parameters count changed",
            constructors,
        ),
        opt_req_modifier_change(
            ChangeCode::ClassConstructorParamsChangedToOptional,
            "Constructor parameters changed to optional",
            constructors,
            Optionality::ToOptional,
        ),
        opt_req_modifier_change(
            ChangeCode::ClassConstructorParamsChangedToRequired,
            "Constructor parameters changed to required",
            constructors,
            Optionality::ToRequired,
        ),
        params_type_change(
            ChangeCode::ClassConstructorParamsTypeChanged,
            "Constructor parameters changed type",
            constructors,
            incompatible,
        ),
        params_type_change(
            ChangeCode::ClassConstructorParamsTypeWidened,
            "Constructor parameters type widened",
            constructors,
            widened,
        ),
        return_type_change(
            ChangeCode::ClassMethodReturnTypeChanged,
            "Methods changed return type",
            methods,
            incompatible,
        ),
        return_type_change(
            ChangeCode::ClassMethodReturnTypeWidened,
            "Methods return type widened",
            methods,
            widened,
        ),
        opt_req_modifier_change(
            ChangeCode::ClassMethodParamsChangedToOptional,
            "Methods parameters changed to optional",
            methods,
            Optionality::ToOptional,
        ),
        opt_req_modifier_change(
            ChangeCode::ClassMethodParamsChangedToRequired,
            "Methods parameters changed to required",
            methods,
            Optionality::ToRequired,
        ),
        required_params_change(
            ChangeCode::ClassMethodRequiredParamsChanged,
            "Methods required parameters count changed",
            methods_by_name,
        ),
        params_type_change(
            ChangeCode::ClassMethodParamsTypeChanged,
            "Methods parameters changed type",
            methods,
            incompatible,
        ),
        params_type_change(
            ChangeCode::ClassMethodParamsTypeWidened,
            "Methods parameters type widened",
            methods,
            widened,
        ),
        added_elements(ChangeCode::ClassMethodsAdded, methods_diff()),
        removed_elements(ChangeCode::ClassMethodsRemoved, methods_diff()),
        method_visibility(
            ChangeCode::ClassMethodLessVisible,
            "Methods visibility reduced",
            is_less_visible,
        ),
        method_visibility(
            ChangeCode::ClassMethodMoreVisible,
            "Methods visibility increased",
            is_more_visible,
        ),
        visibility_change(
            ChangeCode::ClassPropertyLessVisible,
            "Properties visibility reduced",
            property_access,
            is_less_visible,
        ),
        visibility_change(
            ChangeCode::ClassPropertyMoreVisible,
            "Properties visibility increased",
            property_access,
            is_more_visible,
        ),
        added_elements(ChangeCode::ClassPropertiesAdded, properties_diff()),
        removed_elements(ChangeCode::ClassPropertiesRemoved, properties_diff()),
        typed_element_change(
            ChangeCode::ClassPropertyTypeChanged,
            TypedChange {
                header: "Properties changed type",
                get_elements: property_types,
                compare: incompatible,
            },
        ),
        typed_element_change(
            ChangeCode::ClassPropertyTypeWidened,
            TypedChange {
                header: "Properties type widened",
                get_elements: property_types,
                compare: widened,
            },
        ),
        readonly_change(ChangeCode::ClassPropertyReadonlyAdded, true),
        readonly_change(ChangeCode::ClassPropertyReadonlyRemoved, false),
        added_generics(ChangeCode::ClassRequiredGenericAdded, generics, true),
        added_generics(ChangeCode::ClassOptionalGenericAdded, generics, false),
        removed_generics(ChangeCode::ClassGenericRemoved, generics),
        generic_extends_change(ChangeCode::ClassGenericExtendsChanged, generics, incompatible),
    ]
}

const NO_PARAMETERS: &[Parameter] = &[];

fn constructors(class: &ClassSignature) -> Vec<Callable<'_>> {
    if class.constructors.is_empty() {
        return vec![Callable {
            key: "constructor#0".to_string(),
            label: String::new(),
            parameters: NO_PARAMETERS,
            return_type: "",
        }];
    }

    let numbered = class.constructors.len() > 1;
    class
        .constructors
        .iter()
        .enumerate()
        .map(|(index, ctor)| Callable {
            key: format!("constructor#{}", index),
            label: if numbered {
                format!("constructor #{}", index + 1)
            } else {
                String::new()
            },
            parameters: &ctor.parameters,
            return_type: &ctor.return_type,
        })
        .collect()
}

fn is_public_api(method: &ClassMethod) -> bool {
    method.modifier.access != Access::Private
}

fn method_callables(class: &ClassSignature, key: fn(&ClassMethod) -> String) -> Vec<Callable<'_>> {
    class
        .methods
        .iter()
        .filter(|m| is_public_api(m))
        .map(|m| Callable {
            key: key(m),
            label: method_label(m),
            parameters: &m.parameters,
            return_type: &m.return_type,
        })
        .collect()
}

fn methods(class: &ClassSignature) -> Vec<Callable<'_>> {
    method_callables(class, method_key)
}

/// Name key for methods that are not overloaded, full key otherwise. The two
/// key shapes never collide, so a name pairs by name only when it has exactly
/// one public overload on each side.
fn methods_by_name(class: &ClassSignature) -> Vec<Callable<'_>> {
    let mut overloads: HashMap<String, usize> = HashMap::new();
    for method in class.methods.iter().filter(|m| is_public_api(m)) {
        *overloads.entry(method_name_key(method)).or_default() += 1;
    }

    class
        .methods
        .iter()
        .filter(|m| is_public_api(m))
        .map(|m| {
            let name_key = method_name_key(m);
            let key = if overloads.get(&name_key) == Some(&1) {
                name_key
            } else {
                method_key(m)
            };
            Callable {
                key,
                label: method_label(m),
                parameters: &m.parameters,
                return_type: &m.return_type,
            }
        })
        .collect()
}

fn methods_diff() -> ElementDiff<ClassSignature> {
    ElementDiff {
        elements_name: "Methods",
        get_elements: method_elements,
        keep: keep_public_api,
        layout: Layout::Block,
    }
}

fn method_elements(class: &ClassSignature) -> Vec<Element> {
    class
        .methods
        .iter()
        .map(|m| {
            Element::named(method_key_without_access(m))
                .with_label(method_label(m))
                .with_private(!is_public_api(m))
        })
        .collect()
}

fn method_visibility(
    code: ChangeCode,
    header: &'static str,
    compare: fn(Access, Access) -> bool,
) -> Checker {
    let options = MethodMatchOptions {
        resolve_key: method_key_without_access,
        is_applicable: |_| true,
    };

    typed::<ClassSignature, _>(code, move |before, after| {
        let lines: Vec<String> = get_common_methods(&before.methods, &after.methods, &options)
            .into_iter()
            .filter(|pair| compare(pair.before.modifier.access, pair.after.modifier.access))
            .map(|pair| {
                format!(
                    "{} from '{}' to '{}'",
                    method_label(pair.before),
                    pair.before.modifier.access.as_str(),
                    pair.after.modifier.access.as_str()
                )
            })
            .collect();
        (!lines.is_empty()).then(|| block(header, &lines))
    })
}

fn property_key(property: &ClassProperty) -> String {
    format!("{} {}", property.modifiers.usage.as_str(), property.name)
}

fn public_properties(class: &ClassSignature) -> impl Iterator<Item = &ClassProperty> {
    class
        .properties
        .iter()
        .filter(|p| p.modifiers.access != Access::Private)
}

fn property_access(class: &ClassSignature) -> Vec<VisibilityElement> {
    class
        .properties
        .iter()
        .map(|p| VisibilityElement {
            key: property_key(p),
            label: format!("property '{}'", p.name),
            access: p.modifiers.access,
        })
        .collect()
}

fn properties_diff() -> ElementDiff<ClassSignature> {
    ElementDiff {
        elements_name: "Properties",
        get_elements: property_elements,
        keep: keep_public_api,
        layout: Layout::Inline,
    }
}

fn property_elements(class: &ClassSignature) -> Vec<Element> {
    class
        .properties
        .iter()
        .map(|p| {
            Element::named(property_key(p))
                .with_label(p.name.as_str())
                .with_private(p.modifiers.access == Access::Private)
        })
        .collect()
}

fn property_types(class: &ClassSignature) -> Vec<TypedElement> {
    public_properties(class)
        .map(|p| TypedElement {
            key: property_key(p),
            label: format!("property '{}'", p.name),
            ty: p.ty.clone(),
        })
        .collect()
}

/// `became_readonly` selects the compatible direction; otherwise reports
/// properties that lost `readonly`.
fn readonly_change(code: ChangeCode, became_readonly: bool) -> Checker {
    typed::<ClassSignature, _>(code, move |before, after| {
        let lookup: HashMap<String, bool> = public_properties(after)
            .map(|p| (property_key(p), p.modifiers.is_readonly()))
            .collect();

        let names: Vec<&str> = public_properties(before)
            .filter(|p| {
                let Some(&after_readonly) = lookup.get(&property_key(p)) else {
                    return false;
                };
                let before_readonly = p.modifiers.is_readonly();
                if became_readonly {
                    before_readonly != after_readonly
                        && is_write_compatible(before_readonly, after_readonly)
                } else {
                    !is_write_compatible(before_readonly, after_readonly)
                }
            })
            .map(|p| p.name.as_str())
            .collect();

        let verb = if became_readonly {
            "became readonly"
        } else {
            "are no longer readonly"
        };
        (!names.is_empty()).then(|| format!("Properties {}: {}", verb, quoted(names)))
    })
}

fn generics(class: &ClassSignature) -> &[GenericParam] {
    &class.generics
}
