use super::factories::{incompatible, typed_element_change, widened, TypedChange, TypedElement};
use super::Checker;
use crate::model::ConstantSignature;
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![
        typed_element_change(
            ChangeCode::ConstantTypeChanged,
            TypedChange {
                header: "Constant changed type",
                get_elements: constant_type,
                compare: incompatible,
            },
        ),
        typed_element_change(
            ChangeCode::ConstantTypeWidened,
            TypedChange {
                header: "Constant type widened",
                get_elements: constant_type,
                compare: widened,
            },
        ),
    ]
}

fn constant_type(constant: &ConstantSignature) -> Vec<TypedElement> {
    vec![TypedElement {
        key: String::new(),
        label: String::new(),
        ty: constant.ty.clone(),
    }]
}
