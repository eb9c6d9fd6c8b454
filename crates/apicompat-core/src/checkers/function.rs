use super::factories::{
    added_generics, generic_extends_change, incompatible, opt_req_modifier_change,
    params_type_change, removed_generics, required_params_change, return_type_change, widened,
    Callable, Optionality,
};
use super::Checker;
use crate::model::{FunctionSignature, GenericParam};
use crate::registry::ChangeCode;

pub fn checkers() -> Vec<Checker> {
    vec![
        return_type_change(
            ChangeCode::FunctionReturnTypeChanged,
            "Return type changed",
            callable,
            incompatible,
        ),
        return_type_change(
            ChangeCode::FunctionReturnTypeWidened,
            "Return type widened",
            callable,
            widened,
        ),
        opt_req_modifier_change(
            ChangeCode::FunctionParamsChangedToOptional,
            "Parameters changed to optional",
            callable,
            Optionality::ToOptional,
        ),
        opt_req_modifier_change(
            ChangeCode::FunctionParamsChangedToRequired,
            "Parameters changed to required",
            callable,
            Optionality::ToRequired,
        ),
        required_params_change(
            ChangeCode::FunctionRequiredParamsChanged,
            "Required parameters count changed",
            callable,
        ),
        params_type_change(
            ChangeCode::FunctionParamsTypeChanged,
            "Parameters changed type",
            callable,
            incompatible,
        ),
        params_type_change(
            ChangeCode::FunctionParamsTypeWidened,
            "Parameters type widened",
            callable,
            widened,
        ),
        added_generics(ChangeCode::FunctionRequiredGenericAdded, generics, true),
        added_generics(ChangeCode::FunctionOptionalGenericAdded, generics, false),
        removed_generics(ChangeCode::FunctionGenericRemoved, generics),
        generic_extends_change(ChangeCode::FunctionGenericExtendsChanged, generics, incompatible),
    ]
}

fn callable(function: &FunctionSignature) -> Vec<Callable<'_>> {
    vec![Callable {
        key: String::new(),
        label: String::new(),
        parameters: &function.parameters,
        return_type: &function.return_type,
    }]
}

fn generics(function: &FunctionSignature) -> &[GenericParam] {
    &function.generics
}
