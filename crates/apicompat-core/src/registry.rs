//! Change registry
//!
//! Static code → metadata table. Every checker references exactly one entry;
//! [`ChangeCode::NoChange`] is the sentinel a checker reports when its rule
//! does not fire.

use crate::errors::ApiCompatError;
use crate::model::{MemberScope, MemberType};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Impact of a change on downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Breaking,
    Compatible,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Breaking => "breaking",
            ChangeStatus::Compatible => "compatible",
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Added,
    Removed,
    Changed,
    None,
}

/// Registry entry for one change code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    pub code: ChangeCode,
    pub status: ChangeStatus,
    pub action: ChangeAction,
    pub description: &'static str,
    pub member_type: MemberScope,
}

impl ChangeInfo {
    pub fn is_breaking(&self) -> bool {
        self.status == ChangeStatus::Breaking
    }
}

macro_rules! change_codes {
    ($(
        $variant:ident => $code:literal, $status:ident, $action:ident, $scope:expr, $description:literal;
    )*) => {
        /// Every change the checker set can report.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ChangeCode {
            $($variant,)*
        }

        impl ChangeCode {
            /// All codes in registry order.
            pub const ALL: &'static [ChangeCode] = &[$(ChangeCode::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ChangeCode::$variant => $code,)*
                }
            }

            pub fn info(&self) -> ChangeInfo {
                match self {
                    $(ChangeCode::$variant => ChangeInfo {
                        code: ChangeCode::$variant,
                        status: ChangeStatus::$status,
                        action: ChangeAction::$action,
                        description: $description,
                        member_type: $scope,
                    },)*
                }
            }
        }

        impl FromStr for ChangeCode {
            type Err = ApiCompatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(ChangeCode::$variant),)*
                    other => Err(ApiCompatError::UnknownChangeCode {
                        code: other.to_string(),
                    }),
                }
            }
        }
    };
}

const COMMON: MemberScope = MemberScope::Common;
const CLASS: MemberScope = MemberScope::Member(MemberType::Class);
const CONSTANT: MemberScope = MemberScope::Member(MemberType::Constant);
const ENUM: MemberScope = MemberScope::Member(MemberType::Enum);
const FUNCTION: MemberScope = MemberScope::Member(MemberType::Function);
const INTERFACE: MemberScope = MemberScope::Member(MemberType::Interface);
const TYPE_ALIAS: MemberScope = MemberScope::Member(MemberType::Type);

change_codes! {
    NoChange => "no_change", Compatible, None, COMMON, "No change";

    ChangedMemberType => "changed_member_type", Breaking, Changed, COMMON,
        "Member type changed";
    MemberRemoval => "member_removal", Breaking, Removed, COMMON,
        "Member removed from package";

    ClassConstructorRequiredParamsChanged => "class_constructor_required_params_changed", Breaking, Changed, CLASS,
        "Constructor required parameters count changed";
    ClassConstructorParamsChangedToOptional => "class_constructor_params_changed_to_optional", Compatible, Changed, CLASS,
        "Constructor parameters changed to optional";
    ClassConstructorParamsChangedToRequired => "class_constructor_params_changed_to_required", Breaking, Changed, CLASS,
        "Constructor parameters changed to required";
    ClassConstructorParamsTypeChanged => "class_constructor_params_type_changed", Breaking, Changed, CLASS,
        "Constructor parameters changed type";
    ClassConstructorParamsTypeWidened => "class_constructor_params_type_widened", Compatible, Changed, CLASS,
        "Constructor parameters accept a wider type";
    ClassMethodReturnTypeChanged => "class_method_return_type_changed", Breaking, Changed, CLASS,
        "Method return type changed";
    ClassMethodReturnTypeWidened => "class_method_return_type_widened", Compatible, Changed, CLASS,
        "Method return type widened";
    ClassMethodParamsChangedToOptional => "class_method_params_changed_to_optional", Compatible, Changed, CLASS,
        "Method parameters changed to optional";
    ClassMethodParamsChangedToRequired => "class_method_params_changed_to_required", Breaking, Changed, CLASS,
        "Method parameters changed to required";
    ClassMethodRequiredParamsChanged => "class_method_required_params_changed", Breaking, Changed, CLASS,
        "Method required parameters count changed";
    ClassMethodParamsTypeChanged => "class_method_params_type_changed", Breaking, Changed, CLASS,
        "Method parameters changed type";
    ClassMethodParamsTypeWidened => "class_method_params_type_widened", Compatible, Changed, CLASS,
        "Method parameters accept a wider type";
    ClassMethodsAdded => "class_methods_added", Compatible, Added, CLASS,
        "Methods added";
    ClassMethodsRemoved => "class_methods_removed", Breaking, Removed, CLASS,
        "Methods removed";
    ClassMethodLessVisible => "class_method_less_visible", Breaking, Changed, CLASS,
        "Method visibility reduced";
    ClassMethodMoreVisible => "class_method_more_visible", Compatible, Changed, CLASS,
        "Method visibility increased";
    ClassPropertyLessVisible => "class_property_less_visible", Breaking, Changed, CLASS,
        "Property visibility reduced";
    ClassPropertyMoreVisible => "class_property_more_visible", Compatible, Changed, CLASS,
        "Property visibility increased";
    ClassPropertiesAdded => "class_properties_added", Compatible, Added, CLASS,
        "Properties added";
    ClassPropertiesRemoved => "class_properties_removed", Breaking, Removed, CLASS,
        "Properties removed";
    ClassPropertyTypeChanged => "class_property_type_changed", Breaking, Changed, CLASS,
        "Properties changed type";
    ClassPropertyTypeWidened => "class_property_type_widened", Compatible, Changed, CLASS,
        "Properties accept a wider type";
    ClassPropertyReadonlyAdded => "class_property_readonly_added", Compatible, Changed, CLASS,
        "Properties became readonly";
    ClassPropertyReadonlyRemoved => "class_property_readonly_removed", Breaking, Changed, CLASS,
        "Properties are no longer readonly";
    ClassRequiredGenericAdded => "class_required_generic_added", Breaking, Added, CLASS,
        "Required generic type parameters added";
    ClassOptionalGenericAdded => "class_optional_generic_added", Compatible, Added, CLASS,
        "Optional generic type parameters added";
    ClassGenericRemoved => "class_generic_removed", Breaking, Removed, CLASS,
        "Generic type parameters removed";
    ClassGenericExtendsChanged => "class_generic_extends_changed", Breaking, Changed, CLASS,
        "Generic type parameter bound changed";

    ConstantTypeChanged => "constant_type_changed", Breaking, Changed, CONSTANT,
        "Constant changed type";
    ConstantTypeWidened => "constant_type_widened", Compatible, Changed, CONSTANT,
        "Constant type widened";

    EnumValuesAdded => "enum_values_added", Compatible, Added, ENUM,
        "Enum values added";
    EnumValuesRemoved => "enum_values_removed", Breaking, Removed, ENUM,
        "Enum values removed";
    EnumValueChanged => "enum_value_changed", Breaking, Changed, ENUM,
        "Enum value literal changed";

    FunctionReturnTypeChanged => "function_return_type_changed", Breaking, Changed, FUNCTION,
        "Function return type changed";
    FunctionReturnTypeWidened => "function_return_type_widened", Compatible, Changed, FUNCTION,
        "Function return type widened";
    FunctionParamsChangedToOptional => "function_params_changed_to_optional", Compatible, Changed, FUNCTION,
        "Function parameters changed to optional";
    FunctionParamsChangedToRequired => "function_params_changed_to_required", Breaking, Changed, FUNCTION,
        "Function parameters changed to required";
    FunctionRequiredParamsChanged => "function_required_params_changed", Breaking, Changed, FUNCTION,
        "Function required parameters count changed";
    FunctionParamsTypeChanged => "function_params_type_changed", Breaking, Changed, FUNCTION,
        "Function parameters changed type";
    FunctionParamsTypeWidened => "function_params_type_widened", Compatible, Changed, FUNCTION,
        "Function parameters accept a wider type";
    FunctionRequiredGenericAdded => "function_required_generic_added", Breaking, Added, FUNCTION,
        "Required generic type parameters added";
    FunctionOptionalGenericAdded => "function_optional_generic_added", Compatible, Added, FUNCTION,
        "Optional generic type parameters added";
    FunctionGenericRemoved => "function_generic_removed", Breaking, Removed, FUNCTION,
        "Generic type parameters removed";
    FunctionGenericExtendsChanged => "function_generic_extends_changed", Breaking, Changed, FUNCTION,
        "Generic type parameter bound changed";

    InterfaceRequiredGenericAdded => "interface_required_generic_added", Breaking, Added, INTERFACE,
        "Required generic type parameters added";
    InterfaceOptionalGenericAdded => "interface_optional_generic_added", Compatible, Added, INTERFACE,
        "Optional generic type parameters added";
    InterfaceGenericRemoved => "interface_generic_removed", Breaking, Removed, INTERFACE,
        "Generic type parameters removed";
    InterfaceGenericExtendsChanged => "interface_generic_extends_changed", Breaking, Changed, INTERFACE,
        "Generic type parameter bound changed";
    InterfaceRequiredPropertiesAdded => "interface_required_properties_added", Breaking, Added, INTERFACE,
        "Required properties added";
    InterfaceOptionalPropertiesAdded => "interface_optional_properties_added", Compatible, Added, INTERFACE,
        "Optional properties added";
    InterfacePropertiesRemoved => "interface_properties_removed", Breaking, Removed, INTERFACE,
        "Properties removed";
    InterfacePropertyTypeChanged => "interface_property_type_changed", Breaking, Changed, INTERFACE,
        "Properties changed type";
    InterfacePropertyTypeWidened => "interface_property_type_widened", Compatible, Changed, INTERFACE,
        "Properties accept a wider type";
    InterfaceCallableTypesAdded => "interface_callable_types_added", Compatible, Added, INTERFACE,
        "Callable types added";
    InterfaceCallableTypesRemoved => "interface_callable_types_removed", Breaking, Removed, INTERFACE,
        "Callable types removed";
    InterfaceCallableReturnTypeChanged => "interface_callable_return_type_changed", Breaking, Changed, INTERFACE,
        "Callable type return type changed";
    InterfaceCallableParamsChangedToOptional => "interface_callable_params_changed_to_optional", Compatible, Changed, INTERFACE,
        "Callable type parameters changed to optional";
    InterfaceCallableParamsChangedToRequired => "interface_callable_params_changed_to_required", Breaking, Changed, INTERFACE,
        "Callable type parameters changed to required";
    InterfaceIndexSignatureChanged => "interface_index_signature_changed", Breaking, Changed, INTERFACE,
        "Index signature changed";

    TypeAliasTypeChanged => "type_alias_type_changed", Breaking, Changed, TYPE_ALIAS,
        "Type alias changed type";
    TypeAliasTypeWidened => "type_alias_type_widened", Compatible, Changed, TYPE_ALIAS,
        "Type alias widened";
    TypeAliasRequiredGenericAdded => "type_alias_required_generic_added", Breaking, Added, TYPE_ALIAS,
        "Required generic type parameters added";
    TypeAliasOptionalGenericAdded => "type_alias_optional_generic_added", Compatible, Added, TYPE_ALIAS,
        "Optional generic type parameters added";
    TypeAliasGenericRemoved => "type_alias_generic_removed", Breaking, Removed, TYPE_ALIAS,
        "Generic type parameters removed";
}

impl ChangeCode {
    pub fn is_sentinel(&self) -> bool {
        *self == ChangeCode::NoChange
    }
}

impl fmt::Display for ChangeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
