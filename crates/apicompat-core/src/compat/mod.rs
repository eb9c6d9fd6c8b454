//! Pure compatibility predicates shared by the checkers.

pub mod params;
pub mod types;

pub use params::{
    get_changed_required, get_changed_to_optional, get_changed_to_required, get_common_methods,
    is_less_visible, is_more_visible, is_write_compatible, method_key, method_key_without_access,
    method_label, method_name_key, MethodMatchOptions, MethodPair, RequiredChanges,
};
pub use types::{are_compatible, are_not_compatible, is_more_applicable, type_alternatives, ANY_TYPE};
