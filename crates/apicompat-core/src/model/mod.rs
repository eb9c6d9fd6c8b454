//! Signature model.
//!
//! Immutable descriptions of exported API members as produced by an external
//! extractor, plus the versioned [`Snapshot`] that groups them.

pub mod signature;
pub mod snapshot;

pub use signature::{
    pair, Access, ClassMethod, ClassProperty, ClassSignature, ConstantSignature, EnumLiteral,
    EnumSignature, EnumValue, FunctionSignature, GenericParam, IndexSignature, InterfaceProperty,
    InterfaceSignature, Member, MemberScope, MemberType, MethodModifier, Parameter,
    PropertyModifiers, PropertyType, Signature, SignatureKind, TypeAliasSignature, Usage,
    WriteModifier,
};
pub use snapshot::{parse_snapshot_bytes, Snapshot};
