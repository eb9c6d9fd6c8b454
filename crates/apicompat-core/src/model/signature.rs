//! Tagged-union description of one exported API member.
//!
//! Field names follow the extractor wire format (camelCase, `memberType` as
//! the discriminator). Ordered lists keep declaration order; interface
//! properties are keyed by name in a `BTreeMap` so iteration is deterministic.

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of exported member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    Function,
    Constant,
    Class,
    Enum,
    Interface,
    Type,
}

impl MemberType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberType::Function => "function",
            MemberType::Constant => "constant",
            MemberType::Class => "class",
            MemberType::Enum => "enum",
            MemberType::Interface => "interface",
            MemberType::Type => "type",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member type a registry entry applies to; `Common` covers every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberScope {
    Common,
    Member(MemberType),
}

impl MemberScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberScope::Common => "common",
            MemberScope::Member(member_type) => member_type.as_str(),
        }
    }

    /// True if a signature of `member_type` falls under this scope.
    pub fn covers(&self, member_type: MemberType) -> bool {
        match self {
            MemberScope::Common => true,
            MemberScope::Member(own) => *own == member_type,
        }
    }
}

impl Serialize for MemberScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One exported API member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Source location reported by the extractor
    pub path: String,
    pub member_name: String,
    /// Dotted container path, if the member is declared inside a namespace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub kind: SignatureKind,
}

impl Signature {
    pub fn member_type(&self) -> MemberType {
        match &self.kind {
            SignatureKind::Function(_) => MemberType::Function,
            SignatureKind::Constant(_) => MemberType::Constant,
            SignatureKind::Class(_) => MemberType::Class,
            SignatureKind::Enum(_) => MemberType::Enum,
            SignatureKind::Interface(_) => MemberType::Interface,
            SignatureKind::Type(_) => MemberType::Type,
        }
    }

    /// `namespace.memberName`, or just `memberName` outside a namespace.
    pub fn qualified_name(&self) -> String {
        match self.namespace.as_deref() {
            Some(namespace) if !namespace.is_empty() => {
                format!("{}.{}", namespace, self.member_name)
            }
            _ => self.member_name.clone(),
        }
    }
}

/// Member-type specific payload, discriminated by `memberType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "memberType", rename_all = "lowercase")]
pub enum SignatureKind {
    Function(FunctionSignature),
    Constant(ConstantSignature),
    Class(ClassSignature),
    Enum(EnumSignature),
    Interface(InterfaceSignature),
    Type(TypeAliasSignature),
}

/// Generic type parameter. A parameter with a default is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericParam {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl GenericParam {
    pub fn is_optional(&self) -> bool {
        self.default.is_some()
    }

    fn render(&self) -> String {
        let mut out = self.name.clone();
        if let Some(extends) = &self.extends {
            out.push_str(" extends ");
            out.push_str(extends);
        }
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_optional: bool,
}

/// Function-shaped entity: free functions, constructors, call and construct
/// signatures, and function-typed interface properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionSignature {
    #[serde(default)]
    pub generics: Vec<GenericParam>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Empty for constructors, which the extractor may emit without one
    #[serde(default)]
    pub return_type: String,
}

impl FunctionSignature {
    /// Parameter names in declaration order, e.g. `(a, b)`.
    pub fn derived_name(&self) -> String {
        let names: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        format!("({})", names.join(", "))
    }

    /// Type-level rendering, e.g. `<T>(a: T, b?: string) => void`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.generics.is_empty() {
            let generics: Vec<String> = self.generics.iter().map(GenericParam::render).collect();
            out.push_str(&format!("<{}>", generics.join(", ")));
        }
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                let marker = if p.is_optional { "?" } else { "" };
                format!("{}{}: {}", p.name, marker, p.ty)
            })
            .collect();
        out.push_str(&format!("({}) => {}", params.join(", "), self.return_type));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantSignature {
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Private,
    Protected,
    Public,
}

impl Access {
    /// Visibility rank: private < protected < public.
    pub fn rank(&self) -> u8 {
        match self {
            Access::Private => 10,
            Access::Protected => 20,
            Access::Public => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Private => "private",
            Access::Protected => "protected",
            Access::Public => "public",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Usage {
    Static,
    Instance,
}

impl Usage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Usage::Static => "static",
            Usage::Instance => "instance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteModifier {
    Readonly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyModifiers {
    pub access: Access,
    pub usage: Usage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<WriteModifier>,
}

impl PropertyModifiers {
    pub fn is_readonly(&self) -> bool {
        matches!(self.write, Some(WriteModifier::Readonly))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub modifiers: PropertyModifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodModifier {
    pub access: Access,
    pub usage: Usage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMethod {
    pub name: String,
    pub modifier: MethodModifier,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSignature {
    #[serde(default)]
    pub generics: Vec<GenericParam>,
    #[serde(default)]
    pub constructors: Vec<FunctionSignature>,
    #[serde(default)]
    pub properties: Vec<ClassProperty>,
    #[serde(default)]
    pub methods: Vec<ClassMethod>,
}

/// Literal an enum member evaluates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumLiteral::Number(n) => write!(f, "{}", n),
            EnumLiteral::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: EnumLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumSignature {
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// Declared type of an interface property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PropertyType {
    Type {
        #[serde(rename = "type")]
        ty: String,
    },
    Function(FunctionSignature),
}

impl PropertyType {
    pub fn render(&self) -> String {
        match self {
            PropertyType::Type { ty } => ty.clone(),
            PropertyType::Function(function) => function.render(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceProperty {
    #[serde(rename = "type")]
    pub ty: PropertyType,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_readonly: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSignature {
    pub index: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl IndexSignature {
    pub fn render(&self) -> String {
        format!("[{}]: {}", self.index, self.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceSignature {
    #[serde(default)]
    pub properties: BTreeMap<String, InterfaceProperty>,
    #[serde(default)]
    pub generics: Vec<GenericParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<IndexSignature>,
    #[serde(default)]
    pub callable_types: Vec<FunctionSignature>,
    #[serde(default)]
    pub constructor_types: Vec<FunctionSignature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAliasSignature {
    #[serde(default)]
    pub generics: Vec<GenericParam>,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Projection of a [`Signature`] onto one concrete member kind.
///
/// Rules are written against the concrete type; a pair whose sides are not
/// both of that kind never reaches the rule body.
pub trait Member {
    const MEMBER_TYPE: MemberType;

    fn from_signature(signature: &Signature) -> Option<&Self>;
}

macro_rules! impl_member {
    ($ty:ty, $variant:ident) => {
        impl Member for $ty {
            const MEMBER_TYPE: MemberType = MemberType::$variant;

            fn from_signature(signature: &Signature) -> Option<&Self> {
                match &signature.kind {
                    SignatureKind::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_member!(FunctionSignature, Function);
impl_member!(ConstantSignature, Constant);
impl_member!(ClassSignature, Class);
impl_member!(EnumSignature, Enum);
impl_member!(InterfaceSignature, Interface);
impl_member!(TypeAliasSignature, Type);

/// Both sides of a matched pair as `M`, or `None` if either side is absent or
/// of another kind.
pub fn pair<'s, M: Member>(
    before: &'s Signature,
    after: Option<&'s Signature>,
) -> Option<(&'s M, &'s M)> {
    let before = M::from_signature(before)?;
    let after = M::from_signature(after?)?;
    Some((before, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_qualified_name_with_namespace() {
        let sig: Signature = serde_json::from_value(json!({
            "path": "src/a.ts",
            "memberType": "constant",
            "memberName": "a",
            "namespace": "Test",
            "type": "number"
        }))
        .unwrap();
        assert_eq!(sig.qualified_name(), "Test.a");
        assert_eq!(sig.member_type(), MemberType::Constant);
    }

    #[test]
    fn test_interface_property_kinds_decode() {
        let sig: Signature = serde_json::from_value(json!({
            "path": "src/i.ts",
            "memberType": "interface",
            "memberName": "I",
            "properties": {
                "a": {"type": {"kind": "type", "type": "string"}, "isOptional": true, "isReadonly": false},
                "f": {"type": {"kind": "function", "generics": [], "parameters": [{"name": "x", "type": "number", "isOptional": false}], "returnType": "void"}, "isOptional": false, "isReadonly": false}
            }
        }))
        .unwrap();
        let SignatureKind::Interface(interface) = &sig.kind else {
            panic!("expected interface");
        };
        assert_eq!(interface.properties["a"].ty.render(), "string");
        assert_eq!(interface.properties["f"].ty.render(), "(x: number) => void");
    }

    #[test]
    fn test_enum_literal_display_distinguishes_text_and_number() {
        let number = EnumLiteral::Number(1.into());
        let text = EnumLiteral::Text("1".to_string());
        assert_eq!(number.to_string(), "1");
        assert_eq!(text.to_string(), "\"1\"");
        assert_ne!(number.to_string(), text.to_string());
    }

    #[test]
    fn test_pair_rejects_mismatched_kinds() {
        let constant: Signature = serde_json::from_value(json!({
            "path": "a.ts", "memberType": "constant", "memberName": "a", "type": "number"
        }))
        .unwrap();
        let function: Signature = serde_json::from_value(json!({
            "path": "a.ts", "memberType": "function", "memberName": "a", "returnType": "void"
        }))
        .unwrap();
        assert!(pair::<ConstantSignature>(&constant, Some(&function)).is_none());
        assert!(pair::<ConstantSignature>(&constant, None).is_none());
        assert!(pair::<ConstantSignature>(&constant, Some(&constant)).is_some());
    }

    #[test]
    fn test_access_rank_order() {
        assert!(Access::Private.rank() < Access::Protected.rank());
        assert!(Access::Protected.rank() < Access::Public.rank());
    }
}
