use serde::{Serialize, Serializer};

use super::is_false;

/// The resolved `type` of a schema node. In the emitted JSON this is either
/// a bare string (primitive name, `"array"`, `"enum"`, or a resource-name
/// token) or a fully expanded definition object; the tagged variant keeps
/// the renderer and resolver exhaustive instead of shape-sniffing.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    /// A declared primitive type name (`string`, `integer`, ...).
    Primitive(String),
    /// An array; the carrying node holds the item shape.
    Array,
    /// A property that declared an `enum`, whatever its primitive type was.
    Enum,
    /// A reference resolved to a bare name: either a top-level resource
    /// (documented on its own page, never inlined) or a cycle break.
    Token(String),
    /// A reference expanded in place; the referencing node gets `isRef`.
    Inline(Box<ResolvedDefinition>),
}

impl SchemaType {
    /// The string spelling of this type, as the example renderer emits it.
    pub fn label(&self) -> &str {
        match self {
            SchemaType::Primitive(name) | SchemaType::Token(name) => name,
            SchemaType::Array => "array",
            SchemaType::Enum => "enum",
            SchemaType::Inline(_) => "object",
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, SchemaType::Inline(_))
    }
}

impl Serialize for SchemaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaType::Inline(def) => def.serialize(serializer),
            other => serializer.serialize_str(other.label()),
        }
    }
}

/// A definition expanded at a reference site: its properties already
/// normalized into an ordered list. The raw required list is kept in the
/// output for inline expansions (only the apex resource drops it).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedDefinition {
    pub properties: Vec<Property>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// A normalized, annotated property record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ItemSchema>>,

    pub required: bool,

    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "isRef", skip_serializing_if = "is_false")]
    pub is_ref: bool,
}

/// The resolved item shape of an array node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSchema {
    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "isRef", skip_serializing_if = "is_false")]
    pub is_ref: bool,
}

/// A resolved response (or model) schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ItemSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "isRef", skip_serializing_if = "is_false")]
    pub is_ref: bool,
}
