use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::schema::{Property, ResponseSchema};
use crate::config::Group;
use crate::parse::operation::{ParamLocation, Parameter};
use crate::parse::schema::Schema;

/// One documentation unit per tag: the apex resource plus every path under
/// the collection's base path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "basePath")]
    pub base_path: String,

    pub group: Group,

    pub resource: Resource,

    pub paths: Vec<PathDoc>,
}

/// The apex, page-level entity of a collection. The raw required list is
/// dropped here; each property carries its own computed flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub name: String,
    pub properties: Vec<Property>,
    pub example: String,
}

/// One documented path with its methods in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathDoc {
    pub name: String,
    pub methods: Vec<Method>,
}

/// One HTTP method on a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Method {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<ParamLocation, Vec<ParameterDoc>>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<ResponseDoc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ResponseSchema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A documented parameter. Passed through from the operation apart from the
/// file-upload regrouping; body schemas stay raw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDoc {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParamLocation,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl From<&Parameter> for ParameterDoc {
    fn from(param: &Parameter) -> Self {
        Self {
            name: param.name.clone(),
            location: param.location,
            schema_type: param.schema_type.clone(),
            format: param.format.clone(),
            required: param.required,
            items: param.items.clone(),
            description: param.description.clone(),
            schema: param.schema.clone(),
        }
    }
}

/// A response key. Numeric status codes order ahead of named keys such as
/// `default`, and only numeric 2xx codes can supply a method's model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusCode {
    Numeric(u16),
    Named(String),
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Numeric(code) if (200..300).contains(code))
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StatusCode::Numeric(code) => serializer.serialize_u16(*code),
            StatusCode::Named(name) => serializer.serialize_str(name),
        }
    }
}

/// A documented response, tagged with its status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseDoc {
    pub code: StatusCode,

    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResponseSchema>,
}
