pub mod document;
pub mod operation;
pub mod schema;

use crate::error::ParseError;
use document::SwaggerDoc;

/// Parse a Swagger 2.0 document from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerDoc, ParseError> {
    let doc: SwaggerDoc = serde_yaml_ng::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

/// Parse a Swagger 2.0 document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerDoc, ParseError> {
    let doc: SwaggerDoc = serde_json::from_str(input)?;
    validate_version(&doc)?;
    Ok(doc)
}

fn validate_version(doc: &SwaggerDoc) -> Result<(), ParseError> {
    if doc.swagger != "2.0" {
        return Err(ParseError::UnsupportedVersion(doc.swagger.clone()));
    }
    Ok(())
}
