use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported swagger version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("dangling reference to '{target}' in {context}")]
    DanglingRef { target: String, context: String },

    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("collection '{0}' doesn't have a group specified")]
    UnknownGroup(String),

    #[error("collection '{collection}' has no resource definition '{definition}'")]
    MissingResource {
        collection: String,
        definition: String,
    },
}
