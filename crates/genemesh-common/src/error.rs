use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneMeshError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Data store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Message template not found: {0}")]
    MissingTemplate(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeneMeshError {
    pub fn not_found(what: impl Into<String>) -> Self {
        GeneMeshError::NotFound(what.into())
    }

    /// Lookup failures that callers are allowed to skip over.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeneMeshError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GeneMeshError>;
