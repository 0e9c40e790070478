use thiserror::Error;

/// Errors surfaced by the recommendation engine. None are retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown crop: {0}")]
    UnknownCrop(String),
}

#[derive(Error, Debug)]
pub enum KnowledgeBaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate crop name: {0}")]
    DuplicateCrop(String),
    #[error("crop '{crop}': {field} must be a finite non-negative number")]
    InvalidValue { crop: String, field: &'static str },
    #[error("crop '{crop}': temperature band has min above max")]
    InvalidBand { crop: String },
    #[error("crop entry with empty name")]
    EmptyName,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
