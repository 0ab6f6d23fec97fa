use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("missing credentials: {0}")]
    MissingCredentials(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GemwebError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("client error: {0}")]
    Client(String),

    #[error("{0}")]
    Other(String),
}
