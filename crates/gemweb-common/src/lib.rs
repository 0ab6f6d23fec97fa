pub mod errors;

pub use errors::{ConfigError, GemwebError};

pub type Result<T> = std::result::Result<T, GemwebError>;
