#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
