/// Failure to turn a schema document into a [`Message`](wiregen_core::Message).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// `default` held something other than a string or an integer.
    #[error("unsupported default literal {value} for field '{field}'")]
    UnsupportedDefault { field: String, value: String },
}
