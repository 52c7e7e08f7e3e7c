#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The object does not exist. Callers treat this as a domain
    /// condition, not a fault.
    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    /// Network, permission, or service failure. Not retried here; the
    /// caller decides whether the whole operation is repeated.
    #[error("Storage fault: {0}")]
    Transient(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
