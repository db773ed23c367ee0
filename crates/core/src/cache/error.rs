use thiserror::Error;

/// Errors surfaced by cache implementations.
///
/// Callers treat these as soft failures: a cache miss and a cache
/// error both fall back to the underlying store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            CacheError::OperationFailed("lock poisoned".to_string()).to_string(),
            "Cache operation failed: lock poisoned"
        );
        assert_eq!(
            CacheError::Serialization("invalid JSON".to_string()).to_string(),
            "Serialization error: invalid JSON"
        );
    }
}
