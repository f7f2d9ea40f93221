//! Error Types

use thiserror::Error;

/// Addressing and expiry failures reported by the collections
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlError {
    /// Key is absent, was deleted, or has logically expired
    #[error("key not found")]
    KeyNotFound,
    /// Index is at or past the current physical length
    #[error("index out of bound")]
    IndexOutOfBound,
    /// Slot exists but its validity window has passed
    #[error("element expired")]
    Expired,
}

pub type Result<T> = std::result::Result<T, TtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(TtlError::KeyNotFound.to_string(), "key not found");
        assert_eq!(TtlError::IndexOutOfBound.to_string(), "index out of bound");
        assert_eq!(TtlError::Expired.to_string(), "element expired");
    }
}
