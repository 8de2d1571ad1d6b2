//! Error types for hex grid construction and queries

use thiserror::Error;

/// Errors that can occur while building a grid or its collaborators
///
/// Edits that are forbidden by the terrain rules (rivers flowing uphill,
/// rivers into the void) are not errors: they are refused silently and the
/// mutating method reports `false`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Requested cell index does not exist
    #[error("cell not found: {0}")]
    CellNotFound(usize),
    /// Raw noise texture data is unusable
    #[error("invalid noise texture: {0}")]
    InvalidNoiseTexture(String),
}

/// Result type alias for hex terrain operations
pub type Result<T> = std::result::Result<T, HexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HexError::InvalidConfig("chunk_count_x must be >= 1".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: chunk_count_x must be >= 1"
        );
        assert_eq!(HexError::CellNotFound(7).to_string(), "cell not found: 7");
    }
}
