//! Error type for fallible map lookups

use thiserror::Error;

/// Errors returned by `LinearHashMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested key is not present in the map
    #[error("key not found")]
    KeyNotFound,
}

/// Convenience alias for results carrying [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
    }
}
