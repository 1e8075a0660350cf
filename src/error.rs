//! Interop error types.

use std::fmt;

/// Errors that can occur when translating calls to the native API.
///
/// Driver-reported failures (shader compile/link errors) are deliberately
/// *not* represented here: the native API reports them as a status flag plus
/// a log string, and the facade returns them to the caller as data. This enum
/// covers caller-side contract violations that are caught before any native
/// call is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlError {
    /// An invalid parameter was provided (empty upload, bad uniform stride).
    InvalidParameter(String),
    /// An operation was given a handle that was never allocated.
    InvalidHandle(String),
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
        }
    }
}

impl std::error::Error for GlError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GlError::InvalidParameter("empty upload".to_string());
        assert_eq!(err.to_string(), "invalid parameter: empty upload");

        let err = GlError::InvalidHandle("buffer was never allocated".to_string());
        assert_eq!(err.to_string(), "invalid handle: buffer was never allocated");
    }
}
