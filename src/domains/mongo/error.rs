//! Session-level error taxonomy.

use std::fmt;

use thiserror::Error;

/// The document operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// Errors surfaced by the MongoDB session and the document tools.
///
/// The `Display` output is the exact text returned to MCP clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A document operation was attempted without an active connection.
    #[error("not connected, call connect first")]
    NotConnected,

    /// Opening the connection failed; the session was reset.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A document operation failed; the connection is left untouched.
    #[error("{operation} failed: {reason}")]
    OperationFailed { operation: Operation, reason: String },
}

impl SessionError {
    /// Create a new "connection failed" error.
    pub fn connection_failed(reason: impl Into<String>) -> Self {
        Self::ConnectionFailed(reason.into())
    }

    /// Create a new "operation failed" error.
    pub fn operation_failed(operation: Operation, reason: impl Into<String>) -> Self {
        Self::OperationFailed {
            operation,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SessionError::NotConnected.to_string(),
            "not connected, call connect first"
        );
        assert_eq!(
            SessionError::connection_failed("no servers").to_string(),
            "connection failed: no servers"
        );
        assert_eq!(
            SessionError::operation_failed(Operation::Update, "bad $set").to_string(),
            "update failed: bad $set"
        );
    }
}
