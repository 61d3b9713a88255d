//! Error types for bridge calls.
//!
//! Errors are classified by origin: the transport, the host, a protocol
//! mismatch between the two, or bad input on the calling side. Transport and
//! host failures carry nothing but a message, and display as exactly that
//! message.

use thiserror::Error;

/// The unified error type for bridge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a usable host answer (unreachable host,
    /// timeout, non-2xx without a `message` field).
    #[error("{message}")]
    Transport { message: String },

    /// The host answered non-2xx with a `message` field.
    #[error("{message}")]
    Host { message: String },

    /// The host answered with a shape the caller did not expect.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors on the calling side.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Create a transport error from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
        }
    }

    /// Create a host-reported error.
    pub fn host(message: impl Into<String>) -> Self {
        Error::Host {
            message: message.into(),
        }
    }

    /// Returns the human-readable message without any origin prefix.
    pub fn message(&self) -> String {
        match self {
            Error::Transport { message } | Error::Host { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns true if the host itself reported this failure.
    pub fn is_host_error(&self) -> bool {
        matches!(self, Error::Host { .. })
    }
}

/// Mismatches between what the host sent and what the caller declared.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A success body had no `data` field.
    #[error("response from '{namespace}' for action '{action}' has no data field")]
    MissingData { namespace: String, action: String },

    /// The response body could not be decoded as the requested response type.
    #[error("undecodable response body: {message}")]
    Body { message: String },

    /// The unwrapped `data` did not match the declared output shape.
    #[error("unexpected result shape for '{action}': {message}")]
    Shape { action: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid host URL.
    #[error("invalid host URL '{value}': {reason}")]
    HostUrl { value: String, reason: String },

    /// Unknown bridge namespace.
    #[error("unknown namespace '{value}'")]
    Namespace { value: String },

    /// Unknown action for a namespace.
    #[error("unknown action '{value}' for namespace '{namespace}'")]
    Action { namespace: String, value: String },

    /// A document handed to the timestamp write-path was not a JSON object.
    #[error("document at index {index} is not an object")]
    Document { index: usize },

    /// A request header could not be encoded.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Action parameters could not be serialized.
    #[error("unserializable parameters for '{action}': {reason}")]
    Params { action: String, reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_displays_bare_message() {
        let err = Error::host("not found");
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.message(), "not found");
        assert!(err.is_host_error());
    }

    #[test]
    fn transport_error_displays_bare_message() {
        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(!err.is_host_error());
    }

    #[test]
    fn protocol_error_is_prefixed() {
        let err: Error = ProtocolError::MissingData {
            namespace: "fs".to_string(),
            action: "stats".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "protocol error: response from 'fs' for action 'stats' has no data field"
        );
    }
}
