//! Transport error types.

use thiserror::Error;

/// Failure of a single RPC call. Never retried.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS or body read failure.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a JSON-RPC error object.
    #[error("RPC error{}: {message}", .code.map(|c| format!(" {}", c)).unwrap_or_default())]
    Rpc {
        code: Option<i64>,
        message: String,
    },

    /// Non-200 status without a server-supplied error message.
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
    },

    /// A 200 response whose body is not a JSON-RPC response.
    #[error("Invalid JSON-RPC response: {0}")]
    Decode(String),
}

impl TransportError {
    /// The server's error message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rpc { message, .. } => Some(message),
            _ => None,
        }
    }
}
