//! # rpcgen Client
//!
//! The transport primitive behind every generated binding, in Rust: one
//! JSON-RPC 2.0 POST per call, positional params, HTTP Basic auth when both
//! credentials are present. The `result` member is returned as-is; nothing
//! checks it against a declared result type.
//!
//! ```rust,ignore
//! use rpcgen_client::{ClientArgs, RpcClient};
//!
//! let client = RpcClient::new(ClientArgs {
//!     host: "localhost".into(),
//!     port: 18332,
//!     user: Some("user".into()),
//!     pass: Some("pass".into()),
//! });
//!
//! let height = client.request("getblockcount", vec![]).await?;
//! ```

mod error;

pub use error::TransportError;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Construction parameters.
#[derive(Clone, Default, Deserialize)]
pub struct ClientArgs {
    pub host: String,
    pub port: u16,
    #[serde(default, alias = "username")]
    pub user: Option<String>,
    #[serde(default, alias = "password")]
    pub pass: Option<String>,
}

impl fmt::Debug for ClientArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientArgs")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Clone)]
struct Credentials {
    user: String,
    pass: String,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a [Value],
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// JSON-RPC client for one node endpoint.
pub struct RpcClient {
    url: String,
    credentials: Option<Credentials>,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.url)
            .field("auth", &self.credentials.is_some())
            .finish()
    }
}

impl RpcClient {
    /// Creates a client for `http://host:port`.
    ///
    /// Auth is enabled only when both `user` and `pass` are non-empty.
    pub fn new(args: ClientArgs) -> Self {
        Self::with_http(args, reqwest::Client::new())
    }

    /// Creates a client whose requests time out after `timeout`.
    pub fn with_timeout(args: ClientArgs, timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(args, http))
    }

    fn with_http(args: ClientArgs, http: reqwest::Client) -> Self {
        let credentials = match (args.user, args.pass) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Credentials { user, pass })
            }
            _ => None,
        };

        Self {
            url: format!("http://{}:{}", args.host, args.port),
            credentials,
            http,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_auth(&self) -> bool {
        self.credentials.is_some()
    }

    /// Value of the `Authorization` header, if auth is enabled.
    pub fn auth_header(&self) -> Option<String> {
        self.credentials.as_ref().map(|c| {
            format!("Basic {}", STANDARD.encode(format!("{}:{}", c.user, c.pass)))
        })
    }

    /// Issues one RPC call and returns its `result` member.
    pub async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: &params,
        };

        let mut request = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body);
        if let Some(header) = self.auth_header() {
            request = request.header(AUTHORIZATION, header);
        }

        debug!(method, id, params = params.len(), "Sending RPC request.");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let decoded: Option<JsonRpcResponse> = serde_json::from_str(&text).ok();

        if status != StatusCode::OK {
            if let Some(JsonRpcError { code, message: Some(message) }) =
                decoded.and_then(|body| body.error)
            {
                return Err(TransportError::Rpc { code, message });
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            });
        }

        let body = decoded.ok_or_else(|| TransportError::Decode(truncate(&text, 200)))?;
        if let Some(error) = body.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message.unwrap_or_else(|| "unknown RPC error".to_string()),
            });
        }

        Ok(body.result)
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(user: Option<&str>, pass: Option<&str>) -> ClientArgs {
        ClientArgs {
            host: "localhost".to_string(),
            port: 18332,
            user: user.map(str::to_string),
            pass: pass.map(str::to_string),
        }
    }

    #[test]
    fn test_url() {
        let client = RpcClient::new(args(None, None));
        assert_eq!(client.url(), "http://localhost:18332");
    }

    #[test]
    fn test_auth_header_with_both_credentials() {
        let client = RpcClient::new(args(Some("user"), Some("pass")));
        assert!(client.has_auth());
        assert_eq!(client.auth_header().as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_no_partial_auth() {
        for (user, pass) in [(Some("user"), None), (None, Some("pass")), (None, None), (Some(""), Some("pass"))] {
            let client = RpcClient::new(args(user, pass));
            assert!(!client.has_auth());
            assert_eq!(client.auth_header(), None);
        }
    }

    #[test]
    fn test_args_accept_long_credential_names() {
        let args: ClientArgs = serde_json::from_str(
            r#"{ "host": "127.0.0.1", "port": 8332, "username": "alice", "password": "secret" }"#,
        )
        .unwrap();
        assert_eq!(args.user.as_deref(), Some("alice"));
        assert_eq!(args.pass.as_deref(), Some("secret"));
        assert!(!format!("{:?}", args).contains("secret"));
    }

    #[test]
    fn test_error_display() {
        let err = TransportError::Rpc { code: Some(-32601), message: "Method not found".to_string() };
        assert_eq!(err.to_string(), "RPC error -32601: Method not found");
        assert_eq!(err.server_message(), Some("Method not found"));
    }
}
