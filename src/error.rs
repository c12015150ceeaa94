//! Error types for jabber-rpc.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main error type for all Jabber-RPC operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Raw XML text could not be parsed into an element tree.
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A `<value/>` element does not match exactly one recognized shape
    /// (scalar, array, or struct).
    #[error("malformed value element: {0}")]
    MalformedValue(String),

    /// An inbound stanza is missing a structural part.
    #[error("malformed stanza: {0}")]
    MalformedStanza(&'static str),

    /// A local validation failure or a remote stanza-level error.
    #[error("{0}")]
    Fault(RpcFault),

    /// The call was dropped before a reply could be delivered to it.
    #[error("call abandoned before a reply arrived")]
    Abandoned,
}

/// Result type alias using RpcError.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Uniform error payload surfaced to callers and event sinks.
///
/// Local validation failures use `type = "modify"` and
/// `condition = "client-error"` with the offending request echoed back.
/// Remote stanza errors carry whatever `type`/`condition` the peer sent
/// and have no `description` or `request`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcFault {
    /// Stanza error type (`modify`, `auth`, `cancel`, ...).
    #[serde(rename = "type")]
    pub fault_type: String,
    /// Defined error condition (`client-error`, `forbidden`, ...).
    pub condition: String,
    /// Human-readable detail, set for local validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The request that triggered a local validation failure, echoed verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<serde_json::Value>,
}

impl RpcFault {
    /// Build a local validation fault echoing the offending request.
    pub fn client_error(description: &str, request: serde_json::Value) -> Self {
        Self {
            fault_type: "modify".to_string(),
            condition: "client-error".to_string(),
            description: Some(description.to_string()),
            request: Some(request),
        }
    }

    /// Build a fault from a remote stanza error's `type` and condition.
    pub fn stanza(fault_type: &str, condition: &str) -> Self {
        Self {
            fault_type: fault_type.to_string(),
            condition: condition.to_string(),
            description: None,
            request: None,
        }
    }
}

impl fmt::Display for RpcFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.fault_type, self.condition)?;
        if let Some(description) = &self.description {
            write!(f, ": {}", description)?;
        }
        Ok(())
    }
}

impl From<RpcFault> for RpcError {
    fn from(fault: RpcFault) -> Self {
        RpcError::Fault(fault)
    }
}
