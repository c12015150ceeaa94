//! Recognition and extraction of inbound RPC call stanzas.
//!
//! [`handles`] tells the surrounding stanza router whether an `<iq/>` is a
//! Jabber-RPC call for the local entity. [`parse_call`] then pulls out the
//! sender, method name, correlation id, and decoded parameters. Replying to
//! the call is the consumer's responsibility, not this module's.

use serde::Serialize;

use crate::codec::{decode_params, RpcValue};
use crate::error::{Result, RpcError};
use crate::xml::Element;
use crate::NS;

/// A bare or full JID split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Jid {
    /// Node part, absent for domain-only JIDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Domain part, always present.
    pub domain: String,
    /// Resource part, absent for bare JIDs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl Jid {
    /// Split `user@domain/resource` into parts; user and resource are
    /// optional.
    pub fn parse(jid: &str) -> Self {
        let (bare, resource) = match jid.split_once('/') {
            Some((bare, resource)) => (bare, Some(resource.to_string())),
            None => (jid, None),
        };
        let (user, domain) = match bare.split_once('@') {
            Some((user, domain)) => (Some(user.to_string()), domain.to_string()),
            None => (None, bare.to_string()),
        };
        Jid {
            user,
            domain,
            resource,
        }
    }
}

/// An inbound RPC call, ready to hand to the external request handler.
///
/// `params` is `None` when the call carried no `<params/>` element at all,
/// distinct from `Some(vec![])` for a present-but-empty one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomingCall {
    /// Sender identity.
    pub from: Jid,
    /// The requested method name.
    pub command: String,
    /// Correlation token the reply must echo.
    pub id: String,
    /// Decoded parameters, if the call carried any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<RpcValue>>,
}

/// True iff the stanza is an `<iq/>` carrying a `methodCall` inside a query
/// in the RPC namespace.
pub fn handles(stanza: &Element) -> bool {
    stanza.name() == "iq"
        && stanza
            .get_child_ns("query", NS)
            .is_some_and(|query| query.get_child("methodCall").is_some())
}

/// Extract the call from a stanza [`handles`] accepted.
///
/// # Errors
///
/// Returns [`RpcError::MalformedStanza`] when a structural part is missing,
/// or a codec error when a parameter value fails to decode. A failed call
/// produces no partial output.
pub(crate) fn parse_call(stanza: &Element) -> Result<IncomingCall> {
    let from = stanza
        .attr("from")
        .ok_or(RpcError::MalformedStanza("call has no 'from' attribute"))?;
    let id = stanza
        .attr("id")
        .ok_or(RpcError::MalformedStanza("call has no 'id' attribute"))?;
    let method_call = stanza
        .get_child_ns("query", NS)
        .and_then(|query| query.get_child("methodCall"))
        .ok_or(RpcError::MalformedStanza("call has no methodCall"))?;
    let command = method_call
        .child_text("methodName")
        .ok_or(RpcError::MalformedStanza("call has no methodName"))?;

    let params = match method_call.get_child("params") {
        Some(params) => Some(decode_params(params)?),
        None => None,
    };

    Ok(IncomingCall {
        from: Jid::parse(from),
        command,
        id: id.to_string(),
        params,
    })
}
