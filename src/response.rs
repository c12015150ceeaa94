//! Translation of correlated reply stanzas into results or faults.
//!
//! A reply is either an XMPP stanza-level error, whose `type` and condition
//! are lifted straight off the `<error/>` child, or a `methodResponse` whose
//! `<params/>` decode to an ordered result sequence. Exactly one of the two
//! outcomes is produced; a decode failure yields neither and never a partial
//! result.

use crate::codec::{decode_params, RpcValue};
use crate::error::{Result, RpcError, RpcFault};
use crate::xml::Element;
use crate::NS;

/// Translate a reply stanza into the decoded result sequence.
///
/// A missing `<params/>` element and a `<params/>` with no `<param/>`
/// children both translate to an empty result sequence.
///
/// # Errors
///
/// - [`RpcError::Fault`] for a stanza-level error from the peer
/// - [`RpcError::MalformedStanza`] when the reply lacks a `methodResponse`
/// - [`RpcError::MalformedValue`] when a result value fails to decode
pub(crate) fn translate_reply(stanza: &Element) -> Result<Vec<RpcValue>> {
    if let Some(error) = stanza.get_child("error") {
        let condition = error
            .children()
            .next()
            .map(Element::name)
            .unwrap_or("undefined-condition");
        return Err(RpcFault::stanza(error.attr("type").unwrap_or_default(), condition).into());
    }

    let method_response = stanza
        .get_child_ns("query", NS)
        .and_then(|query| query.get_child("methodResponse"))
        .ok_or(RpcError::MalformedStanza("reply has no methodResponse"))?;

    match method_response.get_child("params") {
        Some(params) => decode_params(params),
        None => Ok(Vec::new()),
    }
}
