//! The Rpc service: validation, sending, correlation, and inbound dispatch.
//!
//! [`Rpc`] owns the injected transport and event sink and wires the other
//! modules together:
//!
//! 1. [`perform`](Rpc::perform) validates the caller's request, builds the
//!    `<iq type="set"/>` stanza, registers the callback under a fresh
//!    correlation id, and sends.
//! 2. The transport owner feeds reply stanzas to
//!    [`handle_reply`](Rpc::handle_reply), which translates them and
//!    resolves the pending call.
//! 3. Inbound calls recognized by [`handles`](Rpc::handles) go through
//!    [`handle`](Rpc::handle) to the event sink's `incoming_request`.
//!
//! # Example
//!
//! ```ignore
//! use jabber_rpc::{Rpc, RpcEvents, StanzaSender};
//!
//! let rpc = Rpc::new(transport, events);
//! rpc.perform(
//!     serde_json::json!({
//!         "to": "rpc.server.com",
//!         "method": "example.performAction",
//!         "params": [{ "type": "int", "value": 2 }]
//!     }),
//!     Some(Box::new(|outcome| println!("{:?}", outcome))),
//! );
//! ```

use serde_json::Value;
use tokio::sync::oneshot;

use crate::codec::RpcValue;
use crate::correlator::{CallCorrelator, ResponseCallback};
use crate::dispatch::{self, IncomingCall};
use crate::error::{Result, RpcError, RpcFault};
use crate::request::build_call;
use crate::response::translate_reply;
use crate::xml::Element;

/// Outgoing half of the injected transport: delivers a stanza to the peer.
///
/// Delivery and routing are the transport's concern; this layer sends one
/// stanza per call and expects at most one reply, matched by id.
pub trait StanzaSender {
    /// Send a stanza.
    fn send(&self, stanza: Element);
}

/// Consumer-supplied sink for the two events this layer emits.
pub trait RpcEvents {
    /// An inbound RPC call addressed to the local entity. Replying is the
    /// consumer's responsibility.
    fn incoming_request(&self, call: IncomingCall);

    /// A malformed outgoing request that had no callback to report to.
    fn client_error(&self, fault: RpcFault);
}

/// The Jabber-RPC engine.
pub struct Rpc<S, E> {
    transport: S,
    events: E,
    correlator: CallCorrelator,
}

impl<S: StanzaSender, E: RpcEvents> Rpc<S, E> {
    /// Create a service around an injected transport and event sink.
    pub fn new(transport: S, events: E) -> Self {
        Self {
            transport,
            events,
            correlator: CallCorrelator::new(),
        }
    }

    /// Make an outgoing call.
    ///
    /// Without a callback there is no channel to report failure to, so the
    /// request is rejected through the event sink as a `client-error` with
    /// the request echoed, and nothing is sent. A request that fails
    /// validation is reported through the callback; only a fully valid
    /// request produces a stanza, with its callback registered before the
    /// send.
    pub fn perform(&self, request: Value, callback: Option<ResponseCallback>) {
        let Some(callback) = callback else {
            tracing::warn!("rpc request dropped, no callback to report to");
            self.events
                .client_error(RpcFault::client_error("Missing callback", request));
            return;
        };

        let id = self.correlator.new_id();
        match build_call(&request, &id) {
            Ok(stanza) => {
                self.correlator.register(id, callback);
                self.transport.send(stanza);
            }
            Err(fault) => callback(Err(fault.into())),
        }
    }

    /// Make an outgoing call and await its outcome.
    ///
    /// Convenience wrapper over [`perform`](Rpc::perform) using a oneshot
    /// channel as the callback. There is no timeout: the future resolves
    /// when the reply arrives, or never.
    ///
    /// # Errors
    ///
    /// Validation faults, remote stanza errors, and decode failures, as for
    /// [`perform`](Rpc::perform); [`RpcError::Abandoned`] if the service is
    /// dropped while the call is pending.
    pub async fn call(&self, request: Value) -> Result<Vec<RpcValue>> {
        let (tx, rx) = oneshot::channel();
        self.perform(
            request,
            Some(Box::new(move |outcome| {
                let _ = tx.send(outcome);
            })),
        );
        match rx.await {
            Ok(outcome) => outcome,
            Err(_) => Err(RpcError::Abandoned),
        }
    }

    /// True iff this stanza is an inbound RPC call this service should
    /// [`handle`](Rpc::handle).
    pub fn handles(&self, stanza: &Element) -> bool {
        dispatch::handles(stanza)
    }

    /// Dispatch an inbound call stanza to the event sink.
    ///
    /// # Errors
    ///
    /// Structural and decode errors from extraction; no event is emitted
    /// for a call that fails to parse.
    pub fn handle(&self, stanza: &Element) -> Result<()> {
        let call = dispatch::parse_call(stanza)?;
        self.events.incoming_request(call);
        Ok(())
    }

    /// Resolve a reply stanza against the pending call that produced it.
    ///
    /// Replies whose id is unknown are ignored. A reply that cannot be
    /// translated resolves the call with the translation error.
    pub fn handle_reply(&self, stanza: &Element) {
        let Some(id) = stanza.attr("id") else {
            tracing::warn!("reply stanza has no id, dropping");
            return;
        };
        self.correlator.resolve(id, translate_reply(stanza));
    }

    /// Number of calls still awaiting a reply.
    pub fn pending_calls(&self) -> usize {
        self.correlator.pending_count()
    }
}
