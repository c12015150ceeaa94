//! # jabber-rpc
//!
//! Jabber-RPC engine: XML-RPC method calls and results tunneled over XMPP
//! `<iq/>` stanzas (XEP-0009).
//!
//! The crate encodes outgoing calls into `<iq type="set"/>` stanzas, decodes
//! replies (results, faults, stanza errors) back into typed values,
//! recognizes inbound calls addressed to the local entity, and correlates
//! asynchronous replies with the call that produced them.
//!
//! ## Architecture
//!
//! - [`codec`] - the recursive [`RpcValue`] model and its XML wire form
//! - [`xml`] - the owned element tree stanzas are built from and parsed into
//! - [`Rpc`] - the service: validate, build, send, correlate, dispatch
//!
//! The stanza transport and the consumer of inbound calls are injected at
//! construction via [`StanzaSender`] and [`RpcEvents`]; this crate never
//! delivers stanzas or sends replies itself.
//!
//! ## Example
//!
//! ```ignore
//! use jabber_rpc::Rpc;
//!
//! let rpc = Rpc::new(transport, events);
//! let result = rpc
//!     .call(serde_json::json!({
//!         "to": "rpc.server.com",
//!         "method": "example.performAction",
//!         "params": [{ "type": "int", "value": 2 }]
//!     }))
//!     .await?;
//! ```

pub mod codec;
pub mod correlator;
pub mod dispatch;
pub mod error;
pub mod xml;

mod client;
mod request;
mod response;

/// The Jabber-RPC query namespace.
pub const NS: &str = "jabber:iq:rpc";

pub use client::{Rpc, RpcEvents, StanzaSender};
pub use codec::{RpcValue, StructMember};
pub use correlator::{CallCorrelator, ResponseCallback};
pub use dispatch::{handles, IncomingCall, Jid};
pub use error::{Result, RpcError, RpcFault};
pub use xml::Element;
