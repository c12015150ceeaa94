//! XML element trees for stanza construction and querying.
//!
//! Jabber-RPC only needs a handful of tree primitives: create a child with a
//! name and optional namespace, look children up by name, read text content,
//! and get/set attributes. [`Element`] provides exactly that, as an owned
//! tree that can be built fluently, rendered to wire text, or parsed from
//! inbound stanza text (via `roxmltree`).

mod element;

pub use element::Element;
