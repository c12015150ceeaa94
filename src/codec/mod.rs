//! Codec module - the Jabber-RPC value model and its XML wire form.
//!
//! This module provides:
//!
//! - [`RpcValue`] / [`StructMember`] - the recursive tagged-union model of
//!   RPC parameters and results
//! - [`encode_value`] / [`decode_value`] - pure recursive conversion between
//!   the model and `<value/>` element trees, independent of stanza framing
//!
//! # Example
//!
//! ```
//! use jabber_rpc::codec::{decode_value, encode_value, RpcValue};
//!
//! let value = RpcValue::Array(vec![
//!     RpcValue::scalar("string", "one"),
//!     RpcValue::scalar("int", "2"),
//! ]);
//!
//! let element = encode_value(&value);
//! assert_eq!(decode_value(&element).unwrap(), value);
//! ```

mod value;
mod xmlrpc;

pub use value::{RpcValue, StructMember};
pub use xmlrpc::{decode_params, decode_value, encode_value};
