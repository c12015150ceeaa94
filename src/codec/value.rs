//! The recursive tagged-union value model.
//!
//! Scalar payloads are carried as opaque text exactly as they appear on the
//! wire: no numeric, boolean, or date parsing happens on either side, so a
//! boolean round-trips as the literal `"true"`. Struct member order is
//! preserved and member names are not required to be unique.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single Jabber-RPC value: scalar, array, or struct, arbitrarily nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcValue {
    /// A primitive value tagged with its XML-RPC kind (`i4`, `int`, `string`,
    /// `double`, `base64`, `boolean`, `dateTime.iso8601`, or whatever tag the
    /// peer sent).
    Scalar {
        /// The wire tag naming the scalar kind.
        kind: String,
        /// The literal textual payload.
        text: String,
    },
    /// An ordered sequence of values.
    Array(Vec<RpcValue>),
    /// An ordered sequence of named members.
    Struct(Vec<StructMember>),
}

/// A named member of a struct value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMember {
    /// Member name; empty when the encoder was given none.
    pub name: String,
    /// Member value, itself a full [`RpcValue`].
    pub value: RpcValue,
}

impl RpcValue {
    /// Shorthand for building a scalar.
    pub fn scalar(kind: impl Into<String>, text: impl Into<String>) -> Self {
        RpcValue::Scalar {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

impl StructMember {
    /// Build a member from a name and value.
    pub fn new(name: impl Into<String>, value: RpcValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

// Decoded values are handed to external consumers as `{type, value}` maps,
// with struct members additionally carrying `name`.
fn serialize_tagged<S: Serializer>(
    value: &RpcValue,
    name: Option<&str>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let extra = usize::from(name.is_some());
    let mut map = serializer.serialize_map(Some(2 + extra))?;
    match value {
        RpcValue::Scalar { kind, text } => {
            map.serialize_entry("type", kind)?;
            map.serialize_entry("value", text)?;
        }
        RpcValue::Array(items) => {
            map.serialize_entry("type", "array")?;
            map.serialize_entry("value", items)?;
        }
        RpcValue::Struct(members) => {
            map.serialize_entry("type", "struct")?;
            map.serialize_entry("value", members)?;
        }
    }
    if let Some(name) = name {
        map.serialize_entry("name", name)?;
    }
    map.end()
}

impl Serialize for RpcValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_tagged(self, None, serializer)
    }
}

impl Serialize for StructMember {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_tagged(&self.value, Some(&self.name), serializer)
    }
}
