//! Recursive conversion between [`RpcValue`] and `<value/>` element trees.
//!
//! Encoding dispatches on the value's kind:
//!
//! ```text
//! <value><KIND>text</KIND></value>
//! <value><array><data>{items...}</data></array></value>
//! <value><struct><member><name>n</name><value>...</value></member>...</struct></value>
//! ```
//!
//! Decoding inverts the dispatch on the single child of the `<value/>`
//! element. Tags other than `struct` and `array` are treated as scalar kinds
//! without an enumeration check, so unknown kinds pass through untouched.
//! A `<value/>` with zero or multiple element children, or a `struct`/`array`
//! missing its expected substructure, fails with
//! [`RpcError::MalformedValue`](crate::RpcError::MalformedValue).

use crate::codec::{RpcValue, StructMember};
use crate::error::{Result, RpcError};
use crate::xml::Element;

/// Encode a value into a `<value/>` element.
///
/// Recursion depth equals the nesting depth of the input; the model is a
/// tree by construction so no cycle is possible.
pub fn encode_value(value: &RpcValue) -> Element {
    let inner = match value {
        RpcValue::Scalar { kind, text } => Element::new(kind).with_text(text),
        RpcValue::Array(items) => {
            let mut data = Element::new("data");
            for item in items {
                data.append_child(encode_value(item));
            }
            Element::new("array").with_child(data)
        }
        RpcValue::Struct(members) => {
            let mut element = Element::new("struct");
            for member in members {
                element.append_child(
                    Element::new("member")
                        .with_child(Element::new("name").with_text(&member.name))
                        .with_child(encode_value(&member.value)),
                );
            }
            element
        }
    };
    Element::new("value").with_child(inner)
}

/// Decode a `<value/>` element into a value.
///
/// # Errors
///
/// Returns [`RpcError::MalformedValue`](crate::RpcError::MalformedValue) if
/// the element does not match exactly one recognized shape.
pub fn decode_value(element: &Element) -> Result<RpcValue> {
    let mut children = element.children();
    let child = children.next().ok_or_else(|| {
        RpcError::MalformedValue("value element has no child".to_string())
    })?;
    if children.next().is_some() {
        return Err(RpcError::MalformedValue(
            "value element has more than one child".to_string(),
        ));
    }

    match child.name() {
        "struct" => {
            let mut members = Vec::new();
            for member in child.children_named("member") {
                let name = member.child_text("name").unwrap_or_default();
                let value = member.get_child("value").ok_or_else(|| {
                    RpcError::MalformedValue(format!(
                        "struct member '{}' has no value element",
                        name
                    ))
                })?;
                members.push(StructMember::new(name, decode_value(value)?));
            }
            Ok(RpcValue::Struct(members))
        }
        "array" => {
            let data = child.get_child("data").ok_or_else(|| {
                RpcError::MalformedValue("array element has no data element".to_string())
            })?;
            let items = data
                .children_named("value")
                .map(decode_value)
                .collect::<Result<Vec<_>>>()?;
            Ok(RpcValue::Array(items))
        }
        kind => Ok(RpcValue::scalar(kind, child.text())),
    }
}

/// Decode every `<param/>` child of a `<params/>` element, in document order.
///
/// Each param must wrap exactly one `<value/>` element.
pub fn decode_params(params: &Element) -> Result<Vec<RpcValue>> {
    params
        .children_named("param")
        .map(|param| {
            let value = param.get_child("value").ok_or_else(|| {
                RpcError::MalformedValue("param has no value element".to_string())
            })?;
            decode_value(value)
        })
        .collect()
}
