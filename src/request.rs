//! Outgoing request validation and `<iq type="set"/>` stanza assembly.
//!
//! The request arrives from the caller as loose JSON (the shape it had on
//! the local socket boundary) and is checked in a fixed order, first failure
//! wins: `to`, `method`, `params` array-ness, then per-param `type`, `value`,
//! and sequence shape for `array`/`struct` values. Only a request that
//! passes every check produces a stanza.

use serde_json::Value;

use crate::codec::{encode_value, RpcValue, StructMember};
use crate::error::RpcFault;
use crate::xml::Element;
use crate::NS;

/// Validate a request and build the outgoing call stanza.
///
/// The `<params/>` element is present whenever the caller supplied a
/// `params` key, even an empty one, and omitted when the key is absent.
///
/// # Errors
///
/// Returns a `modify`/`client-error` fault naming the first failed check,
/// with the request echoed back. No stanza is built on failure.
pub(crate) fn build_call(request: &Value, id: &str) -> Result<Element, RpcFault> {
    let fail = |description: &str| RpcFault::client_error(description, request.clone());

    let to = request
        .get("to")
        .and_then(Value::as_str)
        .ok_or_else(|| fail("Missing 'to' key"))?;
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .ok_or_else(|| fail("Missing 'method' key"))?;

    let mut method_call =
        Element::new("methodCall").with_child(Element::new("methodName").with_text(method));

    if let Some(params) = request.get("params") {
        let params = params
            .as_array()
            .ok_or_else(|| fail("'params' must be an array"))?;
        let mut params_el = Element::new("params");
        for param in params {
            let value = param_to_value(param).map_err(|description| fail(description))?;
            params_el.append_child(Element::new("param").with_child(encode_value(&value)));
        }
        method_call.append_child(params_el);
    }

    Ok(Element::new("iq")
        .with_attr("type", "set")
        .with_attr("to", to)
        .with_attr("id", id)
        .with_child(Element::new("query").with_ns(NS).with_child(method_call)))
}

/// Convert one caller-supplied param into the value model, recursively.
///
/// `array` and `struct` values must themselves be sequences of params; any
/// other declared type is a scalar whose value is carried as literal text.
fn param_to_value(param: &Value) -> Result<RpcValue, &'static str> {
    let kind = param
        .get("type")
        .and_then(Value::as_str)
        .ok_or("'param' must have 'type' key")?;
    let value = param.get("value").ok_or("'param' must have 'value' key")?;

    match kind {
        "array" => {
            let items = value.as_array().ok_or("Parameter formatting error")?;
            let items = items
                .iter()
                .map(param_to_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RpcValue::Array(items))
        }
        "struct" => {
            let entries = value.as_array().ok_or("Parameter formatting error")?;
            let mut members = Vec::with_capacity(entries.len());
            for entry in entries {
                let name = entry
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                members.push(StructMember::new(name, param_to_value(entry)?));
            }
            Ok(RpcValue::Struct(members))
        }
        _ => Ok(RpcValue::scalar(kind, scalar_text(value))),
    }
}

// Scalars pass through as their literal rendering: strings unquoted,
// numbers and booleans as written.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
