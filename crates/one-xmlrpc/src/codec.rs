// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! `<methodCall>` encoding and `<methodResponse>` decoding.

use crate::error::{Result, RpcError};
use crate::value::Value;

/// Render a complete `<methodCall>` document for `method` with positional
/// `params`.
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("<?xml version=\"1.0\"?>");
    out.push_str("<methodCall><methodName>");
    push_escaped(&mut out, method);
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param><value>");
        encode_value(&mut out, param);
        out.push_str("</value></param>");
    }
    out.push_str("</params></methodCall>");
    out
}

fn encode_value(out: &mut String, value: &Value) {
    match value {
        Value::Int(i) => {
            out.push_str("<i4>");
            out.push_str(&i.to_string());
            out.push_str("</i4>");
        }
        Value::Bool(b) => {
            out.push_str("<boolean>");
            out.push(if *b { '1' } else { '0' });
            out.push_str("</boolean>");
        }
        Value::Text(s) => {
            out.push_str("<string>");
            push_escaped(out, s);
            out.push_str("</string>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                out.push_str("<value>");
                encode_value(out, item);
                out.push_str("</value>");
            }
            out.push_str("</data></array>");
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

/// Decode a `<methodResponse>` body into its positional values.
///
/// The controller wire contract packs the whole result into one `<param>`
/// holding an array; that array is flattened here so callers see the
/// positional tuple directly. A `<fault>` decodes to [`RpcError::Fault`].
pub fn decode_response(xml: &str) -> Result<Vec<Value>> {
    let doc = roxmltree::Document::parse(xml)
        .map_err(|e| RpcError::Malformed(format!("invalid xml: {e}")))?;

    let root = doc.root_element();
    if root.tag_name().name() != "methodResponse" {
        return Err(RpcError::Malformed(format!(
            "unexpected root element <{}>",
            root.tag_name().name()
        )));
    }

    if let Some(fault) = child_element(root, "fault") {
        return Err(decode_fault(fault));
    }

    let value = child_element(root, "params")
        .and_then(|params| child_element(params, "param"))
        .and_then(|param| child_element(param, "value"))
        .ok_or_else(|| RpcError::Malformed("response carries no result value".to_string()))?;

    match decode_value(value)? {
        Value::Array(values) => Ok(values),
        single => Ok(vec![single]),
    }
}

fn decode_value(node: roxmltree::Node<'_, '_>) -> Result<Value> {
    let Some(typed) = node.children().find(|c| c.is_element()) else {
        // Untyped <value> content defaults to string.
        return Ok(Value::Text(node.text().unwrap_or("").to_string()));
    };

    let text = typed.text().unwrap_or("");
    match typed.tag_name().name() {
        "i4" | "int" => text
            .trim()
            .parse()
            .map(Value::Int)
            .map_err(|_| RpcError::Malformed(format!("invalid integer value {text:?}"))),
        "boolean" => match text.trim() {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(RpcError::Malformed(format!(
                "invalid boolean value {other:?}"
            ))),
        },
        "string" => Ok(Value::Text(text.to_string())),
        "array" => {
            let data = child_element(typed, "data")
                .ok_or_else(|| RpcError::Malformed("array without <data>".to_string()))?;
            data.children()
                .filter(|c| c.is_element() && c.tag_name().name() == "value")
                .map(decode_value)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        other => Err(RpcError::Malformed(format!(
            "unsupported value type <{other}>"
        ))),
    }
}

fn decode_fault(fault: roxmltree::Node<'_, '_>) -> RpcError {
    let mut code = -1;
    let mut message = String::from("unknown fault");

    let members = child_element(fault, "value")
        .and_then(|value| child_element(value, "struct"))
        .map(|st| st.children().filter(|c| c.tag_name().name() == "member"))
        .into_iter()
        .flatten();

    for member in members {
        let name = child_element(member, "name").and_then(|n| n.text()).unwrap_or("");
        let Some(value) = child_element(member, "value") else {
            continue;
        };
        match (name, decode_value(value)) {
            ("faultCode", Ok(Value::Int(c))) => code = c,
            ("faultString", Ok(Value::Text(m))) => message = m,
            _ => {}
        }
    }

    RpcError::Fault { code, message }
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}
