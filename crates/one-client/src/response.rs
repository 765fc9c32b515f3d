// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The uniform result of every remote call.

use one_xmlrpc::Value;
use serde::Serialize;

/// The optional second slot of a decoded result tuple.
///
/// The wire contract allows it to be absent, a string, or an integer.
/// Decoding into this union happens exactly once, here, so no call site
/// ever needs to type-probe the raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Absent,
    Text(String),
    Int(i64),
}

impl Payload {
    /// Coerce to the message form callers consume: integers render in
    /// decimal, absence stays absent.
    pub fn into_message(self) -> Option<String> {
        match self {
            Payload::Absent => None,
            Payload::Text(s) => Some(s),
            Payload::Int(i) => Some(i.to_string()),
        }
    }
}

/// Success flag plus optional message: the one shape every call outcome
/// takes, whether the failure happened on the server or in the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    success: bool,
    message: Option<String>,
}

impl Response {
    pub fn new(success: bool, message: Option<String>) -> Self {
        Self { success, message }
    }

    /// A failed response carrying `message` as the failure description.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Whether the remote action succeeded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The informational payload on success, the failure description
    /// otherwise. `None` for status-only results.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Decode the positional result tuple of a call: index 0 is the status
    /// flag, index 1 (optional) the payload. Malformed tuples are reported
    /// through the same failed-response channel as everything else.
    pub fn from_values(values: &[Value]) -> Self {
        let success = match values.first() {
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Self::failure(format!(
                    "malformed result: expected boolean status, got {other:?}"
                ));
            }
            None => return Self::failure("malformed result: empty tuple"),
        };

        let payload = match values.get(1) {
            None => Payload::Absent,
            Some(Value::Text(s)) => Payload::Text(s.clone()),
            Some(Value::Int(i)) => Payload::Int(*i),
            Some(other) => {
                return Self::failure(format!(
                    "malformed result: unsupported payload {other:?}"
                ));
            }
        };

        Self {
            success,
            message: payload.into_message(),
        }
    }
}
