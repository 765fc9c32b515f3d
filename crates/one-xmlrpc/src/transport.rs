// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The RPC carrier: a trait plus the blocking HTTP implementation.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::codec;
use crate::error::{Result, RpcError};
use crate::value::Value;

/// A blocking XML-RPC carrier.
///
/// One call is one round trip; retries, if any, belong to the implementation
/// behind this trait, never to the callers above it.
pub trait Transport: Send + Sync {
    /// Execute `method` with positional `params` and return the decoded
    /// positional result values.
    fn execute(&self, method: &str, params: &[Value]) -> Result<Vec<Value>>;
}

/// [`Transport`] over HTTP POST, bound to a single endpoint.
pub struct HttpTransport {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpTransport {
    /// Bind a transport to `endpoint` with a per-request `timeout`.
    pub fn new(endpoint: &Url, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.to_string(),
        }
    }

    /// The endpoint this transport posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn execute(&self, method: &str, params: &[Value]) -> Result<Vec<Value>> {
        let body = codec::encode_call(method, params);
        debug!(method, endpoint = %self.endpoint, "posting xml-rpc call");

        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "text/xml")
            .send_string(&body)
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let text = response
            .into_string()
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        codec::decode_response(&text)
    }
}
