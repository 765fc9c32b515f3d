// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The authenticated RPC client.

use tracing::{debug, instrument};
use url::Url;

use one_xmlrpc::{HttpTransport, Transport, Value};

use crate::auth;
use crate::config::{self, ClientConfig};
use crate::error::Result;
use crate::response::Response;

/// Namespace token prefixed to every action name on the wire.
const METHOD_NAMESPACE: &str = "one.";

/// Connection to the controller: resolved credential, validated endpoint,
/// bound transport.
///
/// Everything is immutable after construction, so one client can back any
/// number of resource handles. Each [`Client::call`] is a single blocking
/// round trip whose outcome, including transport failures, is always a
/// [`Response`].
pub struct Client {
    credential: String,
    endpoint: Url,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Resolve credential and endpoint per the documented fallback chains
    /// and bind an HTTP transport to the endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let credential = auth::resolve_credential(config.secret.as_deref())?;
        let endpoint = config::resolve_endpoint(config.endpoint.as_deref())?;
        let transport = Box::new(HttpTransport::new(&endpoint, config.request_timeout));
        debug!(endpoint = %endpoint, "client constructed");
        Ok(Self {
            credential,
            endpoint,
            transport,
        })
    }

    /// Client from environment variables and default locations only.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Same resolution rules, but with a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Box<dyn Transport>) -> Result<Self> {
        let credential = auth::resolve_credential(config.secret.as_deref())?;
        let endpoint = config::resolve_endpoint(config.endpoint.as_deref())?;
        Ok(Self {
            credential,
            endpoint,
            transport,
        })
    }

    /// The resolved endpoint this client is bound to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Invoke `action` with positional `args`.
    ///
    /// The credential is prepended to the argument list and the action is
    /// namespaced before it reaches the wire. This never returns a Rust
    /// error: transport problems come back as a failed [`Response`], so
    /// callers branch on `is_success()` for every outcome.
    #[instrument(skip(self, args))]
    pub fn call(&self, action: &str, args: Vec<Value>) -> Response {
        let mut params = Vec::with_capacity(args.len() + 1);
        params.push(Value::Text(self.credential.clone()));
        params.extend(args);

        let method = format!("{METHOD_NAMESPACE}{action}");
        match self.transport.execute(&method, &params) {
            Ok(values) => Response::from_values(&values),
            Err(err) => {
                debug!(%err, "call failed below the rpc layer");
                Response::failure(err.to_string())
            }
        }
    }
}
