// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client configuration and endpoint resolution.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Environment variable overriding the RPC endpoint.
pub const ENDPOINT_ENV: &str = "ONE_XMLRPC";

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:2633/RPC2";

/// Construction-time options for a [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Raw credential string (`principal:secret`). When `None` the
    /// credential file is consulted.
    pub secret: Option<String>,
    /// RPC endpoint. When `None` the `ONE_XMLRPC` variable and the
    /// localhost default apply, in that order.
    pub endpoint: Option<String>,
    /// Timeout for each blocking round trip.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            secret: None,
            endpoint: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit credential string.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set an explicit endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Resolve the RPC endpoint: explicit argument, else a non-empty
/// `ONE_XMLRPC`, else [`DEFAULT_ENDPOINT`]. The only failure mode is a
/// string that does not parse as a URL.
pub fn resolve_endpoint(explicit: Option<&str>) -> Result<Url> {
    let env = std::env::var(ENDPOINT_ENV).ok();
    resolve_endpoint_from(explicit, env.as_deref())
}

fn resolve_endpoint_from(explicit: Option<&str>, env_override: Option<&str>) -> Result<Url> {
    let raw = explicit
        .or_else(|| env_override.filter(|v| !v.is_empty()))
        .unwrap_or(DEFAULT_ENDPOINT);
    Url::parse(raw).map_err(|e| ClientError::Config(format!("malformed endpoint url {raw}: {e}")))
}
