// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for one-xmlrpc.

use thiserror::Error;

/// Result type using RpcError.
pub type Result<T> = std::result::Result<T, RpcError>;

/// Errors that can occur while executing an XML-RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The HTTP round trip itself failed (connect, send, read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with an XML-RPC `<fault>`.
    #[error("fault {code}: {message}")]
    Fault { code: i64, message: String },

    /// The response body is not a well-formed method response.
    #[error("malformed response: {0}")]
    Malformed(String),
}
