// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for one-client.
//!
//! Note the deliberately small surface: anything a remote call can get wrong
//! is reported inside [`crate::Response`], not here. These variants cover
//! construction-time configuration problems and local document decoding only.

use thiserror::Error;

/// Result type using ClientError.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur outside the uniform call/response channel.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Credential or endpoint cannot be resolved or is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A resource document could not be parsed.
    #[error("malformed resource document: {0}")]
    Document(String),

    /// A numeric state/type code fell outside its label table.
    #[error("{table} code {code} out of range")]
    UnknownCode { table: &'static str, code: i64 },
}
