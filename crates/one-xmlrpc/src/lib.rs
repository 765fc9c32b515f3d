// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! XML-RPC wire layer for the ONE cloud controller.
//!
//! This crate owns everything below the client SDK: the positional value
//! model, the `<methodCall>`/`<methodResponse>` codec (including `<fault>`
//! handling) and a blocking HTTP transport built on `ureq`.
//!
//! The SDK in `one-client` talks to a server exclusively through the
//! [`Transport`] trait, so tests and alternative carriers can swap the HTTP
//! implementation out without touching the codec.

mod codec;
mod error;
mod transport;
mod value;

pub use codec::{decode_response, encode_call};
pub use error::{Result, RpcError};
pub use transport::{HttpTransport, Transport};
pub use value::Value;
