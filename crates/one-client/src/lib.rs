// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Client SDK for the ONE cloud controller.
//!
//! This crate wraps the controller's XML-RPC API in typed resource handles.
//! A [`Client`] resolves the session credential and the endpoint once, at
//! construction, and every operation afterwards is a single blocking call
//! that comes back as a uniform [`Response`]: transport problems and
//! server-side failures alike surface as `success == false` plus a message,
//! never as a Rust error.
//!
//! Resource state lives in per-handle cached documents. An `info()` call
//! fetches and replaces the snapshot; field accessors read from it and
//! answer `None` until one has been loaded.
//!
//! # Example
//!
//! ```no_run
//! use one_client::{Client, ClientConfig, image};
//! use one_client::pool::PoolFilter;
//!
//! # fn example() -> one_client::Result<()> {
//! // Credential from $ONE_AUTH (or ~/.one/one_auth), endpoint from
//! // $ONE_XMLRPC (or the localhost default).
//! let client = Client::from_env()?;
//!
//! let response = image::allocate(&client, "NAME = \"base\"\nPATH = /tmp/img");
//! if response.is_success() {
//!     println!("allocated image {}", response.message().unwrap_or_default());
//! }
//!
//! let mut img = image::Image::new(&client, 5);
//! img.info();
//! println!("state: {:?}", img.state_name()?);
//!
//! let mut pool = image::ImagePool::new(&client);
//! pool.info(PoolFilter::Mine);
//! for img in pool.images() {
//!     println!("image {}", img.id());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod response;

pub mod auth;
pub mod cluster;
pub mod document;
pub mod image;
pub mod pool;
pub mod user;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV, resolve_endpoint};
pub use error::{ClientError, Result};
pub use one_xmlrpc::Value;
pub use response::{Payload, Response};
