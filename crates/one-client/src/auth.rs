// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Session credential resolution.
//!
//! The controller authenticates every call with a `principal:secret` string.
//! A two-segment credential carries a cleartext password and is normalized
//! to `principal:sha1-hex` before use; credentials that already carry three
//! or more colon-separated segments are fully qualified and pass through
//! verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use sha1::{Digest, Sha1};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Environment variable overriding the credential file location.
pub const AUTH_ENV: &str = "ONE_AUTH";

/// Credential file location under `$HOME` when [`AUTH_ENV`] is unset.
const AUTH_FILE: &str = ".one/one_auth";

/// Resolve the session credential.
///
/// An explicit `secret` wins; otherwise the first line of the credential
/// file is used. Both paths go through the same normalization.
pub fn resolve_credential(secret: Option<&str>) -> Result<String> {
    let raw = match secret {
        Some(s) => s.to_string(),
        None => {
            let path = auth_path()?;
            debug!(path = %path.display(), "reading credential file");
            read_credential_file(&path)?
        }
    };
    normalize(&raw)
}

fn auth_path() -> Result<PathBuf> {
    match std::env::var(AUTH_ENV) {
        // An empty override is treated as unset.
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                ClientError::Config("HOME is not set, cannot locate credential file".to_string())
            })?;
            Ok(Path::new(&home).join(AUTH_FILE))
        }
    }
}

pub(crate) fn read_credential_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ClientError::Config(format!(
            "credential file {} not present",
            path.display()
        )));
    }
    let contents = fs::read_to_string(path).map_err(|e| {
        ClientError::Config(format!("credential file {} unreadable: {e}", path.display()))
    })?;
    Ok(contents.lines().next().unwrap_or("").to_string())
}

pub(crate) fn normalize(raw: &str) -> Result<String> {
    let segments: Vec<&str> = raw.split(':').collect();
    match segments.len() {
        0 | 1 => Err(ClientError::Config(
            "wrong format for credential string, expected principal:secret".to_string(),
        )),
        2 => {
            let digest = Sha1::digest(segments[1].as_bytes());
            let hash: String = digest.iter().map(|b| format!("{b:02x}")).collect();
            Ok(format!("{}:{hash}", segments[0]))
        }
        _ => Ok(raw.to_string()),
    }
}
