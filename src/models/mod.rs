// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models returned by the Google login flow.

pub mod credentials;
pub mod user;

pub use credentials::Credentials;
pub use user::GoogleUser;

use crate::error::{OAuthError, Result};
use serde_json::{Map, Value};

/// Fetch a required string value.
pub(crate) fn require_str<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    match map.get(key) {
        None => Err(OAuthError::MissingField(key.to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(OAuthError::invalid_field(
            key,
            format!("expected a string, found {other}"),
        )),
    }
}

/// Fetch a required boolean value.
pub(crate) fn require_bool(map: &Map<String, Value>, key: &str) -> Result<bool> {
    match map.get(key) {
        None => Err(OAuthError::MissingField(key.to_string())),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(OAuthError::invalid_field(
            key,
            format!("expected a boolean, found {other}"),
        )),
    }
}

/// Fetch an optional string value; `null` counts as absent.
pub(crate) fn optional_str<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(OAuthError::invalid_field(
            key,
            format!("expected a string, found {other}"),
        )),
    }
}
