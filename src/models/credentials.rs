// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credentials issued by Google's token endpoint.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{optional_str, require_str};
use crate::error::{OAuthError, Result};
use crate::time_utils::{format_record_timestamp, parse_record_timestamp};

/// Seconds shaved off `expires_in` to tolerate clock drift with Google.
pub const CLOCK_SKEW_MARGIN_SECS: i64 = 30;

/// Access (and possibly refresh) token with its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    access_token: String,
    /// Only issued for offline access, or carried over from a refresh grant.
    refresh_token: Option<String>,
    created: DateTime<Utc>,
    expires: DateTime<Utc>,
}

impl Credentials {
    /// Build credentials from explicit timestamps.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            created,
            expires,
        }
    }

    /// Build credentials from a token response's `expires_in`.
    ///
    /// The expiry is `created + (expires_in - 30)` seconds, and never earlier
    /// than `created` itself. Lifetimes past chrono's date range are rejected.
    pub fn issued(
        access_token: impl Into<String>,
        expires_in: i64,
        created: DateTime<Utc>,
    ) -> Result<Self> {
        let lifetime = expires_in.saturating_sub(CLOCK_SKEW_MARGIN_SECS).max(0);
        let expires = Duration::try_seconds(lifetime)
            .and_then(|lifetime| created.checked_add_signed(lifetime))
            .ok_or_else(|| {
                OAuthError::MalformedResponse(format!("expires_in {expires_in} is out of range"))
            })?;

        Ok(Self {
            access_token: access_token.into(),
            refresh_token: None,
            created,
            expires,
        })
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Whether the access token should no longer be used.
    pub fn has_expired(&self) -> bool {
        self.has_expired_at(Utc::now())
    }

    /// Whether the access token is expired as of `now`.
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }

    /// Flatten into a string-keyed map with second-precision timestamps.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "accessToken".to_string(),
            Value::String(self.access_token.clone()),
        );
        map.insert(
            "expires".to_string(),
            Value::String(format_record_timestamp(self.expires)),
        );
        map.insert(
            "created".to_string(),
            Value::String(format_record_timestamp(self.created)),
        );
        if let Some(refresh_token) = &self.refresh_token {
            map.insert(
                "refreshToken".to_string(),
                Value::String(refresh_token.clone()),
            );
        }
        map
    }

    /// Rebuild credentials from a map produced by [`Credentials::to_map`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let access_token = require_str(map, "accessToken")?;
        let created = require_timestamp(map, "created")?;
        let expires = require_timestamp(map, "expires")?;
        let refresh_token = optional_str(map, "refreshToken")?
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Ok(Self {
            access_token: access_token.to_string(),
            refresh_token,
            created,
            expires,
        })
    }
}

fn require_timestamp(map: &Map<String, Value>, key: &str) -> Result<DateTime<Utc>> {
    let raw = require_str(map, key)?;
    parse_record_timestamp(raw)
        .ok_or_else(|| OAuthError::invalid_field(key, format!("unparseable timestamp {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn expiry_subtracts_clock_skew_margin() {
        let creds = Credentials::issued("abc", 3600, created()).unwrap();
        assert_eq!(creds.created(), created());
        assert_eq!(creds.expires(), created() + Duration::seconds(3570));

        let creds = Credentials::issued("abc", 31, created()).unwrap();
        assert_eq!(creds.expires(), created() + Duration::seconds(1));
    }

    #[test]
    fn short_lifetimes_expire_at_creation() {
        for expires_in in [30, 10, 0, -5] {
            let creds = Credentials::issued("abc", expires_in, created()).unwrap();
            assert_eq!(creds.expires(), created(), "expires_in = {expires_in}");
        }
    }

    #[test]
    fn out_of_range_lifetime_is_rejected() {
        for expires_in in [i64::MAX, 10_000_000_000_000] {
            assert!(
                matches!(
                    Credentials::issued("abc", expires_in, created()),
                    Err(OAuthError::MalformedResponse(_))
                ),
                "expires_in = {expires_in}"
            );
        }

        let creds = Credentials::issued("abc", i64::MIN, created()).unwrap();
        assert_eq!(creds.expires(), created());
    }

    #[test]
    fn has_expired_at_boundary() {
        let creds = Credentials::issued("abc", 90, created()).unwrap();
        let expires = creds.expires();

        assert!(!creds.has_expired_at(expires - Duration::seconds(1)));
        assert!(creds.has_expired_at(expires));
        assert!(creds.has_expired_at(expires + Duration::seconds(1)));
    }

    #[test]
    fn has_expired_uses_current_time() {
        let fresh = Credentials::issued("abc", 3600, Utc::now()).unwrap();
        assert!(!fresh.has_expired());

        let stale = Credentials::issued("abc", 3600, Utc::now() - Duration::hours(2)).unwrap();
        assert!(stale.has_expired());
    }

    #[test]
    fn map_round_trip_with_refresh_token() {
        let original = Credentials::issued("abc", 3600, created() + Duration::milliseconds(400))
            .unwrap()
            .with_refresh_token("R1");

        let restored = Credentials::from_map(&original.to_map()).unwrap();

        assert_eq!(restored.access_token(), "abc");
        assert_eq!(restored.refresh_token(), Some("R1"));
        assert_eq!(restored.created().timestamp(), original.created().timestamp());
        assert_eq!(restored.expires().timestamp(), original.expires().timestamp());
    }

    #[test]
    fn map_round_trip_without_refresh_token() {
        let original = Credentials::issued("abc", 3600, created()).unwrap();
        let map = original.to_map();

        assert!(!map.contains_key("refreshToken"));
        let restored = Credentials::from_map(&map).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn from_map_reports_missing_key() {
        let mut map = Credentials::issued("abc", 3600, created()).unwrap().to_map();
        map.remove("expires");

        assert_eq!(
            Credentials::from_map(&map),
            Err(OAuthError::MissingField("expires".to_string()))
        );
    }

    #[test]
    fn from_map_rejects_bad_timestamp() {
        let mut map = Credentials::issued("abc", 3600, created()).unwrap().to_map();
        map.insert("created".to_string(), Value::String("soon".to_string()));

        assert!(matches!(
            Credentials::from_map(&map),
            Err(OAuthError::InvalidField { field, .. }) if field == "created"
        ));
    }

    #[test]
    fn from_map_treats_empty_refresh_token_as_absent() {
        let mut map = Credentials::issued("abc", 3600, created()).unwrap().to_map();
        map.insert("refreshToken".to_string(), Value::String(String::new()));

        let restored = Credentials::from_map(&map).unwrap();
        assert_eq!(restored.refresh_token(), None);
    }
}
