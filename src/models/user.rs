// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google user profile model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{require_bool, require_str};
use crate::error::Result;

/// Profile of the signed-in Google account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleUser {
    /// Google account ID (numeric, but returned as a string)
    pub id: String,
    pub email: String,
    /// Whether Google has verified the email address
    pub email_verified: bool,
    pub first_name: String,
    pub last_name: String,
    pub locale: String,
    pub profile_picture_url: String,
}

impl GoogleUser {
    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    /// Flatten into a string-keyed map.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "firstName".to_string(),
            Value::String(self.first_name.clone()),
        );
        map.insert("lastName".to_string(), Value::String(self.last_name.clone()));
        map.insert("email".to_string(), Value::String(self.email.clone()));
        map.insert("id".to_string(), Value::String(self.id.clone()));
        map.insert("verified".to_string(), Value::Bool(self.email_verified));
        map.insert("locale".to_string(), Value::String(self.locale.clone()));
        map.insert(
            "picture".to_string(),
            Value::String(self.profile_picture_url.clone()),
        );
        map
    }

    /// Rebuild a user from a map produced by [`GoogleUser::to_map`].
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            id: require_str(map, "id")?.to_string(),
            email: require_str(map, "email")?.to_string(),
            email_verified: require_bool(map, "verified")?,
            first_name: require_str(map, "firstName")?.to_string(),
            last_name: require_str(map, "lastName")?.to_string(),
            locale: require_str(map, "locale")?.to_string(),
            profile_picture_url: require_str(map, "picture")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OAuthError;

    fn sample() -> GoogleUser {
        GoogleUser {
            id: "108774129873461254345".to_string(),
            email: "ada@example.com".to_string(),
            email_verified: true,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            locale: "en-GB".to_string(),
            profile_picture_url: "https://lh3.googleusercontent.com/a/photo.jpg".to_string(),
        }
    }

    #[test]
    fn map_round_trip() {
        let user = sample();
        assert_eq!(GoogleUser::from_map(&user.to_map()), Ok(user));

        let unverified = GoogleUser {
            email_verified: false,
            ..sample()
        };
        assert_eq!(
            GoogleUser::from_map(&unverified.to_map()),
            Ok(unverified)
        );
    }

    #[test]
    fn map_uses_flat_keys() {
        let map = sample().to_map();
        assert_eq!(map["firstName"], "Ada");
        assert_eq!(map["lastName"], "Lovelace");
        assert_eq!(map["verified"], true);
        assert_eq!(map["picture"], "https://lh3.googleusercontent.com/a/photo.jpg");
    }

    #[test]
    fn from_map_reports_missing_key() {
        let mut map = sample().to_map();
        map.remove("locale");

        assert_eq!(
            GoogleUser::from_map(&map),
            Err(OAuthError::MissingField("locale".to_string()))
        );
    }

    #[test]
    fn from_map_rejects_wrong_type() {
        let mut map = sample().to_map();
        map.insert("verified".to_string(), Value::String("yes".to_string()));

        assert!(matches!(
            GoogleUser::from_map(&map),
            Err(OAuthError::InvalidField { field, .. }) if field == "verified"
        ));
    }
}
