// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth2 client for the "login with Google" flow.
//!
//! Handles:
//! - Authorization URL construction (online or offline access)
//! - Authorization code exchange
//! - Refresh token exchange, carrying the refresh token over when Google omits it
//! - User profile lookup via the UserInfo endpoint

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{OAuthError, Result};
use crate::models::{Credentials, GoogleUser};

const AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://www.googleapis.com/oauth2/v4/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested on every login.
pub const SCOPES: [&str; 3] = [
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/userinfo.email",
    "openid",
];

const TOKEN_REQUIRED_KEYS: [&str; 3] = ["access_token", "expires_in", "scope"];

const USERINFO_REQUIRED_KEYS: [&str; 7] = [
    "id",
    "email",
    "verified_email",
    "given_name",
    "family_name",
    "locale",
    "picture",
];

/// Whether Google should also issue a refresh token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessType {
    /// Access token only.
    #[default]
    Online,
    /// Access token plus a refresh token.
    Offline,
}

impl AccessType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessType::Online => "online",
            AccessType::Offline => "offline",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Google endpoint URLs.
///
/// Production code always uses [`Endpoints::default`]. [`Endpoints::mock`]
/// exists only to point integration tests at a local mock server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    authorization_url: String,
    token_url: String,
    userinfo_url: String,
}

impl Endpoints {
    /// Google's paths, rooted at `base_url` instead of Google's hosts.
    #[doc(hidden)]
    pub fn mock(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            authorization_url: format!("{base_url}/o/oauth2/v2/auth"),
            token_url: format!("{base_url}/oauth2/v4/token"),
            userinfo_url: format!("{base_url}/oauth2/v2/userinfo"),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authorization_url: AUTHORIZATION_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            userinfo_url: USERINFO_URL.to_string(),
        }
    }
}

/// What is being traded for an access token.
#[derive(Clone, Copy)]
enum Grant<'a> {
    AuthorizationCode(&'a str),
    RefreshToken(&'a str),
}

impl<'a> Grant<'a> {
    fn kind(self) -> &'static str {
        match self {
            Grant::AuthorizationCode(_) => "authorization_code",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }

    /// Grant-specific form fields: the credential itself and `grant_type`.
    fn form_fields(self) -> [(&'static str, &'a str); 2] {
        match self {
            Grant::AuthorizationCode(code) => {
                [("code", code), ("grant_type", "authorization_code")]
            }
            Grant::RefreshToken(token) => {
                [("refresh_token", token), ("grant_type", "refresh_token")]
            }
        }
    }

    /// Refresh token to keep when the response does not include a new one.
    fn carried_refresh_token(self) -> Option<&'a str> {
        match self {
            Grant::AuthorizationCode(_) => None,
            Grant::RefreshToken(token) => Some(token),
        }
    }
}

/// Google OAuth2 client.
///
/// Stateless apart from its configuration and HTTP connection pool, so one
/// instance can be shared by every login request.
#[derive(Clone)]
pub struct GoogleOAuthService {
    http: reqwest::Client,
    config: Arc<Config>,
    endpoints: Endpoints,
}

impl GoogleOAuthService {
    /// Create a client talking to Google's production endpoints.
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_endpoints(config, Endpoints::default())
    }

    /// Create a client talking to a mock server (see [`Endpoints::mock`]).
    #[doc(hidden)]
    pub fn with_endpoints(config: Arc<Config>, endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            endpoints,
        }
    }

    /// Replace the HTTP client, e.g. to apply a request timeout.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the Google consent page URL the user should be redirected to.
    pub fn login_url(&self, access_type: AccessType) -> String {
        format!(
            "{}?scope={}&redirect_uri={}&response_type=code&client_id={}&access_type={}",
            self.endpoints.authorization_url,
            urlencoding::encode(&SCOPES.join(" ")),
            urlencoding::encode(self.config.redirect_uri()),
            urlencoding::encode(self.config.client_id()),
            access_type
        )
    }

    /// Exchange an authorization code for credentials.
    pub async fn exchange_code(&self, code: &str) -> Result<Credentials> {
        let result = self.request_token(Grant::AuthorizationCode(code)).await;
        self.log_failure("exchange_code", result)
    }

    /// Exchange a refresh token for fresh credentials.
    ///
    /// Google does not always rotate the refresh token; when the response
    /// lacks one, `refresh_token` is kept on the returned credentials.
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<Credentials> {
        let result = self.request_token(Grant::RefreshToken(refresh_token)).await;
        self.log_failure("exchange_refresh_token", result)
    }

    /// Fetch the profile of the account that owns `credentials`.
    pub async fn fetch_user(&self, credentials: &Credentials) -> Result<GoogleUser> {
        let result = self.request_user(credentials.access_token()).await;
        self.log_failure("fetch_user", result)
    }

    async fn request_token(&self, grant: Grant<'_>) -> Result<Credentials> {
        let mut form = vec![
            ("client_id", self.config.client_id()),
            ("client_secret", self.config.client_secret()),
            ("redirect_uri", self.config.redirect_uri()),
        ];
        form.extend(grant.form_fields());

        let response = self
            .http
            .post(&self.endpoints.token_url)
            .form(&form)
            .send()
            .await?;

        let body = check_response_json(response, &TOKEN_REQUIRED_KEYS).await?;
        let token: TokenResponse = parse_body(body)?;

        let mut credentials =
            Credentials::issued(token.access_token, token.expires_in, Utc::now())?;
        if let Some(refresh_token) = token
            .refresh_token
            .as_deref()
            .or_else(|| grant.carried_refresh_token())
        {
            credentials = credentials.with_refresh_token(refresh_token);
        }

        self.config.in_logger(|| {
            tracing::info!(
                grant_type = grant.kind(),
                expires_in = token.expires_in,
                scope = %token.scope,
                has_refresh_token = credentials.refresh_token().is_some(),
                "Google token exchange succeeded"
            )
        });

        Ok(credentials)
    }

    async fn request_user(&self, access_token: &str) -> Result<GoogleUser> {
        let response = self
            .http
            .get(&self.endpoints.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let body = check_response_json(response, &USERINFO_REQUIRED_KEYS).await?;
        let info: UserInfoResponse = parse_body(body)?;

        self.config.in_logger(|| {
            tracing::debug!(
                user_id = %info.id,
                verified_email = info.verified_email,
                "Fetched Google user profile"
            )
        });

        Ok(GoogleUser {
            id: info.id,
            email: info.email,
            email_verified: info.verified_email,
            first_name: info.given_name,
            last_name: info.family_name,
            locale: info.locale,
            profile_picture_url: info.picture,
        })
    }

    /// Log a failed operation into the configured sink, then pass it through.
    fn log_failure<T>(&self, operation: &'static str, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.config.in_logger(|| {
                if err.is_critical() {
                    tracing::error!(
                        operation,
                        severity = "critical",
                        error = %err,
                        "Google OAuth request failed"
                    );
                } else {
                    tracing::error!(operation, error = %err, "Google OAuth request failed");
                }
            });
        }
        result
    }
}

/// Check for `200 OK`, decode the body as a JSON object and make sure every
/// key in `required` is present.
async fn check_response_json(
    response: reqwest::Response,
    required: &[&str],
) -> Result<Map<String, Value>> {
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(OAuthError::UpstreamStatus(status.as_u16()));
    }

    let text = response.text().await?;
    let body = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            return Err(OAuthError::MalformedResponse(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )))
        }
        Err(e) => return Err(OAuthError::MalformedResponse(e.to_string())),
    };

    if let Some(missing) = required.iter().find(|key| !body.contains_key(**key)) {
        return Err(OAuthError::MissingField(missing.to_string()));
    }

    Ok(body)
}

fn parse_body<T: for<'de> Deserialize<'de>>(body: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| OAuthError::MalformedResponse(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    scope: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// UserInfo endpoint response.
#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    id: String,
    email: String,
    verified_email: bool,
    given_name: String,
    family_name: String,
    locale: String,
    picture: String,
}
