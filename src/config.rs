// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google OAuth client configuration.
//!
//! Built once at startup (by hand or from the environment) and handed to
//! [`GoogleOAuthService`](crate::services::GoogleOAuthService) behind an `Arc`.

use std::env;
use tracing::Dispatch;

/// OAuth client settings from the credentials page of the GCP console.
///
/// Empty strings mean "unset". Nothing here is validated on use: a service
/// built from an incomplete config produces malformed URLs and requests.
#[derive(Debug, Clone, Default)]
pub struct Config {
    client_id: String,
    client_secret: String,
    /// Where Google sends the user after they approve the login.
    redirect_uri: String,
    /// Sink for failure logs; falls back to the ambient subscriber.
    logger: Option<Dispatch>,
}

impl Config {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            logger: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            client_id: env::var("GOOGLE_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            client_secret: env::var("GOOGLE_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_SECRET"))?,
            redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_REDIRECT_URI"))?,
            logger: None,
        })
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = client_secret.into();
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Route failure logs into `logger` instead of the global subscriber.
    pub fn with_logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn logger(&self) -> Option<&Dispatch> {
        self.logger.as_ref()
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// Report the first unset field, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.is_empty() {
            return Err(ConfigError::Missing("client_id"));
        }
        if self.client_secret.is_empty() {
            return Err(ConfigError::Missing("client_secret"));
        }
        if self.redirect_uri.is_empty() {
            return Err(ConfigError::Missing("redirect_uri"));
        }
        Ok(())
    }

    /// Run `f` with the configured logger as the current subscriber.
    pub(crate) fn in_logger<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.logger {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),
}
