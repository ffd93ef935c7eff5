// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Google-Login: "login with Google" for web applications
//!
//! This crate builds the Google OAuth2 consent URL, exchanges authorization
//! codes and refresh tokens for credentials, and fetches the signed-in
//! user's profile.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use config::Config;
pub use error::OAuthError;
pub use models::{Credentials, GoogleUser};
pub use services::{AccessType, GoogleOAuthService};
