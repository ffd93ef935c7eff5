// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - calls to Google's OAuth2 endpoints.

pub mod google_oauth;

pub use google_oauth::{AccessType, Endpoints, GoogleOAuthService, SCOPES};
