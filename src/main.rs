// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google-Login command-line driver
//!
//! Walks through the login flow by hand: print the consent URL, trade the
//! code Google hands back for credentials, refresh them, look up the user.

use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use google_login::{AccessType, Config, Credentials, GoogleOAuthService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: google-login <command>
  login-url [online|offline]   print the Google consent URL
  exchange <code>              trade an authorization code for credentials
  refresh <refresh_token>      trade a refresh token for fresh credentials
  user <access_token>          fetch the signed-in user's profile";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = Config::from_env().context("Failed to load configuration")?;
    let service = GoogleOAuthService::new(Arc::new(config));

    match (command.as_str(), args.get(1).map(String::as_str)) {
        ("login-url", access_type) => {
            let access_type = match access_type {
                None | Some("online") => AccessType::Online,
                Some("offline") => AccessType::Offline,
                Some(other) => bail!("unknown access type {other:?}; expected online or offline"),
            };
            println!("{}", service.login_url(access_type));
        }
        ("exchange", Some(code)) => {
            let credentials = service.exchange_code(code).await?;
            print_json(&credentials.to_map())?;
        }
        ("refresh", Some(refresh_token)) => {
            let credentials = service.exchange_refresh_token(refresh_token).await?;
            print_json(&credentials.to_map())?;
        }
        ("user", Some(access_token)) => {
            // Expiry is unknown here; Google rejects the token if it is stale.
            let now = Utc::now();
            let credentials = Credentials::new(access_token, None, now, now + Duration::hours(1));
            let user = service.fetch_user(&credentials).await?;
            print_json(&user.to_map())?;
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn print_json(map: &serde_json::Map<String, serde_json::Value>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(map)?);
    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("google_login=debug,info")),
        )
        .with(format)
        .init();
}
