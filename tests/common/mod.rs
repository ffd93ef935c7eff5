// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use google_login::services::{Endpoints, GoogleOAuthService};
use google_login::Config;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::MockServer;

#[allow(dead_code)]
pub const TOKEN_PATH: &str = "/oauth2/v4/token";
#[allow(dead_code)]
pub const USERINFO_PATH: &str = "/oauth2/v2/userinfo";

/// In-memory log sink for asserting on what the service logged.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Config with test credentials and a capturing logger.
#[allow(dead_code)]
pub fn test_config() -> (Config, LogBuffer) {
    let logs = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let config = Config::new("test-client-id", "test-client-secret", "https://app/cb")
        .with_logger(subscriber);

    (config, logs)
}

/// Endpoints pointing at a mock server.
#[allow(dead_code)]
pub fn mock_endpoints(base: &str) -> Endpoints {
    Endpoints::mock(base)
}

/// Service wired to `server`, plus the buffer its failures are logged to.
pub fn test_service(server: &MockServer) -> (GoogleOAuthService, LogBuffer) {
    let (config, logs) = test_config();
    let service =
        GoogleOAuthService::with_endpoints(Arc::new(config), mock_endpoints(&server.uri()));
    (service, logs)
}
