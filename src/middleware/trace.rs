//! Per-request logging.

use std::time::Instant;

use tracing::{info, warn};

/// Times one request from dispatch to response.
#[derive(Debug)]
pub struct RequestTrace {
    method: String,
    path: String,
    started: Instant,
}

impl RequestTrace {
    pub fn start(method: &str, path: &str) -> Self {
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            started: Instant::now(),
        }
    }

    /// Logs the outcome; 4xx and 5xx go out at `warn`.
    pub fn finish(self, status: u16) {
        let latency_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if status >= 400 {
            warn!(method = %self.method, path = %self.path, status, latency_ms, "request completed");
        } else {
            info!(method = %self.method, path = %self.path, status, latency_ms, "request completed");
        }
    }
}
