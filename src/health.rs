//! Health-check handler.
//!
//! ```rust,no_run
//! use crm_contacts::{Router, health};
//!
//! let app = Router::new().get("/health", health::health);
//! ```

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::{Json, Request};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    /// RFC 3339 UTC with millisecond precision, e.g. `2026-01-01T00:00:00.000Z`.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn now() -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// `200 OK` with `{"status":"healthy","timestamp":…}`. The process answering
/// at all is the health signal; there are no dependencies to probe.
pub async fn health(_req: Request) -> Json<HealthStatus> {
    Json(HealthStatus::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let status = HealthStatus::now();
        assert_eq!(status.status, "healthy");
        assert!(status.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&status.timestamp).is_ok());
        // 2026-01-01T00:00:00.000Z
        assert_eq!(status.timestamp.len(), 24);
    }
}
