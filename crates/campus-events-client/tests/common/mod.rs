//! Common test utilities and fixtures for integration tests

#![allow(dead_code, unreachable_pub)]

use campus_events_client::{ApiClient, MemorySessionStore, SessionStore};
use campus_events_core::{AdminIdentity, EventDraft};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{Value, json};
use std::sync::{Arc, Once};
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("campus_events_client=debug")
            .with_test_writer()
            .try_init();
    });
}

/// A mock service plus a client pointed at it
pub struct TestService {
    pub server: MockServer,
    pub client: Arc<ApiClient>,
}

impl TestService {
    /// Start a fresh mock service
    pub async fn start() -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        let client = Arc::new(ApiClient::new(server.uri()));
        Self { server, client }
    }
}

/// Event as the service serializes it
pub fn event_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("About {title}"),
        "date": "2025-09-12",
        "time": "18:30:00",
        "location": "Student Union",
        "status": status,
        "createdAt": "2025-09-01"
    })
}

/// A complete, valid draft
pub fn sample_draft() -> EventDraft {
    EventDraft {
        title: "Career Fair".to_string(),
        description: "Meet employers".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        location: "Gym".to_string(),
    }
}

/// Session store already holding an admin
pub fn signed_in_session() -> Arc<MemorySessionStore> {
    let session = Arc::new(MemorySessionStore::in_memory());
    session.login(&AdminIdentity {
        id: 1,
        name: "Ann".to_string(),
        email: "a@x.com".to_string(),
    });
    session
}
