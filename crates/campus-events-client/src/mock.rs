//! In-memory event repository for testing and offline demos
//!
//! Mirrors the service's observable behaviour: ids are assigned on create,
//! new events are always pending, recent and search results exclude rejected
//! events, and listings are ordered by date then time.

use crate::error::{ClientError, ClientResult};
use crate::repository::EventRepository;
use async_trait::async_trait;
use campus_events_core::{Event, EventCounts, EventDraft, EventId, EventStatus};
use parking_lot::RwLock;
use reqwest::StatusCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct MockState {
    events: Vec<Event>,
    next_id: EventId,
}

/// Mock event repository backed by a vector
#[derive(Debug, Clone, Default)]
pub struct MockEventRepository {
    state: Arc<RwLock<MockState>>,
    unavailable: Arc<AtomicBool>,
}

impl MockEventRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with events
    ///
    /// Ids of new events continue after the largest seeded id.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let next_id = events.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            state: Arc::new(RwLock::new(MockState { events, next_id })),
            unavailable: Arc::default(),
        }
    }

    /// Make every subsequent call fail with 503, or succeed again
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of the stored events
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.state.read().events.clone()
    }

    fn check_available(&self, endpoint: &str) -> ClientResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClientError::status(StatusCode::SERVICE_UNAVAILABLE, endpoint));
        }
        Ok(())
    }

    fn sorted_where(&self, keep: impl Fn(&Event) -> bool) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .state
            .read()
            .events
            .iter()
            .filter(|e| keep(*e))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.date, e.time));
        events
    }

    fn set_status(&self, id: EventId, status: EventStatus, endpoint: &str) -> ClientResult<()> {
        self.check_available(endpoint)?;
        let mut state = self.state.write();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ClientError::status(StatusCode::NOT_FOUND, endpoint))?;
        event.status = status;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MockEventRepository {
    async fn list_all(&self) -> ClientResult<Vec<Event>> {
        self.check_available("/api/events")?;
        Ok(self.events())
    }

    async fn list_approved(&self) -> ClientResult<Vec<Event>> {
        self.check_available("/api/events/approved")?;
        Ok(self.sorted_where(|e| e.status == EventStatus::Approved))
    }

    async fn list_recent(&self) -> ClientResult<Vec<Event>> {
        self.check_available("/api/events/recent")?;
        Ok(self.sorted_where(|e| e.status != EventStatus::Rejected))
    }

    async fn search(&self, keyword: &str) -> ClientResult<Vec<Event>> {
        self.check_available("/api/events/search")?;
        Ok(self
            .events()
            .into_iter()
            .filter(|e| e.status != EventStatus::Rejected && e.matches_filter(keyword))
            .collect())
    }

    async fn counts(&self) -> ClientResult<EventCounts> {
        self.check_available("/api/events/count")?;
        let state = self.state.read();
        let count = |status| {
            state
                .events
                .iter()
                .filter(|e| e.status == status)
                .count() as u64
        };

        Ok(EventCounts {
            approved: count(EventStatus::Approved),
            total: state.events.len() as u64,
            rejected: count(EventStatus::Rejected),
            pending: count(EventStatus::Pending),
        })
    }

    async fn get(&self, id: EventId) -> ClientResult<Event> {
        let endpoint = format!("/api/events/{id}");
        self.check_available(&endpoint)?;
        self.state
            .read()
            .events
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ClientError::status(StatusCode::NOT_FOUND, endpoint))
    }

    async fn create(&self, draft: &EventDraft) -> ClientResult<Event> {
        self.check_available("/api/events")?;
        let mut state = self.state.write();
        state.next_id += 1;

        let event = Event {
            id: state.next_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date,
            time: draft.time,
            location: draft.location.clone(),
            status: EventStatus::Pending,
            created_at: Some(chrono::Local::now().date_naive()),
        };
        state.events.push(event.clone());
        Ok(event)
    }

    async fn approve(&self, id: EventId) -> ClientResult<()> {
        self.set_status(id, EventStatus::Approved, &format!("/api/events/{id}/approve"))
    }

    async fn reject(&self, id: EventId) -> ClientResult<()> {
        self.set_status(id, EventStatus::Rejected, &format!("/api/events/{id}/reject"))
    }

    async fn delete(&self, id: EventId) -> ClientResult<()> {
        self.check_available(&format!("/api/events/{id}"))?;
        self.state.write().events.retain(|e| e.id != id);
        Ok(())
    }
}
