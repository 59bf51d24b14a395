//! Event repository interface
//!
//! Every operation is one stateless request/response round trip. There is no
//! caching, retrying or batching behind it.

use crate::error::ClientResult;
use async_trait::async_trait;
use campus_events_core::{AdminIdentity, Event, EventCounts, EventDraft, EventId, LoginRequest};

/// Credential check against the admin login endpoint
#[async_trait]
pub trait AdminAuthenticator: Send + Sync {
    /// Exchange credentials for an admin identity
    async fn login(&self, request: &LoginRequest) -> ClientResult<AdminIdentity>;
}

/// Read and write access to the remote event collection
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Every event, in server order
    async fn list_all(&self) -> ClientResult<Vec<Event>>;

    /// Approved events only
    async fn list_approved(&self) -> ClientResult<Vec<Event>>;

    /// Recent events as the server defines them
    async fn list_recent(&self) -> ClientResult<Vec<Event>>;

    /// Server-side keyword search
    ///
    /// Callers must not pass a blank keyword: the server does not treat it as
    /// a listing, so blank input is routed to a refresh instead.
    async fn search(&self, keyword: &str) -> ClientResult<Vec<Event>>;

    /// Event totals by status
    async fn counts(&self) -> ClientResult<EventCounts>;

    /// A single event
    async fn get(&self, id: EventId) -> ClientResult<Event>;

    /// Submit a new event; the service always stores it as pending
    async fn create(&self, draft: &EventDraft) -> ClientResult<Event>;

    /// Mark an event approved
    async fn approve(&self, id: EventId) -> ClientResult<()>;

    /// Mark an event rejected
    async fn reject(&self, id: EventId) -> ClientResult<()>;

    /// Remove an event permanently
    async fn delete(&self, id: EventId) -> ClientResult<()>;
}
