//! Event management table

use super::{Entry, require_session};
use crate::repository::EventRepository;
use crate::routes::Route;
use crate::session::SessionStore;
use campus_events_core::{Event, EventId};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Approve, reject and delete events
///
/// Every mutation is followed by a full refresh. Mutations report success
/// as a plain boolean; failures are logged only.
pub struct ManageEventsController {
    repository: Arc<dyn EventRepository>,
    session: Arc<dyn SessionStore>,
    events: RwLock<Vec<Event>>,
    filter: RwLock<String>,
}

impl std::fmt::Debug for ManageEventsController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManageEventsController")
            .field("events", &self.events.read().len())
            .field("filter", &*self.filter.read())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Approve,
    Reject,
    Delete,
}

impl ManageEventsController {
    /// Create a management controller
    pub fn new(repository: Arc<dyn EventRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            repository,
            session,
            events: RwLock::default(),
            filter: RwLock::default(),
        }
    }

    /// Enter the screen, loading every event
    pub async fn enter(&self) -> Entry<Vec<Event>> {
        if let Err(route) = require_session(Route::ManageEvents, self.session.as_ref()) {
            return Entry::Redirect(route);
        }
        self.refresh().await;
        Entry::Ready(self.visible())
    }

    /// Reload every event; on failure the table keeps its rows
    pub async fn refresh(&self) -> bool {
        match self.repository.list_all().await {
            Ok(events) => {
                *self.events.write() = events;
                true
            }
            Err(e) => {
                error!("Error fetching events: {}", e);
                false
            }
        }
    }

    /// Set the client-side filter over title and location
    pub fn set_filter(&self, term: &str) {
        *self.filter.write() = term.to_string();
    }

    /// Rows after applying the filter; a blank filter shows everything
    #[must_use]
    pub fn visible(&self) -> Vec<Event> {
        let filter = self.filter.read();
        let term = filter.trim();
        self.events
            .read()
            .iter()
            .filter(|e| term.is_empty() || e.matches_filter(term))
            .cloned()
            .collect()
    }

    /// Approve an event, unless it is already approved
    pub async fn approve(&self, id: EventId) -> bool {
        self.mutate(id, Action::Approve).await
    }

    /// Reject an event, unless it is already rejected
    pub async fn reject(&self, id: EventId) -> bool {
        self.mutate(id, Action::Reject).await
    }

    /// Delete an event permanently
    pub async fn delete(&self, id: EventId) -> bool {
        self.mutate(id, Action::Delete).await
    }

    fn is_available(&self, id: EventId, action: Action) -> bool {
        let events = self.events.read();
        let Some(event) = events.iter().find(|e| e.id == id) else {
            // Unknown rows are left for the service to judge
            return true;
        };
        match action {
            Action::Approve => event.can_approve(),
            Action::Reject => event.can_reject(),
            Action::Delete => true,
        }
    }

    async fn mutate(&self, id: EventId, action: Action) -> bool {
        if require_session(Route::ManageEvents, self.session.as_ref()).is_err() {
            return false;
        }
        if !self.is_available(id, action) {
            debug!(event_id = id, ?action, "Action unavailable for current status");
            return false;
        }

        let result = match action {
            Action::Approve => self.repository.approve(id).await,
            Action::Reject => self.repository.reject(id).await,
            Action::Delete => self.repository.delete(id).await,
        };

        match result {
            Ok(()) => {
                info!(event_id = id, ?action, "Event updated");
                self.refresh().await;
                true
            }
            Err(e) => {
                error!("Error applying {:?} to event {}: {}", action, id, e);
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::mock::MockEventRepository;
    use crate::session::MemorySessionStore;
    use campus_events_core::{AdminIdentity, EventDraft, EventStatus};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    async fn seeded() -> MockEventRepository {
        let repo = MockEventRepository::new();
        for (title, location) in [("Book Swap", "Library"), ("Pizza Social", "Quad")] {
            repo.create(&EventDraft {
                title: title.to_string(),
                description: String::new(),
                date: NaiveDate::from_ymd_opt(2025, 8, 30).unwrap(),
                time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                location: location.to_string(),
            })
            .await
            .unwrap();
        }
        repo
    }

    fn controller(repo: &MockEventRepository) -> ManageEventsController {
        let session = Arc::new(MemorySessionStore::in_memory());
        session.login(&AdminIdentity {
            id: 1,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        });
        ManageEventsController::new(Arc::new(repo.clone()), session)
    }

    fn status_of(manage: &ManageEventsController, id: EventId) -> EventStatus {
        manage
            .visible()
            .into_iter()
            .find(|e| e.id == id)
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn test_enter_requires_session() {
        let manage = ManageEventsController::new(
            Arc::new(MockEventRepository::new()),
            Arc::new(MemorySessionStore::in_memory()),
        );
        assert_eq!(manage.enter().await, Entry::Redirect(Route::AdminLogin));
    }

    #[tokio::test]
    async fn test_approve_then_reject_refreshes_rows() {
        let repo = seeded().await;
        let manage = controller(&repo);
        manage.enter().await;

        assert!(manage.approve(1).await);
        assert_eq!(status_of(&manage, 1), EventStatus::Approved);

        assert!(manage.reject(1).await);
        assert_eq!(status_of(&manage, 1), EventStatus::Rejected);
    }

    #[tokio::test]
    async fn test_action_in_target_state_is_skipped() {
        let repo = seeded().await;
        let manage = controller(&repo);
        manage.enter().await;

        assert!(manage.reject(2).await);
        assert!(!manage.reject(2).await);
        assert!(manage.approve(2).await);
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let repo = seeded().await;
        let manage = controller(&repo);
        manage.enter().await;

        assert!(manage.delete(1).await);

        let ids: Vec<EventId> = manage.visible().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_filter_matches_title_or_location() {
        let repo = seeded().await;
        let manage = controller(&repo);
        manage.enter().await;

        manage.set_filter("LIBRARY");
        assert_eq!(manage.visible().len(), 1);

        manage.set_filter("pizza");
        assert_eq!(manage.visible()[0].title, "Pizza Social");

        manage.set_filter("  ");
        assert_eq!(manage.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_rows() {
        let repo = seeded().await;
        let manage = controller(&repo);
        manage.enter().await;

        repo.set_unavailable(true);
        assert!(!manage.approve(1).await);
        assert_eq!(manage.visible().len(), 2);
        assert_eq!(status_of(&manage, 1), EventStatus::Pending);
    }
}
