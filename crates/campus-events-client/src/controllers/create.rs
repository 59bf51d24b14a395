//! Event creation form

use super::{Entry, require_session};
use crate::error::ClientError;
use crate::repository::EventRepository;
use crate::routes::Route;
use crate::session::SessionStore;
use campus_events_core::{Event, EventDraft};
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

/// Shown after a successful submission
pub const CREATED_MESSAGE: &str = "Event created successfully!";

/// Shown when the service refuses or cannot be reached
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create event. Please try again.";

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Event stored; show the message, clear the form and move on
    Created {
        /// Event as echoed by the service
        event: Event,
        /// Success message
        message: String,
        /// Where to go next
        next: Route,
    },
    /// Nothing was stored; the message goes next to the form
    Failed {
        /// Failure message
        message: String,
    },
}

/// Create-event form controller
pub struct CreateEventController {
    repository: Arc<dyn EventRepository>,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for CreateEventController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateEventController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl CreateEventController {
    /// Create a form controller
    pub fn new(repository: Arc<dyn EventRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            repository,
            session,
        }
    }

    /// Validate and submit a draft
    pub async fn submit(&self, draft: &EventDraft) -> Entry<CreateOutcome> {
        if let Err(route) = require_session(Route::CreateEvent, self.session.as_ref()) {
            return Entry::Redirect(route);
        }

        if let Err(errors) = draft.validate() {
            return Entry::Ready(CreateOutcome::Failed {
                message: ClientError::from(errors).user_message(),
            });
        }

        let outcome = match self.repository.create(draft).await {
            Ok(event) => {
                info!(event_id = event.id, "Event created");
                CreateOutcome::Created {
                    event,
                    message: CREATED_MESSAGE.to_string(),
                    next: Route::ManageEvents,
                }
            }
            Err(e) => {
                error!("Error creating event: {}", e);
                CreateOutcome::Failed {
                    message: CREATE_FAILED_MESSAGE.to_string(),
                }
            }
        };

        Entry::Ready(outcome)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mock::MockEventRepository;
    use crate::session::MemorySessionStore;
    use campus_events_core::{AdminIdentity, EventStatus};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Career Fair".to_string(),
            description: "Meet employers".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            location: "Gym".to_string(),
        }
    }

    fn controller(repo: &MockEventRepository) -> CreateEventController {
        let session = Arc::new(MemorySessionStore::in_memory());
        session.login(&AdminIdentity {
            id: 1,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        });
        CreateEventController::new(Arc::new(repo.clone()), session)
    }

    #[tokio::test]
    async fn test_submit_creates_pending_event() {
        let repo = MockEventRepository::new();

        let outcome = controller(&repo).submit(&draft()).await.ready().unwrap();

        match outcome {
            CreateOutcome::Created {
                event,
                message,
                next,
            } => {
                assert_eq!(event.status, EventStatus::Pending);
                assert_eq!(message, CREATED_MESSAGE);
                assert_eq!(next, Route::ManageEvents);
            }
            CreateOutcome::Failed { message } => panic!("unexpected failure: {message}"),
        }
        assert_eq!(repo.events().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected_locally() {
        let repo = MockEventRepository::new();
        let mut incomplete = draft();
        incomplete.location.clear();

        let outcome = controller(&repo).submit(&incomplete).await.ready().unwrap();

        assert_eq!(
            outcome,
            CreateOutcome::Failed {
                message: "location is required".to_string()
            }
        );
        assert!(repo.events().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_shows_generic_message() {
        let repo = MockEventRepository::new();
        repo.set_unavailable(true);

        let outcome = controller(&repo).submit(&draft()).await.ready().unwrap();

        assert_eq!(
            outcome,
            CreateOutcome::Failed {
                message: CREATE_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_submit_without_session_redirects() {
        let repo = MockEventRepository::new();
        let create = CreateEventController::new(
            Arc::new(repo.clone()),
            Arc::new(MemorySessionStore::in_memory()),
        );

        assert_eq!(
            create.submit(&draft()).await,
            Entry::Redirect(Route::AdminLogin)
        );
        assert!(repo.events().is_empty());
    }
}
