//! Admin dashboard

use super::{Entry, log_out, require_session};
use crate::repository::EventRepository;
use crate::routes::Route;
use crate::session::SessionStore;
use campus_events_core::EventCounts;
use campus_events_core::utils::avatar_initial;
use std::sync::Arc;
use tracing::error;

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Admin display name
    pub admin_name: String,
    /// Admin email
    pub admin_email: String,
    /// Avatar letter
    pub initial: char,
    /// Approved events
    pub approved: u64,
    /// Events that were not rejected
    pub created: u64,
}

/// Dashboard controller
pub struct DashboardController {
    repository: Arc<dyn EventRepository>,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl DashboardController {
    /// Create a dashboard controller
    pub fn new(repository: Arc<dyn EventRepository>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            repository,
            session,
        }
    }

    /// Enter the dashboard, fetching fresh counts
    ///
    /// Without a session this redirects to the login screen. A failed count
    /// fetch is logged and shows zeros.
    pub async fn enter(&self) -> Entry<DashboardView> {
        let admin = match require_session(Route::Dashboard, self.session.as_ref()) {
            Ok(admin) => admin,
            Err(route) => return Entry::Redirect(route),
        };

        let counts = self.repository.counts().await.unwrap_or_else(|e| {
            error!("Error fetching event counts: {}", e);
            EventCounts::default()
        });

        Entry::Ready(DashboardView {
            initial: avatar_initial(&admin.name),
            admin_name: admin.name,
            admin_email: admin.email,
            approved: counts.approved,
            created: counts.non_rejected(),
        })
    }

    /// Clear the session
    pub fn logout(&self) -> Route {
        log_out(self.session.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockEventRepository;
    use crate::session::MemorySessionStore;
    use campus_events_core::AdminIdentity;
    use pretty_assertions::assert_eq;

    fn signed_in() -> Arc<MemorySessionStore> {
        let session = Arc::new(MemorySessionStore::in_memory());
        session.login(&AdminIdentity {
            id: 1,
            name: "ann".to_string(),
            email: "a@x.com".to_string(),
        });
        session
    }

    #[tokio::test]
    async fn test_enter_without_session_redirects() {
        let dashboard = DashboardController::new(
            Arc::new(MockEventRepository::new()),
            Arc::new(MemorySessionStore::in_memory()),
        );

        assert_eq!(dashboard.enter().await, Entry::Redirect(Route::AdminLogin));
    }

    #[tokio::test]
    async fn test_enter_shows_admin_and_counts() {
        let dashboard =
            DashboardController::new(Arc::new(MockEventRepository::new()), signed_in());

        let view = dashboard.enter().await.ready().unwrap();

        assert_eq!(view.admin_name, "ann");
        assert_eq!(view.initial, 'A');
        assert_eq!((view.approved, view.created), (0, 0));
    }

    #[tokio::test]
    async fn test_count_failure_shows_zeros() {
        let repo = MockEventRepository::new();
        repo.set_unavailable(true);
        let dashboard = DashboardController::new(Arc::new(repo), signed_in());

        let view = dashboard.enter().await.ready().unwrap();
        assert_eq!(view.created, 0);
    }

    #[tokio::test]
    async fn test_logout_locks_dashboard_again() {
        let dashboard =
            DashboardController::new(Arc::new(MockEventRepository::new()), signed_in());
        assert!(dashboard.enter().await.ready().is_some());

        assert_eq!(dashboard.logout(), Route::AdminLogin);
        assert_eq!(dashboard.enter().await, Entry::Redirect(Route::AdminLogin));
    }
}
