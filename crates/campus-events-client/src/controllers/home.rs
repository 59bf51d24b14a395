//! Public event listing

use crate::repository::EventRepository;
use crate::search::{LiveSearch, SearchOutcome, SearchScope};
use campus_events_core::Event;
use std::sync::Arc;

/// Home screen: approved events with search-as-you-type
#[derive(Debug, Clone)]
pub struct HomeController {
    search: LiveSearch,
}

impl HomeController {
    /// Create a home controller
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self {
            search: LiveSearch::new(repository, SearchScope::Approved),
        }
    }

    /// Enter the screen, loading approved events
    ///
    /// A failed fetch leaves the list empty.
    pub async fn enter(&self) -> Vec<Event> {
        self.search.refresh().await;
        self.events()
    }

    /// Handle a change of the search box
    pub async fn search(&self, input: &str) -> SearchOutcome {
        self.search.input(input).await
    }

    /// Events currently displayed
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.search.results()
    }
}
