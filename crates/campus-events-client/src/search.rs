//! Search-as-you-type with stale response suppression
//!
//! Every keystroke issues a request and nothing is cancelled, so responses can
//! arrive out of order. Each request takes a ticket from a generation counter
//! and its results are only applied if no newer request has been issued since.

use crate::repository::EventRepository;
use campus_events_core::{Event, EventStatus};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

/// Generation handed to one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Monotonic request-generation counter
#[derive(Debug, Clone, Default)]
pub struct SearchSequencer {
    latest: Arc<AtomicU64>,
}

impl SearchSequencer {
    /// Create a counter with no issued tickets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket that supersedes every earlier one
    pub fn issue(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1))
    }

    /// Whether `ticket` is still the newest one issued
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Which listing a search box falls back to and what it shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Public listing: blank input reloads approved events and search
    /// results are narrowed to approved ones
    Approved,
    /// Blank input reloads recent events; search results are shown as returned
    Recent,
}

/// What happened to the results of one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results replaced the displayed list
    Applied,
    /// A newer request was issued; results were dropped
    Superseded,
    /// The request failed; the displayed list is unchanged
    Failed,
}

/// Search box state bound to a repository
#[derive(Clone)]
pub struct LiveSearch {
    repository: Arc<dyn EventRepository>,
    scope: SearchScope,
    sequencer: SearchSequencer,
    results: Arc<RwLock<Vec<Event>>>,
}

impl fmt::Debug for LiveSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSearch")
            .field("scope", &self.scope)
            .field("sequencer", &self.sequencer)
            .field("results", &self.results.read().len())
            .finish_non_exhaustive()
    }
}

impl LiveSearch {
    /// Create an empty search over `repository`
    pub fn new(repository: Arc<dyn EventRepository>, scope: SearchScope) -> Self {
        Self {
            repository,
            scope,
            sequencer: SearchSequencer::new(),
            results: Arc::default(),
        }
    }

    /// Currently displayed events
    #[must_use]
    pub fn results(&self) -> Vec<Event> {
        self.results.read().clone()
    }

    /// Reload the fallback listing; supersedes pending searches
    pub async fn refresh(&self) -> SearchOutcome {
        let ticket = self.sequencer.issue();
        let listing = match self.scope {
            SearchScope::Approved => self.repository.list_approved().await,
            SearchScope::Recent => self.repository.list_recent().await,
        };

        match listing {
            Ok(events) => self.apply(ticket, events),
            Err(e) => {
                error!("Error fetching events: {}", e);
                SearchOutcome::Failed
            }
        }
    }

    /// Handle new search box contents
    ///
    /// Blank input never reaches the search endpoint; it reloads the listing.
    pub async fn input(&self, keyword: &str) -> SearchOutcome {
        if keyword.trim().is_empty() {
            return self.refresh().await;
        }

        let ticket = self.sequencer.issue();
        match self.repository.search(keyword).await {
            Ok(events) => {
                let events = match self.scope {
                    SearchScope::Approved => events
                        .into_iter()
                        .filter(|e| e.status == EventStatus::Approved)
                        .collect(),
                    SearchScope::Recent => events,
                };
                self.apply(ticket, events)
            }
            Err(e) => {
                error!("Error searching events: {}", e);
                SearchOutcome::Failed
            }
        }
    }

    fn apply(&self, ticket: SearchTicket, events: Vec<Event>) -> SearchOutcome {
        let mut results = self.results.write();
        if !self.sequencer.is_current(ticket) {
            debug!(?ticket, "Dropping superseded search results");
            return SearchOutcome::Superseded;
        }
        *results = events;
        SearchOutcome::Applied
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockEventRepository;
    use campus_events_core::EventDraft;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sequencer_newest_ticket_wins() {
        let sequencer = SearchSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();

        assert!(first < second);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_sequencer_clones_share_generation() {
        let sequencer = SearchSequencer::new();
        let ticket = sequencer.issue();
        sequencer.clone().issue();

        assert!(!sequencer.is_current(ticket));
    }

    async fn seeded() -> MockEventRepository {
        let repo = MockEventRepository::new();
        for (title, approve) in [("Jazz Night", true), ("Jazz Workshop", false)] {
            let event = repo
                .create(&EventDraft {
                    title: title.to_string(),
                    description: String::new(),
                    date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                    time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                    location: "Auditorium".to_string(),
                })
                .await
                .unwrap();
            if approve {
                repo.approve(event.id).await.unwrap();
            }
        }
        repo
    }

    #[tokio::test]
    async fn test_approved_scope_narrows_search_results() {
        let search = LiveSearch::new(Arc::new(seeded().await), SearchScope::Approved);

        assert_eq!(search.input("jazz").await, SearchOutcome::Applied);
        let titles: Vec<String> = search.results().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["Jazz Night"]);
    }

    #[tokio::test]
    async fn test_recent_scope_keeps_pending_results() {
        let search = LiveSearch::new(Arc::new(seeded().await), SearchScope::Recent);

        search.input("jazz").await;
        assert_eq!(search.results().len(), 2);

        search.input("   ").await;
        assert_eq!(search.results().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_results() {
        let repo = seeded().await;
        let search = LiveSearch::new(Arc::new(repo.clone()), SearchScope::Approved);
        search.refresh().await;
        assert_eq!(search.results().len(), 1);

        repo.set_unavailable(true);
        assert_eq!(search.input("jazz").await, SearchOutcome::Failed);
        assert_eq!(search.results().len(), 1);
    }
}
