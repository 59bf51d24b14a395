//! Campus events admin client
//!
//! Session handling, REST access and screen controllers for the campus event
//! listing service. Students browse approved events; an administrator logs in
//! and creates, approves, rejects or deletes events.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod controllers;
pub mod error;
pub mod mock;
pub mod repository;
pub mod routes;
pub mod search;
pub mod session;

// Re-export the main types
pub use api_client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use mock::MockEventRepository;
pub use repository::{AdminAuthenticator, EventRepository};
pub use routes::Route;
pub use search::{LiveSearch, SearchOutcome, SearchScope, SearchSequencer};
pub use session::{AdminSession, FileSessionStore, MemorySessionStore, SessionStore};
