//! View controllers
//!
//! Each controller owns the transient state of one screen, issues repository
//! calls on behalf of user actions, and never lets a failure escape: list
//! fetch failures leave an empty or unchanged list, form failures turn into a
//! message. Rendering is left to the caller.

pub mod create;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod manage;

pub use create::{CreateEventController, CreateOutcome};
pub use dashboard::{DashboardController, DashboardView};
pub use home::HomeController;
pub use login::{AdminLoginController, LoginOutcome};
pub use manage::ManageEventsController;

use crate::routes::{Route, resolve};
use crate::session::{AdminSession, SessionStore};

/// Result of entering a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    /// The screen is shown with this state
    Ready(T),
    /// Navigation was redirected elsewhere
    Redirect(Route),
}

impl<T> Entry<T> {
    /// The state, if the screen was entered
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Redirect(_) => None,
        }
    }
}

/// Session gate shared by the protected screens
///
/// Navigation to `target` goes through [`resolve`]; a redirect comes back as
/// the error. Screens calling this need the admin, so a missing session is
/// always a redirect to the login screen.
pub(crate) fn require_session(
    target: Route,
    session: &dyn SessionStore,
) -> Result<AdminSession, Route> {
    let landed = resolve(target, session);
    if landed != target {
        return Err(landed);
    }
    session.current_session().ok_or(Route::AdminLogin)
}

/// Clear the session and return to the login screen
pub fn log_out(session: &dyn SessionStore) -> Route {
    session.logout();
    Route::AdminLogin
}
