//! Navigable locations and the session gate in front of them

use crate::session::SessionStore;
use std::fmt;
use std::str::FromStr;

/// A location in the admin interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Public event listing
    Home,
    /// Static information page
    About,
    /// Credential form
    AdminLogin,
    /// Admin overview with counts
    Dashboard,
    /// Event submission form
    CreateEvent,
    /// Approve/reject/delete table
    ManageEvents,
}

impl Route {
    /// Every route, in menu order
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::About,
        Self::AdminLogin,
        Self::Dashboard,
        Self::CreateEvent,
        Self::ManageEvents,
    ];

    /// URL path of the route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::AdminLogin => "/admin-login",
            Self::Dashboard => "/dashboard",
            Self::CreateEvent => "/create-event",
            Self::ManageEvents => "/manage-events",
        }
    }

    /// Whether entering the route needs an admin session
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard | Self::CreateEvent | Self::ManageEvents)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| format!("unknown route: {path}"))
    }
}

/// Where navigation to `target` actually lands
///
/// Protected routes redirect to [`Route::AdminLogin`] when no session is stored.
pub fn resolve(target: Route, session: &dyn SessionStore) -> Route {
    if target.requires_session() && !session.is_authenticated() {
        Route::AdminLogin
    } else {
        target
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;
    use campus_events_core::AdminIdentity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
        assert!("/settings".parse::<Route>().is_err());
    }

    #[test]
    fn test_protected_routes_redirect_without_session() {
        let session = MemorySessionStore::in_memory();

        assert_eq!(resolve(Route::Dashboard, &session), Route::AdminLogin);
        assert_eq!(resolve(Route::ManageEvents, &session), Route::AdminLogin);
        assert_eq!(resolve(Route::Home, &session), Route::Home);
        assert_eq!(resolve(Route::About, &session), Route::About);
    }

    #[test]
    fn test_protected_routes_open_with_session() {
        let session = MemorySessionStore::in_memory();
        session.login(&AdminIdentity {
            id: 4,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        });

        assert_eq!(resolve(Route::CreateEvent, &session), Route::CreateEvent);

        session.logout();
        assert_eq!(resolve(Route::CreateEvent, &session), Route::AdminLogin);
    }
}
