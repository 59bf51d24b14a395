//! Admin login screen

use crate::error::ClientError;
use crate::repository::AdminAuthenticator;
use crate::routes::Route;
use crate::session::SessionStore;
use campus_events_core::LoginRequest;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Shown for transport failures and refused credentials alike
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of submitting the login form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Session stored; navigate to the route
    Authenticated(Route),
    /// Message to show next to the form
    Failed(String),
}

/// Login form controller
pub struct AdminLoginController {
    auth: Arc<dyn AdminAuthenticator>,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for AdminLoginController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminLoginController")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AdminLoginController {
    /// Create a controller writing into `session`
    pub fn new(auth: Arc<dyn AdminAuthenticator>, session: Arc<dyn SessionStore>) -> Self {
        Self { auth, session }
    }

    /// Submit credentials
    pub async fn submit(&self, email: &str, password: &str) -> LoginOutcome {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        if let Err(errors) = request.validate() {
            return LoginOutcome::Failed(ClientError::from(errors).user_message());
        }

        match self.auth.login(&request).await {
            Ok(identity) => {
                info!(admin_id = identity.id, "Admin logged in");
                self.session.login(&identity);
                LoginOutcome::Authenticated(Route::Dashboard)
            }
            Err(ClientError::Authentication { message }) => {
                warn!("Login refused: {}", message);
                LoginOutcome::Failed(message)
            }
            Err(e) => {
                warn!("Login request failed: {}", e);
                LoginOutcome::Failed(INVALID_CREDENTIALS.to_string())
            }
        }
    }
}
