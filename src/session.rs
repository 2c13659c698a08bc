//! Session service: process-lifetime authentication state.
//!
//! Owns the nullable authenticated profile and the loading flag. The
//! startup probe asks the auth collaborator for an existing session
//! exactly once, then a background listener follows the collaborator's
//! session-change notifications until shutdown.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::auth::{AuthProvider, Identity};

/// Read-only snapshot of the session, consumed by the route guard and
/// the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub current_user: Option<Identity>,
    pub is_loading: bool,
}

pub struct SessionService {
    auth: Arc<dyn AuthProvider>,
    state: Arc<Mutex<SessionState>>,
    listener: Mutex<Option<JoinHandle<()>>>,
}

impl SessionService {
    /// Create the service in its loading state. Call `initialize` to
    /// run the startup session check and start the change listener.
    pub fn new(auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            auth,
            state: Arc::new(Mutex::new(SessionState {
                current_user: None,
                is_loading: true,
            })),
            listener: Mutex::new(None),
        }
    }

    /// Perform the one startup check for an existing session and start
    /// following session-change notifications.
    ///
    /// `is_loading` clears whether the check succeeds or fails; a
    /// failed check just means no session.
    pub async fn initialize(&self) {
        let existing = match self.auth.get_session().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Startup session check failed: {}", e);
                None
            }
        };

        {
            let mut state = self.state.lock().unwrap();
            state.current_user = existing;
            state.is_loading = false;
        }

        let mut changes = self.auth.subscribe();
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let identity = changes.borrow_and_update().clone();
                state.lock().unwrap().current_user = identity;
            }
        });

        *self.listener.lock().unwrap() = Some(handle);
    }

    /// Stop following session-change notifications.
    pub fn shutdown(&self) {
        if let Some(handle) = self.listener.lock().unwrap().take() {
            handle.abort();
        }
    }

    /// Sign in with the given credentials.
    ///
    /// On failure the collaborator's error message is returned
    /// unmodified, ready for the login view.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), String> {
        match self.auth.sign_in(email, password).await {
            Ok(identity) => {
                info!("Signed in: {}", identity.email);
                self.state.lock().unwrap().current_user = Some(identity);
                Ok(())
            }
            Err(e) => Err(e.to_string()),
        }
    }

    /// Sign out and clear the current user. A collaborator failure is
    /// logged; the local session ends either way.
    pub async fn sign_out(&self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Sign-out request failed: {}", e);
        }
        self.state.lock().unwrap().current_user = None;
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    pub fn current_user(&self) -> Option<Identity> {
        self.state.lock().unwrap().current_user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }
}

impl Drop for SessionService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
