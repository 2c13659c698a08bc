//! Client for the hosted auth service (GoTrue-style endpoints under
//! `/auth/v1/`).
//!
//! Credential verification is delegated entirely to the collaborator;
//! this module only carries its answers. Session transitions are
//! published on a watch channel so the session service can follow
//! out-of-band changes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

/// Role granted to every authenticated identity.
///
/// Single-role-only is the current product shape (one admin expected);
/// the guard still checks roles so a multi-role provider can slot in
/// later without API changes.
const DEFAULT_ROLE: &str = "admin";

/// An authenticated user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("request to auth service failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider rejected the operation; the message is the
    /// provider's own, passed through unmodified.
    #[error("{0}")]
    Rejected(String),

    #[error("failed to decode auth service response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The external auth collaborator, seen from this application.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Check for an existing session (e.g., a still-valid token).
    async fn get_session(&self) -> Result<Option<Identity>, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Session-change notifications: `Some` on sign-in, `None` on
    /// sign-out or expiry.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}

// ==================== Wire Types ====================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: RemoteUser,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    full_name: Option<String>,
}

/// Error body shape used by the auth endpoints. The fields vary by
/// endpoint version, so all the likely carriers are tried in order.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl RemoteUser {
    fn into_identity(self) -> Identity {
        Identity {
            id: self.id,
            email: self.email,
            role: DEFAULT_ROLE.to_string(),
            full_name: self.user_metadata.full_name,
        }
    }
}

// ==================== Client ====================

/// Auth client for a Supabase-style hosted backend.
#[derive(Clone)]
pub struct SupabaseAuth {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Arc<Mutex<Option<String>>>,
    sessions: Arc<watch::Sender<Option<Identity>>>,
}

impl SupabaseAuth {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        let (sessions, _) = watch::channel(None);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: Arc::new(Mutex::new(None)),
            sessions: Arc::new(sessions),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn publish(&self, identity: Option<Identity>) {
        // send() only errs with zero receivers, which is fine: nobody
        // is listening yet.
        let _ = self.sessions.send(identity);
    }
}

/// Extract the provider's error message from a failed auth response.
async fn provider_message(response: reqwest::Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.message))
        .unwrap_or_else(|| format!("auth request failed with status {}", status));

    AuthError::Rejected(message)
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(provider_message(response).await);
        }

        let token: TokenResponse = serde_json::from_str(&response.text().await?)?;

        *self.access_token.lock().unwrap() = Some(token.access_token);
        let identity = token.user.into_identity();
        debug!("Signed in as {}", identity.email);

        self.publish(Some(identity.clone()));
        Ok(identity)
    }

    async fn get_session(&self) -> Result<Option<Identity>, AuthError> {
        let token = self.access_token.lock().unwrap().clone();
        let Some(token) = token else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            // Expired or revoked token: the session is simply gone.
            *self.access_token.lock().unwrap() = None;
            self.publish(None);
            return Ok(None);
        }

        let user: RemoteUser = serde_json::from_str(&response.text().await?)?;
        Ok(Some(user.into_identity()))
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let token = self.access_token.lock().unwrap().take();

        if let Some(token) = token {
            let response = self
                .client
                .post(self.auth_url("logout"))
                .header("apikey", &self.anon_key)
                .bearer_auth(&token)
                .send()
                .await?;

            if !response.status().is_success() {
                self.publish(None);
                return Err(provider_message(response).await);
            }
        }

        self.publish(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sessions.subscribe()
    }
}
