//! Remote data gateway: the sole path to the hosted store's tables.
//!
//! Each operation is a direct pass-through to the store's REST query
//! interface. No retries, no caching, no pagination: list calls fetch
//! the full table, which is fine at this domain's lead volumes and an
//! explicit scaling non-goal.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AdminUser, ContactMessage, ContentOverride, MessagePatch, NewContactMessage,
    NewRegistration, Registration, RegistrationPatch,
};

/// Error from a remote store operation, surfaced to the caller
/// unmodified; user-facing messaging is the caller's job.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("request to remote store failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("remote store error ({status}): {body}")]
    Remote { status: u16, body: String },

    #[error("failed to decode remote store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Typed operations against the hosted store's four tables.
///
/// Users have no insert/update path in this application: they are
/// created and edited out of band.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_registrations(&self) -> Result<Vec<Registration>, DataAccessError>;
    async fn insert_registration(&self, new: &NewRegistration) -> Result<(), DataAccessError>;
    async fn update_registration(
        &self,
        id: &str,
        patch: &RegistrationPatch,
    ) -> Result<(), DataAccessError>;
    async fn delete_registration(&self, id: &str) -> Result<(), DataAccessError>;

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, DataAccessError>;
    async fn insert_message(&self, new: &NewContactMessage) -> Result<(), DataAccessError>;
    async fn update_message(
        &self,
        id: &str,
        patch: &MessagePatch,
    ) -> Result<(), DataAccessError>;
    async fn delete_message(&self, id: &str) -> Result<(), DataAccessError>;

    async fn list_users(&self) -> Result<Vec<AdminUser>, DataAccessError>;
    async fn delete_user(&self, id: &str) -> Result<(), DataAccessError>;

    async fn list_content_overrides(
        &self,
        section: &str,
    ) -> Result<Vec<ContentOverride>, DataAccessError>;
}

/// REST client for a Supabase-style hosted store (PostgREST interface
/// under `/rest/v1/`).
#[derive(Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// List all rows of a table, newest first.
    async fn list_all<T: DeserializeOwned>(
        &self,
        table: &str,
    ) -> Result<Vec<T>, DataAccessError> {
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*"), ("order", "created_at.desc")]);

        let response = self.with_auth(request).send().await?;
        let rows: Vec<T> = decode_rows(response).await?;

        debug!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    async fn insert_row<T: Serialize + Sync>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<(), DataAccessError> {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(row);

        let response = self.with_auth(request).send().await?;
        check_status(response).await
    }

    async fn update_row<T: Serialize + Sync>(
        &self,
        table: &str,
        id: &str,
        patch: &T,
    ) -> Result<(), DataAccessError> {
        let request = self
            .client
            .patch(self.table_url(table))
            .query(&[("id", &format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(patch);

        let response = self.with_auth(request).send().await?;
        check_status(response).await
    }

    async fn delete_row(&self, table: &str, id: &str) -> Result<(), DataAccessError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .query(&[("id", &format!("eq.{}", id))]);

        let response = self.with_auth(request).send().await?;
        check_status(response).await
    }
}

/// Turn a non-success response into `DataAccessError::Remote`.
async fn check_status(response: reqwest::Response) -> Result<(), DataAccessError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(DataAccessError::Remote {
        status: status.as_u16(),
        body,
    })
}

async fn decode_rows<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Vec<T>, DataAccessError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(DataAccessError::Remote {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl RemoteStore for SupabaseStore {
    async fn list_registrations(&self) -> Result<Vec<Registration>, DataAccessError> {
        self.list_all("registrations").await
    }

    async fn insert_registration(&self, new: &NewRegistration) -> Result<(), DataAccessError> {
        self.insert_row("registrations", new).await
    }

    async fn update_registration(
        &self,
        id: &str,
        patch: &RegistrationPatch,
    ) -> Result<(), DataAccessError> {
        self.update_row("registrations", id, patch).await
    }

    async fn delete_registration(&self, id: &str) -> Result<(), DataAccessError> {
        self.delete_row("registrations", id).await
    }

    async fn list_messages(&self) -> Result<Vec<ContactMessage>, DataAccessError> {
        self.list_all("messages").await
    }

    async fn insert_message(&self, new: &NewContactMessage) -> Result<(), DataAccessError> {
        self.insert_row("messages", new).await
    }

    async fn update_message(
        &self,
        id: &str,
        patch: &MessagePatch,
    ) -> Result<(), DataAccessError> {
        self.update_row("messages", id, patch).await
    }

    async fn delete_message(&self, id: &str) -> Result<(), DataAccessError> {
        self.delete_row("messages", id).await
    }

    async fn list_users(&self) -> Result<Vec<AdminUser>, DataAccessError> {
        let request = self
            .client
            .get(self.table_url("users"))
            .query(&[("select", "*")]);

        let response = self.with_auth(request).send().await?;
        decode_rows(response).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), DataAccessError> {
        self.delete_row("users", id).await
    }

    async fn list_content_overrides(
        &self,
        section: &str,
    ) -> Result<Vec<ContentOverride>, DataAccessError> {
        let section_filter = format!("eq.{}", section);
        let request = self
            .client
            .get(self.table_url("content"))
            .query(&[("select", "*"), ("section", section_filter.as_str())]);

        let response = self.with_auth(request).send().await?;
        decode_rows(response).await
    }
}
