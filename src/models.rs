//! Wire models for the hosted store's tables.
//!
//! Shapes mirror the remote tables one-to-one; ids are opaque strings
//! (UUIDs in practice, but nothing here depends on that).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lead submitted through the public registration form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    /// One of the five service names offered on the site.
    pub service: String,
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Fields to insert for a new registration. The store assigns `id`
/// and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRegistration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub service: String,
    pub message: String,
}

/// Partial update for a registration; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegistrationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Fields to insert for a new contact message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

/// Partial update for a contact message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// An admin-visible user row. Users are created out of band; this
/// application only reads and deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A per-(section, key) override of the bundled translations, edited
/// out of band so copy changes don't need a deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentOverride {
    pub section: String,
    pub key: String,
    #[serde(rename = "englishText")]
    pub english_text: String,
    #[serde(rename = "frenchText")]
    pub french_text: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
