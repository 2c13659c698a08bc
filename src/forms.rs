//! Public form validation and submission.
//!
//! Validation runs entirely client-side and blocks the remote call:
//! a form with errors never reaches the gateway. Normalization (trim
//! everything, lowercase the email) happens once, just before insert.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::gateway::{DataAccessError, RemoteStore};
use crate::models::{NewContactMessage, NewRegistration};

/// A field-level validation failure. The message key resolves through
/// the translation catalog so errors render in the active language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message_key: &'static str,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    #[error(transparent)]
    Remote(#[from] DataAccessError),
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

fn require(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message_key: "form_required",
        });
    }
}

fn require_email(field: &'static str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message_key: "form_required",
        });
    } else if !is_valid_email(value) {
        errors.push(FieldError {
            field,
            message_key: "form_invalid_email",
        });
    }
}

// ==================== Registration Form ====================

/// The public registration (lead) form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub service: String,
    pub message: String,
}

impl RegistrationForm {
    /// Validate without touching the gateway. Empty result means the
    /// form may be submitted.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require("full_name", &self.full_name, &mut errors);
        require_email("email", &self.email, &mut errors);
        require("phone", &self.phone, &mut errors);
        require("country", &self.country, &mut errors);
        require("service", &self.service, &mut errors);
        errors
    }

    /// The normalized insert payload: every field trimmed, email
    /// lowercased.
    pub fn normalized(&self) -> NewRegistration {
        NewRegistration {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: self.phone.trim().to_string(),
            country: self.country.trim().to_string(),
            service: self.service.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Validate, insert, and on success reset the form — keeping the
    /// selected service so a visitor can register someone else for the
    /// same service without re-picking it.
    pub async fn submit(&mut self, store: &dyn RemoteStore) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        store.insert_registration(&self.normalized()).await?;

        let service = std::mem::take(&mut self.service);
        *self = RegistrationForm {
            service,
            ..Default::default()
        };
        Ok(())
    }
}

// ==================== Contact Form ====================

/// The contact-page form. Phone is the only optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require("name", &self.name, &mut errors);
        require_email("email", &self.email, &mut errors);
        require("subject", &self.subject, &mut errors);
        require("message", &self.message, &mut errors);
        errors
    }

    pub fn normalized(&self) -> NewContactMessage {
        let phone = self.phone.trim();
        NewContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Validate, insert, and on success reset the whole form.
    pub async fn submit(&mut self, store: &dyn RemoteStore) -> Result<(), SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        store.insert_message(&self.normalized()).await?;

        *self = ContactForm::default();
        Ok(())
    }
}
