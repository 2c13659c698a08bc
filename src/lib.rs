//! Core library for the MANÉ services site: bilingual content
//! resolution, session/auth gating, the remote data gateway, and the
//! admin dashboard state machine.
//!
//! The hosted backend (auth + relational storage) is an external
//! collaborator reached over HTTP; everything here is a typed client
//! of it plus the local state the admin and public pages need.

pub mod auth;
pub mod config;
pub mod content;
pub mod dashboard;
pub mod export;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod i18n;
pub mod models;
pub mod session;
