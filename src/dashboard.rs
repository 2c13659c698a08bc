//! Admin dashboard state machine.
//!
//! Maintains local mirrors of the remote collections plus the pure UI
//! state around them: tab selection, per-row expansion, the single
//! edit slot, and the confirmation-gated delete protocol. Error
//! surfacing is deliberately split: read failures degrade quietly to
//! the previous list, destructive failures are returned to the caller
//! and logged loudly.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::export::{self, EncoderSet, ExportError, ExportFormat};
use crate::gateway::{DataAccessError, RemoteStore};
use crate::models::{
    AdminUser, ContactMessage, MessagePatch, Registration, RegistrationPatch,
};

/// The admin panel's tabbed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Dashboard,
    Registrations,
    Messages,
    Users,
}

/// Which collection a record belongs to. Tagging mutations with the
/// kind up front means an id that happens to exist in two collections
/// can never misroute an update or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Registration,
    Message,
    User,
}

/// The two-step delete protocol. `Pending` is the staged state: the
/// remote delete is only issued from an explicit `confirm_delete`.
/// There is no `show` flag to drift out of sync with the target —
/// pending always has one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending { kind: RecordKind, id: String },
}

/// The edit form shared (by convention) between registrations and
/// messages. Unused fields for a given kind are simply ignored when
/// the patch is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub service: String,
    pub subject: String,
    pub message: String,
}

/// The single edit slot: at most one record is editable at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSlot {
    pub kind: RecordKind,
    pub id: String,
    pub form: EditForm,
}

/// Read-only derived view for the summary tab.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub registration_count: usize,
    pub message_count: usize,
    pub user_count: usize,
    /// Newest entry per collection; `None` renders as a neutral
    /// placeholder instead of indexing an empty list.
    pub latest_registration: Option<Registration>,
    pub latest_message: Option<ContactMessage>,
}

pub struct AdminDashboard {
    store: Arc<dyn RemoteStore>,
    encoders: EncoderSet,
    export_dir: PathBuf,

    registrations: Vec<Registration>,
    messages: Vec<ContactMessage>,
    users: Vec<AdminUser>,

    active_tab: Tab,
    expanded: HashSet<String>,
    edit: Option<EditSlot>,
    delete_confirmation: DeleteConfirmation,
}

impl AdminDashboard {
    pub fn new(store: Arc<dyn RemoteStore>, encoders: EncoderSet, export_dir: PathBuf) -> Self {
        Self {
            store,
            encoders,
            export_dir,
            registrations: Vec::new(),
            messages: Vec::new(),
            users: Vec::new(),
            active_tab: Tab::default(),
            expanded: HashSet::new(),
            edit: None,
            delete_confirmation: DeleteConfirmation::Idle,
        }
    }

    // ==================== Fetching ====================

    /// Refresh one collection. A fetch failure keeps the previous
    /// list and logs quietly — the read path never alarms the admin.
    /// Overlapping refreshes for the same collection resolve
    /// last-write-wins; no ordering is guaranteed across them.
    pub async fn refresh_registrations(&mut self) {
        match self.store.list_registrations().await {
            Ok(rows) => self.registrations = rows,
            Err(e) => warn!("Failed to fetch registrations: {}", e),
        }
    }

    pub async fn refresh_messages(&mut self) {
        match self.store.list_messages().await {
            Ok(rows) => self.messages = rows,
            Err(e) => warn!("Failed to fetch messages: {}", e),
        }
    }

    pub async fn refresh_users(&mut self) {
        match self.store.list_users().await {
            Ok(rows) => self.users = rows,
            Err(e) => warn!("Failed to fetch users: {}", e),
        }
    }

    /// Fetch all three collections (on mount and on demand).
    pub async fn refresh_all(&mut self) {
        self.refresh_registrations().await;
        self.refresh_messages().await;
        self.refresh_users().await;
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn messages(&self) -> &[ContactMessage] {
        &self.messages
    }

    pub fn users(&self) -> &[AdminUser] {
        &self.users
    }

    // ==================== Tabs & Expansion ====================

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Pure selection state; switching tabs has no side effects.
    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Toggle a row's disclosure: add if absent, remove if present.
    pub fn toggle_row(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    // ==================== Editing ====================

    /// Open the edit slot on a registration, prefilled from the local
    /// mirror. Any in-progress edit of another record is discarded
    /// without a dirty-check.
    pub fn begin_edit_registration(&mut self, id: &str) -> bool {
        let Some(reg) = self.registrations.iter().find(|r| r.id == id) else {
            return false;
        };

        self.edit = Some(EditSlot {
            kind: RecordKind::Registration,
            id: reg.id.clone(),
            form: EditForm {
                name: reg.full_name.clone(),
                email: reg.email.clone(),
                phone: reg.phone.clone(),
                country: reg.country.clone(),
                service: reg.service.clone(),
                subject: String::new(),
                message: reg.message.clone(),
            },
        });
        true
    }

    /// Open the edit slot on a contact message.
    pub fn begin_edit_message(&mut self, id: &str) -> bool {
        let Some(msg) = self.messages.iter().find(|m| m.id == id) else {
            return false;
        };

        self.edit = Some(EditSlot {
            kind: RecordKind::Message,
            id: msg.id.clone(),
            form: EditForm {
                name: msg.name.clone(),
                email: msg.email.clone(),
                phone: msg.phone.clone().unwrap_or_default(),
                country: String::new(),
                service: String::new(),
                subject: msg.subject.clone(),
                message: msg.message.clone(),
            },
        });
        true
    }

    pub fn editing(&self) -> Option<&EditSlot> {
        self.edit.as_ref()
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut EditForm> {
        self.edit.as_mut().map(|slot| &mut slot.form)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Save the in-progress edit. The update is routed by the kind
    /// recorded when the slot was opened, then that collection is
    /// refetched and the slot cleared. Last write wins; there is no
    /// optimistic-concurrency token.
    ///
    /// On failure the slot stays open with the typed form intact, so
    /// a retry doesn't mean retyping.
    pub async fn save_edit(&mut self) -> Result<(), DataAccessError> {
        let Some(slot) = self.edit.clone() else {
            return Ok(());
        };

        let result = match slot.kind {
            RecordKind::Registration => {
                let patch = RegistrationPatch {
                    full_name: Some(slot.form.name.clone()),
                    email: Some(slot.form.email.trim().to_lowercase()),
                    phone: Some(slot.form.phone.clone()),
                    country: Some(slot.form.country.clone()),
                    service: Some(slot.form.service.clone()),
                    message: Some(slot.form.message.clone()),
                };
                self.store.update_registration(&slot.id, &patch).await
            }
            RecordKind::Message => {
                let phone = slot.form.phone.trim();
                let patch = MessagePatch {
                    name: Some(slot.form.name.clone()),
                    email: Some(slot.form.email.trim().to_lowercase()),
                    phone: (!phone.is_empty()).then(|| phone.to_string()),
                    subject: Some(slot.form.subject.clone()),
                    message: Some(slot.form.message.clone()),
                };
                self.store.update_message(&slot.id, &patch).await
            }
            RecordKind::User => unreachable!("users have no edit path"),
        };

        if let Err(e) = &result {
            error!("Failed to save edit for {}: {}", slot.id, e);
            return result;
        }

        self.edit = None;
        match slot.kind {
            RecordKind::Registration => self.refresh_registrations().await,
            RecordKind::Message => self.refresh_messages().await,
            RecordKind::User => {}
        }
        Ok(())
    }

    // ==================== Deletion ====================

    /// Stage a delete. Never touches the gateway: the remote call only
    /// happens from `confirm_delete`. A second request while one is
    /// pending overwrites the pending target (the dialog is modal, so
    /// this only happens programmatically).
    pub fn request_delete(&mut self, kind: RecordKind, id: &str) {
        self.delete_confirmation = DeleteConfirmation::Pending {
            kind,
            id: id.to_string(),
        };
    }

    pub fn delete_confirmation(&self) -> &DeleteConfirmation {
        &self.delete_confirmation
    }

    /// Dismiss the pending confirmation without any remote call.
    pub fn cancel_delete(&mut self) {
        self.delete_confirmation = DeleteConfirmation::Idle;
    }

    /// Execute the staged delete, then refetch the affected collection.
    /// With nothing staged this is a no-op. Failures are loud: logged
    /// and returned for an alert.
    pub async fn confirm_delete(&mut self) -> Result<(), DataAccessError> {
        let staged = std::mem::take(&mut self.delete_confirmation);
        let DeleteConfirmation::Pending { kind, id } = staged else {
            return Ok(());
        };

        let result = match kind {
            RecordKind::Registration => self.store.delete_registration(&id).await,
            RecordKind::Message => self.store.delete_message(&id).await,
            RecordKind::User => self.store.delete_user(&id).await,
        };

        if let Err(e) = &result {
            error!("Failed to delete {:?} {}: {}", kind, id, e);
            return result;
        }

        info!("Deleted {:?} {}", kind, id);
        self.expanded.remove(&id);

        match kind {
            RecordKind::Registration => self.refresh_registrations().await,
            RecordKind::Message => self.refresh_messages().await,
            RecordKind::User => self.refresh_users().await,
        }
        Ok(())
    }

    // ==================== Summary & Export ====================

    /// Derived view for the summary tab. Lists arrive newest-first
    /// from the gateway, so the latest entry is the head.
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            registration_count: self.registrations.len(),
            message_count: self.messages.len(),
            user_count: self.users.len(),
            latest_registration: self.registrations.first().cloned(),
            latest_message: self.messages.first().cloned(),
        }
    }

    /// Export the in-memory registrations list in the given format,
    /// writing a date-stamped file into the export directory.
    pub fn export(&self, format: ExportFormat) -> Result<PathBuf, ExportError> {
        let table = export::shape_rows(&self.registrations);
        let bytes = self.encoders.encode(format, &table)?;
        let filename = export::export_filename(format, Utc::now().date_naive());

        let path = export::write_export(&self.export_dir, &filename, &bytes)?;
        info!("Exported {} registrations to {}", table.rows.len(), path.display());
        Ok(path)
    }
}
