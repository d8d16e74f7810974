//! Paginated record manager.
//!
//! Drives the [`UsersGateway`] on behalf of the operator and reconciles each
//! outcome into the [`RecordView`]. Every operation issues at most one remote
//! call, and no failure escapes: transport details are logged and the view
//! shows the fixed message for that kind of call.
//!
//! Operations take `&mut self`, so calls made through one manager are
//! sequential. Callers that want overlapping page loads split a load into
//! [`RecordManager::begin_load`], a call on [`RecordManager::gateway`], and
//! [`RecordManager::complete_load`]; the view's [`LoadOrdering`] decides
//! which completion wins.

use std::sync::Arc;

use pagination::PageNumber;
use tracing::{debug, info, warn};

use crate::domain::ports::{SessionGuard, UsersGateway, UsersGatewayError, UsersPage};
use crate::domain::{
    EditField, LoadOrdering, LoadOutcome, LoadTicket, RecordView, UserId, UserRecord,
};

/// Result of entering the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// A session exists and the first page load completed with this outcome.
    Ready(LoadOutcome),
    /// No stored session; control belongs to the login entry point.
    RedirectToLogin,
}

/// Result of saving the open edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The service accepted the edit and the record was updated locally.
    Saved,
    /// The service rejected the edit; the edit stays open.
    Failed,
    /// No edit was open, so nothing was sent.
    NothingToCommit,
}

/// Result of deleting a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The service deleted the user and it was removed locally.
    Deleted,
    /// The service call failed; the list is unchanged.
    Failed,
}

/// Paginated list/edit/delete controller over the users service.
pub struct RecordManager {
    gateway: Arc<dyn UsersGateway>,
    session: Arc<dyn SessionGuard>,
    view: RecordView,
}

impl RecordManager {
    /// Build a manager that discards superseded page loads.
    pub fn new(gateway: Arc<dyn UsersGateway>, session: Arc<dyn SessionGuard>) -> Self {
        Self::with_ordering(gateway, session, LoadOrdering::default())
    }

    /// Build a manager with an explicit reconciliation policy.
    pub fn with_ordering(
        gateway: Arc<dyn UsersGateway>,
        session: Arc<dyn SessionGuard>,
        ordering: LoadOrdering,
    ) -> Self {
        Self {
            gateway,
            session,
            view: RecordView::new(ordering),
        }
    }

    /// Current display state.
    pub const fn view(&self) -> &RecordView {
        &self.view
    }

    /// Shared handle to the users service, for callers that issue loads
    /// outside the manager.
    pub fn gateway(&self) -> Arc<dyn UsersGateway> {
        Arc::clone(&self.gateway)
    }

    /// Enter the list view: load page 1 when a session exists, otherwise
    /// hand over to login without touching the network.
    pub async fn mount(&mut self) -> MountOutcome {
        if !self.session.has_valid_session() {
            info!("no stored session; handing over to login");
            return MountOutcome::RedirectToLogin;
        }
        MountOutcome::Ready(self.load_page(PageNumber::FIRST).await)
    }

    /// Fetch `page` and, on success, replace the displayed records with it.
    pub async fn load_page(&mut self, page: PageNumber) -> LoadOutcome {
        let ticket = self.begin_load(page);
        let result = self.gateway.list_users(page).await;
        self.complete_load(ticket, result)
    }

    /// Start a page load without issuing the call.
    pub fn begin_load(&mut self, page: PageNumber) -> LoadTicket {
        let ticket = self.view.begin_load(page);
        debug!(page = %page, sequence = ticket.sequence(), "listing users");
        ticket
    }

    /// Reconcile the result of a load started with [`Self::begin_load`].
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<UsersPage, UsersGatewayError>,
    ) -> LoadOutcome {
        if self.view.is_superseded(ticket) {
            debug!(
                page = %ticket.page(),
                sequence = ticket.sequence(),
                "discarding superseded page load"
            );
            return LoadOutcome::Superseded;
        }
        match result {
            Ok(listing) => self.view.apply_page(ticket, listing),
            Err(error) => {
                warn!(page = %ticket.page(), error = %error, "listing users failed");
                self.view.fail_load(ticket)
            }
        }
    }

    /// Load the next page; `None` when already on the last page.
    pub async fn advance_page(&mut self) -> Option<LoadOutcome> {
        let next = self.view.bounds().next()?;
        Some(self.load_page(next).await)
    }

    /// Load the previous page; `None` when already on the first page.
    pub async fn retreat_page(&mut self) -> Option<LoadOutcome> {
        let previous = self.view.bounds().previous()?;
        Some(self.load_page(previous).await)
    }

    /// Load an arbitrary page; `None` when `page` is past the known total.
    pub async fn go_to_page(&mut self, page: PageNumber) -> Option<LoadOutcome> {
        if !self.view.bounds().contains(page) {
            debug!(page = %page, total = %self.view.bounds().total(), "page out of range");
            return None;
        }
        Some(self.load_page(page).await)
    }

    /// Re-fetch the displayed page.
    pub async fn reload(&mut self) -> LoadOutcome {
        let page = self.view.current_page();
        self.load_page(page).await
    }

    /// Open an edit for `record`, discarding any other open edit.
    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.view.begin_edit(record);
    }

    /// Open an edit for a displayed record. Returns `false` when `id` is not
    /// on the current page.
    pub fn begin_edit_by_id(&mut self, id: UserId) -> bool {
        let Some(record) = self.view.record(id).cloned() else {
            return false;
        };
        self.view.begin_edit(&record);
        true
    }

    /// Change one draft field. Returns `false` when no edit is open.
    pub fn update_edit_field(&mut self, field: EditField, value: impl Into<String>) -> bool {
        self.view.update_edit_field(field, value)
    }

    /// Close the open edit without saving.
    pub fn cancel_edit(&mut self) {
        self.view.cancel_edit();
    }

    /// Send the open edit to the service.
    pub async fn commit_edit(&mut self) -> CommitOutcome {
        let Some(buffer) = self.view.edit_buffer().cloned() else {
            return CommitOutcome::NothingToCommit;
        };
        let id = buffer.target();
        debug!(user_id = %id, "updating user");
        match self.gateway.update_user(id, buffer.draft()).await {
            Ok(()) => {
                self.view.apply_update(id, buffer.draft());
                CommitOutcome::Saved
            }
            Err(error) => {
                warn!(user_id = %id, error = %error, "updating user failed");
                self.view.fail_update();
                CommitOutcome::Failed
            }
        }
    }

    /// Delete a user, whether or not it is displayed.
    pub async fn delete_record(&mut self, id: UserId) -> DeleteOutcome {
        debug!(user_id = %id, "deleting user");
        match self.gateway.delete_user(id).await {
            Ok(()) => {
                self.view.apply_delete(id);
                DeleteOutcome::Deleted
            }
            Err(error) => {
                warn!(user_id = %id, error = %error, "deleting user failed");
                self.view.fail_delete();
                DeleteOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for RecordManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordManager")
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
