//! Local display state for the paginated users list.
//!
//! The view never talks to the network. It hands out a [`LoadTicket`] when a
//! page load starts and reconciles the outcome of each remote call once the
//! caller reports it. Local state only changes after a remote success, with
//! the single exception of the edit buffer, which is purely local.

use pagination::{PageBounds, PageNumber};

use crate::domain::ports::UsersPage;
use crate::domain::{EditField, UserDetails, UserId, UserRecord, ViewError};

/// How completions of overlapping page loads are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadOrdering {
    /// Only the most recently issued load may change the view; completions
    /// of older loads are discarded.
    #[default]
    LatestRequest,
    /// Every completion is applied, so whichever response arrives last wins.
    LatestResponse,
}

/// Handle for one page load, issued by [`RecordView::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    sequence: u64,
    page: PageNumber,
}

impl LoadTicket {
    /// Page this load was issued for.
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Monotonic sequence number of this load.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// What happened to a completed page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page replaced the displayed records.
    Loaded,
    /// The call failed; the fetch-failure message is displayed.
    Failed,
    /// A newer load was issued first, so this completion was ignored.
    Superseded,
}

/// The single in-progress edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    target: UserId,
    draft: UserDetails,
}

impl EditBuffer {
    /// Record being edited.
    pub const fn target(&self) -> UserId {
        self.target
    }

    /// Draft values for the editable fields.
    pub const fn draft(&self) -> &UserDetails {
        &self.draft
    }
}

/// Display state of the users list.
#[derive(Debug, Clone, Default)]
pub struct RecordView {
    records: Vec<UserRecord>,
    bounds: PageBounds,
    edit: Option<EditBuffer>,
    error: Option<ViewError>,
    ordering: LoadOrdering,
    issued: u64,
}

impl RecordView {
    /// Empty view showing page 1 of 1.
    pub fn new(ordering: LoadOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Records on the displayed page, in service order.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Look up a displayed record.
    pub fn record(&self, id: UserId) -> Option<&UserRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Current page and page count.
    pub const fn bounds(&self) -> PageBounds {
        self.bounds
    }

    /// Page currently displayed.
    pub const fn current_page(&self) -> PageNumber {
        self.bounds.current()
    }

    /// The open edit, if any.
    pub const fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.edit.as_ref()
    }

    /// Most recent failure, if not yet cleared by a successful fetch.
    pub const fn error(&self) -> Option<ViewError> {
        self.error
    }

    /// Message for the most recent failure.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(ViewError::message)
    }

    /// Issue a ticket for loading `page`.
    pub const fn begin_load(&mut self, page: PageNumber) -> LoadTicket {
        self.issued = self.issued.saturating_add(1);
        LoadTicket {
            sequence: self.issued,
            page,
        }
    }

    /// Whether a completion for `ticket` would be ignored.
    pub const fn is_superseded(&self, ticket: LoadTicket) -> bool {
        matches!(self.ordering, LoadOrdering::LatestRequest) && ticket.sequence != self.issued
    }

    /// Replace the displayed page with a successful listing.
    pub fn apply_page(&mut self, ticket: LoadTicket, page: UsersPage) -> LoadOutcome {
        if self.is_superseded(ticket) {
            return LoadOutcome::Superseded;
        }
        self.records = page.data;
        self.bounds = PageBounds::from_service_total(ticket.page, page.total_pages);
        self.error = None;
        LoadOutcome::Loaded
    }

    /// Record a failed listing; records and page state are left alone.
    pub const fn fail_load(&mut self, ticket: LoadTicket) -> LoadOutcome {
        if self.is_superseded(ticket) {
            return LoadOutcome::Superseded;
        }
        self.error = Some(ViewError::FetchFailed);
        LoadOutcome::Failed
    }

    /// Open an edit seeded from `record`, discarding any other open edit.
    pub fn begin_edit(&mut self, record: &UserRecord) {
        self.edit = Some(EditBuffer {
            target: record.id(),
            draft: record.details().clone(),
        });
    }

    /// Change one draft field. Returns `false` when no edit is open.
    pub fn update_edit_field(&mut self, field: EditField, value: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(buffer) => {
                buffer.draft.set(field, value);
                true
            }
            None => false,
        }
    }

    /// Drop the open edit without saving.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Merge a saved draft into the matching record and close the edit.
    ///
    /// Records are matched by id; if the record is no longer displayed the
    /// list is untouched.
    pub fn apply_update(&mut self, id: UserId, draft: &UserDetails) {
        self.records
            .iter_mut()
            .filter(|record| record.id() == id)
            .for_each(|record| record.merge_details(draft));
        if self.edit.as_ref().is_some_and(|buffer| buffer.target == id) {
            self.edit = None;
        }
    }

    /// Record a failed save; the edit stays open.
    pub const fn fail_update(&mut self) {
        self.error = Some(ViewError::UpdateFailed);
    }

    /// Remove a deleted record, keeping the order of the rest.
    pub fn apply_delete(&mut self, id: UserId) {
        self.records.retain(|record| record.id() != id);
    }

    /// Record a failed delete; the list is untouched.
    pub const fn fail_delete(&mut self) {
        self.error = Some(ViewError::DeleteFailed);
    }
}
