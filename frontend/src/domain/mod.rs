//! Domain primitives, view state, and the record manager.
//!
//! Purpose: keep the paginated users list consistent with the remote
//! service. Local state changes only after a remote call succeeds, and every
//! remote failure is reduced to one of the fixed [`ViewError`] messages.
//!
//! Public surface:
//! - [`UserRecord`], [`UserId`], [`UserDetails`], [`EditField`]: record model.
//! - [`RecordView`]: synchronous display state and reconciliation rules.
//! - [`RecordManager`]: drives the ports and updates the view.
//! - [`ports`]: the users service and session boundaries.

pub mod error;
pub mod ports;
pub mod record_manager;
pub mod record_view;
pub mod user;

pub use self::error::ViewError;
pub use self::record_manager::{CommitOutcome, DeleteOutcome, MountOutcome, RecordManager};
pub use self::record_view::{EditBuffer, LoadOrdering, LoadOutcome, LoadTicket, RecordView};
pub use self::user::{
    EditField, EditFieldParseError, UserDetails, UserId, UserIdParseError, UserRecord,
};
