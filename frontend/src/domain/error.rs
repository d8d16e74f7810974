//! Operator-facing failure messages.
//!
//! Remote failures are never surfaced with their cause. Each kind of call
//! maps to one fixed sentence, and only the most recent one is kept.

use std::fmt;

/// The kind of remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewError {
    /// Listing a page failed.
    FetchFailed,
    /// Saving an edit failed.
    UpdateFailed,
    /// Deleting a record failed.
    DeleteFailed,
}

impl ViewError {
    /// Fixed human-readable message for this failure.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ViewError;
    ///
    /// assert_eq!(
    ///     ViewError::FetchFailed.message(),
    ///     "Failed to fetch users. Please try again later."
    /// );
    /// ```
    pub const fn message(self) -> &'static str {
        match self {
            Self::FetchFailed => "Failed to fetch users. Please try again later.",
            Self::UpdateFailed => "Failed to update user. Please try again later.",
            Self::DeleteFailed => "Failed to delete user. Please try again later.",
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ViewError {}
