//! Driving port for the login boundary.
//!
//! Logging in happens elsewhere. The record manager only asks whether a
//! session exists when it mounts, and the answer is injected at
//! construction so tests never touch shared storage.

/// Answers whether an operator session is present.
#[cfg_attr(test, mockall::automock)]
pub trait SessionGuard: Send + Sync {
    /// Return `true` when a previously stored access token is available.
    fn has_valid_session(&self) -> bool;
}

/// Session guard with a fixed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSession {
    signed_in: bool,
}

impl FixtureSession {
    /// A guard that always reports a session.
    pub const fn signed_in() -> Self {
        Self { signed_in: true }
    }

    /// A guard that never reports a session.
    pub const fn signed_out() -> Self {
        Self { signed_in: false }
    }
}

impl SessionGuard for FixtureSession {
    fn has_valid_session(&self) -> bool {
        self.signed_in
    }
}
