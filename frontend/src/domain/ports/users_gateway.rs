//! Driven port for the remote users service.
//!
//! The record manager only needs three capabilities from the service: list a
//! page, replace a user's editable fields, and delete a user. Keeping them
//! behind this trait lets the manager run against an in-memory directory in
//! tests and in offline mode.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{PageEnvelope, PageNumber};
use url::Url;

use super::define_port_error;
use crate::domain::{UserDetails, UserId, UserRecord};

/// One page of users as reported by the service.
pub type UsersPage = PageEnvelope<UserRecord>;

define_port_error! {
    /// Errors surfaced while calling the users service.
    pub enum UsersGatewayError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "users service transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "users service timed out: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "users service returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "users service response decode failed: {message}",
    }
}

/// Port for the remote users CRUD service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersGateway: Send + Sync {
    /// Fetch one page of users.
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, UsersGatewayError>;

    /// Replace the editable fields of one user.
    async fn update_user(&self, id: UserId, details: &UserDetails)
    -> Result<(), UsersGatewayError>;

    /// Delete one user.
    async fn delete_user(&self, id: UserId) -> Result<(), UsersGatewayError>;
}

const FIXTURE_PER_PAGE: usize = 6;
const FIXTURE_USERS: [(u64, &str, &str); 12] = [
    (1, "George", "Bluth"),
    (2, "Janet", "Weaver"),
    (3, "Emma", "Wong"),
    (4, "Eve", "Holt"),
    (5, "Charles", "Morris"),
    (6, "Tracey", "Ramos"),
    (7, "Michael", "Lawson"),
    (8, "Lindsay", "Ferguson"),
    (9, "Tobias", "Funke"),
    (10, "Byron", "Fields"),
    (11, "George", "Edwards"),
    (12, "Rachel", "Howell"),
];

/// In-memory users directory mirroring the public demo dataset.
///
/// Updates and deletes mutate the directory, so a re-fetch reflects them.
/// Unknown ids are accepted silently, as the demo service does.
#[derive(Debug)]
pub struct FixtureUsersGateway {
    users: Mutex<Vec<UserRecord>>,
    per_page: usize,
}

impl FixtureUsersGateway {
    /// Build a directory seeded with twelve users, six per page.
    pub fn new() -> Self {
        let users = FIXTURE_USERS
            .iter()
            .filter_map(|(id, first, last)| fixture_user(*id, first, last))
            .collect();
        Self::with_users(users, FIXTURE_PER_PAGE)
    }

    /// Build a directory from explicit records.
    pub fn with_users(users: Vec<UserRecord>, per_page: usize) -> Self {
        Self {
            users: Mutex::new(users),
            per_page: per_page.max(1),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<UserRecord>>, UsersGatewayError> {
        self.users
            .lock()
            .map_err(|_| UsersGatewayError::transport("fixture directory lock poisoned"))
    }
}

impl Default for FixtureUsersGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn fixture_user(id: u64, first: &str, last: &str) -> Option<UserRecord> {
    let avatar = Url::parse(&format!("https://reqres.in/img/faces/{id}-image.jpg")).ok()?;
    let email = format!(
        "{}.{}@reqres.in",
        first.to_ascii_lowercase(),
        last.to_ascii_lowercase()
    );
    Some(UserRecord::new(
        UserId::new(id),
        UserDetails::new(first, last, email),
        avatar,
    ))
}

#[async_trait]
impl UsersGateway for FixtureUsersGateway {
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, UsersGatewayError> {
        let users = self.lock()?;
        let total = users.len();
        let total_pages = total.div_ceil(self.per_page);
        let start = usize::try_from(page.get() - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(self.per_page);
        let data = users
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect();
        let mut envelope =
            PageEnvelope::new(data, u32::try_from(total_pages).unwrap_or(u32::MAX));
        envelope.page = Some(page.get());
        envelope.per_page = u32::try_from(self.per_page).ok();
        envelope.total = u32::try_from(total).ok();
        Ok(envelope)
    }

    async fn update_user(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<(), UsersGatewayError> {
        let mut users = self.lock()?;
        users
            .iter_mut()
            .filter(|user| user.id() == id)
            .for_each(|user| user.merge_details(details));
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UsersGatewayError> {
        self.lock()?.retain(|user| user.id() != id);
        Ok(())
    }
}
