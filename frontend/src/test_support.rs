//! Test utilities for the users console crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::{PageEnvelope, PageNumber};
use url::Url;

use crate::domain::ports::{UsersGateway, UsersGatewayError, UsersPage};
use crate::domain::{UserDetails, UserId, UserRecord};

/// Build a user with a demo-service style email and avatar.
pub fn user_record(id: u64, first_name: &str, last_name: &str) -> UserRecord {
    let email = format!(
        "{}.{}@reqres.in",
        first_name.to_ascii_lowercase(),
        last_name.to_ascii_lowercase()
    );
    let avatar = Url::parse(&format!("https://reqres.in/img/faces/{id}-image.jpg"))
        .expect("avatar template is a valid URL");
    UserRecord::new(
        UserId::new(id),
        UserDetails::new(first_name, last_name, email),
        avatar,
    )
}

/// A call observed by [`RecordingUsersGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// `list_users(page)`.
    ListUsers(PageNumber),
    /// `update_user(id, details)`.
    UpdateUser(UserId, UserDetails),
    /// `delete_user(id)`.
    DeleteUser(UserId),
}

type PageResponse = Result<UsersPage, UsersGatewayError>;

/// Users gateway double that records calls and returns configured
/// responses.
///
/// Pages without a configured response answer with a 404 status error.
/// Updates and deletes succeed unless configured otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingUsersGateway {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    pages: Arc<Mutex<BTreeMap<u32, PageResponse>>>,
    update_response: Arc<Mutex<Option<UsersGatewayError>>>,
    delete_response: Arc<Mutex<Option<UsersGatewayError>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordingUsersGateway {
    /// Create a double with no pages configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `records` for `page`, reporting `total_pages`.
    pub fn set_page(&self, page: PageNumber, records: Vec<UserRecord>, total_pages: u32) {
        self.set_page_response(page, Ok(PageEnvelope::new(records, total_pages)));
    }

    /// Configure the raw response for `page`.
    pub fn set_page_response(&self, page: PageNumber, response: PageResponse) {
        lock(&self.pages).insert(page.get(), response);
    }

    /// Make subsequent updates fail with `error`, or succeed with `None`.
    pub fn set_update_error(&self, error: Option<UsersGatewayError>) {
        *lock(&self.update_response) = error;
    }

    /// Make subsequent deletes fail with `error`, or succeed with `None`.
    pub fn set_delete_error(&self, error: Option<UsersGatewayError>) {
        *lock(&self.delete_response) = error;
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<GatewayCall> {
        lock(&self.calls).clone()
    }

    /// Pages requested so far, in order.
    pub fn listed_pages(&self) -> Vec<PageNumber> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GatewayCall::ListUsers(page) => Some(page),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GatewayCall) {
        lock(&self.calls).push(call);
    }
}

#[async_trait]
impl UsersGateway for RecordingUsersGateway {
    async fn list_users(&self, page: PageNumber) -> Result<UsersPage, UsersGatewayError> {
        self.record(GatewayCall::ListUsers(page));
        lock(&self.pages)
            .get(&page.get())
            .cloned()
            .unwrap_or_else(|| Err(UsersGatewayError::status(404_u16, "page not configured")))
    }

    async fn update_user(
        &self,
        id: UserId,
        details: &UserDetails,
    ) -> Result<(), UsersGatewayError> {
        self.record(GatewayCall::UpdateUser(id, details.clone()));
        lock(&self.update_response).clone().map_or(Ok(()), Err)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UsersGatewayError> {
        self.record(GatewayCall::DeleteUser(id));
        lock(&self.delete_response).clone().map_or(Ok(()), Err)
    }
}

/// Token file inside a temporary directory, removed on drop.
#[derive(Debug)]
pub struct TokenFile {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl TokenFile {
    /// Create a directory holding a token file with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory or file cannot be created.
    pub fn with_contents(contents: &str) -> std::io::Result<Self> {
        let token = Self::missing()?;
        let directory = cap_std::fs::Dir::open_ambient_dir(
            token.dir.path(),
            cap_std::ambient_authority(),
        )?;
        directory.write(Path::new(TOKEN_FILE_NAME), contents.as_bytes())?;
        Ok(token)
    }

    /// Create a directory whose token file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn missing() -> std::io::Result<Self> {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join(TOKEN_FILE_NAME);
        Ok(Self { dir, path })
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

const TOKEN_FILE_NAME: &str = "token";
