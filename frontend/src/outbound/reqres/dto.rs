//! DTOs for decoding users service JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records in one pass.

use pagination::PageEnvelope;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::UsersPage;
use crate::domain::{UserDetails, UserId, UserRecord};

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) first_name: String,
    #[serde(default)]
    pub(super) last_name: String,
    #[serde(default)]
    pub(super) email: String,
    pub(super) avatar: String,
}

impl UserDto {
    fn into_domain_record(self) -> Result<UserRecord, String> {
        let avatar = Url::parse(&self.avatar)
            .map_err(|error| format!("user {} has an invalid avatar URL: {error}", self.id))?;
        Ok(UserRecord::new(
            UserId::new(self.id),
            UserDetails::new(self.first_name, self.last_name, self.email),
            avatar,
        ))
    }
}

pub(super) fn into_domain_page(envelope: PageEnvelope<UserDto>) -> Result<UsersPage, String> {
    envelope.try_map(UserDto::into_domain_record)
}
