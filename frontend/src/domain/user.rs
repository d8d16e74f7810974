//! User record model.
//!
//! Records are owned by the remote service; the console only keeps the copy
//! for the page currently on screen. Nothing here validates names or email
//! addresses: the service is the only authority on what it accepts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Identifier assigned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw service identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier as used in request paths.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Raised when a user id cannot be parsed from operator input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("user id must be a non-negative integer, got '{value}'")]
pub struct UserIdParseError {
    value: String,
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .trim_start_matches('#')
            .parse::<u64>()
            .map(Self)
            .map_err(|_| UserIdParseError {
                value: raw.to_owned(),
            })
    }
}

/// The editable part of a user record.
///
/// This doubles as the body of an update call, so field names match the
/// service's wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email; accepted verbatim.
    pub email: String,
}

impl UserDetails {
    /// Build details from owned or borrowed strings.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        let slot = match field {
            EditField::FirstName => &mut self.first_name,
            EditField::LastName => &mut self.last_name,
            EditField::Email => &mut self.email,
        };
        *slot = value.into();
    }

    /// Read one field.
    pub fn get(&self, field: EditField) -> &str {
        match field {
            EditField::FirstName => self.first_name.as_str(),
            EditField::LastName => self.last_name.as_str(),
            EditField::Email => self.email.as_str(),
        }
    }
}

/// Fields an operator may change while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    /// `first_name`
    FirstName,
    /// `last_name`
    LastName,
    /// `email`
    Email,
}

impl EditField {
    /// Every editable field in form order.
    pub const ALL: [Self; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Wire name of the field.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }

    /// Placeholder label shown next to the field in the edit form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Raised when an edit field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{value}'; expected first_name, last_name, or email")]
pub struct EditFieldParseError {
    value: String,
}

impl FromStr for EditField {
    type Err = EditFieldParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "first_name" | "first" => Ok(Self::FirstName),
            "last_name" | "last" => Ok(Self::LastName),
            "email" => Ok(Self::Email),
            _ => Err(EditFieldParseError {
                value: raw.to_owned(),
            }),
        }
    }
}

/// One user as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    details: UserDetails,
    avatar: Url,
}

impl UserRecord {
    /// Build a record from its parts.
    pub const fn new(id: UserId, details: UserDetails, avatar: Url) -> Self {
        Self {
            id,
            details,
            avatar,
        }
    }

    /// Service identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Editable fields.
    pub const fn details(&self) -> &UserDetails {
        &self.details
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        self.details.first_name.as_str()
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        self.details.last_name.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        self.details.email.as_str()
    }

    /// Avatar image location.
    pub const fn avatar(&self) -> &Url {
        &self.avatar
    }

    /// `first last`, as shown on the record card.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.details.first_name, self.details.last_name)
    }

    /// Overwrite the editable fields; identifier and avatar are kept.
    pub fn merge_details(&mut self, details: &UserDetails) {
        self.details.clone_from(details);
    }
}
