//! Session adapters backed by durable local storage.

mod token_file;

pub use token_file::{AccessToken, SessionStoreError, StoredTokenSession, read_token};
