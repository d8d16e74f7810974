//! Access token stored in a local file.
//!
//! The login flow writes the token; this adapter only reads it, once, when
//! the console starts. File access goes through `cap_std` so the adapter
//! holds authority over the token's parent directory only.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::SessionGuard;

/// Errors raised while reading the token file.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// The path has no file name component.
    #[error("token path '{path}' does not name a file")]
    InvalidPath {
        /// Offending path.
        path: PathBuf,
    },
    /// The file exists but could not be read.
    #[error("failed to read token file '{path}': {source}")]
    Read {
        /// Token file location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

/// Opaque access token; wiped from memory on drop.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a token value, trimming surrounding whitespace. Blank values
    /// are not tokens.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Zeroizing::new(trimmed.to_owned())))
        }
    }

    /// Token value.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Read the token stored at `path`.
///
/// A missing file or parent directory means no token.
///
/// # Errors
///
/// Returns [`SessionStoreError`] when the path is unusable or the file
/// exists but cannot be read.
pub fn read_token(path: &Path) -> Result<Option<AccessToken>, SessionStoreError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SessionStoreError::InvalidPath {
            path: path.to_path_buf(),
        })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let read = Dir::open_ambient_dir(parent, ambient_authority())
        .and_then(|directory| directory.read_to_string(Path::new(file_name)));
    match read {
        Ok(contents) => Ok(AccessToken::new(Zeroizing::new(contents).as_str())),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no token file");
            Ok(None)
        }
        Err(source) => Err(SessionStoreError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Session guard backed by a token read at construction.
#[derive(Debug, Clone)]
pub struct StoredTokenSession {
    token: Option<AccessToken>,
}

impl StoredTokenSession {
    /// Read the token file once.
    ///
    /// # Errors
    ///
    /// Propagates [`read_token`] failures other than a missing file.
    pub fn load(path: &Path) -> Result<Self, SessionStoreError> {
        read_token(path).map(Self::from_token)
    }

    /// Wrap an already-read token.
    pub const fn from_token(token: Option<AccessToken>) -> Self {
        Self { token }
    }

    /// The stored token, if any.
    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }
}

impl SessionGuard for StoredTokenSession {
    fn has_valid_session(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn write(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("token");
        std::fs::write(&path, contents).expect("write token");
        path
    }

    #[rstest]
    #[case("QpwL5tke4Pnpja7X4", Some("QpwL5tke4Pnpja7X4"))]
    #[case("  QpwL5tke4Pnpja7X4\n", Some("QpwL5tke4Pnpja7X4"))]
    #[case("", None)]
    #[case(" \n\t", None)]
    fn reads_trimmed_token(#[case] contents: &str, #[case] expected: Option<&str>) {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, contents);

        let token = read_token(&path).expect("read succeeds");
        assert_eq!(token.as_ref().map(AccessToken::expose), expected);
    }

    #[test]
    fn missing_file_means_no_session() {
        let dir = TempDir::new().expect("temp dir");
        let session = StoredTokenSession::load(&dir.path().join("absent")).expect("load");
        assert!(!session.has_valid_session());
    }

    #[test]
    fn missing_parent_directory_means_no_session() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("token");
        let session = StoredTokenSession::load(&path).expect("load");
        assert!(!session.has_valid_session());
    }

    #[test]
    fn present_token_is_a_session() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "abc123");
        let session = StoredTokenSession::load(&path).expect("load");
        assert!(session.has_valid_session());
        assert_eq!(session.token().map(AccessToken::expose), Some("abc123"));
    }

    #[test]
    fn directory_path_is_a_read_error() {
        let dir = TempDir::new().expect("temp dir");
        std::fs::create_dir(dir.path().join("token")).expect("create dir");
        let result = read_token(&dir.path().join("token"));
        assert!(matches!(result, Err(SessionStoreError::Read { .. })));
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let token = AccessToken::new("secret").expect("token");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
    }
}
