//! Content-store contracts and data model.
//!
//! A store is the remote system holding the user's files (an LMS, in the
//! usual deployment). The picker consumes it through the [`FileListing`]
//! contract; [`http::HttpStore`] is the HTTP-backed implementation.

use std::fmt;

use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod http;

pub use http::HttpStore;

/// Kind of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry in a store directory listing.
///
/// Supplied wholesale by the listing collaborator; the picker never mutates
/// individual entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Display name, also the path segment used when descending.
    pub name: String,
    /// Entry kind, named `type` on the wire.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FileEntry {
    /// Creates a leaf-file entry.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// Creates a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Returns true if the entry can be descended into.
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Error categories for listing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingErrorKind {
    /// The token is absent, expired, or not yet granted access to the store.
    /// The only kind the picker's entry flow handles specially.
    Authorization,
    /// HTTP status error (4xx, 5xx) other than an authorization failure.
    HttpStatus,
    /// Connection timeout or request timeout.
    Timeout,
    /// Failed to parse the listing response.
    Parse,
}

impl fmt::Display for ListingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingErrorKind::Authorization => write!(f, "authorization"),
            ListingErrorKind::HttpStatus => write!(f, "http_status"),
            ListingErrorKind::Timeout => write!(f, "timeout"),
            ListingErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from a listing call with kind and details.
#[derive(Debug, Clone)]
pub struct ListingError {
    /// Error category
    pub kind: ListingErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ListingError {
    /// Creates a new listing error.
    pub fn new(kind: ListingErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Attaches raw details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Creates an authorization failure.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Authorization, message)
    }

    /// Creates an HTTP status error.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            // Try to extract a cleaner error message from JSON
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(error_obj) = json.get("error")
                && let Some(msg) = error_obj.get("message").and_then(|v| v.as_str())
            {
                return Self {
                    kind: ListingErrorKind::HttpStatus,
                    message: format!("HTTP {status}: {msg}"),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: ListingErrorKind::HttpStatus,
            message,
            details,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Timeout, message)
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ListingErrorKind::Parse, message)
    }

    /// Returns true for the kind that engages the authorize-and-retry path.
    pub fn is_authorization(&self) -> bool {
        self.kind == ListingErrorKind::Authorization
    }
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ListingError {}

/// Result type for listing operations.
pub type ListingResult<T> = std::result::Result<T, ListingError>;

/// Listing contract the picker consumes.
///
/// Futures are locally boxed: the picker runs on a single-threaded
/// cooperative schedule and collaborators are not required to be `Send`.
pub trait FileListing {
    /// Lists the entries of `path` in the store reachable with `token`.
    ///
    /// Must fail with [`ListingErrorKind::Authorization`] when the token
    /// lacks access; no other kind is specially interpreted by the picker.
    fn list_files(
        &self,
        token: &str,
        path: &str,
    ) -> LocalBoxFuture<'_, ListingResult<Vec<FileEntry>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: wire shape uses `type` with lowercase values.
    #[test]
    fn test_file_entry_wire_shape() {
        let entry = FileEntry::file("notes.pdf");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"notes.pdf","type":"file"}"#);

        let parsed: FileEntry =
            serde_json::from_str(r#"{"name":"Reports","type":"directory"}"#).unwrap();
        assert_eq!(parsed, FileEntry::directory("Reports"));
        assert!(parsed.is_directory());
    }

    /// Test: HTTP status errors extract a JSON `error.message` when present.
    #[test]
    fn test_http_status_extracts_error_message() {
        let err = ListingError::http_status(500, r#"{"error":{"message":"store exploded"}}"#);
        assert_eq!(err.kind, ListingErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 500: store exploded");
        assert!(err.details.is_some());
    }

    /// Test: non-JSON bodies become details verbatim.
    #[test]
    fn test_http_status_plain_body() {
        let err = ListingError::http_status(502, "bad gateway");
        assert_eq!(err.message, "HTTP 502");
        assert_eq!(err.details.as_deref(), Some("bad gateway"));

        let empty = ListingError::http_status(500, "");
        assert!(empty.details.is_none());
    }

    /// Test: only the Authorization kind engages the retry path.
    #[test]
    fn test_is_authorization() {
        assert!(ListingError::authorization("no grant").is_authorization());
        assert!(!ListingError::timeout("slow").is_authorization());
        assert!(!ListingError::http_status(500, "").is_authorization());
        assert!(!ListingError::parse("bad json").is_authorization());
    }
}
