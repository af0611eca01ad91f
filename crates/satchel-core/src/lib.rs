//! Core satchel library (picker orchestration, store and window contracts).
//!
//! Satchel lets an application offer "pick a file from your LMS": browsing a
//! third-party content store whose listing API only works after an
//! out-of-band, popup-window authorization step. The [`picker::FilePicker`]
//! sequences that authorization handshake against the listing calls and the
//! user's directory navigation; the store and the authorization window are
//! collaborators consumed through the [`store::FileListing`] and
//! [`window::AuthWindows`] contracts.

pub mod picker;
pub mod store;
pub mod window;

pub use picker::{FilePicker, PickerConfig, PickerPhase, PickerSnapshot, PickerState};
pub use store::{
    EntryKind, FileEntry, FileListing, ListingError, ListingErrorKind, ListingResult,
};
pub use window::{AuthWindow, AuthWindowConfig, AuthWindows};
