//! File-picker orchestration.
//!
//! [`FilePicker`] is the core of the dialog: it sequences the authorization
//! handshake against listing calls and directory navigation, owns the
//! single authorization-window slot, and exposes the view-shell surface as
//! [`PickerSnapshot`] values. The view shell renders those and forwards
//! navigation, selection and cancel gestures back into the picker.

mod navigation;
mod orchestrator;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

pub use state::{PickerPhase, PickerState};

use crate::store::{FileEntry, FileListing};
use crate::window::{AuthWindow, AuthWindows};

/// Handler invoked when the picker dismisses itself or is cancelled.
pub type CancelHandler = Box<dyn Fn()>;

/// Handler invoked with the full path of a picked leaf file.
pub type SelectHandler = Box<dyn Fn(String)>;

/// Construction parameters for [`FilePicker`].
pub struct PickerConfig {
    /// Token presented to the store on every listing call.
    pub auth_token: String,
    /// Display name of the store, used in the dialog title.
    pub store_name: String,
    /// Invoked when the picker is dismissed; the owner closes the dialog.
    pub on_cancel: CancelHandler,
    /// Invoked with the picked file's full path. Terminal.
    pub on_select_file: SelectHandler,
}

/// Orchestrates authorization and listing for one picker dialog.
///
/// Single-threaded by design: state lives behind `RefCell` and collaborator
/// futures are locally boxed. Borrows are never held across an await.
pub struct FilePicker {
    listing: Rc<dyn FileListing>,
    windows: Rc<dyn AuthWindows>,
    auth_token: String,
    store_name: String,
    on_cancel: CancelHandler,
    on_select_file: SelectHandler,
    state: RefCell<PickerState>,
    window: RefCell<Option<Box<dyn AuthWindow>>>,
}

impl FilePicker {
    /// Creates a picker over the given store and window collaborators.
    pub fn new(
        config: PickerConfig,
        listing: Rc<dyn FileListing>,
        windows: Rc<dyn AuthWindows>,
    ) -> Self {
        Self {
            listing,
            windows,
            auth_token: config.auth_token,
            store_name: config.store_name,
            on_cancel: config.on_cancel,
            on_select_file: config.on_select_file,
            state: RefCell::new(PickerState::new()),
            window: RefCell::new(None),
        }
    }

    /// Render-ready view of the current state for the view shell.
    pub fn snapshot(&self) -> PickerSnapshot {
        let state = self.state.borrow();
        let title = if state.is_authorizing() {
            "Authorizing".to_string()
        } else {
            format!("Select file from {}", self.store_name)
        };
        PickerSnapshot {
            title,
            path: state.path().to_string(),
            files: state.files().to_vec(),
            is_loading: state.is_loading(),
            is_authorizing: state.is_authorizing(),
        }
    }
}

/// Snapshot of the picker surface: dialog title, breadcrumb path, file
/// rows, and the two progress flags the shell renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSnapshot {
    pub title: String,
    pub path: String,
    pub files: Vec<FileEntry>,
    pub is_loading: bool,
    pub is_authorizing: bool,
}
