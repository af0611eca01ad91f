//! Picker state machine.
//!
//! The flow position is a tagged [`PickerPhase`] mutated only through named
//! transitions; the authorizing and loading flags the view shell renders
//! from are derived, not independently mutable. Their overlaps are
//! intentional states: `Retrying` reports authorizing AND loading, and
//! `Failed` keeps reporting authorizing until the owner closes the dialog.

use crate::store::FileEntry;

/// Phase of the authorization/fetch flow.
///
/// There is no resting phase between an authorization-kind listing failure
/// and the authorize wait (no suspension point separates them), so the flow
/// moves straight from `CheckingAccess` to `Authorizing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPhase {
    /// No entry attempt has started.
    Idle,
    /// First listing attempt in flight.
    CheckingAccess,
    /// Waiting for the authorization window to close.
    Authorizing,
    /// Post-authorization listing retry in flight.
    Retrying,
    /// Listing succeeded; entries are browsable.
    Ready,
    /// The post-authorization retry failed; the dialog is closing.
    Failed,
}

/// Picker state, owned by the picker and mutated only by its transitions.
#[derive(Debug)]
pub struct PickerState {
    phase: PickerPhase,
    loading: bool,
    path: String,
    files: Vec<FileEntry>,
}

impl PickerState {
    /// Creates the initial state: idle, at the store root (empty path).
    pub fn new() -> Self {
        Self {
            phase: PickerPhase::Idle,
            loading: false,
            path: String::new(),
            files: Vec::new(),
        }
    }

    /// Current flow phase.
    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    /// Current directory path; root is the empty string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Entries of the most recently resolved listing.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// True from the moment the authorize wait starts.
    ///
    /// Stays true in `Failed`: after a failed retry the dialog keeps its
    /// "Authorizing" title right up until the owner closes it.
    pub fn is_authorizing(&self) -> bool {
        matches!(
            self.phase,
            PickerPhase::Authorizing | PickerPhase::Retrying | PickerPhase::Failed
        )
    }

    /// True while a listing call is in flight.
    ///
    /// A listing call that errors leaves this set; only a successful
    /// resolution clears it.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn check_started(&mut self) {
        self.phase = PickerPhase::CheckingAccess;
    }

    pub(crate) fn authorization_started(&mut self) {
        self.phase = PickerPhase::Authorizing;
    }

    pub(crate) fn retry_started(&mut self) {
        self.phase = PickerPhase::Retrying;
    }

    pub(crate) fn became_ready(&mut self) {
        self.phase = PickerPhase::Ready;
    }

    pub(crate) fn flow_failed(&mut self) {
        self.phase = PickerPhase::Failed;
    }

    pub(crate) fn fetch_started(&mut self) {
        self.loading = true;
    }

    pub(crate) fn fetch_resolved(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.loading = false;
    }

    pub(crate) fn set_path(&mut self, path: String) {
        self.path = path;
    }
}

impl Default for PickerState {
    fn default() -> Self {
        Self::new()
    }
}
