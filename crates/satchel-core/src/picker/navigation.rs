//! Directory navigation and selection.

use super::FilePicker;
use crate::store::{EntryKind, FileEntry, ListingResult};

/// Joins a directory path and an entry name.
///
/// Concatenation is literal: root is the empty string, so a top-level entry
/// gets a leading slash, and no separator normalization is applied.
fn join_path(dir: &str, name: &str) -> String {
    format!("{dir}/{name}")
}

impl FilePicker {
    /// Replaces the current path and refreshes the listing.
    ///
    /// Setting the path to its current value is a no-op: the path comparison
    /// is the sole re-fetch trigger, so each distinct consecutive value
    /// causes exactly one listing call.
    ///
    /// # Errors
    /// Propagates the listing failure, including authorization failures;
    /// navigation does not re-enter the authorization flow.
    pub async fn change_path(&self, new_path: &str) -> ListingResult<()> {
        if self.state.borrow().path() == new_path {
            return Ok(());
        }
        self.state.borrow_mut().set_path(new_path.to_string());
        self.fetch_files().await
    }

    /// Handles a pick: descends into directories, completes on leaf files.
    ///
    /// A leaf-file pick invokes the owner's select handler with the full
    /// path and is terminal; the picker does not fetch again.
    ///
    /// # Errors
    /// Propagates the listing failure of a directory descent.
    pub async fn select_entry(&self, entry: &FileEntry) -> ListingResult<()> {
        let full_path = join_path(self.state.borrow().path(), &entry.name);
        match entry.kind {
            EntryKind::Directory => self.change_path(&full_path).await,
            EntryKind::File => {
                (self.on_select_file)(full_path);
                Ok(())
            }
        }
    }

    /// Dismisses the picker.
    ///
    /// Force-closes the authorization window if one is open (a pending
    /// authorize wait resolves rather than aborts), then notifies the
    /// owner.
    pub fn cancel(&self) {
        if let Some(window) = self.window.borrow_mut().take() {
            window.close();
        }
        (self.on_cancel)();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: joining is literal concatenation from the empty root.
    #[test]
    fn test_join_path_from_root() {
        assert_eq!(join_path("", "2024"), "/2024");
    }

    /// Test: descent appends one slash-joined segment.
    #[test]
    fn test_join_path_descent() {
        assert_eq!(join_path("/2024", "Reports"), "/2024/Reports");
    }

    /// Test: no separator normalization is applied.
    #[test]
    fn test_join_path_is_not_normalized() {
        assert_eq!(join_path("/2024/", "Reports"), "/2024//Reports");
    }
}
