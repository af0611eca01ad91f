//! Entry flow: access check, authorization round-trip, single retry.

use tracing::{debug, warn};

use super::FilePicker;
use crate::store::ListingResult;
use crate::window::AuthWindowConfig;

impl FilePicker {
    /// Entry point of the authorization/fetch flow.
    ///
    /// Invoked on mount and by the authorizing banner's "show authorization
    /// window" action. When a window is already open the call only refocuses
    /// it, so duplicate gestures never open a second window. Otherwise the
    /// window opens before the first await (the browser only honors window
    /// opening attributable to the triggering gesture's task, even though
    /// the window turns out to be unnecessary when access is already
    /// granted), the access check runs, and on an authorization failure the
    /// flow waits for the window to close and retries the listing exactly
    /// once. A retry failure is terminal: the cancel handler is invoked and
    /// the error is logged, not surfaced.
    ///
    /// The window slot is released at a single point after the flow body,
    /// regardless of which branch exited.
    ///
    /// # Errors
    /// Propagates a first-attempt listing failure that is not an
    /// authorization failure.
    pub async fn connect(&self) -> ListingResult<()> {
        {
            let slot = self.window.borrow();
            if let Some(window) = slot.as_ref() {
                debug!("authorization window already open; refocusing");
                window.focus();
                return Ok(());
            }
        }

        let window = self.windows.open(&AuthWindowConfig {
            token: self.auth_token.clone(),
            store_name: self.store_name.clone(),
        });
        *self.window.borrow_mut() = Some(window);
        self.state.borrow_mut().check_started();

        let outcome = self.entry_flow().await;

        if let Some(window) = self.window.borrow_mut().take() {
            window.close();
        }

        outcome
    }

    async fn entry_flow(&self) -> ListingResult<()> {
        match self.fetch_files().await {
            Ok(()) => {
                self.state.borrow_mut().became_ready();
                Ok(())
            }
            Err(err) if err.is_authorization() => {
                debug!("store listing not authorized; waiting on authorization window");
                let wait = {
                    let slot = self.window.borrow();
                    match slot.as_ref() {
                        Some(window) => window.authorize(),
                        // cancel() emptied the slot while the check was in
                        // flight; nothing left to authorize with.
                        None => return Err(err),
                    }
                };
                self.state.borrow_mut().authorization_started();
                wait.await;

                self.state.borrow_mut().retry_started();
                match self.fetch_files().await {
                    Ok(()) => {
                        self.state.borrow_mut().became_ready();
                        Ok(())
                    }
                    Err(retry_err) => {
                        warn!(error = %retry_err, "listing retry after authorization failed");
                        self.state.borrow_mut().flow_failed();
                        (self.on_cancel)();
                        Ok(())
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Fetches the current path's listing and publishes the result.
    ///
    /// Used standalone on navigation and inside the entry flow. It never
    /// interprets authorization failures itself: a navigation-triggered
    /// fetch that fails with one is NOT re-authorized, it propagates (a
    /// mid-session token expiry surfaces to the caller; see DESIGN.md).
    /// Overlapping fetches are neither cancelled nor sequenced; the last
    /// one to resolve wins the published state.
    ///
    /// # Errors
    /// Propagates the listing collaborator's failure untouched.
    pub(crate) async fn fetch_files(&self) -> ListingResult<()> {
        let path = {
            let mut state = self.state.borrow_mut();
            state.fetch_started();
            state.path().to_string()
        };
        let files = self.listing.list_files(&self.auth_token, &path).await?;
        self.state.borrow_mut().fetch_resolved(files);
        Ok(())
    }
}
