//! Authorization-window contracts and the system-browser implementation.
//!
//! The store's permission grant happens out of band, in a transient window
//! the user completes the flow in. Opening must stay synchronous: browsers
//! only honor window-opening attributable to the task of the triggering
//! user gesture, so the picker opens the handle before the first await of
//! its entry flow even when the window turns out to be unnecessary.
//! Closure is the only completion signal; whether the grant succeeded is
//! unknown until the listing is retried.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use tokio::sync::Notify;

/// Parameters for opening an authorization window.
#[derive(Debug, Clone)]
pub struct AuthWindowConfig {
    /// Token the grant is requested for.
    pub token: String,
    /// Display name of the store, shown inside the window.
    pub store_name: String,
}

/// An open authorization window.
///
/// At most one handle exists per picker; whoever takes the handle out of
/// the picker's slot calls [`AuthWindow::close`], exactly once.
pub trait AuthWindow {
    /// Brings an already-open window to the foreground.
    ///
    /// Idempotent; repeated calls are side-effect-free.
    fn focus(&self);

    /// Resolves when the window is closed, by the user or by [`AuthWindow::close`].
    ///
    /// The future is detached from the handle borrow so the owner can
    /// force-close while a wait is pending; the pending wait then resolves.
    fn authorize(&self) -> LocalBoxFuture<'static, ()>;

    /// Force-closes the window.
    ///
    /// Safe to call whether or not the window is still open.
    fn close(&self);
}

/// Opens authorization windows.
pub trait AuthWindows {
    /// Opens a window for the given config. Synchronous by contract.
    fn open(&self, config: &AuthWindowConfig) -> Box<dyn AuthWindow>;
}

/// System-browser implementation of [`AuthWindows`].
///
/// `open` assembles the store's authorization URL and launches it in the
/// system browser. The browser cannot report tab closure, so the embedding
/// application signals it through the [`WindowClosed`] handle; a pending
/// authorize wait resolves on that signal or on a force-close.
pub struct BrowserAuthWindows {
    authorize_url: String,
    current: Rc<RefCell<Rc<Notify>>>,
}

impl BrowserAuthWindows {
    /// Creates an opener for the store's authorization endpoint.
    ///
    /// # Errors
    /// Returns an error if the URL is not well-formed.
    pub fn new(authorize_url: &str) -> Result<Self> {
        url::Url::parse(authorize_url)
            .with_context(|| format!("Invalid authorization URL: {authorize_url}"))?;
        Ok(Self {
            authorize_url: authorize_url.to_string(),
            current: Rc::new(RefCell::new(Rc::new(Notify::new()))),
        })
    }

    /// Returns the handle the embedder uses to report window closure.
    ///
    /// The handle always targets the most recently opened window.
    pub fn closed_signal(&self) -> WindowClosed {
        WindowClosed {
            current: Rc::clone(&self.current),
        }
    }

    fn build_url(&self, config: &AuthWindowConfig) -> String {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("store", &config.store_name)
            .append_pair("token", &config.token)
            .finish();
        format!("{}?{query}", self.authorize_url)
    }

    fn make_window(&self, url: String) -> BrowserAuthWindow {
        // Fresh notifier per window: a close permit from a previous window
        // must not resolve the next window's wait.
        let closed = Rc::new(Notify::new());
        *self.current.borrow_mut() = Rc::clone(&closed);
        BrowserAuthWindow { url, closed }
    }
}

impl AuthWindows for BrowserAuthWindows {
    fn open(&self, config: &AuthWindowConfig) -> Box<dyn AuthWindow> {
        let url = self.build_url(config);
        let window = self.make_window(url);
        let _ = open::that(&window.url);
        Box::new(window)
    }
}

/// Embedder-side handle reporting that the authorization window was closed.
#[derive(Clone)]
pub struct WindowClosed {
    current: Rc<RefCell<Rc<Notify>>>,
}

impl WindowClosed {
    /// Reports closure of the most recently opened window.
    pub fn notify(&self) {
        self.current.borrow().notify_one();
    }
}

struct BrowserAuthWindow {
    url: String,
    closed: Rc<Notify>,
}

impl AuthWindow for BrowserAuthWindow {
    fn focus(&self) {
        // Re-launching the same URL focuses the existing tab in mainstream
        // browsers rather than spawning a new window.
        let _ = open::that(&self.url);
    }

    fn authorize(&self) -> LocalBoxFuture<'static, ()> {
        let closed = Rc::clone(&self.closed);
        async move { closed.notified().await }.boxed_local()
    }

    fn close(&self) {
        // The system browser cannot be closed remotely; resolve any pending
        // wait so the flow can exit. notify_one stores a permit, so a close
        // that lands before the wait registers is not lost.
        self.closed.notify_one();
    }
}
