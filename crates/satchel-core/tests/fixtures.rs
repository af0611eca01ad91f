//! Scripted collaborators and harness for picker integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures_util::FutureExt;
use futures_util::future::LocalBoxFuture;
use satchel_core::picker::{FilePicker, PickerConfig};
use satchel_core::store::{FileEntry, FileListing, ListingError, ListingResult};
use satchel_core::window::{AuthWindow, AuthWindowConfig, AuthWindows};
use tokio::sync::Notify;

pub const TOKEN: &str = "tok-123";
pub const STORE_NAME: &str = "Course Files";

/// Scripted listing collaborator: pops one scripted result per call and
/// records every (token, path) pair. An exhausted script lists empty.
#[derive(Default)]
pub struct ScriptedStore {
    results: RefCell<VecDeque<ListingResult<Vec<FileEntry>>>>,
    calls: RefCell<Vec<(String, String)>>,
}

impl ScriptedStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn push_ok(&self, files: Vec<FileEntry>) {
        self.results.borrow_mut().push_back(Ok(files));
    }

    pub fn push_err(&self, err: ListingError) {
        self.results.borrow_mut().push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, p)| p.clone()).collect()
    }
}

impl FileListing for ScriptedStore {
    fn list_files(
        &self,
        token: &str,
        path: &str,
    ) -> LocalBoxFuture<'_, ListingResult<Vec<FileEntry>>> {
        self.calls
            .borrow_mut()
            .push((token.to_string(), path.to_string()));
        let result = self
            .results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));
        async move { result }.boxed_local()
    }
}

/// Counters shared between a test and the windows it opens.
#[derive(Default)]
pub struct WindowLog {
    pub opened: Cell<usize>,
    pub focused: Cell<usize>,
    pub authorize_waits: Cell<usize>,
    pub closed: Cell<usize>,
    pub last_config: RefCell<Option<(String, String)>>,
}

/// Scripted window collaborator.
///
/// In auto-close mode the authorize wait resolves immediately, as if the
/// user completed the grant the instant the window appeared. In manual
/// mode it resolves on [`ScriptedWindows::signal_closed`] or on a
/// force-close.
pub struct ScriptedWindows {
    pub log: Rc<WindowLog>,
    auto_close: bool,
    closed: Rc<Notify>,
}

impl ScriptedWindows {
    pub fn auto_close() -> Rc<Self> {
        Rc::new(Self {
            log: Rc::default(),
            auto_close: true,
            closed: Rc::new(Notify::new()),
        })
    }

    pub fn manual() -> Rc<Self> {
        Rc::new(Self {
            log: Rc::default(),
            auto_close: false,
            closed: Rc::new(Notify::new()),
        })
    }

    /// Reports window closure, resolving a pending authorize wait.
    pub fn signal_closed(&self) {
        self.closed.notify_one();
    }
}

impl AuthWindows for ScriptedWindows {
    fn open(&self, config: &AuthWindowConfig) -> Box<dyn AuthWindow> {
        self.log.opened.set(self.log.opened.get() + 1);
        *self.log.last_config.borrow_mut() =
            Some((config.token.clone(), config.store_name.clone()));
        Box::new(ScriptedWindow {
            log: Rc::clone(&self.log),
            auto_close: self.auto_close,
            closed: Rc::clone(&self.closed),
        })
    }
}

struct ScriptedWindow {
    log: Rc<WindowLog>,
    auto_close: bool,
    closed: Rc<Notify>,
}

impl AuthWindow for ScriptedWindow {
    fn focus(&self) {
        self.log.focused.set(self.log.focused.get() + 1);
    }

    fn authorize(&self) -> LocalBoxFuture<'static, ()> {
        self.log
            .authorize_waits
            .set(self.log.authorize_waits.get() + 1);
        if self.auto_close {
            async {}.boxed_local()
        } else {
            let closed = Rc::clone(&self.closed);
            async move { closed.notified().await }.boxed_local()
        }
    }

    fn close(&self) {
        self.log.closed.set(self.log.closed.get() + 1);
        self.closed.notify_one();
    }
}

/// Everything a picker flow test needs, wired together.
pub struct Harness {
    pub store: Rc<ScriptedStore>,
    pub windows: Rc<ScriptedWindows>,
    pub cancels: Rc<Cell<usize>>,
    pub selections: Rc<RefCell<Vec<String>>>,
    pub picker: Rc<FilePicker>,
}

pub fn harness(windows: Rc<ScriptedWindows>) -> Harness {
    let store = ScriptedStore::new();
    let cancels = Rc::new(Cell::new(0));
    let selections = Rc::new(RefCell::new(Vec::new()));

    let listing: Rc<dyn FileListing> = store.clone();
    let openers: Rc<dyn AuthWindows> = windows.clone();
    let picker = Rc::new(FilePicker::new(
        PickerConfig {
            auth_token: TOKEN.to_string(),
            store_name: STORE_NAME.to_string(),
            on_cancel: {
                let cancels = Rc::clone(&cancels);
                Box::new(move || cancels.set(cancels.get() + 1))
            },
            on_select_file: {
                let selections = Rc::clone(&selections);
                Box::new(move |path| selections.borrow_mut().push(path))
            },
        },
        listing,
        openers,
    ));

    Harness {
        store,
        windows,
        cancels,
        selections,
        picker,
    }
}

/// Yields to the local scheduler a few times so a spawned flow can reach
/// its next suspension point.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: the scripted store pops results in push order and records calls.
    #[tokio::test]
    async fn test_scripted_store_pops_in_order() {
        let store = ScriptedStore::new();
        store.push_ok(vec![FileEntry::file("a.txt")]);
        store.push_err(ListingError::timeout("slow"));

        assert_eq!(
            store.list_files("tok", "/x").await.unwrap(),
            vec![FileEntry::file("a.txt")]
        );
        assert!(store.list_files("tok", "/y").await.is_err());
        // Exhausted scripts list empty.
        assert!(store.list_files("tok", "/z").await.unwrap().is_empty());

        assert_eq!(store.paths(), ["/x", "/y", "/z"]);
    }
}
