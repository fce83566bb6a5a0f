//! Editor session handle hook.
//!
//! The [`tapmap_core::EditorSession`] is the single source of truth;
//! components share it through an `Rc<RefCell<..>>` and re-render off
//! a version counter bumped on every structural change.

use std::cell::RefCell;
use std::rc::Rc;

use tapmap_core::{EditorSession, import_document};
use yew::prelude::*;

/// Monotonic change counter for the shared session.
#[derive(Default)]
struct SessionVersion(u32);

impl Reducible for SessionVersion {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Shared session plus the callbacks the shell wires to the toolbar
/// and keyboard shortcuts.
#[derive(Clone)]
pub struct MenuStateHandle {
    pub session: Rc<RefCell<EditorSession>>,
    pub version: u32,
    /// Bumps the version; emitted after any session mutation.
    pub on_change: Callback<()>,
    /// Imports a JSON document, leaving the session untouched on
    /// failure.
    pub on_import: Callback<String>,
    pub on_toggle_grid: Callback<()>,
    pub on_toggle_snap: Callback<()>,
    pub on_reset_view: Callback<()>,
    pub on_delete_selected: Callback<()>,
}

/// Hook owning the editor session for the lifetime of the page.
#[hook]
pub fn use_menu_state() -> MenuStateHandle {
    let session = use_mut_ref(EditorSession::default);
    let version = use_reducer(SessionVersion::default);

    let on_change = {
        let version = version.clone();
        Callback::from(move |()| version.dispatch(()))
    };

    let on_import = {
        let session = session.clone();
        let on_change = on_change.clone();
        Callback::from(move |text: String| {
            match import_document(&mut session.borrow_mut(), &text) {
                Ok(()) => on_change.emit(()),
                Err(err) => {
                    tracing::warn!("import rejected: {err}");
                    let _ = web_sys::window()
                        .and_then(|w| w.alert_with_message(&format!("Import failed: {err}")).ok());
                }
            }
        })
    };

    let on_toggle_grid = {
        let session = session.clone();
        let on_change = on_change.clone();
        Callback::from(move |()| {
            session.borrow_mut().toggle_grid();
            on_change.emit(());
        })
    };

    let on_toggle_snap = {
        let session = session.clone();
        let on_change = on_change.clone();
        Callback::from(move |()| {
            session.borrow_mut().toggle_snap();
            on_change.emit(());
        })
    };

    let on_reset_view = {
        let session = session.clone();
        let on_change = on_change.clone();
        Callback::from(move |()| {
            session.borrow_mut().reset_view();
            on_change.emit(());
        })
    };

    let on_delete_selected = {
        let session = session.clone();
        let on_change = on_change.clone();
        Callback::from(move |()| {
            if session.borrow_mut().delete_selected().is_some() {
                on_change.emit(());
            }
        })
    };

    MenuStateHandle {
        session: session.clone(),
        version: version.0,
        on_change,
        on_import,
        on_toggle_grid,
        on_toggle_snap,
        on_reset_view,
        on_delete_selected,
    }
}
