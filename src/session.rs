//! Session context shared by every widget on the page.
//!
//! Holds the row index counter and the picker behind a single `Rc`, and
//! mounts the item dialog the first time an item is requested.

use crate::api::suggest_items;
use crate::dialog::ItemSelectDialog;
use crate::item::Item;
use crate::picker::{selection_future, Picker, SelectionResult};
use crate::rows::RowIndexCounter;
use log::info;
use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Default)]
struct SessionState {
    rows: RowIndexCounter,
    picker: RefCell<Picker>,
    dialog_created: Cell<bool>,
    version: Cell<usize>,
}

/// Handle to the session, handed out through a Yew context.
///
/// Two handles compare equal only if they point at the same session and were
/// taken at the same version, so consumers re-render after every change.
#[derive(Clone)]
pub struct FormSession {
    state: Rc<SessionState>,
    version: usize,
    refresh: Callback<()>,
}

impl PartialEq for FormSession {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state) && self.version == other.version
    }
}

impl FormSession {
    fn new(state: Rc<SessionState>, refresh: Callback<()>) -> Self {
        let version = state.version.get();
        Self { state, version, refresh }
    }

    pub fn rows(&self) -> &RowIndexCounter {
        &self.state.rows
    }

    pub fn dialog_created(&self) -> bool {
        self.state.dialog_created.get()
    }

    pub fn picker(&self) -> Ref<'_, Picker> {
        self.state.picker.borrow()
    }

    /// Ask the user for an item. Creates the dialog on first use.
    pub fn select_item(&self) -> impl Future<Output = SelectionResult> {
        if !self.state.dialog_created.replace(true) {
            info!("creating item selection dialog");
        }
        let rx = self.state.picker.borrow_mut().open();
        self.notify();
        selection_future(rx)
    }

    pub fn choose(&self, item: Item) {
        self.state.picker.borrow_mut().select(item);
        self.notify();
    }

    pub fn cancel(&self) {
        self.state.picker.borrow_mut().cancel();
        self.notify();
    }

    /// Run a search and apply its results if no newer search was issued meanwhile.
    pub fn search(&self, filter: String) {
        let ticket = self.state.picker.borrow_mut().begin_search(filter);
        let session = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = suggest_items(&ticket.filter).await;
            let applied = session.state.picker.borrow_mut().finish_search(&ticket, outcome);
            if applied {
                session.notify();
            }
        });
    }

    fn notify(&self) {
        self.state.version.set(self.state.version.get().wrapping_add(1));
        self.refresh.emit(());
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Html,
}

/// Provides a [`FormSession`] to its children and hosts the item dialog.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_memo((), |_| SessionState::default());
    let force_update = use_force_update();
    let refresh = Callback::from(move |_: ()| force_update.force_update());
    let session = FormSession::new(state, refresh);

    html! {
        <ContextProvider<FormSession> context={session.clone()}>
            { props.children.clone() }
            if session.dialog_created() {
                <ItemSelectDialog />
            }
        </ContextProvider<FormSession>>
    }
}

/// Current session. Widgets must be rendered inside a [`SessionProvider`].
#[hook]
pub fn use_form_session() -> Option<FormSession> {
    use_context::<FormSession>()
}
