//! Yew view components for the worker configuration form.
//!
//! Rows and containers only render what [`crate::rows`] describes; the item
//! selector bridges a button click to [`FormSession::select_item`].

use crate::config::{ADD_LABEL, DELETE_LABEL, SELECT_LABEL};
use crate::item::Item;
use crate::rows::{render_fields, RowAttributes, RowEntry, RowIndex, RowKind, RowList};
use crate::session::{use_form_session, FormSession};
use log::{debug, warn};
use std::rc::Rc;
use yew::prelude::*;

/// Renders the search results of the item dialog.
///
/// Each row shows the icon (linking to the item page), the display name and
/// a select control emitting that exact record.
pub fn render_item_table(items: &[Item], on_select: &Callback<Item>) -> Html {
    html! {
        <table class="item-table">
            <tbody>
                { items.iter().map(|item| render_item_row(item, on_select)).collect::<Html>() }
            </tbody>
        </table>
    }
}

/// Emits `item` on `on_select` each time it fires.
fn choose_item(item: &Item, on_select: &Callback<Item>) -> Callback<()> {
    let item = item.clone();
    on_select.reform(move |_| item.clone())
}

fn render_item_row(item: &Item, on_select: &Callback<Item>) -> Html {
    let onclick = choose_item(item, on_select).reform(|e: MouseEvent| e.prevent_default());

    html! {
        <tr key={item.uid.clone()}>
            <td>{ render_item_icon(item) }</td>
            <td>{ item.display_name.clone() }</td>
            <td><button type="button" class="select-btn" {onclick}>{ SELECT_LABEL }</button></td>
        </tr>
    }
}

fn render_item_icon(item: &Item) -> Html {
    html! {
        <a href={item.page_href()}>
            <img class="item-icon" src={item.icon_data_uri()} alt={item.display_name.clone()} />
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct ItemSelectorProps {
    /// Name of the hidden field carrying the chosen uid. No field when unset.
    #[prop_or_default]
    pub name: Option<AttrValue>,
    #[prop_or_default]
    pub on_select: Callback<Item>,
    /// Item shown before anything was picked, e.g. from a saved config.
    #[prop_or_default]
    pub initial: Option<Item>,
}

/// Button that opens the item dialog and shows the chosen item.
#[function_component(ItemSelector)]
pub fn item_selector(props: &ItemSelectorProps) -> Html {
    let session = use_form_session();
    let selected = use_state(|| props.initial.clone());

    let onclick = {
        let selected = selected.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let Some(session) = session.clone() else {
                warn!("item selector rendered outside of a form session");
                return;
            };
            let selected = selected.clone();
            let on_select = on_select.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match session.select_item().await {
                    Ok(item) => {
                        on_select.emit(item.clone());
                        selected.set(Some(item));
                    }
                    Err(e) => debug!("{}", e),
                }
            });
        })
    };

    html! {
        <span class="item-selector">
            if let Some(item) = &*selected {
                { render_item_icon(item) }
                if let Some(name) = &props.name {
                    <input type="hidden" name={name.clone()} value={item.uid.clone()} />
                }
            }
            <button type="button" {onclick}>{ SELECT_LABEL }</button>
        </span>
    }
}

#[derive(Properties, PartialEq)]
pub struct WorkerRowProps {
    pub kind: RowKind,
    pub idx: RowIndex,
    pub attrs: RowAttributes,
    pub on_remove: Callback<RowIndex>,
}

/// One exporter or importer row: a fieldset of named inputs and a delete control.
#[function_component(WorkerRow)]
pub fn worker_row(props: &WorkerRowProps) -> Html {
    // Set when the item selector picked something for this row.
    let chosen_item = use_state(|| None::<String>);

    let on_delete = {
        let idx = props.idx;
        props.on_remove.reform(move |e: MouseEvent| {
            e.prevent_default();
            idx
        })
    };

    let on_item = {
        let chosen_item = chosen_item.clone();
        Callback::from(move |item: Item| chosen_item.set(Some(item.uid)))
    };

    let fields = render_fields(props.kind, &props.attrs, props.idx);

    html! {
        <div class={format!("{}-config", props.kind)}>
            <fieldset class="grid">
                { for fields.into_iter().map(|f| {
                    let is_item = f.field == "item";
                    let value = match (&*chosen_item, is_item) {
                        (Some(uid), true) => uid.clone(),
                        _ => f.value,
                    };
                    html! {
                        <label>
                            { f.title }
                            <input type="text" class={f.class} name={f.name} {value} />
                            if is_item {
                                <ItemSelector on_select={on_item.clone()} />
                            }
                        </label>
                    }
                }) }
                <button type="button" class="delete-worker" onclick={on_delete}>{ DELETE_LABEL }</button>
            </fieldset>
        </div>
    }
}

pub enum RowAction {
    Append(RowEntry),
    Remove(RowIndex),
}

impl Reducible for RowList {
    type Action = RowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            RowAction::Append(entry) => next.append(entry),
            RowAction::Remove(idx) => {
                if !next.remove(idx) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct WorkerConfigsProps {
    pub kind: RowKind,
    /// Rows the container starts with.
    #[prop_or_default]
    pub seeds: Rc<Vec<RowAttributes>>,
}

/// Container of rows of one kind with an "add" control.
#[function_component(WorkerConfigs)]
pub fn worker_configs(props: &WorkerConfigsProps) -> Html {
    let session = use_form_session();
    let rows = {
        let session = session.clone();
        let seeds = props.seeds.clone();
        use_reducer(move || match session {
            Some(session) => RowList::seeded(session.rows(), seeds.iter().cloned()),
            None => RowList::default(),
        })
    };

    let on_remove = {
        let dispatcher = rows.dispatcher();
        use_callback((), move |idx: RowIndex, _| dispatcher.dispatch(RowAction::Remove(idx)))
    };

    let on_add = {
        let dispatcher = rows.dispatcher();
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(session) = &session {
                add_row(session, &dispatcher);
            }
        })
    };

    if session.is_none() {
        warn!("worker rows rendered outside of a form session");
        return html! {};
    }

    let kind = props.kind;
    html! {
        <div class={format!("{}-configs", kind)}>
            { for rows.rows().iter().map(|r| html! {
                <WorkerRow
                    key={r.idx}
                    {kind}
                    idx={r.idx}
                    attrs={r.attrs.clone()}
                    on_remove={on_remove.clone()}
                />
            }) }
            <button type="button" class="add-worker" onclick={on_add}>{ ADD_LABEL }</button>
        </div>
    }
}

fn add_row(session: &FormSession, dispatcher: &UseReducerDispatcher<RowList>) {
    let idx = session.rows().next_index();
    debug!("adding row {}", idx);
    dispatcher.dispatch(RowAction::Append(RowEntry {
        idx,
        attrs: RowAttributes::new(),
    }));
}
