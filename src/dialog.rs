//! The item selection dialog.

use crate::components::render_item_table;
use crate::config::{CANCEL_LABEL, DEBOUNCE_MS};
use crate::hooks::use_debounce;
use crate::item::Item;
use crate::picker::DialogState;
use crate::session::use_form_session;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Modal listing items that match the typed filter.
///
/// Mounted once per session by the provider and shown or hidden according
/// to the picker state. Typing restarts the debounce; once it settles a
/// search runs for the current input value.
#[function_component(ItemSelectDialog)]
pub fn item_select_dialog() -> Html {
    let session = use_form_session();
    let input_ref = use_node_ref();

    let (state, results, error) = match &session {
        Some(session) => {
            let picker = session.picker();
            (picker.state(), picker.results().to_vec(), picker.error().map(str::to_string))
        }
        None => (DialogState::Hidden, Vec::new(), None),
    };
    let open = state != DialogState::Hidden;

    // Focus the filter whenever the dialog opens
    {
        let input_ref = input_ref.clone();
        use_effect_with(open, move |open| {
            if *open {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    let search = {
        let session = session.clone();
        use_debounce(
            DEBOUNCE_MS,
            Callback::from(move |filter: String| {
                if let Some(session) = &session {
                    session.search(filter);
                }
            }),
        )
    };

    let oninput = Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        search.emit(input.value());
    });

    let onsubmit = Callback::from(|e: SubmitEvent| e.prevent_default());

    let on_select = {
        let session = session.clone();
        Callback::from(move |item: Item| {
            if let Some(session) = &session {
                session.choose(item);
            }
        })
    };

    let on_cancel = {
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if let Some(session) = &session {
                session.cancel();
            }
        })
    };

    let display = if open { "display: block" } else { "display: none" };

    html! {
        <div class="item-select-dialog" style={display}>
            <dialog open={true} id="item-select">
                <article>
                    <h2>{ "Items" }</h2>
                    <form {onsubmit}>
                        <fieldset>
                            <label>
                                { "Name" }
                                <input name="filter" ref={input_ref} {oninput} />
                            </label>
                        </fieldset>
                    </form>
                    <div id="item-popup-items">
                        if state == DialogState::ShowingResults {
                            if results.is_empty() {
                                <p class="no-results-message">{ "No items found" }</p>
                            } else {
                                { render_item_table(&results, &on_select) }
                            }
                        }
                    </div>
                    if let Some(err) = error {
                        <div class="input-error">{ err }</div>
                    }
                    <footer>
                        <button type="button" class="cancel-btn" onclick={on_cancel}>{ CANCEL_LABEL }</button>
                    </footer>
                </article>
            </dialog>
        </div>
    }
}
