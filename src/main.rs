//! Entry point for the worker form.
//! Reads the host page, then mounts the rows inside a form session.

use log::{error, info, warn};
use std::rc::Rc;
use web_sys::Document;
use workers_form::{
    components::WorkerConfigs,
    config::{MOUNT_ID, SAVED_CONFIG_ID, WORKER_TYPE_ATTR},
    form::{parse_saved_config, SavedWorkerConfig},
    rows::RowAttributes,
    session::SessionProvider,
    RowKind,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
struct AppProps {
    kind: RowKind,
    seeds: Rc<Vec<RowAttributes>>,
}

/// App wrapper providing the form session to the rows.
#[function_component]
fn App(props: &AppProps) -> Html {
    html! {
        <SessionProvider>
            <WorkerConfigs kind={props.kind} seeds={props.seeds.clone()} />
        </SessionProvider>
    }
}

/// Saved configuration embedded in the page, if any.
fn load_saved_config(document: &Document) -> SavedWorkerConfig {
    let Some(json) = document
        .get_element_by_id(SAVED_CONFIG_ID)
        .and_then(|el| el.text_content())
    else {
        return SavedWorkerConfig::default();
    };

    parse_saved_config(&json).unwrap_or_else(|e| {
        warn!("ignoring malformed saved worker config: {}", e);
        SavedWorkerConfig::default()
    })
}

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let document = gloo_utils::document();
    let Some(root) = document.get_element_by_id(MOUNT_ID) else {
        error!("no #{} element to mount the worker form on", MOUNT_ID);
        return;
    };

    let kind = match root.get_attribute(WORKER_TYPE_ATTR).unwrap_or_default().parse::<RowKind>() {
        Ok(kind) => kind,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    let seeds = load_saved_config(&document).seed_rows(kind);
    info!("mounting {} form with {} saved rows", kind, seeds.len());

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            kind,
            seeds: Rc::new(seeds),
        },
    )
    .render();
}
