//! State of the item-picker dialog, independent of rendering.
//!
//! The dialog holds at most one outstanding selection request. Opening a new
//! one settles the previous request with [`SelectionError::Superseded`].
//! Searches carry sequence numbers so that only the response to the most
//! recently issued search is ever applied.

use crate::api::ApiError;
use crate::item::Item;
use futures::channel::oneshot;
use log::{debug, warn};
use std::fmt;
use std::future::Future;

/// Why a selection request ended without an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// The user pressed cancel.
    Cancelled,
    /// A newer selection request took over the dialog.
    Superseded,
    /// The dialog went away before answering.
    DialogClosed,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::Cancelled => write!(f, "Item selection was cancelled"),
            SelectionError::Superseded => {
                write!(f, "Item selection was replaced by a newer request")
            }
            SelectionError::DialogClosed => write!(f, "Item dialog closed without an answer"),
        }
    }
}

impl std::error::Error for SelectionError {}

pub type SelectionResult = Result<Item, SelectionError>;

/// Single-shot answer to one selection request.
pub fn selection_future(
    rx: oneshot::Receiver<SelectionResult>,
) -> impl Future<Output = SelectionResult> {
    async move { rx.await.unwrap_or(Err(SelectionError::DialogClosed)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    Hidden,
    AwaitingInput,
    ShowingResults,
}

/// A search that has been issued but not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub filter: String,
}

/// Hands out increasing sequence numbers and remembers the latest one.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: u64,
}

impl SearchSequencer {
    pub fn issue(&mut self, filter: impl Into<String>) -> SearchTicket {
        self.latest += 1;
        SearchTicket { seq: self.latest, filter: filter.into() }
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Quiet-period bookkeeping for a debounced input.
///
/// Every [`push`](Debouncer::push) starts a new generation; a timer armed for
/// an older generation gets nothing back from [`fire`](Debouncer::fire).
#[derive(Debug)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self { generation: 0, pending: None }
    }
}

impl<T> Debouncer<T> {
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }
}

/// Everything the dialog shows, plus the outstanding request.
#[derive(Debug)]
pub struct Picker {
    state: DialogState,
    pending: Option<oneshot::Sender<SelectionResult>>,
    searches: SearchSequencer,
    results: Vec<Item>,
    // A search has been answered at least once, even if with no items.
    searched: bool,
    error: Option<String>,
}

impl Default for Picker {
    fn default() -> Self {
        Self {
            state: DialogState::Hidden,
            pending: None,
            searches: SearchSequencer::default(),
            results: Vec::new(),
            searched: false,
            error: None,
        }
    }
}

impl Picker {
    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Hidden
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn results(&self) -> &[Item] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the dialog for a new request and return where its answer lands.
    pub fn open(&mut self) -> oneshot::Receiver<SelectionResult> {
        if let Some(previous) = self.pending.take() {
            debug!("superseding pending item selection");
            let _ = previous.send(Err(SelectionError::Superseded));
        }
        let (tx, rx) = oneshot::channel();
        self.pending = Some(tx);
        if self.state == DialogState::Hidden {
            self.state = if self.searched {
                DialogState::ShowingResults
            } else {
                DialogState::AwaitingInput
            };
        }
        rx
    }

    /// Answer the pending request with `item` and hide the dialog.
    pub fn select(&mut self, item: Item) -> bool {
        self.state = DialogState::Hidden;
        match self.pending.take() {
            Some(tx) => tx.send(Ok(item)).is_ok(),
            None => false,
        }
    }

    /// Reject the pending request and hide the dialog.
    pub fn cancel(&mut self) -> bool {
        self.state = DialogState::Hidden;
        match self.pending.take() {
            Some(tx) => tx.send(Err(SelectionError::Cancelled)).is_ok(),
            None => false,
        }
    }

    pub fn begin_search(&mut self, filter: impl Into<String>) -> SearchTicket {
        self.searches.issue(filter)
    }

    /// Apply the outcome of `ticket`. Returns `false` when it was stale.
    pub fn finish_search(&mut self, ticket: &SearchTicket, outcome: Result<Vec<Item>, ApiError>) -> bool {
        if !self.searches.is_latest(ticket.seq) {
            debug!("dropping stale results for {:?} (seq {})", ticket.filter, ticket.seq);
            return false;
        }
        match outcome {
            Ok(items) => {
                self.results = items;
                self.searched = true;
                self.error = None;
                if self.is_open() {
                    self.state = DialogState::ShowingResults;
                }
            }
            Err(e) => {
                warn!("item search for {:?} failed: {}", ticket.filter, e);
                self.error = Some(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn item(uid: &str, name: &str) -> Item {
        Item {
            uid: uid.into(),
            id: String::new(),
            display_name: name.into(),
            nbt: None,
            meta: None,
            icon: "AAAA".into(),
        }
    }

    #[test]
    fn select_resolves_with_exact_record() {
        let mut picker = Picker::default();
        let rx = picker.open();
        assert_eq!(picker.state(), DialogState::AwaitingInput);
        assert!(picker.has_pending());

        let ticket = picker.begin_search("Apple");
        assert!(picker.finish_search(&ticket, Ok(vec![item("a1", "Apple")])));
        assert_eq!(picker.state(), DialogState::ShowingResults);
        assert_eq!(picker.results().len(), 1);

        let chosen = picker.results()[0].clone();
        assert!(picker.select(chosen.clone()));
        assert!(!picker.has_pending());
        assert_eq!(picker.state(), DialogState::Hidden);
        assert_eq!(block_on(selection_future(rx)), Ok(chosen));
    }

    #[test]
    fn cancel_rejects_and_next_request_is_independent() {
        let mut picker = Picker::default();
        let first = picker.open();
        assert!(picker.cancel());
        assert!(!picker.is_open());
        assert_eq!(block_on(selection_future(first)), Err(SelectionError::Cancelled));

        let second = picker.open();
        assert!(picker.is_open());
        assert!(picker.select(item("b2", "Stone")));
        assert_eq!(block_on(selection_future(second)).map(|i| i.uid), Ok("b2".into()));
    }

    #[test]
    fn new_request_supersedes_pending_one() {
        let mut picker = Picker::default();
        let first = picker.open();
        let second = picker.open();
        assert_eq!(block_on(selection_future(first)), Err(SelectionError::Superseded));
        picker.select(item("a1", "Apple"));
        assert!(block_on(selection_future(second)).is_ok());
    }

    #[test]
    fn dropped_picker_closes_request() {
        let mut picker = Picker::default();
        let rx = picker.open();
        drop(picker);
        assert_eq!(block_on(selection_future(rx)), Err(SelectionError::DialogClosed));
    }

    #[test]
    fn cancel_without_request_only_hides() {
        let mut picker = Picker::default();
        assert!(!picker.cancel());
        assert_eq!(picker.state(), DialogState::Hidden);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut picker = Picker::default();
        let _rx = picker.open();
        let slow = picker.begin_search("a");
        let fast = picker.begin_search("app");

        assert!(picker.finish_search(&fast, Ok(vec![item("a1", "Apple")])));
        assert!(!picker.finish_search(&slow, Ok(vec![item("x", "Axe"), item("y", "Anvil")])));
        assert_eq!(picker.results(), &[item("a1", "Apple")]);
    }

    #[test]
    fn failed_search_keeps_previous_results() {
        let mut picker = Picker::default();
        let _rx = picker.open();
        let ok = picker.begin_search("app");
        picker.finish_search(&ok, Ok(vec![item("a1", "Apple")]));

        let broken = picker.begin_search("appl");
        assert!(picker.finish_search(&broken, Err(ApiError::Status(500))));
        assert!(picker.is_open());
        assert_eq!(picker.results().len(), 1);
        assert!(picker.error().is_some());

        let again = picker.begin_search("apple");
        picker.finish_search(&again, Ok(vec![]));
        assert_eq!(picker.error(), None);
    }

    #[test]
    fn reopening_keeps_last_results() {
        let mut picker = Picker::default();
        let _first = picker.open();
        let t = picker.begin_search("app");
        picker.finish_search(&t, Ok(vec![item("a1", "Apple")]));
        picker.cancel();
        let _second = picker.open();
        assert_eq!(picker.state(), DialogState::ShowingResults);
    }

    #[test]
    fn reopening_after_empty_results_still_shows_them() {
        let mut picker = Picker::default();
        let _first = picker.open();
        let t = picker.begin_search("zzz");
        picker.finish_search(&t, Ok(vec![]));
        assert_eq!(picker.state(), DialogState::ShowingResults);
        picker.cancel();

        let _second = picker.open();
        assert_eq!(picker.state(), DialogState::ShowingResults);
        assert!(picker.results().is_empty());
    }

    #[test]
    fn failed_first_search_keeps_awaiting_input_on_reopen() {
        let mut picker = Picker::default();
        let _first = picker.open();
        let t = picker.begin_search("a");
        picker.finish_search(&t, Err(ApiError::Network("offline".into())));
        picker.cancel();
        let _second = picker.open();
        assert_eq!(picker.state(), DialogState::AwaitingInput);
    }

    #[test]
    fn rapid_keystrokes_fire_once_with_final_value() {
        let mut debounce = Debouncer::default();
        let timers: Vec<u64> = ["a", "ap", "app"].into_iter().map(|v| debounce.push(v)).collect();

        let fired: Vec<_> = timers.into_iter().filter_map(|g| debounce.fire(g)).collect();
        assert_eq!(fired, ["app"]);
    }

    #[test]
    fn debouncer_fires_each_quiet_period() {
        let mut debounce = Debouncer::default();
        let g1 = debounce.push("a".to_string());
        assert_eq!(debounce.fire(g1).as_deref(), Some("a"));
        assert_eq!(debounce.fire(g1), None);
        let g2 = debounce.push("ab".to_string());
        assert_eq!(debounce.fire(g2).as_deref(), Some("ab"));
    }
}
