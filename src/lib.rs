//! Browser widgets for editing exporter and importer worker rows.
//!
//! Rows are rendered as plain named inputs so that a regular form submission
//! carries them; [`form`] decodes such submissions back into typed configs.
//! The item picker is a session-wide dialog that answers one
//! [`session::FormSession::select_item`] request at a time.

pub mod api;
pub mod components;
pub mod config;
pub mod dialog;
pub mod form;
pub mod hooks;
pub mod item;
pub mod picker;
pub mod rows;
pub mod session;

pub use item::Item;
pub use picker::SelectionError;
pub use rows::RowKind;
