//! Repeated exporter/importer configuration rows.
//!
//! A row is described by its [`RowKind`] (which fields it carries), the
//! attributes it was seeded with, and the index allocated for it by the
//! session's [`RowIndexCounter`]. Every generated input is named
//! `<field>_<index>` so a single form submission keeps rows apart.

use crate::config::{DEFAULT_EXPORT_AMOUNT, FIRST_ROW_INDEX};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Attribute values a row is seeded with, keyed by field name.
pub type RowAttributes = BTreeMap<String, String>;

/// Index suffixed to every field name of a row.
pub type RowIndex = u64;

/// One recognized field of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub default: Option<&'static str>,
}

pub const EXPORTER_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "storage", title: "Storage for exports", default: None },
    FieldSpec { name: "item", title: "Item", default: None },
    FieldSpec { name: "slot", title: "Slot", default: None },
    FieldSpec { name: "amount", title: "Amount", default: Some(DEFAULT_EXPORT_AMOUNT) },
];

pub const IMPORTER_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "storage", title: "Storage for import", default: None },
    FieldSpec { name: "slot", title: "Slot", default: None },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Exporter,
    Importer,
}

impl RowKind {
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RowKind::Exporter => EXPORTER_FIELDS,
            RowKind::Importer => IMPORTER_FIELDS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RowKind::Exporter => "exporter",
            RowKind::Importer => "importer",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRowKind(pub String);

impl fmt::Display for UnknownRowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown worker type: {:?}", self.0)
    }
}

impl std::error::Error for UnknownRowKind {}

impl FromStr for RowKind {
    type Err = UnknownRowKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "exporter" => Ok(RowKind::Exporter),
            "importer" => Ok(RowKind::Importer),
            other => Err(UnknownRowKind(other.to_string())),
        }
    }
}

/// Session-wide source of row indices. Never reset, never reused.
#[derive(Debug)]
pub struct RowIndexCounter {
    next: Cell<RowIndex>,
}

impl Default for RowIndexCounter {
    fn default() -> Self {
        Self { next: Cell::new(FIRST_ROW_INDEX) }
    }
}

impl RowIndexCounter {
    pub fn next_index(&self) -> RowIndex {
        let idx = self.next.get();
        self.next.set(idx + 1);
        idx
    }
}

/// Form field name of `field` in the row with index `idx`.
pub fn field_name(field: &str, idx: RowIndex) -> String {
    format!("{}_{}", field, idx)
}

/// A labelled text input ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub field: &'static str,
    pub title: &'static str,
    pub class: String,
    pub name: String,
    pub value: String,
}

/// Describe the inputs of a `kind` row with index `idx`.
///
/// An attribute that is missing or empty falls back to the field's default,
/// and then to an empty string.
pub fn render_fields(kind: RowKind, attrs: &RowAttributes, idx: RowIndex) -> Vec<FieldInput> {
    kind.fields()
        .iter()
        .map(|spec| {
            let value = attrs
                .get(spec.name)
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .or(spec.default)
                .unwrap_or_default();
            FieldInput {
                field: spec.name,
                title: spec.title,
                class: format!("field-{}", spec.name),
                name: field_name(spec.name, idx),
                value: value.to_string(),
            }
        })
        .collect()
}

/// A row as held by its container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub idx: RowIndex,
    pub attrs: RowAttributes,
}

/// Ordered rows of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowList {
    rows: Vec<RowEntry>,
}

impl RowList {
    /// Build a list from saved rows, allocating an index for each.
    pub fn seeded<I>(counter: &RowIndexCounter, seeds: I) -> Self
    where
        I: IntoIterator<Item = RowAttributes>,
    {
        let mut list = Self::default();
        for attrs in seeds {
            list.push(counter, attrs);
        }
        list
    }

    /// Append a row and return its freshly allocated index.
    pub fn push(&mut self, counter: &RowIndexCounter, attrs: RowAttributes) -> RowIndex {
        let idx = counter.next_index();
        self.append(RowEntry { idx, attrs });
        idx
    }

    /// Append a row whose index was allocated elsewhere.
    pub fn append(&mut self, entry: RowEntry) {
        self.rows.push(entry);
    }

    /// Remove the row with index `idx`. Returns `false` if no such row exists.
    pub fn remove(&mut self, idx: RowIndex) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.idx != idx);
        self.rows.len() != before
    }

    pub fn rows(&self) -> &[RowEntry] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
