//! Decoding of submitted worker forms and of saved worker configurations.
//!
//! Submitted rows arrive as flat `<field>_<index>` pairs; they are grouped
//! back into rows here and validated into the typed configs the server
//! stores as JSON.

use crate::rows::{render_fields, RowAttributes, RowIndex, RowKind, RowList};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

static ROW_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z]+)_(\d+)$").unwrap());

/// Errors raised while validating submitted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidNumber {
        field: &'static str,
        row: RowIndex,
        value: String,
    },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidNumber { field, row, value } => write!(
                f,
                "Row {}: {} must be a whole number, got {:?}",
                row, field, value
            ),
        }
    }
}

impl std::error::Error for FormError {}

/// Split `storage_12` into `("storage", 12)`.
pub fn split_field_name(key: &str) -> Option<(&str, RowIndex)> {
    let captures = ROW_FIELD_REGEX.captures(key)?;
    let field = captures.get(1)?.as_str();
    let row = captures.get(2)?.as_str().parse().ok()?;
    Some((field, row))
}

/// Group pairs by row index, keeping only `fields`. First value per key wins.
fn group_rows<I, K, V>(pairs: I, fields: &[&'static str]) -> BTreeMap<RowIndex, BTreeMap<&'static str, String>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rows: BTreeMap<RowIndex, BTreeMap<&'static str, String>> = BTreeMap::new();
    for (key, value) in pairs {
        let Some((field, row)) = split_field_name(key.as_ref()) else {
            continue;
        };
        let Some(&field) = fields.iter().find(|f| **f == field) else {
            continue;
        };
        rows.entry(row)
            .or_default()
            .entry(field)
            .or_insert_with(|| value.as_ref().to_string());
    }
    rows
}

/// One submitted exporter row, still as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRowParams {
    pub row: RowIndex,
    pub storage: String,
    pub item: String,
    pub slot: String,
    pub amount: String,
}

/// One submitted importer row, still as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRowParams {
    pub row: RowIndex,
    pub storage: String,
    pub slot: String,
}

/// Decode exporter rows, ordered by row index.
pub fn parse_export_rows<I, K, V>(pairs: I) -> Vec<ExportRowParams>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    group_rows(pairs, &["storage", "item", "slot", "amount"])
        .into_iter()
        .map(|(row, mut fields)| ExportRowParams {
            row,
            storage: fields.remove("storage").unwrap_or_default(),
            item: fields.remove("item").unwrap_or_default(),
            slot: fields.remove("slot").unwrap_or_default(),
            amount: fields.remove("amount").unwrap_or_default(),
        })
        .collect()
}

/// Decode importer rows, ordered by row index.
pub fn parse_import_rows<I, K, V>(pairs: I) -> Vec<ImportRowParams>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    group_rows(pairs, &["storage", "slot"])
        .into_iter()
        .map(|(row, mut fields)| ImportRowParams {
            row,
            storage: fields.remove("storage").unwrap_or_default(),
            slot: fields.remove("slot").unwrap_or_default(),
        })
        .collect()
}

fn parse_number(field: &'static str, row: RowIndex, value: &str) -> Result<i32, FormError> {
    value.trim().parse().map_err(|_| FormError::InvalidNumber {
        field,
        row,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleExportConfig {
    pub storage: String,
    pub item: String,
    pub slot: i32,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleImportConfig {
    pub storage: String,
    pub slot: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExporterWorkerConfig {
    #[serde(default)]
    pub exports: Vec<SingleExportConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterWorkerConfig {
    #[serde(default)]
    pub imports: Vec<SingleImportConfig>,
}

/// Stored worker configuration. Sections for other worker types are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWorkerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exporter: Option<ExporterWorkerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer: Option<ImporterWorkerConfig>,
}

impl ExportRowParams {
    pub fn validate(&self) -> Result<SingleExportConfig, FormError> {
        Ok(SingleExportConfig {
            storage: self.storage.clone(),
            item: self.item.clone(),
            slot: parse_number("slot", self.row, &self.slot)?,
            amount: parse_number("amount", self.row, &self.amount)?,
        })
    }
}

impl ImportRowParams {
    pub fn validate(&self) -> Result<SingleImportConfig, FormError> {
        Ok(SingleImportConfig {
            storage: self.storage.clone(),
            slot: parse_number("slot", self.row, &self.slot)?,
        })
    }
}

impl ExporterWorkerConfig {
    pub fn from_rows(rows: &[ExportRowParams]) -> Result<Self, FormError> {
        let exports = rows.iter().map(ExportRowParams::validate).collect::<Result<_, _>>()?;
        Ok(Self { exports })
    }
}

impl ImporterWorkerConfig {
    pub fn from_rows(rows: &[ImportRowParams]) -> Result<Self, FormError> {
        let imports = rows.iter().map(ImportRowParams::validate).collect::<Result<_, _>>()?;
        Ok(Self { imports })
    }
}

impl SingleExportConfig {
    pub fn to_attributes(&self) -> RowAttributes {
        RowAttributes::from([
            ("storage".to_string(), self.storage.clone()),
            ("item".to_string(), self.item.clone()),
            ("slot".to_string(), self.slot.to_string()),
            ("amount".to_string(), self.amount.to_string()),
        ])
    }
}

impl SingleImportConfig {
    pub fn to_attributes(&self) -> RowAttributes {
        RowAttributes::from([
            ("storage".to_string(), self.storage.clone()),
            ("slot".to_string(), self.slot.to_string()),
        ])
    }
}

impl SavedWorkerConfig {
    /// Attributes of the rows a `kind` form should start with.
    pub fn seed_rows(&self, kind: RowKind) -> Vec<RowAttributes> {
        match kind {
            RowKind::Exporter => self
                .exporter
                .iter()
                .flat_map(|c| c.exports.iter().map(SingleExportConfig::to_attributes))
                .collect(),
            RowKind::Importer => self
                .importer
                .iter()
                .flat_map(|c| c.imports.iter().map(SingleImportConfig::to_attributes))
                .collect(),
        }
    }
}

pub fn parse_saved_config(json: &str) -> Result<SavedWorkerConfig, serde_json::Error> {
    serde_json::from_str(json)
}

/// The `(name, value)` pairs a form holding `rows` would submit.
pub fn encode_rows(kind: RowKind, rows: &RowList) -> Vec<(String, String)> {
    rows.rows()
        .iter()
        .flat_map(|r| render_fields(kind, &r.attrs, r.idx))
        .map(|f| (f.name, f.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::RowIndexCounter;

    #[test]
    fn splits_field_names() {
        assert_eq!(split_field_name("storage_12"), Some(("storage", 12)));
        assert_eq!(split_field_name("key"), None);
        assert_eq!(split_field_name("storage_x"), None);
        assert_eq!(split_field_name("a_b_1"), None);
    }

    #[test]
    fn groups_export_rows_in_numeric_order() {
        let pairs = [
            ("key", "exp-1"),
            ("type", "exporter"),
            ("storage_10", "chest_b"),
            ("slot_10", "2"),
            ("storage_2", "chest_a"),
            ("amount_2", "32"),
            ("item_2", "minecraft:coal"),
            ("color_2", "red"),
        ];
        let rows = parse_export_rows(pairs);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 2);
        assert_eq!(rows[0].storage, "chest_a");
        assert_eq!(rows[0].item, "minecraft:coal");
        assert_eq!(rows[0].slot, "");
        assert_eq!(rows[1].row, 10);
        assert_eq!(rows[1].slot, "2");
    }

    #[test]
    fn rows_with_only_unknown_fields_are_skipped() {
        let rows = parse_export_rows([("color_2", "red"), ("storage_3", "chest")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, 3);
    }

    #[test]
    fn first_value_wins() {
        let rows = parse_import_rows([("slot_1", "4"), ("slot_1", "5")]);
        assert_eq!(rows[0].slot, "4");
    }

    #[test]
    fn validation_names_the_bad_field() {
        let rows = parse_export_rows([("slot_3", "1"), ("amount_3", "lots")]);
        let err = ExporterWorkerConfig::from_rows(&rows).unwrap_err();
        assert_eq!(
            err,
            FormError::InvalidNumber { field: "amount", row: 3, value: "lots".into() }
        );
        assert!(err.to_string().contains("Row 3"));
    }

    #[test]
    fn rendered_rows_decode_back() {
        let counter = RowIndexCounter::default();
        let saved = parse_saved_config(
            r#"{"exporter":{"exports":[
                {"storage":"chest_a","item":"coal","slot":1,"amount":16},
                {"storage":"chest_b","item":"iron","slot":2,"amount":64}
            ]},"processingCrafter":null}"#,
        )
        .unwrap();
        let list = RowList::seeded(&counter, saved.seed_rows(RowKind::Exporter));
        let pairs = encode_rows(RowKind::Exporter, &list);
        let config = ExporterWorkerConfig::from_rows(&parse_export_rows(pairs)).unwrap();
        assert_eq!(Some(config), saved.exporter);
    }

    #[test]
    fn importer_seed_is_empty_for_exporter_config() {
        let saved = parse_saved_config(r#"{"exporter":{"exports":[]}}"#).unwrap();
        assert!(saved.seed_rows(RowKind::Importer).is_empty());
    }

    #[test]
    fn importer_config_serializes_like_the_server() {
        let config = ImporterWorkerConfig::from_rows(&parse_import_rows([
            ("storage_1", "tank"),
            ("slot_1", " 3 "),
        ]))
        .unwrap();
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"imports":[{"storage":"tank","slot":3}]}"#
        );
    }
}
