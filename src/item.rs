//! Item records as served by the suggestion endpoint.

use crate::config::ITEM_PAGE_PREFIX;
use serde::{Deserialize, Serialize};

/// A selectable catalog item.
///
/// `icon` carries base64-encoded PNG bytes and is only ever rendered through
/// [`Item::icon_data_uri`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub uid: String,
    #[serde(default)]
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<i32>,
    #[serde(default)]
    pub icon: String,
}

impl Item {
    /// `data:` URI suitable for an `<img src>`.
    pub fn icon_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.icon)
    }

    /// Link target of the item's own page.
    pub fn page_href(&self) -> String {
        format!("{}{}", ITEM_PAGE_PREFIX, self.uid)
    }
}

/// Decode the body of an `/item-suggest/` response.
pub fn parse_suggestions(body: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_records() {
        let body = r#"[
            {"uid":"a1","id":"minecraft:apple","displayName":"Apple","icon":"iVBO"},
            {"uid":"b2","id":"minecraft:stone","displayName":"Stone","meta":3,"nbt":"{}","icon":""}
        ]"#;
        let items = parse_suggestions(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display_name, "Apple");
        assert_eq!(items[0].meta, None);
        assert_eq!(items[1].meta, Some(3));
        assert_eq!(items[1].nbt.as_deref(), Some("{}"));
    }

    #[test]
    fn tolerates_minimal_records() {
        let items = parse_suggestions(r#"[{"uid":"a1","displayName":"Apple"}]"#).unwrap();
        assert_eq!(items[0].id, "");
        assert_eq!(items[0].icon, "");
    }

    #[test]
    fn rejects_records_without_uid() {
        assert!(parse_suggestions(r#"[{"displayName":"Apple"}]"#).is_err());
    }

    #[test]
    fn renders_icon_and_link() {
        let item = Item {
            uid: "a1".into(),
            id: String::new(),
            display_name: "Apple".into(),
            nbt: None,
            meta: None,
            icon: "AAAA".into(),
        };
        assert_eq!(item.icon_data_uri(), "data:image/png;base64,AAAA");
        assert_eq!(item.page_href(), "/items/a1");
    }
}
