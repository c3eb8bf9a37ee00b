//! Result item domain types

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single item returned by a finished job
///
/// The service capitalizes its field names; all lower-case spellings are
/// accepted as well. Other casings such as `Id` are not matched and leave the
/// field at its default. `metadata` has no fixed schema and is kept as a raw
/// JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(rename = "ID", alias = "id", default)]
    pub id: String,
    #[serde(rename = "Content", alias = "content", default)]
    pub content: String,
    #[serde(rename = "Metadata", alias = "metadata", default)]
    pub metadata: JsonValue,
    #[serde(rename = "Score", alias = "score", default)]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_service_shape() {
        let items: Vec<ResultItem> = serde_json::from_str(
            r#"[{"ID":"1","Content":"hi","Metadata":{"lang":"en"},"Score":0.9}]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].content, "hi");
        assert_eq!(items[0].metadata["lang"], "en");
        assert_eq!(items[0].score, 0.9);
    }

    #[test]
    fn test_missing_fields_default() {
        let items: Vec<ResultItem> = serde_json::from_str(r#"[{"id":"7"}]"#).unwrap();

        assert_eq!(items[0].id, "7");
        assert!(items[0].content.is_empty());
        assert!(items[0].metadata.is_null());
        assert_eq!(items[0].score, 0.0);
    }

    #[test]
    fn test_only_exact_or_lowercase_keys_match() {
        let items: Vec<ResultItem> =
            serde_json::from_str(r#"[{"Id":"1","CONTENT":"x","score":0.5}]"#).unwrap();

        assert!(items[0].id.is_empty());
        assert!(items[0].content.is_empty());
        assert_eq!(items[0].score, 0.5);
    }

    #[test]
    fn test_preserves_order() {
        let items: Vec<ResultItem> =
            serde_json::from_str(r#"[{"ID":"b"},{"ID":"a"},{"ID":"c"}]"#).unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }
}
