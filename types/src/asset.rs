//! Assets reported by the ownership index and the collection-matching rule.

use serde::{Deserialize, Deserializer, Serialize};

/// Group key that identifies collection membership.
pub const COLLECTION_GROUP_KEY: &str = "collection";

/// A key/value tag attached to an asset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionTag {
    pub group_key: String,
    /// The index sends `null` for groups that carry no value.
    #[serde(default)]
    pub group_value: Option<String>,
}

impl CollectionTag {
    pub fn new(group_key: impl Into<String>, group_value: impl Into<String>) -> Self {
        Self {
            group_key: group_key.into(),
            group_value: Some(group_value.into()),
        }
    }

    /// Shorthand for a `collection` tag.
    pub fn collection(value: impl Into<String>) -> Self {
        Self::new(COLLECTION_GROUP_KEY, value)
    }
}

/// One item of an ownership query result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedAsset {
    pub id: String,
    /// Some assets are returned without any grouping at all, either
    /// omitted or as an explicit `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub grouping: Vec<CollectionTag>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CollectionTag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CollectionTag>>::deserialize(deserializer)?.unwrap_or_default())
}

impl OwnedAsset {
    pub fn new(id: impl Into<String>, grouping: Vec<CollectionTag>) -> Self {
        Self {
            id: id.into(),
            grouping,
        }
    }

    /// Exact, case-sensitive match on both key and value.
    pub fn belongs_to(&self, collection: &str) -> bool {
        self.grouping
            .iter()
            .any(|tag| {
                tag.group_key == COLLECTION_GROUP_KEY && tag.group_value.as_deref() == Some(collection)
            })
    }
}

/// Number of assets that belong to `collection`.
pub fn count_matching(assets: &[OwnedAsset], collection: &str) -> u32 {
    let n = assets.iter().filter(|a| a.belongs_to(collection)).count();
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_only_collection_key() {
        let asset = OwnedAsset::new("a", vec![CollectionTag::new("creator", "COL1")]);
        assert!(!asset.belongs_to("COL1"));

        let asset = OwnedAsset::new("b", vec![CollectionTag::collection("COL1")]);
        assert!(asset.belongs_to("COL1"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let asset = OwnedAsset::new("a", vec![CollectionTag::collection("col1")]);
        assert!(!asset.belongs_to("COL1"));
        let asset = OwnedAsset::new("a", vec![CollectionTag::new("Collection", "COL1")]);
        assert!(!asset.belongs_to("COL1"));
    }

    #[test]
    fn counts_across_mixed_tags() {
        let assets = vec![
            OwnedAsset::new("a", vec![CollectionTag::collection("COL1")]),
            OwnedAsset::new("b", vec![CollectionTag::collection("COL2")]),
            OwnedAsset::new(
                "c",
                vec![
                    CollectionTag::new("creator", "x"),
                    CollectionTag::collection("COL1"),
                ],
            ),
            OwnedAsset::new("d", vec![]),
        ];
        assert_eq!(count_matching(&assets, "COL1"), 2);
        assert_eq!(count_matching(&assets, "COL2"), 1);
        assert_eq!(count_matching(&assets, "COL3"), 0);
    }

    #[test]
    fn missing_grouping_deserializes_as_empty() {
        let asset: OwnedAsset = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert!(asset.grouping.is_empty());
        assert!(!asset.belongs_to("COL1"));
    }

    #[test]
    fn null_grouping_deserializes_as_empty() {
        let asset: OwnedAsset = serde_json::from_str(r#"{"id": "abc", "grouping": null}"#).unwrap();
        assert!(asset.grouping.is_empty());
    }

    #[test]
    fn null_group_value_never_matches() {
        let raw = r#"{"id": "abc", "grouping": [
            {"group_key": "collection", "group_value": null},
            {"group_key": "collection"}
        ]}"#;
        let asset: OwnedAsset = serde_json::from_str(raw).unwrap();
        assert_eq!(asset.grouping.len(), 2);
        assert_eq!(asset.grouping[0].group_value, None);
        assert!(!asset.belongs_to("COL1"));
        assert!(!asset.belongs_to(""));
    }
}
