//! Threshold decision over the assets returned by the ownership index.

use gate_types::{count_matching, OwnedAsset};

use crate::{GateConfig, WorkflowError};

/// Collection + minimum count pair applied to an ownership query result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipRule {
    pub collection: String,
    pub required_count: u32,
}

impl OwnershipRule {
    pub fn new(collection: impl Into<String>, required_count: u32) -> Self {
        Self {
            collection: collection.into(),
            required_count,
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(config.collection.clone(), config.required_count)
    }

    /// Count matching assets and decide. `Ok(count)` when the threshold is met.
    pub fn evaluate(&self, assets: &[OwnedAsset]) -> Result<u32, WorkflowError> {
        let actual = count_matching(assets, &self.collection);
        if actual >= self.required_count {
            Ok(actual)
        } else {
            Err(WorkflowError::ThresholdNotMet {
                required: self.required_count,
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_types::CollectionTag;

    fn tagged(n: usize, collection: &str) -> Vec<OwnedAsset> {
        (0..n)
            .map(|i| OwnedAsset::new(format!("asset-{i}"), vec![CollectionTag::collection(collection)]))
            .collect()
    }

    #[test]
    fn exactly_required_passes() {
        let rule = OwnershipRule::new("COL1", 3);
        assert_eq!(rule.evaluate(&tagged(3, "COL1")), Ok(3));
    }

    #[test]
    fn one_short_fails_with_counts() {
        let rule = OwnershipRule::new("COL1", 3);
        assert_eq!(
            rule.evaluate(&tagged(2, "COL1")),
            Err(WorkflowError::ThresholdNotMet {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn other_collections_do_not_count() {
        let rule = OwnershipRule::new("COL1", 1);
        let mut assets = tagged(5, "COL2");
        assert!(rule.evaluate(&assets).is_err());
        assets.extend(tagged(1, "COL1"));
        assert_eq!(rule.evaluate(&assets), Ok(1));
    }
}
