use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// In-memory recipe entity, the sole unit the codec operates on.
///
/// A freshly constructed recipe has empty collections, never absent ones.
/// `ingredients` and `steps` are order-preserving; `properties` iterates in
/// key order, which keeps encoding deterministic but is not part of the wire
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub name: String,
    #[serde(rename = "image")]
    pub image_ref: String,
    pub properties: BTreeMap<String, String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl Recipe {
    pub fn new<S: Into<String>>(name: S) -> Recipe {
        Recipe {
            name: name.into(),
            ..Recipe::default()
        }
    }

    /// Persistent identifier: the name reduced to its ASCII alphanumerics.
    ///
    /// Distinct names may collapse to the same identifier; the store's
    /// contract for that case is last-writer-wins.
    pub fn id(&self) -> String {
        slug(&self.name)
    }
}

pub(crate) fn slug(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
