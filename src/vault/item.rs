//! Item shapes returned by the vault CLI.
//!
//! Only the fields op-backup needs are modelled; everything else in
//! the JSON is ignored by serde.

use serde::{Deserialize, Serialize};

/// One entry of `op item list --format=json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    /// Opaque item identifier, passed back to `op item get`.
    pub id: String,

    /// Display title of the item.
    #[serde(default)]
    pub title: String,
}

impl RecordSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A single field of a fetched item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemField {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub value: String,
}

/// The `fields` list of a fetched item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    pub fields: Vec<ItemField>,
}
