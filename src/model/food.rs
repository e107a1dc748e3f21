use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::null_as_default;

/// A catalog entry as stored in the `foods` table.
///
/// `allergens` carries both dietary markers ("vegan") and true allergens
/// ("milk"); the tag table tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub allergens: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating_count: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FoodRecord {
    /// True when the record carries exactly `tag`.
    ///
    /// Stored tags are lowercase and callers normalize theirs, so this matches
    /// the case-sensitive array operators the catalog uses server-side.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.allergens.iter().any(|t| t == tag)
    }
}
