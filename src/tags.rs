//! Classification of food tags.
//!
//! Dietary markers and allergens share the `allergens` column, so what a tag
//! means for filtering comes from this table rather than from the data.

use serde::{Deserialize, Serialize};
use tracing::warn;

const UNKNOWN_TAG_EMOJI: &str = "⚠️";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// Results must carry the tag.
    Dietary,
    /// Results must not carry the tag.
    Allergen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: String,
    pub kind: TagKind,
    pub label: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLabel {
    pub label: String,
    pub emoji: String,
}

/// A user's tag selection split by meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    pub require: Vec<String>,
    pub exclude: Vec<String>,
    pub unknown: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagTable {
    entries: Vec<TagEntry>,
}

impl Default for TagTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagTable {
    pub fn new(entries: Vec<TagEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| TagEntry { tag: normalize(&e.tag), ..e })
            .collect();
        Self { entries }
    }

    /// The allergen list published by the menu source plus the common dietary markers.
    pub fn builtin() -> Self {
        let entry = |tag: &str, kind, label: &str, emoji: &str| TagEntry {
            tag: tag.to_string(),
            kind,
            label: label.to_string(),
            emoji: Some(emoji.to_string()),
        };
        Self::new(vec![
            entry("milk", TagKind::Allergen, "Dairy", "🥛"),
            entry("eggs", TagKind::Allergen, "Eggs", "🥚"),
            entry("fish", TagKind::Allergen, "Fish", "🐟"),
            entry("shellfish", TagKind::Allergen, "Shellfish", "🦐"),
            entry("tree nuts", TagKind::Allergen, "Tree Nuts", "🌰"),
            entry("peanuts", TagKind::Allergen, "Peanuts", "🥜"),
            entry("wheat", TagKind::Allergen, "Wheat", "🌾"),
            entry("soybeans", TagKind::Allergen, "Soy", "🫘"),
            entry("sesame", TagKind::Allergen, "Sesame", "🌱"),
            entry("vegan", TagKind::Dietary, "Vegan", "🌿"),
            entry("vegetarian", TagKind::Dietary, "Vegetarian", "🥕"),
            entry("halal", TagKind::Dietary, "Halal", "☪️"),
        ])
    }

    /// Load a table from a JSON array of `{tag, kind, label, emoji?}` objects.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<TagEntry> = serde_json::from_str(text)?;
        Ok(Self::new(entries))
    }

    fn entry(&self, tag: &str) -> Option<&TagEntry> {
        let tag = normalize(tag);
        self.entries.iter().find(|e| e.tag == tag)
    }

    pub fn classify(&self, tag: &str) -> Option<TagKind> {
        self.entry(tag).map(|e| e.kind)
    }

    /// Display label for a tag; unknown tags are shown as-is with a warning sign.
    pub fn label(&self, tag: &str) -> TagLabel {
        match self.entry(tag) {
            Some(e) => TagLabel {
                label: e.label.clone(),
                emoji: e.emoji.clone().unwrap_or_else(|| UNKNOWN_TAG_EMOJI.to_string()),
            },
            None => TagLabel {
                label: tag.to_string(),
                emoji: UNKNOWN_TAG_EMOJI.to_string(),
            },
        }
    }

    pub fn allergens(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter().filter(|e| e.kind == TagKind::Allergen)
    }

    pub fn dietary(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter().filter(|e| e.kind == TagKind::Dietary)
    }

    /// Split selected tags into required dietary markers and excluded allergens.
    pub fn partition<S: AsRef<str>>(&self, selected: &[S]) -> TagSelection {
        let mut selection = TagSelection::default();
        for tag in selected {
            let tag = normalize(tag.as_ref());
            if tag.is_empty() {
                continue;
            }
            let bucket = match self.classify(&tag) {
                Some(TagKind::Dietary) => &mut selection.require,
                Some(TagKind::Allergen) => &mut selection.exclude,
                None => {
                    warn!(tag = %tag, "Ignoring unknown tag in selection");
                    &mut selection.unknown
                }
            };
            if !bucket.contains(&tag) {
                bucket.push(tag);
            }
        }
        selection
    }
}

pub(crate) fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}
