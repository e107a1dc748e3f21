//! Narrow interfaces to the managed data store.
//!
//! The engines only ever see these traits; [`crate::supabase::SupabaseStore`] talks to
//! PostgREST and [`crate::memory::InMemoryStore`] serves tests and local runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::food::FoodRecord;
use crate::model::hours_row::HoursRow;
use crate::model::meal_period::MealPeriod;
use crate::model::menu::MenuRow;
use crate::model::rating::RatingEvent;

/// Order the catalog returns foods in. Both orders are descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Rating,
    Recent,
}

/// Tag predicates pushed down to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Every one of these must be present.
    pub require_all: Vec<String>,
    /// None of these may be present.
    pub exclude_any: Vec<String>,
}

impl TagFilter {
    pub fn matches(&self, food: &FoodRecord) -> bool {
        self.require_all.iter().all(|t| food.has_tag(t)) && !self.exclude_any.iter().any(|t| food.has_tag(t))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodQuery<'a> {
    /// Case-insensitive substring of the name; empty matches everything.
    pub text: &'a str,
    pub sort: SortKey,
    /// `None` means no limit.
    pub limit: Option<usize>,
    /// `Some` when tag filtering is pushed down to the store.
    pub tags: Option<&'a TagFilter>,
}

pub trait FoodCatalog {
    /// Foods matching exactly the stated predicates, ordered by `query.sort`.
    fn find_foods(&self, query: &FoodQuery<'_>) -> Result<Vec<FoodRecord>, StoreError>;
}

pub trait RatingFeed {
    /// Rating events for `ids`, most recent first, at most `limit` of them.
    fn recent_events_for_ids(&self, ids: &[&str], limit: usize) -> Result<Vec<RatingEvent>, StoreError>;
}

pub trait HoursSource {
    /// One row per location for `date`.
    fn hours_for_date(&self, date: NaiveDate) -> Result<Vec<HoursRow>, StoreError>;
}

pub trait MenuSource {
    fn menus_for(&self, date: NaiveDate, period: MealPeriod) -> Result<Vec<MenuRow>, StoreError>;
}
