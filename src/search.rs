use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::StoreError;
use crate::model::food::FoodRecord;
use crate::store::{FoodCatalog, FoodQuery, RatingFeed, SortKey, TagFilter};
use crate::tags::TagTable;
use crate::trending::{DEFAULT_TRENDING_WINDOW, rank_trending};

/// Upper bound on results, applied before trending re-ranking.
pub const DEFAULT_RESULT_CAP: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Rating,
    Trending,
    Recent,
}

impl SortOrder {
    /// Order the candidate set is fetched in. Trending re-ranks a rating-ordered set.
    pub fn base_key(&self) -> SortKey {
        match self {
            SortOrder::Rating | SortOrder::Trending => SortKey::Rating,
            SortOrder::Recent => SortKey::Recent,
        }
    }
}

/// Where tag predicates run. Both produce the same result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// The catalog applies the tag predicates and the limit.
    #[default]
    Pushdown,
    /// The catalog returns every text match and tags are filtered here.
    ClientSide,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Pushdown => f.write_str("pushdown"),
            FilterMode::ClientSide => f.write_str("client"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pushdown" | "server" => Ok(FilterMode::Pushdown),
            "client" | "client-side" | "clientside" => Ok(FilterMode::ClientSide),
            other => Err(format!("expected 'pushdown' or 'client', got '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    pub exclude_allergens: Vec<String>,
    pub require_dietary: Vec<String>,
    pub sort: SortOrder,
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Build criteria from a flat tag selection, classifying each tag through `table`.
    pub fn from_selection<S: AsRef<str>>(
        query: impl Into<String>,
        selected: &[S],
        table: &TagTable,
        sort: SortOrder,
    ) -> Self {
        let selection = table.partition(selected);
        Self {
            query: query.into(),
            exclude_allergens: selection.exclude,
            require_dietary: selection.require,
            sort,
        }
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn tag_filter(&self) -> TagFilter {
        TagFilter {
            require_all: self.require_dietary.clone(),
            exclude_any: self.exclude_allergens.clone(),
        }
    }

    /// Text, dietary-inclusion and allergen-exclusion predicates together.
    pub fn matches(&self, food: &FoodRecord) -> bool {
        name_matches(&food.name, &self.query)
            && self.require_dietary.iter().all(|t| food.has_tag(t))
            && !self.exclude_allergens.iter().any(|t| food.has_tag(t))
    }
}

/// Case-insensitive substring match; a blank query matches everything.
pub fn name_matches(name: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Stable descending sort by `key`; equal keys keep their input order.
pub fn sort_foods(foods: &mut [FoodRecord], key: SortKey) {
    match key {
        SortKey::Rating => foods.sort_by(|a, b| b.avg_rating.total_cmp(&a.avg_rating)),
        // None sorts below any timestamp, so undated foods end up last.
        SortKey::Recent => foods.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Filters, orders and optionally trend-ranks foods from the catalog.
pub struct SearchPipeline<'a, C: ?Sized, R: ?Sized> {
    catalog: &'a C,
    feed: &'a R,
    mode: FilterMode,
    result_cap: usize,
    trending_window: usize,
}

impl<'a, C, R> SearchPipeline<'a, C, R>
where
    C: FoodCatalog + ?Sized,
    R: RatingFeed + ?Sized,
{
    pub fn new(catalog: &'a C, feed: &'a R) -> Self {
        Self {
            catalog,
            feed,
            mode: FilterMode::default(),
            result_cap: DEFAULT_RESULT_CAP,
            trending_window: DEFAULT_TRENDING_WINDOW,
        }
    }

    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_result_cap(mut self, result_cap: usize) -> Self {
        self.result_cap = result_cap;
        self
    }

    pub fn with_trending_window(mut self, trending_window: usize) -> Self {
        self.trending_window = trending_window;
        self
    }

    #[instrument(level = "info", skip(self, criteria), fields(query = %criteria.query, sort = ?criteria.sort, mode = ?self.mode))]
    pub fn search(&self, criteria: &SearchCriteria) -> Result<Vec<FoodRecord>, StoreError> {
        let key = criteria.sort.base_key();
        let tags = criteria.tag_filter();
        let query = match self.mode {
            FilterMode::Pushdown => FoodQuery {
                text: criteria.query.trim(),
                sort: key,
                limit: Some(self.result_cap),
                tags: Some(&tags),
            },
            FilterMode::ClientSide => FoodQuery {
                text: criteria.query.trim(),
                sort: key,
                limit: None,
                tags: None,
            },
        };

        let rows = self.catalog.find_foods(&query)?;
        let fetched = rows.len();

        let mut seen: HashSet<String> = HashSet::with_capacity(fetched);
        let mut foods: Vec<FoodRecord> = rows
            .into_iter()
            .filter(|f| criteria.matches(f))
            .filter(|f| seen.insert(f.id.clone()))
            .collect();

        if self.mode == FilterMode::Pushdown && foods.len() != fetched {
            warn!(fetched, kept = foods.len(), "Catalog returned duplicate rows or rows outside the pushed-down predicates");
        }

        sort_foods(&mut foods, key);
        foods.truncate(self.result_cap);

        if criteria.sort == SortOrder::Trending && !foods.is_empty() {
            // The event window is restricted to the capped candidate ids.
            let events = {
                let ids: Vec<&str> = foods.iter().map(|f| f.id.as_str()).collect();
                self.feed.recent_events_for_ids(&ids, self.trending_window)?
            };
            info!(events = events.len(), "Loaded recent rating events");
            foods = rank_trending(foods, &events);
        }

        info!(fetched, results = foods.len(), "Search complete");
        Ok(foods)
    }
}
