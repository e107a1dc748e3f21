use chrono::{DateTime, NaiveDate, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::StoreError;
use crate::local_time::service_date;
use crate::menus::{DEFAULT_TOP_FOODS, HallMenu, group_by_hall};
use crate::model::food::FoodRecord;
use crate::model::meal_period::MealPeriod;
use crate::search::{SearchCriteria, SearchPipeline, SortOrder};
use crate::status::{HallStatusEngine, HallStatusEntry};
use crate::store::{FoodCatalog, HoursSource, MenuSource, RatingFeed};
use crate::supabase::SupabaseStore;
use crate::tags::normalize;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Status,
    Search(SearchRequest),
    Menus {
        #[serde(default)]
        period: Option<MealPeriod>,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    /// Tags classified through the tag table.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Allergens to exclude regardless of classification.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Dietary markers to require regardless of classification.
    #[serde(default)]
    pub require: Vec<String>,
    #[serde(default)]
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Response {
    Status {
        date: NaiveDate,
        halls: Vec<HallStatusEntry>,
    },
    Search {
        query: String,
        sort: SortOrder,
        count: usize,
        foods: Vec<FoodRecord>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        ignored_tags: Vec<String>,
    },
    Menus {
        date: NaiveDate,
        period: MealPeriod,
        halls: Vec<HallMenu>,
    },
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let config = Config::from_env()?;
    let store = SupabaseStore::new(&config.supabase_url, config.supabase_key.clone());
    let request = event.payload;
    let now = Utc::now();

    // The store client blocks, so the whole request runs on the blocking pool.
    let response = tokio::task::spawn_blocking(move || dispatch(&store, &config, request, now)).await??;
    Ok(response)
}

/// Serve one request against `store` as of `now`.
pub fn dispatch<S>(store: &S, config: &Config, request: Request, now: DateTime<Utc>) -> Result<Response, StoreError>
where
    S: FoodCatalog + RatingFeed + HoursSource + MenuSource + ?Sized,
{
    match request {
        Request::Status => {
            let engine = HallStatusEngine::new(config.time_zone);
            let halls = engine.board(store, now)?;
            Ok(Response::Status {
                date: service_date(now, config.time_zone),
                halls,
            })
        }
        Request::Search(search) => {
            let (criteria, ignored_tags) = build_criteria(config, search);
            let foods = SearchPipeline::new(store, store)
                .with_mode(config.filter_mode)
                .with_result_cap(config.result_cap)
                .with_trending_window(config.trending_window)
                .search(&criteria)?;
            Ok(Response::Search {
                query: criteria.query,
                sort: criteria.sort,
                count: foods.len(),
                foods,
                ignored_tags,
            })
        }
        Request::Menus { period } => {
            let date = service_date(now, config.time_zone);
            let period = period.unwrap_or_else(|| MealPeriod::current(now, config.time_zone));
            let rows = store.menus_for(date, period)?;
            info!(%date, %period, rows = rows.len(), "Loaded menus");
            Ok(Response::Menus {
                date,
                period,
                halls: group_by_hall(rows, DEFAULT_TOP_FOODS),
            })
        }
    }
}

/// Merge classified tags with the explicit lists; returns the tags the table did not know.
fn build_criteria(config: &Config, search: SearchRequest) -> (SearchCriteria, Vec<String>) {
    let selection = config.tags.partition(&search.tags);
    let mut criteria = SearchCriteria {
        query: search.query,
        exclude_allergens: selection.exclude,
        require_dietary: selection.require,
        sort: search.sort,
    };

    for tag in search.exclude.iter().map(|t| normalize(t)).filter(|t| !t.is_empty()) {
        if !criteria.exclude_allergens.contains(&tag) {
            criteria.exclude_allergens.push(tag);
        }
    }
    for tag in search.require.iter().map(|t| normalize(t)).filter(|t| !t.is_empty()) {
        if !criteria.require_dietary.contains(&tag) {
            criteria.require_dietary.push(tag);
        }
    }

    (criteria, selection.unknown)
}
