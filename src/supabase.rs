use std::fmt;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tracing::{error, info_span, instrument};

use crate::error::StoreError;
use crate::model::food::FoodRecord;
use crate::model::hours_row::HoursRow;
use crate::model::meal_period::MealPeriod;
use crate::model::menu::MenuRow;
use crate::model::rating::RatingEvent;
use crate::store::{FoodCatalog, FoodQuery, HoursSource, MenuSource, RatingFeed, SortKey, TagFilter};

const FOOD_COLUMNS: &str = "id,name,allergens,avg_rating,rating_count,created_at,image_url";
const HALL_EMBED: &str = "dining_halls(id,name,slug)";

/// PostgREST client for the Supabase project holding halls, hours, menus, foods and ratings.
#[derive(Clone)]
pub struct SupabaseStore {
    rest_url: String,
    api_key: String,
}

impl fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseStore {
    pub fn new(project_url: &str, api_key: String) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", project_url.trim_end_matches('/')),
            api_key,
        }
    }

    /// GET `table` with PostgREST query parameters and decode the JSON array.
    fn select<T: DeserializeOwned>(&self, table: &'static str, params: &[(&str, String)]) -> Result<Vec<T>, StoreError> {
        let url = format!("{}/{}", self.rest_url, table);
        let mut request = ureq::get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json");
        for (key, value) in params {
            request = request.query(key, value);
        }

        let response = {
            let _span = info_span!("supabase_select", table, url = %url).entered();
            request.call()
        };
        match response {
            Ok(response) => {
                let mut body_reader = response.into_body();
                body_reader
                    .read_json::<Vec<T>>()
                    .map_err(|source| {
                        error!(error = %source, table, "Failed to decode rows");
                        StoreError::Decode { table, source }
                    })
            }
            Err(source) => {
                error!(error = %source, table, "Request failed");
                Err(StoreError::Request { table, source })
            }
        }
    }
}

/// Double-quotes a value for PostgREST lists, escaping backslashes and quotes.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// PostgREST array literal, quoting each element so tags with spaces survive.
fn array_literal(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    format!("{{{}}}", quoted.join(","))
}

/// Escapes LIKE metacharacters so user text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Query parameters for a food search, including pushed-down tag predicates.
pub fn food_params(query: &FoodQuery<'_>) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", FOOD_COLUMNS.to_string())];

    // PostgREST turns every `*` into a wildcard, so text containing one is matched by the caller.
    let text = query.text.trim();
    let text_pushed = !text.contains('*');
    if !text.is_empty() && text_pushed {
        params.push(("name", format!("ilike.*{}*", escape_like(text))));
    }

    if let Some(TagFilter { require_all, exclude_any }) = query.tags {
        if !require_all.is_empty() {
            params.push(("allergens", format!("cs.{}", array_literal(require_all))));
        }
        if !exclude_any.is_empty() {
            // A null tag set must pass exclusion, and `not.ov` on null is not true.
            params.push((
                "or",
                format!("(allergens.is.null,allergens.not.ov.{})", array_literal(exclude_any)),
            ));
        }
    }

    let order = match query.sort {
        SortKey::Rating => "avg_rating.desc.nullslast",
        SortKey::Recent => "created_at.desc.nullslast",
    };
    params.push(("order", order.to_string()));

    // A limit without the text filter would cut matches before the caller sees them.
    if let Some(limit) = query.limit.filter(|_| text_pushed) {
        params.push(("limit", limit.to_string()));
    }
    params
}

/// Query parameters for the newest rating events of `ids`.
pub fn rating_params(ids: &[&str], limit: usize) -> Vec<(&'static str, String)> {
    let quoted: Vec<String> = ids.iter().map(|id| quote(id)).collect();
    vec![
        ("select", "food_id,created_at".to_string()),
        ("food_id", format!("in.({})", quoted.join(","))),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ]
}

impl FoodCatalog for SupabaseStore {
    #[instrument(level = "info", skip(self, query), fields(text = %query.text, sort = ?query.sort, limit = ?query.limit))]
    fn find_foods(&self, query: &FoodQuery<'_>) -> Result<Vec<FoodRecord>, StoreError> {
        self.select("foods", &food_params(query))
    }
}

impl RatingFeed for SupabaseStore {
    #[instrument(level = "info", skip(self, ids), fields(ids = ids.len()))]
    fn recent_events_for_ids(&self, ids: &[&str], limit: usize) -> Result<Vec<RatingEvent>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select("ratings", &rating_params(ids, limit))
    }
}

impl HoursSource for SupabaseStore {
    #[instrument(level = "info", skip(self))]
    fn hours_for_date(&self, date: NaiveDate) -> Result<Vec<HoursRow>, StoreError> {
        self.select(
            "hours",
            &[
                ("select", format!("date,breakfast,lunch,dinner,{}", HALL_EMBED)),
                ("date", format!("eq.{}", date)),
            ],
        )
    }
}

impl MenuSource for SupabaseStore {
    #[instrument(level = "info", skip(self))]
    fn menus_for(&self, date: NaiveDate, period: MealPeriod) -> Result<Vec<MenuRow>, StoreError> {
        self.select(
            "menus",
            &[
                ("select", format!("{},foods({})", HALL_EMBED, FOOD_COLUMNS)),
                ("date", format!("eq.{}", date)),
                ("meal_period", format!("eq.{}", period)),
            ],
        )
    }
}
