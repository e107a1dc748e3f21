use chrono::NaiveDate;

use crate::error::StoreError;
use crate::model::food::FoodRecord;
use crate::model::hours_row::HoursRow;
use crate::model::meal_period::MealPeriod;
use crate::model::menu::MenuRow;
use crate::model::rating::RatingEvent;
use crate::search::{name_matches, sort_foods};
use crate::store::{FoodCatalog, FoodQuery, HoursSource, MenuSource, RatingFeed};

/// A store held entirely in memory, honoring the same contracts as the remote one.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    foods: Vec<FoodRecord>,
    ratings: Vec<RatingEvent>,
    hours: Vec<HoursRow>,
    menus: Vec<(NaiveDate, MealPeriod, MenuRow)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_foods(mut self, foods: Vec<FoodRecord>) -> Self {
        self.foods = foods;
        self
    }

    pub fn with_ratings(mut self, ratings: Vec<RatingEvent>) -> Self {
        self.ratings = ratings;
        self
    }

    /// Rows must carry a `date` to be found by [`HoursSource::hours_for_date`].
    pub fn with_hours(mut self, hours: Vec<HoursRow>) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_menu(mut self, date: NaiveDate, period: MealPeriod, rows: Vec<MenuRow>) -> Self {
        self.menus.extend(rows.into_iter().map(|row| (date, period, row)));
        self
    }
}

impl FoodCatalog for InMemoryStore {
    fn find_foods(&self, query: &FoodQuery<'_>) -> Result<Vec<FoodRecord>, StoreError> {
        let mut foods: Vec<FoodRecord> = self
            .foods
            .iter()
            .filter(|f| name_matches(&f.name, query.text))
            .filter(|f| query.tags.is_none_or(|tags| tags.matches(f)))
            .cloned()
            .collect();
        sort_foods(&mut foods, query.sort);
        if let Some(limit) = query.limit {
            foods.truncate(limit);
        }
        Ok(foods)
    }
}

impl RatingFeed for InMemoryStore {
    fn recent_events_for_ids(&self, ids: &[&str], limit: usize) -> Result<Vec<RatingEvent>, StoreError> {
        let mut events: Vec<RatingEvent> = self
            .ratings
            .iter()
            .filter(|e| ids.contains(&e.food_id.as_str()))
            .cloned()
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }
}

impl HoursSource for InMemoryStore {
    fn hours_for_date(&self, date: NaiveDate) -> Result<Vec<HoursRow>, StoreError> {
        Ok(self.hours.iter().filter(|h| h.date == Some(date)).cloned().collect())
    }
}

impl MenuSource for InMemoryStore {
    fn menus_for(&self, date: NaiveDate, period: MealPeriod) -> Result<Vec<MenuRow>, StoreError> {
        Ok(self
            .menus
            .iter()
            .filter(|(d, p, _)| *d == date && *p == period)
            .map(|(_, _, row)| row.clone())
            .collect())
    }
}
