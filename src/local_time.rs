use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::model::meal_period::MealPeriod;

/// Zone the dining locations post their hours in.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Minutes since local midnight in `tz`.
pub fn local_minutes(now: DateTime<Utc>, tz: Tz) -> u32 {
    let local = now.with_timezone(&tz);
    local.hour() * 60 + local.minute()
}

/// The calendar date in `tz`, i.e. which day's hours and menus apply.
pub fn service_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

impl MealPeriod {
    /// The meal period to show by default at `now`.
    ///
    /// Before 5am the previous dinner is still the most recent menu.
    pub fn current(now: DateTime<Utc>, tz: Tz) -> MealPeriod {
        match now.with_timezone(&tz).hour() {
            0..=4 => MealPeriod::Dinner,
            5..=9 => MealPeriod::Breakfast,
            10..=14 => MealPeriod::Lunch,
            _ => MealPeriod::Dinner,
        }
    }
}
