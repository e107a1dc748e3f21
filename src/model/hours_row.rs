use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::dining_hall::DiningHall;
use crate::model::meal_period::MealPeriod;

/// One location's posted hours for one day. Each period is free text
/// ("7am-10am ET"), "Closed", or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursRow {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "dining_halls")]
    pub dining_hall: Option<DiningHall>,
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
}

impl HoursRow {
    pub fn period(&self, period: MealPeriod) -> Option<&str> {
        match period {
            MealPeriod::Breakfast => self.breakfast.as_deref(),
            MealPeriod::Lunch => self.lunch.as_deref(),
            MealPeriod::Dinner => self.dinner.as_deref(),
        }
    }
}
