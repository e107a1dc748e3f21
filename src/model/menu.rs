use serde::{Deserialize, Serialize};

use crate::model::dining_hall::DiningHall;
use crate::model::food::FoodRecord;

/// A `menus` row joined with its hall and food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuRow {
    #[serde(default, rename = "dining_halls")]
    pub dining_hall: Option<DiningHall>,
    #[serde(default, rename = "foods")]
    pub food: Option<FoodRecord>,
}
