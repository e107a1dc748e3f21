use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named daily serving window. Declaration order is the scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealPeriod {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub const ALL: [MealPeriod; 3] = [MealPeriod::Breakfast, MealPeriod::Lunch, MealPeriod::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "Breakfast",
            MealPeriod::Lunch => "Lunch",
            MealPeriod::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealPeriod::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown meal period: {}", s))
    }
}
