use serde::{Deserialize, Serialize};

use crate::model::dining_hall::DiningHall;
use crate::model::food::FoodRecord;
use crate::model::menu::MenuRow;
use crate::search::sort_foods;
use crate::store::SortKey;

/// Foods shown per hall on the home view.
pub const DEFAULT_TOP_FOODS: usize = 8;

/// One hall's menu for a meal period, best rated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallMenu {
    pub hall: DiningHall,
    pub foods: Vec<FoodRecord>,
    /// Number of foods before truncation to the top entries.
    pub total_count: usize,
}

/// Group menu rows by hall slug in first-seen order and keep each hall's `top_n` best rated foods.
///
/// Rows without a hall are skipped; rows without a food still register the hall.
pub fn group_by_hall(rows: Vec<MenuRow>, top_n: usize) -> Vec<HallMenu> {
    let mut halls: Vec<HallMenu> = Vec::new();

    for row in rows {
        let Some(hall) = row.dining_hall else {
            continue;
        };
        let index = match halls.iter().position(|h| h.hall.slug == hall.slug) {
            Some(index) => index,
            None => {
                halls.push(HallMenu {
                    hall,
                    foods: Vec::new(),
                    total_count: 0,
                });
                halls.len() - 1
            }
        };
        if let Some(food) = row.food {
            halls[index].foods.push(food);
        }
    }

    for menu in &mut halls {
        sort_foods(&mut menu.foods, SortKey::Rating);
        menu.total_count = menu.foods.len();
        menu.foods.truncate(top_n);
    }

    halls
}
