use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::food::FoodRecord;
use crate::model::rating::RatingEvent;

/// Rating events considered when ranking by recent activity.
pub const DEFAULT_TRENDING_WINDOW: usize = 500;

/// Food ids in the order of their most recent rating, each id once.
///
/// `events` must be most-recent-first.
pub fn ordered_ids(events: &[RatingEvent]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(events.len());
    let mut ids = Vec::new();
    for event in events {
        if seen.insert(event.food_id.as_str()) {
            ids.push(event.food_id.as_str());
        }
    }
    ids
}

/// Reorder `candidates` so the most recently rated come first.
///
/// Candidates without a recent event keep their incoming order after the rated ones;
/// ids that are not candidates are ignored.
pub fn rank_trending(candidates: Vec<FoodRecord>, events: &[RatingEvent]) -> Vec<FoodRecord> {
    let rank: HashMap<&str, usize> = ordered_ids(events)
        .into_iter()
        .enumerate()
        .map(|(position, id)| (id, position))
        .collect();

    let (mut rated, unrated): (Vec<FoodRecord>, Vec<FoodRecord>) =
        candidates.into_iter().partition(|f| rank.contains_key(f.id.as_str()));
    rated.sort_by_key(|f| rank.get(f.id.as_str()).copied().unwrap_or(usize::MAX));

    debug!(rated = rated.len(), unrated = unrated.len(), "Ranked candidates by recent ratings");

    rated.extend(unrated);
    rated
}
