use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of a rating row needed to rank by recent activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub food_id: String,
    pub created_at: DateTime<Utc>,
}
