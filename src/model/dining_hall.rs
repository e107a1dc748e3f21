use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiningHall {
    pub id: String,
    pub name: String,
    pub slug: String,
}
