use serde::{Deserialize, Deserializer};

pub mod dining_hall;
pub mod food;
pub mod hours_row;
pub mod meal_period;
pub mod menu;
pub mod rating;

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
