use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::StoreError;
use crate::hours::{TimeRange, format_minutes, parse_optional_range};
use crate::local_time::{local_minutes, service_date};
use crate::model::hours_row::HoursRow;
use crate::model::meal_period::MealPeriod;
use crate::store::HoursSource;

/// An open period with this many minutes or fewer left is closing soon.
pub const CLOSING_SOON_MINUTES: u32 = 30;

pub const CLOSED_TODAY_LABEL: &str = "Closed Today";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Open,
    ClosingSoon,
    Closed,
}

/// Live status of one location. `period` is the meal that is open, or the next one to open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallStatus {
    pub status: StatusKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<MealPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes_left: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<u32>,
}

impl HallStatus {
    fn closed_today() -> Self {
        HallStatus {
            status: StatusKind::Closed,
            label: CLOSED_TODAY_LABEL.to_string(),
            period: None,
            minutes_left: None,
            opens_at: None,
        }
    }
}

/// A row of the status board: the posted hours and what they mean right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallStatusEntry {
    pub hours: HoursRow,
    pub status: HallStatus,
}

/// Derives open/closing-soon/closed for a location from its posted hours.
#[derive(Debug, Clone, Copy)]
pub struct HallStatusEngine {
    tz: Tz,
}

impl HallStatusEngine {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Status of one hours row at `now`. Unparseable periods count as closed.
    pub fn status_for_row(&self, row: &HoursRow, now: DateTime<Utc>) -> HallStatus {
        let ranges = MealPeriod::ALL.map(|p| parse_optional_range(row.period(p)));
        self.status_for_ranges(&ranges, now)
    }

    pub fn status_for_ranges(&self, ranges: &[Option<TimeRange>; 3], now: DateTime<Utc>) -> HallStatus {
        status_at_minutes(ranges, local_minutes(now, self.tz))
    }

    /// Fetch today's hours and compute a status for every location.
    #[instrument(level = "info", skip(self, source))]
    pub fn board<S>(&self, source: &S, now: DateTime<Utc>) -> Result<Vec<HallStatusEntry>, StoreError>
    where
        S: HoursSource + ?Sized,
    {
        let date = service_date(now, self.tz);
        let rows = source.hours_for_date(date)?;
        info!(%date, locations = rows.len(), "Loaded hours");

        Ok(rows
            .into_iter()
            .map(|hours| {
                let status = self.status_for_row(&hours, now);
                HallStatusEntry { hours, status }
            })
            .collect())
    }
}

/// Scan `[Breakfast, Lunch, Dinner]` against `now_minutes` (minutes since local midnight).
///
/// First a period containing now, then the first period still to open, else closed for the day.
pub fn status_at_minutes(ranges: &[Option<TimeRange>; 3], now_minutes: u32) -> HallStatus {
    let periods = || {
        MealPeriod::ALL
            .into_iter()
            .zip(ranges.iter().copied())
            .filter_map(|(period, range)| range.map(|r| (period, r)))
    };

    if let Some((period, range)) = periods().find(|(_, r)| r.contains(now_minutes)) {
        let minutes_left = range.end - now_minutes;
        return if minutes_left <= CLOSING_SOON_MINUTES {
            HallStatus {
                status: StatusKind::ClosingSoon,
                label: format!("Closing in {}m", minutes_left),
                period: Some(period),
                minutes_left: Some(minutes_left),
                opens_at: None,
            }
        } else {
            HallStatus {
                status: StatusKind::Open,
                label: "Open Now".to_string(),
                period: Some(period),
                minutes_left: Some(minutes_left),
                opens_at: None,
            }
        };
    }

    if let Some((period, range)) = periods().find(|(_, r)| r.start > now_minutes) {
        return HallStatus {
            status: StatusKind::Closed,
            label: format!("Opens {} at {}", period, format_minutes(range.start)),
            period: Some(period),
            minutes_left: None,
            opens_at: Some(range.start),
        };
    }

    HallStatus::closed_today()
}
