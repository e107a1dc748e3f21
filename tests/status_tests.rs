use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::America::New_York;

use dining_hall_lambda_rust::hours::parse_range;
use dining_hall_lambda_rust::memory::InMemoryStore;
use dining_hall_lambda_rust::model::dining_hall::DiningHall;
use dining_hall_lambda_rust::model::hours_row::HoursRow;
use dining_hall_lambda_rust::model::meal_period::MealPeriod;
use dining_hall_lambda_rust::status::{HallStatusEngine, StatusKind, status_at_minutes};

/// A wall-clock time on 2025-10-15 in the dining zone.
fn eastern(hour: u32, minute: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(2025, 10, 15, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn full_day() -> HoursRow {
    HoursRow {
        breakfast: Some("7am-10am".to_string()),
        lunch: Some("11am-2pm".to_string()),
        dinner: Some("5pm-8pm".to_string()),
        ..HoursRow::default()
    }
}

fn engine() -> HallStatusEngine {
    HallStatusEngine::new(New_York)
}

#[test]
fn closing_soon_with_minutes_left() {
    let status = engine().status_for_row(&full_day(), eastern(19, 45));
    assert_eq!(status.status, StatusKind::ClosingSoon);
    assert_eq!(status.minutes_left, Some(15));
    assert_eq!(status.label, "Closing in 15m");
    assert_eq!(status.period, Some(MealPeriod::Dinner));
}

#[test]
fn thirty_minutes_left_is_closing_soon_but_thirty_one_is_open() {
    let at_30 = engine().status_for_row(&full_day(), eastern(19, 30));
    assert_eq!(at_30.status, StatusKind::ClosingSoon);
    assert_eq!(at_30.label, "Closing in 30m");

    let at_31 = engine().status_for_row(&full_day(), eastern(19, 29));
    assert_eq!(at_31.status, StatusKind::Open);
    assert_eq!(at_31.label, "Open Now");
}

#[test]
fn open_now_in_the_middle_of_a_period() {
    let status = engine().status_for_row(&full_day(), eastern(12, 0));
    assert_eq!(status.status, StatusKind::Open);
    assert_eq!(status.label, "Open Now");
    assert_eq!(status.period, Some(MealPeriod::Lunch));
}

#[test]
fn start_boundary_is_inclusive() {
    let status = engine().status_for_row(&full_day(), eastern(7, 0));
    assert_eq!(status.status, StatusKind::Open);
    assert_eq!(status.period, Some(MealPeriod::Breakfast));
}

#[test]
fn end_boundary_is_exclusive() {
    let status = engine().status_for_row(&full_day(), eastern(20, 0));
    assert_eq!(status.status, StatusKind::Closed);
    assert_eq!(status.label, "Closed Today");
}

#[test]
fn early_morning_names_breakfast_as_next_opening() {
    let status = engine().status_for_row(&full_day(), eastern(3, 0));
    assert_eq!(status.status, StatusKind::Closed);
    assert_eq!(status.label, "Opens Breakfast at 7am");
    assert_eq!(status.period, Some(MealPeriod::Breakfast));
    assert_eq!(status.opens_at, Some(420));
}

#[test]
fn gap_between_periods_points_at_the_next_one() {
    let status = engine().status_for_row(&full_day(), eastern(15, 0));
    assert_eq!(status.status, StatusKind::Closed);
    assert_eq!(status.label, "Opens Dinner at 5pm");
}

#[test]
fn unparseable_periods_are_skipped() {
    let row = HoursRow {
        breakfast: Some("Closed".to_string()),
        lunch: Some("garbage".to_string()),
        dinner: Some("4:30pm-7:30pm ET".to_string()),
        ..HoursRow::default()
    };
    let status = engine().status_for_row(&row, eastern(9, 0));
    assert_eq!(status.label, "Opens Dinner at 4:30pm");
}

#[test]
fn no_parseable_periods_is_closed_today() {
    let row = HoursRow {
        breakfast: None,
        lunch: Some("Closed".to_string()),
        dinner: Some("11pm-2am".to_string()),
        ..HoursRow::default()
    };
    for hour in [0, 8, 12, 23] {
        let status = engine().status_for_row(&row, eastern(hour, 0));
        assert_eq!(status.status, StatusKind::Closed);
        assert_eq!(status.label, "Closed Today");
    }
}

#[test]
fn now_is_resolved_in_the_configured_zone() {
    // 23:45 UTC is 7:45pm in New York during daylight time.
    let instant = Utc.with_ymd_and_hms(2025, 10, 15, 23, 45, 0).unwrap();

    let eastern_status = HallStatusEngine::new(New_York).status_for_row(&full_day(), instant);
    assert_eq!(eastern_status.status, StatusKind::ClosingSoon);

    let utc_status = HallStatusEngine::new(chrono_tz::Etc::UTC).status_for_row(&full_day(), instant);
    assert_eq!(utc_status.status, StatusKind::Closed);
    assert_eq!(utc_status.label, "Closed Today");
}

#[test]
fn scans_ranges_directly_from_minutes() {
    let ranges = [parse_range("7am-10am"), None, parse_range("5pm-8pm")];
    assert_eq!(status_at_minutes(&ranges, 600).label, "Opens Dinner at 5pm");
    assert_eq!(status_at_minutes(&ranges, 0).label, "Opens Breakfast at 7am");
    assert_eq!(status_at_minutes(&[None, None, None], 600).label, "Closed Today");
}

#[test]
fn board_uses_the_service_date_in_the_zone() {
    let hall = |slug: &str| DiningHall {
        id: format!("{}-id", slug),
        name: slug.to_uppercase(),
        slug: slug.to_string(),
    };
    let today = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
    let tomorrow = NaiveDate::from_ymd_opt(2025, 10, 16).unwrap();
    let store = InMemoryStore::new().with_hours(vec![
        HoursRow {
            date: Some(today),
            dining_hall: Some(hall("south")),
            ..full_day()
        },
        HoursRow {
            date: Some(today),
            dining_hall: Some(hall("north")),
            breakfast: Some("Closed".to_string()),
            lunch: Some("Closed".to_string()),
            dinner: Some("Closed".to_string()),
        },
        HoursRow {
            date: Some(tomorrow),
            dining_hall: Some(hall("south")),
            ..full_day()
        },
    ]);

    // 11:45pm on the 15th in New York is already the 16th in UTC.
    let now = eastern(23, 45);
    let board = engine().board(&store, now).expect("board");

    assert_eq!(board.len(), 2);
    assert_eq!(board[0].hours.dining_hall.as_ref().map(|h| h.slug.as_str()), Some("south"));
    assert_eq!(board[0].status.label, "Closed Today");
    assert_eq!(board[1].status.status, StatusKind::Closed);
}
