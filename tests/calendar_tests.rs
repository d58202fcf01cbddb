use allocation_report::{
    Assignment, CalendarError, ReportInterval, WorkCalendar, WorkCalendarConfig,
};
use chrono::{NaiveDate, Weekday};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn default_calendar_weekends_unavailable() {
    let cal = WorkCalendar::default();
    // 2025-01-04 is a Saturday, 2025-01-05 is a Sunday
    assert!(!cal.is_working_day(d(2025, 1, 4)));
    assert!(!cal.is_working_day(d(2025, 1, 5)));
    assert!(cal.is_working_day(d(2025, 1, 6)));
}

#[test]
fn interval_end_is_exclusive() {
    let cal = WorkCalendar::default();
    let week = ReportInterval::new(d(2025, 1, 6), d(2025, 1, 13)).unwrap();
    assert_eq!(cal.working_days(&week), 5.0);

    let monday = ReportInterval::new(d(2025, 1, 6), d(2025, 1, 7)).unwrap();
    assert_eq!(cal.working_days(&monday), 1.0);
}

#[test]
fn holidays_reduce_capacity_and_effort() {
    let mut cal = WorkCalendar::default();
    cal.add_holidays(&[d(2025, 2, 17), d(2025, 2, 18)]);
    let february = ReportInterval::new(d(2025, 2, 3), d(2025, 3, 3)).unwrap();
    assert_eq!(cal.working_days(&february), 18.0);

    let booking = Assignment::new("ann", d(2025, 2, 17), d(2025, 2, 21)).with_load(0.5);
    assert_eq!(booking.effort_within(&cal, &february), 1.5);
}

#[test]
fn booking_is_clipped_to_interval() {
    let cal = WorkCalendar::default();
    let february = ReportInterval::new(d(2025, 2, 3), d(2025, 3, 3)).unwrap();

    let straddling = Assignment::new("ann", d(2025, 1, 27), d(2025, 2, 7));
    assert_eq!(straddling.effort_within(&cal, &february), 5.0);

    let before = Assignment::new("ann", d(2025, 1, 6), d(2025, 1, 31));
    assert_eq!(before.effort_within(&cal, &february), 0.0);

    // Mar 3 is the exclusive end.
    let after = Assignment::new("ann", d(2025, 3, 3), d(2025, 3, 7));
    assert_eq!(after.effort_within(&cal, &february), 0.0);
}

#[test]
fn six_day_week() {
    let mut cal = WorkCalendar::default();
    cal.set_working_days(&[
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ])
    .unwrap();
    let week = ReportInterval::new(d(2025, 1, 6), d(2025, 1, 13)).unwrap();
    assert_eq!(cal.working_days(&week), 6.0);
}

#[test]
fn calendar_needs_a_working_day() {
    let mut cal = WorkCalendar::default();
    assert_eq!(cal.set_working_days(&[]), Err(CalendarError::NoWorkingDays));
    assert_eq!(
        WorkCalendar::custom(Vec::<Weekday>::new(), [d(2025, 1, 1)]),
        Err(CalendarError::NoWorkingDays)
    );
}

#[test]
fn recurring_holiday_skips_missing_dates() {
    let mut cal = WorkCalendar::default();
    cal.add_recurring_holiday(2, 29, 2027, 2028);
    // 2028-02-29 is a Tuesday
    assert!(!cal.is_working_day(d(2028, 2, 29)));
    assert_eq!(cal.to_config().holidays(), &[d(2028, 2, 29)]);
}

#[test]
fn serialized_calendar_lists_working_days() {
    let cal = WorkCalendar::custom([Weekday::Fri, Weekday::Mon], [d(2025, 12, 25)]).unwrap();
    let json = serde_json::to_value(&cal).unwrap();
    assert_eq!(json["working_days"], serde_json::json!(["Mon", "Fri"]));
    assert_eq!(json["holidays"], serde_json::json!(["2025-12-25"]));

    let back: WorkCalendar = serde_json::from_value(json).unwrap();
    assert_eq!(back, cal);
}

#[test]
fn deserializing_empty_week_fails() {
    let result: Result<WorkCalendar, _> =
        serde_json::from_str(r#"{"working_days": [], "holidays": []}"#);
    assert!(result.is_err());

    let config =
        WorkCalendarConfig::new([Weekday::Tue, Weekday::Tue], Vec::<NaiveDate>::new()).unwrap();
    assert_eq!(config.working_days(), &[Weekday::Tue]);
}
