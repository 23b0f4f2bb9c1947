use crate::config::Locale;
use crate::models::DateRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// One month of the calendar grid, ready for client-side rendering.
#[derive(Debug, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    /// Weekday index of day 1, 0 = Sunday (first weekday of the grid).
    pub first_day: u32,
    pub days: Vec<DayView>,
}

/// One day cell. A day with no stored record keeps both `enabled` and
/// `disabled_marked` false: unset is not the same as explicitly closed.
#[derive(Debug, Serialize)]
pub struct DayView {
    pub day: u32,
    pub date: String,
    pub enabled: bool,
    pub disabled_marked: bool,
    pub has_special: bool,
    pub opening: String,
    pub closing: String,
    pub note: String,
    pub day_name: String,
}

/// Records bucketed by calendar year-month for the flat list view.
#[derive(Debug, Serialize)]
pub struct MonthGroup {
    pub year_month: String,
    pub title: String,
    pub dates: Vec<ListEntry>,
}

#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub date: String,
    pub display_date: String,
    pub day_name: String,
    pub opening: String,
    pub closing: String,
    pub note: String,
    pub is_enabled: bool,
    pub has_special: bool,
}

/// Builds `count` consecutive month grids starting at `year`/`month`,
/// rolling over year boundaries. Records are looked up by date string;
/// the caller fetches them unfiltered so that disabled-with-note days
/// stay distinguishable from absent ones.
pub fn build_months(
    year: i32,
    month: u32,
    count: u32,
    records: &[DateRecord],
    locale: &Locale,
) -> Vec<MonthView> {
    let by_date: HashMap<&str, &DateRecord> = records
        .iter()
        .map(|record| (record.date.as_str(), record))
        .collect();

    let mut months = Vec::with_capacity(count as usize);
    for offset in 0..count {
        let (y, m) = add_months(year, month, offset);
        let Some(first) = NaiveDate::from_ymd_opt(y, m, 1) else {
            continue;
        };

        let total_days = days_in_month(y, m);
        let mut days = Vec::with_capacity(total_days as usize);
        for day in 1..=total_days {
            let date_str = format!("{y:04}-{m:02}-{day:02}");
            let record = by_date.get(date_str.as_str()).copied();
            let weekday = first
                .with_day(day)
                .map(|d| d.weekday().num_days_from_sunday())
                .unwrap_or(0);

            days.push(DayView {
                day,
                date: date_str,
                enabled: record.is_some_and(|r| r.is_enabled),
                disabled_marked: record.is_some_and(|r| !r.is_enabled),
                has_special: record.is_some_and(|r| !r.special_note.is_empty()),
                opening: record.map(|r| format_time(&r.opening_time)).unwrap_or_default(),
                closing: record.map(|r| format_time(&r.closing_time)).unwrap_or_default(),
                note: record.map(|r| r.special_note.clone()).unwrap_or_default(),
                day_name: locale.day_name(weekday as usize).to_string(),
            });
        }

        months.push(MonthView {
            year: y,
            month: m,
            title: format!("{} {}", locale.month_name(m), y),
            first_day: first.weekday().num_days_from_sunday(),
            days,
        });
    }
    months
}

/// Buckets date-sorted records by year-month, keeping the caller's sort
/// order both across and inside buckets. Only stored records appear:
/// absent calendar days are a grid concern, not a list concern.
pub fn group_by_month(records: &[DateRecord], locale: &Locale) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for record in records {
        let year_month = record.date.get(..7).unwrap_or(&record.date).to_string();
        if groups.last().map(|g| g.year_month.as_str()) != Some(year_month.as_str()) {
            let title = month_title(&year_month, locale);
            groups.push(MonthGroup {
                year_month,
                title,
                dates: Vec::new(),
            });
        }

        let day_name = crate::validate::parse_date(&record.date)
            .map(|date| {
                locale
                    .day_name(date.weekday().num_days_from_sunday() as usize)
                    .to_string()
            })
            .unwrap_or_default();

        if let Some(group) = groups.last_mut() {
            group.dates.push(ListEntry {
                date: record.date.clone(),
                display_date: display_date(&record.date),
                day_name,
                opening: format_time(&record.opening_time),
                closing: format_time(&record.closing_time),
                note: record.special_note.clone(),
                is_enabled: record.is_enabled,
                has_special: !record.special_note.is_empty(),
            });
        }
    }
    groups
}

/// Truncates a stored time to `HH:MM`, whatever precision the row has.
pub fn format_time(time: &str) -> String {
    time.get(..5).unwrap_or(time).to_string()
}

/// `YYYY-MM-DD` -> `DD/MM/YYYY` for display.
pub fn display_date(date: &str) -> String {
    match (date.get(..4), date.get(5..7), date.get(8..10)) {
        (Some(year), Some(month), Some(day)) => format!("{day}/{month}/{year}"),
        _ => date.to_string(),
    }
}

fn month_title(year_month: &str, locale: &Locale) -> String {
    let month: u32 = year_month.get(5..7).and_then(|m| m.parse().ok()).unwrap_or(0);
    let year = year_month.get(..4).unwrap_or("");
    format!("{} {}", locale.month_name(month), year)
}

/// Zero-based month arithmetic with year carry.
fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) + offset as i64;
    ((total / 12) as i32, (total % 12) as u32 + 1)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = add_months(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}
