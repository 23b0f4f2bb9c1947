use crate::calendar;
use crate::config::Settings;
use crate::errors::ApiError;
use crate::models::{
    ApplyRangeRequest, CalendarPageQuery, DateRecord, Envelope, ListPageQuery, ListQuery,
    RangeSummary, SaveDateRequest,
};
use crate::state::AppState;
use crate::store::{ListFilter, SortOrder};
use crate::ui;
use crate::validate;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Json;
use chrono::{Datelike, Local, NaiveDate};
use tracing::warn;

/// Upper bound on one bulk apply, two years inclusive. Beyond that the
/// operator almost certainly mistyped a year.
const MAX_RANGE_DAYS: i64 = 731;

const DEFAULT_PAGE_TITLE: &str = "Opening Hours";

// --- JSON API ---

pub async fn list_dates(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<DateRecord>>>, ApiError> {
    let filter = filter_from_query(&query)?;
    let records = state.store.list(&filter)?;
    Ok(Json(Envelope::ok(records)))
}

pub async fn get_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Envelope<DateRecord>>, ApiError> {
    if !validate::is_valid_date(&date) {
        return Err(ApiError::validation("Date must be a valid YYYY-MM-DD value"));
    }
    let record = state.store.get(&date)?;
    Ok(Json(Envelope::ok(record)))
}

pub async fn save_date(
    State(state): State<AppState>,
    Json(payload): Json<SaveDateRequest>,
) -> Result<Json<Envelope<DateRecord>>, ApiError> {
    if !validate::is_valid_date(&payload.date) {
        return Err(ApiError::validation("Date must be a valid YYYY-MM-DD value"));
    }
    check_hours(&payload.opening_time, &payload.closing_time)?;

    let record = state.store.save(
        &payload.date,
        &payload.opening_time,
        &payload.closing_time,
        &payload.special_note,
        payload.is_enabled,
    )?;
    Ok(Json(Envelope::ok_with_message(record, "Date saved successfully")))
}

pub async fn delete_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if !validate::is_valid_date(&date) {
        return Err(ApiError::validation("Date must be a valid YYYY-MM-DD value"));
    }
    let removed = state.store.delete(&date)?;
    if removed == 0 {
        return Err(ApiError::not_found("Date not found"));
    }
    Ok(Json(Envelope::message_only("Date deleted successfully")))
}

/// Bulk range-apply: after boundary validation every date in the
/// inclusive window gets an independent save. Failures are counted,
/// not short-circuited and not retried; the response is the summary.
pub async fn apply_range(
    State(state): State<AppState>,
    Json(payload): Json<ApplyRangeRequest>,
) -> Result<Json<Envelope<RangeSummary>>, ApiError> {
    let start = validate::parse_date(&payload.start_date)
        .ok_or_else(|| ApiError::validation("Start date must be a valid YYYY-MM-DD value"))?;
    let end = validate::parse_date(&payload.end_date)
        .ok_or_else(|| ApiError::validation("End date must be a valid YYYY-MM-DD value"))?;
    if end < start {
        return Err(ApiError::validation(
            "Start date must be before or equal to end date",
        ));
    }
    if (end - start).num_days() + 1 > MAX_RANGE_DAYS {
        return Err(ApiError::validation(format!(
            "Date range is limited to {MAX_RANGE_DAYS} days"
        )));
    }
    check_hours(&payload.opening_time, &payload.closing_time)?;

    let summary = run_range(start, end, |date| {
        match state.store.save(
            &date.to_string(),
            &payload.opening_time,
            &payload.closing_time,
            &payload.special_note,
            payload.is_enabled,
        ) {
            Ok(_) => true,
            Err(err) => {
                warn!("range apply failed for {date}: {err}");
                false
            }
        }
    });

    let message = format!("Applied hours to {} of {} date(s)", summary.saved, summary.total);
    Ok(Json(Envelope::ok_with_message(summary, message)))
}

pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Settings>>, ApiError> {
    Ok(Json(Envelope::ok(state.settings.as_ref().clone())))
}

// --- rendered pages ---

pub async fn calendar_page(
    State(state): State<AppState>,
    Query(query): Query<CalendarPageQuery>,
) -> Result<Html<String>, ApiError> {
    let (year, month) = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            check_month(month)?;
            (year, month)
        }
        _ => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let months = query.months.unwrap_or(3).clamp(1, 24);
    let title = query.title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string());

    // The grid must tell "explicitly closed" apart from "no record", so
    // it always fetches unfiltered.
    let records = state.store.list(&ListFilter::default())?;
    let views = calendar::build_months(year, month, months, &records, &state.settings.locale);
    let page = ui::render_calendar(&title, &views, &state.settings)
        .map_err(|err| ApiError::storage(err.to_string()))?;
    Ok(Html(page))
}

pub async fn list_page(
    State(state): State<AppState>,
    Query(query): Query<ListPageQuery>,
) -> Result<Html<String>, ApiError> {
    if let Some(month) = query.month {
        check_month(month)?;
    }
    let title = query.title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string());

    // Unlike the grid, the list only ever shows stored records; absent
    // days are omitted entirely. Deliberate asymmetry.
    let records = state.store.list(&ListFilter {
        year: query.year,
        month: query.month,
        enabled_only: false,
        order: SortOrder::Ascending,
        limit: query.limit,
    })?;
    let groups = calendar::group_by_month(&records, &state.settings.locale);
    Ok(Html(ui::render_list(&title, &groups, &state.settings)))
}

pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = ui::render_admin(&state.settings)
        .map_err(|err| ApiError::storage(err.to_string()))?;
    Ok(Html(page))
}

// --- shared pieces ---

fn filter_from_query(query: &ListQuery) -> Result<ListFilter, ApiError> {
    if let Some(month) = query.month {
        check_month(month)?;
    }
    let order = match query.order.as_deref() {
        Some(value) if value.eq_ignore_ascii_case("desc") => SortOrder::Descending,
        _ => SortOrder::Ascending,
    };
    Ok(ListFilter {
        year: query.year,
        month: query.month,
        enabled_only: query.enabled_only.unwrap_or(true),
        order,
        limit: query.limit,
    })
}

fn check_month(month: u32) -> Result<(), ApiError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ApiError::validation("Month must be between 1 and 12"))
    }
}

fn check_hours(opening: &str, closing: &str) -> Result<(), ApiError> {
    let opening_time = validate::parse_time(opening)
        .ok_or_else(|| ApiError::validation("Opening time must be a valid HH:MM value"))?;
    let closing_time = validate::parse_time(closing)
        .ok_or_else(|| ApiError::validation("Closing time must be a valid HH:MM value"))?;
    if closing_time <= opening_time {
        return Err(ApiError::invalid_range("Closing time must be after opening time"));
    }
    Ok(())
}

/// Walks the inclusive range, one independent save per date.
fn run_range<F>(start: NaiveDate, end: NaiveDate, mut save_one: F) -> RangeSummary
where
    F: FnMut(NaiveDate) -> bool,
{
    let mut summary = RangeSummary {
        total: 0,
        saved: 0,
        errors: 0,
    };
    let mut current = start;
    while current <= end {
        summary.total += 1;
        if save_one(current) {
            summary.saved += 1;
        } else {
            summary.errors += 1;
        }
        let Some(next) = current.succ_opt() else { break };
        current = next;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        validate::parse_date(s).unwrap()
    }

    #[test]
    fn range_walk_covers_the_inclusive_window() {
        let mut seen = Vec::new();
        let summary = run_range(date("2025-03-30"), date("2025-04-02"), |d| {
            seen.push(d.to_string());
            true
        });
        assert_eq!(seen, ["2025-03-30", "2025-03-31", "2025-04-01", "2025-04-02"]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.saved, 4);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let failing = date("2025-01-03");
        let mut attempted = 0;
        let summary = run_range(date("2025-01-01"), date("2025-01-05"), |d| {
            attempted += 1;
            d != failing
        });
        assert_eq!(attempted, 5);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.saved, 4);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn single_day_range_is_one_save() {
        let summary = run_range(date("2025-01-01"), date("2025-01-01"), |_| true);
        assert_eq!(summary.total, 1);
    }

    #[test]
    fn hours_rule_is_strict() {
        assert!(check_hours("10:00", "18:00").is_ok());
        assert!(matches!(
            check_hours("18:00", "10:00"),
            Err(ApiError::InvalidRange(_))
        ));
        assert!(matches!(
            check_hours("10:00", "10:00"),
            Err(ApiError::InvalidRange(_))
        ));
        assert!(matches!(
            check_hours("25:61", "10:00"),
            Err(ApiError::Validation(_))
        ));
    }
}
