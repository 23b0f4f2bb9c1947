use serde::{Deserialize, Serialize};

/// One stored opening-hours record. `date` is unique; `special_note`
/// non-empty marks the date as special; timestamps are store-managed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRecord {
    pub id: i64,
    pub date: String,
    pub opening_time: String,
    pub closing_time: String,
    pub special_note: String,
    pub is_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveDateRequest {
    pub date: String,
    pub opening_time: String,
    pub closing_time: String,
    #[serde(default)]
    pub special_note: String,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

/// Bulk range-apply: one set of values written to every date in the
/// inclusive `start_date..=end_date` window.
#[derive(Debug, Deserialize)]
pub struct ApplyRangeRequest {
    pub start_date: String,
    pub end_date: String,
    pub opening_time: String,
    pub closing_time: String,
    #[serde(default)]
    pub special_note: String,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub enabled_only: Option<bool>,
    pub order: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarPageQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub months: Option<u32>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPageQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub limit: Option<u32>,
    pub title: Option<String>,
}

/// Terminal outcome of a bulk range-apply: per-date failures are
/// counted, never short-circuited.
#[derive(Debug, Serialize, Deserialize)]
pub struct RangeSummary {
    pub total: u32,
    pub saved: u32,
    pub errors: u32,
}

/// Uniform API response envelope: `{success, data?, message?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl Envelope<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}
