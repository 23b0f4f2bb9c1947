use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::error;

/// Display and behavior settings, loaded once at startup and shared
/// read-only with whichever component needs them. Served verbatim by
/// `GET /api/settings`, so nothing secret lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub colors: ColorSettings,
    pub defaults: DefaultHours,
    pub legend_text: String,
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: ColorSettings::default(),
            defaults: DefaultHours::default(),
            legend_text: String::new(),
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub enabled_bg: String,
    pub disabled_bg: String,
    pub text: String,
    pub special_highlight: String,
    pub primary_accent: String,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            enabled_bg: "#4CAF50".to_string(),
            disabled_bg: "#f5f5f5".to_string(),
            text: "#333333".to_string(),
            special_highlight: "#FF9800".to_string(),
            primary_accent: "#2196F3".to_string(),
        }
    }
}

/// Times seeding the admin form when a previously-unset date is opened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultHours {
    pub opening_time: String,
    pub closing_time: String,
}

impl Default for DefaultHours {
    fn default() -> Self {
        Self {
            opening_time: "10:00".to_string(),
            closing_time: "18:00".to_string(),
        }
    }
}

/// Day and month names for the rendered views. Sunday-first, matching
/// the grid's week layout. Overridable through the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    pub day_names: Vec<String>,
    pub month_names: Vec<String>,
    pub closed_label: String,
    pub open_label: String,
    pub hours_label: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            day_names: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]
            .map(String::from)
            .to_vec(),
            month_names: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from)
            .to_vec(),
            closed_label: "Closed".to_string(),
            open_label: "Open".to_string(),
            hours_label: "Opening hours:".to_string(),
        }
    }
}

impl Locale {
    /// Full name for a Sunday-first weekday index (0..=6).
    pub fn day_name(&self, index: usize) -> &str {
        self.day_names.get(index).map(String::as_str).unwrap_or("")
    }

    /// Name for a calendar month (1..=12).
    pub fn month_name(&self, month: u32) -> &str {
        self.month_names
            .get(month.saturating_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("DB_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("data/hours.db")
}

pub fn resolve_settings_path() -> PathBuf {
    if let Ok(path) = env::var("SETTINGS_PATH") {
        return PathBuf::from(path);
    }
    PathBuf::from("data/settings.json")
}

/// Token gating the write routes. Unset means writes are always
/// rejected, which is the safe default for a fresh deployment.
pub fn admin_token() -> Option<String> {
    env::var("ADMIN_TOKEN").ok().filter(|token| !token.is_empty())
}

/// Tolerant load: a missing file means defaults, a broken file is
/// logged and replaced by defaults rather than refusing to start.
pub async fn load_settings(path: &Path) -> Settings {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(settings) => settings,
            Err(err) => {
                error!("failed to parse settings file: {err}");
                Settings::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            error!("failed to read settings file: {err}");
            Settings::default()
        }
    }
}
