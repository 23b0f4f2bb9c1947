pub mod app;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;
pub mod ui;
pub mod validate;

pub use app::router;
pub use state::AppState;
pub use store::{DateStore, ListFilter, SortOrder};
