use crate::auth;
use crate::handlers;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    // Write routes sit behind one authorization gate; reads are public.
    let admin_routes = Router::new()
        .route("/api/dates", post(handlers::save_date))
        .route("/api/dates/range", post(handlers::apply_range))
        .route("/api/dates/:date", delete(handlers::delete_date))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(handlers::calendar_page))
        .route("/calendar", get(handlers::calendar_page))
        .route("/list", get(handlers::list_page))
        .route("/admin", get(handlers::admin_page))
        .route("/api/dates", get(handlers::list_dates))
        .route("/api/dates/:date", get(handlers::get_date))
        .route("/api/settings", get(handlers::get_settings))
        .merge(admin_routes)
        .with_state(state)
}
