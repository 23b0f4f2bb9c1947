use crate::errors::ApiError;
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

/// Single authorization gate for every write route, run before any
/// validation or persistence. Missing credentials are 401, wrong
/// credentials 403, and an unconfigured token rejects all writes.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.admin_token.as_deref() else {
        warn!("write request rejected: no admin token configured");
        return Err(ApiError::forbidden("Administrative access is not configured"));
    };

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match presented {
        None => Err(ApiError::unauthorized("Missing bearer token")),
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("write request rejected: bad admin token");
            Err(ApiError::forbidden("Invalid bearer token"))
        }
    }
}
