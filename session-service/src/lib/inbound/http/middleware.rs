use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Runs the access guard in front of protected routes.
///
/// On admission the resolved [`AuthenticatedUser`](crate::domain::session::models::AuthenticatedUser)
/// is stored in the request extensions for the handler.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let authenticated = state.access_guard.check(authorization).map_err(|rejection| {
        tracing::info!(
            uri = %req.uri(),
            reason = %rejection,
            "Request rejected by access guard"
        );
        ApiError::from(rejection)
    })?;

    req.extensions_mut().insert(authenticated);

    Ok(next.run(req).await)
}
