use std::fmt;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequestBody>,
) -> Result<ApiSuccess<CreateSessionResponseData>, ApiError> {
    state
        .session_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateSessionRequestBody {
    email: String,
    password: String,
}

impl fmt::Debug for CreateSessionRequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateSessionRequestBody")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSessionResponseData {
    pub user_id: String,
    pub token: String,
}

impl From<&Session> for CreateSessionResponseData {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.to_string(),
            token: session.token.clone(),
        }
    }
}
