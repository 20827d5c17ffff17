use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;

/// Protected landing route; only reachable through the access guard.
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<DashboardResponseData>, ApiError> {
    let user = state
        .session_service
        .current_user(&authenticated.user_id)
        .await
        .map_err(|e| match e {
            SessionError::UserNotFound => {
                tracing::warn!(
                    user_id = %authenticated.user_id,
                    "Valid token for a user that no longer exists"
                );
                ApiError::Unauthorized("Unauthorized".to_string())
            }
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        DashboardResponseData {
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}
