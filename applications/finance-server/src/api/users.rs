/// Staff account routes
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use campus_core::User;

/// GET /users
pub async fn list_users(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<User>>> {
    let users = campus_storage::users::get_all(&app_state.pool).await?;
    Ok(Json(users))
}
