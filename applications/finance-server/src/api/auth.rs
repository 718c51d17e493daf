/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    extract::{ApiForm, ApiJson},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use campus_core::{CreateUser, Role, User};
use campus_storage::StorageError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /signup
pub async fn signup(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let username = req.username.trim();
    if username.is_empty() {
        return Err(ServerError::BadRequest("username is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(ServerError::BadRequest("password is required".to_string()));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user = campus_storage::users::create(
        &app_state.pool,
        CreateUser {
            username: username.to_string(),
            password_hash,
            full_name: req.full_name,
            role: req.role,
        },
    )
    .await
    .map_err(|e| match e {
        StorageError::Duplicate(_) => ServerError::DuplicateUser(username.to_string()),
        other => other.into(),
    })?;

    tracing::info!(username = %user.username, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /login
pub async fn login(
    State(app_state): State<AppState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Json<TokenResponse>> {
    let (user, password_hash) =
        campus_storage::users::get_with_password_hash(&app_state.pool, &form.username)
            .await?
            .ok_or(ServerError::InvalidCredentials)?;

    if !user.is_active {
        return Err(ServerError::InvalidCredentials);
    }

    if !app_state
        .auth_service
        .verify_password(&form.password, &password_hash)?
    {
        tracing::warn!(username = %form.username, "Login failed: wrong password");
        return Err(ServerError::InvalidCredentials);
    }

    let access_token = app_state.auth_service.issue_session_token(&user.username)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
