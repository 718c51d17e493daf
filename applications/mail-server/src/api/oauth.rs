/// OAuth consent routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use campus_mail::MailError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StartQuery {
    #[serde(default)]
    pub user: Option<String>,
}

/// Provider redirect back to us. `state` is the one-time value issued by `start`.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub message: String,
    pub user: String,
}

/// GET /oauth/start?user=ID - Send the user to the provider's consent page
pub async fn start(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<StartQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let identity = query.user.unwrap_or_else(|| app_state.default_identity.clone());
    let state = app_state
        .digest
        .credentials()
        .begin_authorization(&identity)
        .await?;

    let oauth = &app_state.oauth;
    let url = oauth
        .client
        .authorization_url(&oauth.redirect_uri, &oauth.scopes, &state)?;

    tracing::info!(identity = %identity, "Starting authorization");

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}

/// GET /oauth/callback?code=..&state=.. - Exchange the code and store the credential
pub async fn callback(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<CallbackQuery>, QueryRejection>,
) -> Result<Json<CallbackResponse>> {
    let Query(query) = query?;
    if let Some(error) = query.error {
        return Err(MailError::AuthExpired(format!("authorization denied: {}", error)).into());
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing code".to_string()))?;
    let state = query
        .state
        .ok_or_else(|| ServerError::BadRequest("missing state".to_string()))?;

    let oauth = &app_state.oauth;
    let credentials = app_state.digest.credentials();
    let identity = credentials.complete_authorization(&state).await?;
    let credential = credentials
        .exchange_authorization_code(&code, &oauth.redirect_uri, &oauth.client, &oauth.scopes)
        .await?;
    credentials.persist(&identity, &credential).await?;

    tracing::info!(identity = %identity, "Authorization complete");

    Ok(Json(CallbackResponse {
        message: "Authorization complete. You can now call /summarize-emails.".to_string(),
        user: identity,
    }))
}
