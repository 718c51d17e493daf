/// Inbox digest route
use crate::{error::Result, state::AppState};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use campus_mail::{EmailSummary, DEFAULT_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SummarizeQuery {
    #[serde(default)]
    pub count: Option<u32>,
    /// Mailbox owner; the configured default identity when absent
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub summaries: Vec<EmailSummary>,
}

/// GET /summarize-emails?count=N&user=ID
///
/// The service has no caller authentication of its own: anyone who can reach
/// it can read the digest of any identity with a stored credential. Deploy it
/// for a single operator or behind an authenticating proxy.
pub async fn summarize_emails(
    State(app_state): State<AppState>,
    query: std::result::Result<Query<SummarizeQuery>, QueryRejection>,
) -> Result<Json<SummariesResponse>> {
    let Query(query) = query?;
    let identity = query.user.as_deref().unwrap_or(&app_state.default_identity);
    let count = query.count.unwrap_or(DEFAULT_COUNT);

    let summaries = app_state.digest.summarize_inbox(identity, count).await?;

    Ok(Json(SummariesResponse { summaries }))
}
