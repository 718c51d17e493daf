/// Academic year routes
use crate::{
    error::Result,
    extract::{ApiJson, ApiPath},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use campus_core::{AcademicYear, CreateAcademicYear, YearId};

/// POST /academic-years
pub async fn create_year(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiJson(body): ApiJson<CreateAcademicYear>,
) -> Result<(StatusCode, Json<AcademicYear>)> {
    let year = campus_storage::academic_years::create(&app_state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

/// GET /academic-years
pub async fn list_years(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<AcademicYear>>> {
    let years = campus_storage::academic_years::get_all(&app_state.pool).await?;
    Ok(Json(years))
}

/// PUT /academic-years/:id/current - Make this the only current year
pub async fn set_current_year(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiPath(year_id): ApiPath<YearId>,
) -> Result<Json<AcademicYear>> {
    let year = campus_storage::academic_years::set_current(&app_state.pool, year_id).await?;

    tracing::info!(
        year = %year.year_name,
        by = %auth.user().username,
        "Current academic year changed"
    );

    Ok(Json(year))
}
