/// Student routes
use crate::{
    error::{Result, ServerError},
    extract::{ApiJson, ApiPath},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use campus_core::{
    AssignAnnualFee, CreateStudent, FeeSummary, Money, StudentAnnualFee, StudentDetails,
    StudentId, YearId,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AssignFeeRequest {
    pub year_id: YearId,
    pub total_annual_fees: Money,
    #[serde(default)]
    pub notes: Option<String>,
}

/// POST /students
pub async fn create_student(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiJson(body): ApiJson<CreateStudent>,
) -> Result<(StatusCode, Json<StudentDetails>)> {
    if body.admission_number.trim().is_empty() {
        return Err(ServerError::BadRequest(
            "admission_number is required".to_string(),
        ));
    }

    let student = campus_storage::students::create(&app_state.pool, body).await?;
    Ok((StatusCode::CREATED, Json(StudentDetails::from(&student))))
}

/// GET /students
pub async fn list_students(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
) -> Result<Json<Vec<StudentDetails>>> {
    let students = campus_storage::students::get_all(&app_state.pool).await?;
    Ok(Json(students.iter().map(StudentDetails::from).collect()))
}

/// GET /students/:id/details
pub async fn student_details(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiPath(student_id): ApiPath<StudentId>,
) -> Result<Json<StudentDetails>> {
    let student = campus_storage::students::get_by_id(&app_state.pool, student_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Student not found: {}", student_id)))?;

    Ok(Json(StudentDetails::from(&student)))
}

/// POST /students/:id/fees - Assign the annual fee for one academic year
pub async fn assign_annual_fee(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiPath(student_id): ApiPath<StudentId>,
    ApiJson(body): ApiJson<AssignFeeRequest>,
) -> Result<(StatusCode, Json<StudentAnnualFee>)> {
    if body.total_annual_fees.cents() < 0 {
        return Err(ServerError::BadRequest(
            "total_annual_fees cannot be negative".to_string(),
        ));
    }

    let fee = campus_storage::annual_fees::assign(
        &app_state.pool,
        AssignAnnualFee {
            student_id,
            year_id: body.year_id,
            total_annual_fees: body.total_annual_fees,
            notes: body.notes,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(fee)))
}

/// GET /students/:id/fee-summary/:year_id
pub async fn fee_summary(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    ApiPath((student_id, year_id)): ApiPath<(StudentId, YearId)>,
) -> Result<Json<FeeSummary>> {
    let summary = campus_storage::fees::summary(&app_state.pool, student_id, year_id).await?;
    Ok(Json(summary))
}
