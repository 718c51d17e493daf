/// Ledger routes
use crate::{
    error::{Result, ServerError},
    extract::ApiJson,
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use campus_core::{
    CreateTransaction, DateRange, FeePayment, Money, PaymentMethod, StudentId, Transaction,
    TransactionId, TransactionRecord, TransactionType, YearId,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct FeePaymentResponse {
    pub message: String,
    pub transaction_id: TransactionId,
}

/// A ledger entry as submitted; the recorder is the authenticated user
#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub transaction_type: TransactionType,
    pub amount: Money,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub reference_details: Option<String>,
    pub year_id: YearId,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// POST /transactions/fee-payment
pub async fn record_fee_payment(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(body): ApiJson<FeePayment>,
) -> Result<(StatusCode, Json<FeePaymentResponse>)> {
    let tx = campus_storage::transactions::record_fee_payment(
        &app_state.pool,
        body,
        auth.user().user_id,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeePaymentResponse {
            message: "Fee payment recorded successfully".to_string(),
            transaction_id: tx.transaction_id,
        }),
    ))
}

/// POST /transactions - Any ledger entry
pub async fn record_transaction(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(body): ApiJson<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>)> {
    let entry = CreateTransaction {
        transaction_type: body.transaction_type,
        amount: body.amount,
        transaction_date: body.transaction_date,
        description: body.description,
        student_id: body.student_id,
        category: body.category,
        payment_method: body.payment_method,
        reference_details: body.reference_details,
        recorded_by_user_id: auth.user().user_id,
        year_id: body.year_id,
    };

    let tx = campus_storage::transactions::record(&app_state.pool, entry).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

/// GET /transactions/history?start_date=..&end_date=..
pub async fn history(
    State(app_state): State<AppState>,
    _auth: AuthenticatedUser,
    query: std::result::Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<TransactionRecord>>> {
    let Query(query) = query.map_err(|e| ServerError::InvalidRange(e.body_text()))?;

    // Range check happens before any query runs
    let range = DateRange::new(query.start_date, query.end_date)?;
    let records = campus_storage::transactions::history(&app_state.pool, &range).await?;
    Ok(Json(records))
}
