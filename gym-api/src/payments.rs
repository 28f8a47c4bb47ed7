use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use gym_core::Payment;
use gym_ledger::{NewPayment, RevenueReport};
use serde::Deserialize;

use crate::{clients::load_client, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub client_id: String,
    #[serde(flatten)]
    pub payment: NewPayment,
}

/// POST /api/payments
pub async fn record_payment(
    State(state): State<AppState>,
    Json(req): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let client = load_client(&state, &req.client_id).await?;
    let history = state.payments.list_payments(&client.client_id).await?;

    let payment = state
        .ledger
        .record(&client, &history, req.payment, Utc::now(), state.offset)?;
    state.payments.add_payment(&payment).await?;

    tracing::info!(
        "Recorded payment of {} for client {}, {} remaining",
        payment.paid_amount,
        client.client_id,
        payment.remaining_amount
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/payments/{client_id}
pub async fn payment_history(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let client = load_client(&state, &client_id).await?;
    Ok(Json(state.payments.list_payments(&client.client_id).await?))
}

/// GET /api/reports/revenue
pub async fn revenue_report(State(state): State<AppState>) -> Result<Json<RevenueReport>, AppError> {
    let clients = state.clients.list_clients().await?;

    let mut summaries = Vec::with_capacity(clients.len());
    for client in &clients {
        let payments = state.payments.list_payments(&client.client_id).await?;
        summaries.push(state.ledger.summarize(client, &payments));
    }

    Ok(Json(gym_ledger::revenue_report(&summaries, Utc::now())))
}
