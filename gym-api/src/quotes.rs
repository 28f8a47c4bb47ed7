use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use gym_core::client::validate_membership;
use gym_core::{Client, Payment, ServiceSelection};
use gym_offer::Quote;
use serde::{Deserialize, Serialize};

use crate::{clients::load_client, error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub membership: ServiceSelection,
    pub membership_period: u32,
    /// Date the day offer is taken from; defaults to today
    pub date: Option<NaiveDate>,
    pub selected_offer: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOfferQuery {
    pub selected_offer: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub selected_offer: Option<u8>,
    #[serde(default)]
    pub paid_amount: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub client: Client,
    pub quote: Quote,
    pub payment: Option<Payment>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/quotes
/// Price a membership before registering
pub async fn preview_quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<Quote>, AppError> {
    validate_membership(&req.membership, req.membership_period)?;
    let date = req.date.unwrap_or_else(|| state.today());

    let quote = state
        .quotes
        .quote(&req.membership, req.membership_period, date, req.selected_offer)?;
    Ok(Json(quote))
}

/// GET /api/clients/{id}/quote
/// The day offer comes from the client's registration date
pub async fn client_quote(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Query(query): Query<SelectedOfferQuery>,
) -> Result<Json<Quote>, AppError> {
    let client = load_client(&state, &client_id).await?;
    let quote = state.quotes.quote(
        &client.membership,
        client.membership_period,
        client.registration_date(state.offset),
        query.selected_offer,
    )?;
    Ok(Json(quote))
}

/// POST /api/clients/{id}/checkout
/// Apply the chosen offer, store the final amount and take the first payment
pub async fn checkout(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let mut client = load_client(&state, &client_id).await?;
    let quote = state.quotes.quote(
        &client.membership,
        client.membership_period,
        client.registration_date(state.offset),
        req.selected_offer,
    )?;

    let history = state.payments.list_payments(&client.client_id).await?;
    let payment = state.ledger.checkout(
        &mut client,
        &history,
        &quote,
        req.paid_amount,
        req.notes,
        Utc::now(),
        state.offset,
    )?;

    state.clients.update_client(&client).await?;
    if let Some(payment) = &payment {
        state.payments.add_payment(payment).await?;
    }

    tracing::info!(
        "Client {} checked out at {} ({}% off)",
        client.client_id,
        quote.price.final_price,
        quote.price.discount_percentage
    );

    Ok(Json(CheckoutResponse {
        client,
        quote,
        payment,
    }))
}
