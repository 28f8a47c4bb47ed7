use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use gym_core::{Client, ClientUpdate, EmailType, Payment, RegistrationRequest};
use gym_ledger::BalanceSummary;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub client: Client,
    pub welcome_email_sent: bool,
}

#[derive(Debug, Serialize)]
pub struct ClientDetails {
    #[serde(flatten)]
    pub client: Client,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Serialize)]
pub struct DeleteClientResponse {
    pub client_id: String,
    pub payments_removed: usize,
    pub emails_removed: usize,
}

pub(crate) async fn load_client(state: &AppState, client_id: &str) -> Result<Client, AppError> {
    state
        .clients
        .get_client(client_id)
        .await?
        .ok_or_else(|| AppError::NotFoundError(format!("Client {} not found", client_id)))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/clients/register
pub async fn register_client(
    State(state): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    req.validate()?;

    let now = Utc::now();
    let client_id = state.clients.allocate_client_id().await?;
    let client = Client::register(client_id, req, now, state.offset)?;
    state.clients.insert_client(&client).await?;
    tracing::info!("Registered client {} ({})", client.client_id, client.name);

    // The registration stands even if the welcome email bounces
    let message = state.templates.welcome(&client, state.ledger.total_due(&client));
    let welcome_email_sent = state
        .notifier
        .send(&client.client_id, EmailType::Welcome, &message, now)
        .await
        .is_ok();

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            client,
            welcome_email_sent,
        }),
    ))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<ClientDetails>, AppError> {
    let client = load_client(&state, &client_id).await?;
    let payments = state.payments.list_payments(&client.client_id).await?;
    Ok(Json(ClientDetails { client, payments }))
}

/// GET /api/clients?search=
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Client>>, AppError> {
    let term = query.search.unwrap_or_default();
    let clients = state
        .clients
        .list_clients()
        .await?
        .into_iter()
        .filter(|c| c.matches_search(&term))
        .collect();
    Ok(Json(clients))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(update): Json<ClientUpdate>,
) -> Result<Json<Client>, AppError> {
    let mut client = load_client(&state, &client_id).await?;
    update.apply(&mut client, Utc::now(), state.offset)?;
    state.clients.update_client(&client).await?;
    tracing::info!("Updated client {}", client.client_id);
    Ok(Json(client))
}

/// DELETE /api/clients/{id}
/// Removes the client with its payment history and email log
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<DeleteClientResponse>, AppError> {
    let client = load_client(&state, &client_id).await?;

    let payments_removed = state.payments.delete_payments(&client.client_id).await?;
    let emails_removed = state.emails.delete_emails(&client.client_id).await?;
    if !state.clients.delete_client(&client.client_id).await? {
        return Err(AppError::NotFoundError(format!("Client {} not found", client_id)));
    }

    tracing::info!(
        "Deleted client {} ({} payments, {} emails)",
        client.client_id,
        payments_removed,
        emails_removed
    );
    Ok(Json(DeleteClientResponse {
        client_id: client.client_id,
        payments_removed,
        emails_removed,
    }))
}

/// GET /api/clients/{id}/balance
pub async fn client_balance(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<BalanceSummary>, AppError> {
    let client = load_client(&state, &client_id).await?;
    let payments = state.payments.list_payments(&client.client_id).await?;
    Ok(Json(state.ledger.summarize(&client, &payments)))
}
