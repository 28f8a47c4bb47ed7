use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use gym_core::{EmailLogEntry, EmailType};
use gym_notify::BirthdayReport;
use serde::Deserialize;

use crate::{clients::load_client, error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub client_id: String,
    pub email_type: EmailType,
    /// Custom emails only; other types use their template's subject
    pub subject: Option<String>,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BirthdayRunRequest {
    /// Defaults to today in the gym's timezone
    pub date: Option<NaiveDate>,
}

/// POST /api/emails/send
pub async fn send_email(
    State(state): State<AppState>,
    Json(req): Json<SendEmailRequest>,
) -> Result<(StatusCode, Json<EmailLogEntry>), AppError> {
    let client = load_client(&state, &req.client_id).await?;

    let message = match req.email_type {
        EmailType::Welcome => state.templates.welcome(&client, state.ledger.total_due(&client)),
        EmailType::Birthday => state.templates.birthday(&client),
        EmailType::PaymentReminder => {
            let payments = state.payments.list_payments(&client.client_id).await?;
            let balance = state.ledger.summarize(&client, &payments);
            state
                .templates
                .payment_reminder(&client, balance.total_due, balance.total_paid)
        }
        EmailType::Custom => {
            if req.body.trim().is_empty() {
                return Err(AppError::ValidationError("Custom email body is required".to_string()));
            }
            state.templates.custom(&client, req.subject.as_deref(), &req.body)
        }
    };

    let entry = state
        .notifier
        .send(&client.client_id, req.email_type, &message, Utc::now())
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/emails/{client_id}
pub async fn email_history(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Vec<EmailLogEntry>>, AppError> {
    let client = load_client(&state, &client_id).await?;
    Ok(Json(state.emails.list_emails(&client.client_id).await?))
}

/// POST /api/birthdays/run
pub async fn run_birthdays(
    State(state): State<AppState>,
    body: Option<Json<BirthdayRunRequest>>,
) -> Result<Json<BirthdayReport>, AppError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let date = req.date.unwrap_or_else(|| state.today());

    let report = state.birthdays.run(date, Utc::now()).await?;
    Ok(Json(report))
}
