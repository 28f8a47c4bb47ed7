use axum::{
    http::Method,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod clients;
pub mod emails;
pub mod error;
pub mod middleware;
pub mod payments;
pub mod quotes;
pub mod state;
pub mod worker;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let admin = axum::middleware::from_fn_with_state(state.clone(), middleware::admin_auth_middleware);

    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/admin/login", post(auth::login_admin))
        .route("/api/quotes", post(quotes::preview_quote))
        .route("/api/clients/register", post(clients::register_client))
        .route("/api/clients/{id}/quote", get(quotes::client_quote))
        .route("/api/clients/{id}/checkout", post(quotes::checkout));

    let protected = Router::new()
        .route("/api/clients", get(clients::list_clients))
        .route("/api/clients/{id}/balance", get(clients::client_balance))
        .route("/api/payments", post(payments::record_payment))
        .route("/api/payments/{id}", get(payments::payment_history))
        .route("/api/reports/revenue", get(payments::revenue_report))
        .route("/api/emails/send", post(emails::send_email))
        .route("/api/emails/{id}", get(emails::email_history))
        .route("/api/birthdays/run", post(emails::run_birthdays))
        .route_layer(admin.clone());

    // Reading a client is public, editing is admin-only
    let client_record = get(clients::get_client).merge(
        put(clients::update_client)
            .delete(clients::delete_client)
            .route_layer(admin),
    );

    Router::new()
        .merge(public)
        .merge(protected)
        .route("/api/clients/{id}", client_record)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}
