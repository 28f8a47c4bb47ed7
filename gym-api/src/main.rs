use anyhow::Context;
use gym_api::{app, worker::start_birthday_worker, AppState};
use gym_notify::LogMailer;
use gym_store::{Config, MemoryStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gym_api=debug,gym_notify=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting {} API on port {}", config.gym.name, config.server.port);

    let store = Arc::new(MemoryStore::new());
    let mailer = Arc::new(LogMailer::new(config.email.from_address.clone()));
    let app_state = AppState::from_config(&config, store, mailer).context("Invalid pricing tables")?;

    tokio::spawn(start_birthday_worker(
        app_state.birthdays.clone(),
        app_state.offset,
        config.gym.birthday_hour,
        config.gym.birthday_minute,
    ));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
