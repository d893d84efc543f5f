//! Teamdeck - Application Entry Point
//!
//! This is the main entry point for the Teamdeck server.

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use teamdeck::{
    Config,
    calendar::{CalendarSource, GoogleCalendarClient, UnconfiguredCalendarSource},
    create_router, db,
    notify::{LogNotifier, Notifier, SlackNotifier},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.rust_log.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if config.server.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Teamdeck server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    let notifier: Arc<dyn Notifier> = match SlackNotifier::from_config(&config.slack)? {
        Some(slack) => {
            tracing::info!(tokens = config.slack.bot_tokens.len(), "Slack notifications enabled");
            Arc::new(slack)
        }
        None => {
            tracing::warn!("SLACK_BOT_TOKEN not set, curator notices will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let calendar: Arc<dyn CalendarSource> = match GoogleCalendarClient::from_config(&config.calendar)? {
        Some(client) => {
            tracing::info!(
                calendars = config.calendar.calendar_ids.len(),
                principal = ?client.principal(),
                "Google Calendar sync enabled"
            );
            Arc::new(client)
        }
        None => {
            tracing::warn!("No Google credentials configured, calendar sync is disabled");
            Arc::new(UnconfiguredCalendarSource)
        }
    };

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state and router
    let state = AppState::new(db_pool, config, notifier, calendar);
    let app = create_router(state);

    // Start the server
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
