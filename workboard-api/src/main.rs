//! # Workboard API Server
//!
//! REST backend for the Workboard project/task tracker: users, projects,
//! tasks, filtering, login, and email notifications on task changes.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/workboard cargo run -p workboard-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workboard_api::{
    app::{build_router, AppState},
    config::Config,
};
use workboard_shared::{
    db::{
        migrations,
        pool::{self, DatabaseConfig},
    },
    notify::{LogMailer, Mailer, NotificationDispatcher, SmtpMailer},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workboard_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        "Workboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    migrations::ensure_database_exists(&config.database.url).await?;
    let db = pool::create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    migrations::run_migrations(&db).await?;

    let mailer: Arc<dyn Mailer> = match config.notify.smtp.clone() {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "SMTP transport configured");
            Arc::new(SmtpMailer::new(smtp)?)
        }
        None => {
            tracing::info!("SMTP not configured, emails will be logged");
            Arc::new(LogMailer)
        }
    };
    let dispatcher = NotificationDispatcher::spawn(mailer);

    let bind_address = config.bind_address();
    let state = AppState::new(db, dispatcher, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
