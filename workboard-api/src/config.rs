/// Configuration management for the API server
///
/// Loads configuration from environment variables (with `.env` support for
/// development) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `MAIL_FROM`: Sender address for notification emails
/// - `TASK_LINK_BASE`: Base URL for task deep links in emails
/// - `SMTP_HOST`/`SMTP_PORT`/`SMTP_USER`/`SMTP_PASSWORD`: SMTP transport;
///   without `SMTP_HOST` emails are logged instead of sent
/// - `RUST_LOG`: Log level filter

use std::env;

use workboard_shared::notify::SmtpConfig;

/// Default sender address when `MAIL_FROM` is not set
const DEFAULT_FROM_ADDRESS: &str = "noreply@workboard.local";

/// Default deep-link base when `TASK_LINK_BASE` is not set
const DEFAULT_TASK_LINK_BASE: &str = "http://localhost:8080/#/updatetask/";

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Notification configuration
    pub notify: NotifyConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Notification configuration
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Sender address for all outgoing email
    pub from_address: String,

    /// Base URL prepended to a task id to form the deep link in emails
    pub task_link_base: String,

    /// SMTP transport; `None` means log emails instead of sending
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric variable
    /// fails to parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let from_address =
            env::var("MAIL_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        let task_link_base =
            env::var("TASK_LINK_BASE").unwrap_or_else(|_| DEFAULT_TASK_LINK_BASE.to_string());

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            notify: NotifyConfig {
                from_address,
                task_link_base,
                smtp: SmtpConfig::from_env(),
            },
        })
    }

    /// Returns the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
