/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use workboard_api::{app::{build_router, AppState}, config::Config};
/// use workboard_shared::notify::{LogMailer, NotificationDispatcher};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let mailer = NotificationDispatcher::spawn(Arc::new(LogMailer));
/// let state = AppState::new(pool, mailer, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use workboard_shared::notify::NotificationDispatcher;

use crate::{
    config::Config,
    services::{ProjectService, TaskService, UserService},
};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; the pool
/// and dispatcher handles are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Fire-and-forget email dispatch handle
    pub mailer: NotificationDispatcher,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state.
    pub fn new(db: PgPool, mailer: NotificationDispatcher, config: Config) -> Self {
        Self {
            db,
            mailer,
            config: Arc::new(config),
        }
    }

    /// Builds a user service bound to this state.
    pub fn user_service(&self) -> UserService {
        UserService::new(
            self.db.clone(),
            self.mailer.clone(),
            self.config.notify.from_address.clone(),
        )
    }

    /// Builds a project service bound to this state.
    pub fn project_service(&self) -> ProjectService {
        ProjectService::new(self.db.clone())
    }

    /// Builds a task service bound to this state.
    pub fn task_service(&self) -> TaskService {
        TaskService::new(
            self.db.clone(),
            self.mailer.clone(),
            self.config.notify.from_address.clone(),
            self.config.notify.task_link_base.clone(),
        )
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check
/// └── /v1/                          # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /login
///     │   └── POST /forgot-password
///     ├── /users/                   # CRUD + filter + per-user tasks
///     ├── /projects/                # CRUD + per-project tasks
///     └── /tasks/                   # CRUD + filter/search/ending-today
/// ```
///
/// Handlers return the response envelope with a plain `200 OK` status line;
/// the envelope's `status_code` carries the application-level verdict.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let auth_routes = Router::new()
        .route("/login", post(routes::auth::login))
        .route("/forgot-password", post(routes::auth::forgot_password));

    let user_routes = Router::new()
        .route(
            "/",
            post(routes::users::create)
                .put(routes::users::update)
                .get(routes::users::list),
        )
        .route("/filter", get(routes::users::filter))
        .route(
            "/:id",
            get(routes::users::get_by_id).delete(routes::users::delete),
        )
        .route("/:id/tasks", get(routes::users::tasks_by_user));

    let project_routes = Router::new()
        .route(
            "/",
            post(routes::projects::create)
                .put(routes::projects::update)
                .get(routes::projects::list),
        )
        .route("/:id", get(routes::projects::get_by_id))
        .route("/:id/tasks", get(routes::projects::tasks));

    let task_routes = Router::new()
        .route(
            "/",
            post(routes::tasks::create)
                .put(routes::tasks::update)
                .get(routes::tasks::list),
        )
        .route("/filter", get(routes::tasks::filter))
        .route("/search", post(routes::tasks::search))
        .route("/ending-today", get(routes::tasks::ending_today))
        .route("/:id", get(routes::tasks::get_by_id));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
