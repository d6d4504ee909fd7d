/// Common test utilities for integration tests
///
/// Integration tests need a real PostgreSQL database. [`TestContext::new`]
/// returns `None` when `DATABASE_URL` is not set so each test can skip
/// itself cleanly on machines without one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use workboard_api::app::{build_router, AppState};
use workboard_api::config::{ApiConfig, Config, DatabaseConfig, NotifyConfig};
use workboard_shared::auth::password::hash_password;
use workboard_shared::db::migrations::run_migrations;
use workboard_shared::models::project::{CreateProject, Project};
use workboard_shared::models::task::{CreateTask, Task};
use workboard_shared::models::user::{CreateUser, User};
use workboard_shared::notify::{MockMailer, NotificationDispatcher};

/// Test context containing the pool, router, state, and capturing mailer
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub state: AppState,
    pub mailer: MockMailer,
}

impl TestContext {
    /// Creates a fresh context, or `None` when `DATABASE_URL` is not set.
    pub async fn new() -> Option<Self> {
        let url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&url)
            .await
            .expect("failed to connect to test database");
        run_migrations(&db).await.expect("failed to run migrations");

        let mailer = MockMailer::new();
        let dispatcher = NotificationDispatcher::spawn(Arc::new(mailer.clone()));

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            notify: NotifyConfig {
                from_address: "noreply@workboard.local".to_string(),
                task_link_base: "http://localhost:8080/#/updatetask/".to_string(),
                smtp: None,
            },
        };

        let state = AppState::new(db.clone(), dispatcher, config);
        let app = build_router(state.clone());

        Some(Self {
            db,
            app,
            state,
            mailer,
        })
    }
}

/// Unique suffix so tests sharing a database never collide
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Creates a user with the given plaintext password (stored hashed)
pub async fn create_user(ctx: &TestContext, password: &str) -> User {
    User::create(
        &ctx.db,
        CreateUser {
            user_name: unique("user"),
            password_hash: hash_password(password).unwrap(),
            email: format!("{}@example.com", unique("mail")),
            name: format!("Test User {}", unique("n")),
        },
    )
    .await
    .expect("failed to create test user")
}

/// Creates a project spanning January 2024
pub async fn create_project(ctx: &TestContext) -> Project {
    Project::create(
        &ctx.db,
        CreateProject {
            name: unique("Project"),
            code: unique("PRJ"),
            description: "integration test project".to_string(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
        },
    )
    .await
    .expect("failed to create test project")
}

/// Creates a task running Jan 1 - Jan 10 2024 directly through the store
pub async fn create_task(
    ctx: &TestContext,
    name: &str,
    project_id: i32,
    user_id: i32,
    status: i32,
) -> Task {
    Task::create(
        &ctx.db,
        CreateTask {
            name: name.to_string(),
            code: unique("WB"),
            description: String::new(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            status,
            project_id,
            user_id,
        },
    )
    .await
    .expect("failed to create test task")
}

/// Polls a condition until it holds or the timeout elapses
pub async fn wait_for<F, Fut>(mut condition: F, timeout_secs: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeout_secs);

    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    false
}
