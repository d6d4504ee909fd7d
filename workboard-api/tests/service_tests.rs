/// Integration tests for the Workboard services
///
/// These verify the envelope contract end-to-end against a real database:
/// - create/lookup roundtrips
/// - the not-found rules (and the deliberate inconsistencies around them)
/// - login and the password-reset flow
/// - criteria filtering as intersection
/// - notification dispatch on task create/update
///
/// Every test skips itself when `DATABASE_URL` is not set.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use common::TestContext;
use tower::ServiceExt;
use workboard_shared::models::project::UpdateProject;
use workboard_shared::models::task::{CreateTask, Task, TaskFilter, UpdateTask};
use workboard_shared::models::user::{UpdateUser, User};

const PASSWORD: &str = "integration-password";

macro_rules! ctx_or_skip {
    () => {
        match TestContext::new().await {
            Some(ctx) => ctx,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            }
        }
    };
}

#[tokio::test]
async fn test_health_reports_connected() {
    let ctx = ctx_or_skip!();

    let response = ctx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["database"], "connected");
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_create_task_roundtrip_and_notification() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;

    // The concrete scenario: status 1 (Doing), Jan 1 - Jan 10 2024
    let res = ctx
        .state
        .task_service()
        .create(Some(CreateTask {
            name: "Design API".to_string(),
            code: common::unique("WB"),
            description: String::new(),
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            status: 1,
            project_id: project.id,
            user_id: user.id,
        }))
        .await;

    assert_eq!(res.status_code, 200);
    assert_eq!(res.data, Some(1));

    // Listed for the assignee with status and display-formatted dates
    let views = ctx
        .state
        .user_service()
        .get_tasks_by_user(user.id, 0)
        .await;
    assert_eq!(views.status_code, 200);
    let views = views.data.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "Design API");
    assert_eq!(views[0].status, 1);
    assert_eq!(views[0].start_date, "01/01/2024");
    assert_eq!(views[0].end_date, "01/10/2024");

    // Exactly one notification, to the assignee's stored email, body "Doing"
    assert!(common::wait_for(|| async { ctx.mailer.sent().len() == 1 }, 5).await);
    let sent = ctx.mailer.sent();
    assert_eq!(sent[0].to, user.email);
    assert!(sent[0].html_body.contains("Doing"));
    assert!(sent[0].html_body.contains("Design API"));
}

#[tokio::test]
async fn test_task_update_notifies_assignee_again() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    let task = common::create_task(&ctx, "Initial name", project.id, user.id, 0).await;

    let res = ctx
        .state
        .task_service()
        .update(Some(UpdateTask {
            id: task.id,
            name: "Renamed task".to_string(),
            code: task.code.clone(),
            description: task.description.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
            status: 2,
            project_id: task.project_id,
            user_id: task.user_id,
        }))
        .await;

    assert_eq!(res.status_code, 200);

    // The update (creating the task above went through the store directly,
    // so this is the only dispatch)
    assert!(common::wait_for(|| async { ctx.mailer.sent().len() == 1 }, 5).await);
    let sent = ctx.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, user.email);
    assert!(sent[0].html_body.contains("Renamed task"));
    assert!(sent[0].html_body.contains("Done"));

    let updated = ctx.state.task_service().get_by_id(task.id).await;
    assert_eq!(updated.data.unwrap().name, "Renamed task");
}

#[tokio::test]
async fn test_create_then_get_by_id_returns_created_task() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    let task = common::create_task(&ctx, "Lookup target", project.id, user.id, 3).await;

    let res = ctx.state.task_service().get_by_id(task.id).await;

    assert_eq!(res.status_code, 200);
    assert_eq!(res.data, Some(task.clone()));

    // Deleting the row turns the lookup into a success with null data
    assert!(Task::delete(&ctx.db, task.id).await.unwrap());
    let gone = ctx.state.task_service().get_by_id(task.id).await;
    assert_eq!(gone.status_code, 200);
    assert!(gone.data.is_none());
}

#[tokio::test]
async fn test_update_missing_project_is_rejected_and_store_unchanged() {
    let ctx = ctx_or_skip!();

    let project = common::create_project(&ctx).await;

    let res = ctx
        .state
        .project_service()
        .update(Some(UpdateProject {
            id: -1,
            name: "Never applied".to_string(),
            code: project.code.clone(),
            description: project.description.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
        }))
        .await;

    assert_eq!(res.status_code, 400);
    assert_eq!(res.message, "Project not found");

    let unchanged = ctx.state.project_service().get_by_id(project.id).await;
    assert_eq!(unchanged.data.unwrap().name, project.name);
}

#[tokio::test]
async fn test_update_missing_task_is_rejected() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    let task = common::create_task(&ctx, "Stays put", project.id, user.id, 1).await;

    let res = ctx
        .state
        .task_service()
        .update(Some(UpdateTask {
            id: -1,
            name: "Never applied".to_string(),
            code: task.code.clone(),
            description: String::new(),
            start_date: task.start_date,
            end_date: task.end_date,
            status: 4,
            project_id: project.id,
            user_id: user.id,
        }))
        .await;

    assert_eq!(res.status_code, 400);
    assert_eq!(res.message, "Task not found");

    // No notification for a rejected update
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(ctx.mailer.sent().is_empty());

    let unchanged = ctx.state.task_service().get_by_id(task.id).await;
    assert_eq!(unchanged.data.unwrap().name, "Stays put");
}

#[tokio::test]
async fn test_user_update_skips_existence_check() {
    let ctx = ctx_or_skip!();

    // Inherited inconsistency: overwriting a missing user still succeeds
    let res = ctx
        .state
        .user_service()
        .update(Some(UpdateUser {
            id: -1,
            user_name: common::unique("ghost"),
            email: "ghost@example.com".to_string(),
            name: "Ghost".to_string(),
        }))
        .await;

    assert_eq!(res.status_code, 200);
    assert_eq!(res.data, Some(1));
}

#[tokio::test]
async fn test_get_by_id_absence_is_success_with_null() {
    let ctx = ctx_or_skip!();

    let user = ctx.state.user_service().get_by_id(-1).await;
    assert_eq!(user.status_code, 200);
    assert!(user.data.is_none());

    let project = ctx.state.project_service().get_by_id(-1).await;
    assert_eq!(project.status_code, 200);
    assert!(project.data.is_none());

    let task = ctx.state.task_service().get_by_id(-1).await;
    assert_eq!(task.status_code, 200);
    assert!(task.data.is_none());
}

#[tokio::test]
async fn test_login_success_and_generic_failure() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let svc = ctx.state.user_service();

    let ok = svc.login(&user.user_name, PASSWORD).await;
    assert_eq!(ok.status_code, 200);
    assert_eq!(ok.data.as_ref().map(|u| u.id), Some(user.id));

    // Wrong password and unknown username answer identically
    let wrong_password = svc.login(&user.user_name, "not-the-password").await;
    let unknown_user = svc.login(&common::unique("nobody"), PASSWORD).await;

    assert_eq!(wrong_password.status_code, 500);
    assert_eq!(unknown_user.status_code, 500);
    assert_eq!(wrong_password.message, unknown_user.message);
    assert!(wrong_password.data.is_none());
}

#[tokio::test]
async fn test_login_response_never_carries_the_hash() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let res = ctx.state.user_service().login(&user.user_name, PASSWORD).await;

    let json = serde_json::to_string(&res).unwrap();
    assert!(!json.contains("password_hash"));
    assert!(!json.contains("argon2"));
}

#[tokio::test]
async fn test_filter_tasks_is_an_intersection() {
    let ctx = ctx_or_skip!();

    let alice = common::create_user(&ctx, PASSWORD).await;
    let bob = common::create_user(&ctx, PASSWORD).await;
    let p1 = common::create_project(&ctx).await;
    let p2 = common::create_project(&ctx).await;

    let t1 = common::create_task(&ctx, "t1", p1.id, alice.id, 1).await;
    let t2 = common::create_task(&ctx, "t2", p1.id, bob.id, 2).await;
    let _t3 = common::create_task(&ctx, "t3", p2.id, alice.id, 1).await;

    let svc = ctx.state.task_service();

    let by_project = svc
        .filter_tasks(Some(TaskFilter {
            project_id: Some(p1.id),
            ..Default::default()
        }))
        .await;
    assert_eq!(by_project.status_code, 200);
    assert_eq!(by_project.message, "Filter success");
    let mut ids: Vec<i32> = by_project.data.unwrap().iter().map(|v| v.id).collect();
    ids.sort();
    assert_eq!(ids, vec![t1.id, t2.id]);

    // AND, never union: project + assignee narrows to one
    let combined = svc
        .filter_tasks(Some(TaskFilter {
            project_id: Some(p1.id),
            user_id: Some(alice.id),
            ..Default::default()
        }))
        .await;
    let ids: Vec<i32> = combined.data.unwrap().iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![t1.id]);

    // An unmatched third criterion empties the result
    let empty = svc
        .filter_tasks(Some(TaskFilter {
            project_id: Some(p1.id),
            user_id: Some(alice.id),
            status: Some(4),
            ..Default::default()
        }))
        .await;
    assert_eq!(empty.data.unwrap().len(), 0);
}

#[tokio::test]
async fn test_text_filter_is_case_sensitive() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    let marker = common::unique("Marker");
    common::create_task(&ctx, &format!("Task {marker}"), project.id, user.id, 0).await;

    let svc = ctx.state.task_service();

    let hit = svc.filter(Some(marker.clone())).await;
    assert_eq!(hit.data.unwrap().len(), 1);

    let miss = svc.filter(Some(marker.to_uppercase())).await;
    assert_eq!(miss.data.unwrap().len(), 0);
}

#[tokio::test]
async fn test_user_filter_matches_display_name() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;

    let res = ctx.state.user_service().filter(Some(user.name.clone())).await;

    assert_eq!(res.status_code, 200);
    let names: Vec<String> = res.data.unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec![user.name]);
}

#[tokio::test]
async fn test_tasks_by_user_narrowed_by_status() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    common::create_task(&ctx, "doing", project.id, user.id, 1).await;
    common::create_task(&ctx, "done", project.id, user.id, 2).await;

    let svc = ctx.state.user_service();

    assert_eq!(
        svc.get_tasks_by_user(user.id, 0).await.data.unwrap().len(),
        2
    );
    let doing = svc.get_tasks_by_user(user.id, 1).await.data.unwrap();
    assert_eq!(doing.len(), 1);
    assert_eq!(doing[0].name, "doing");
    assert_eq!(
        svc.get_tasks_by_user(user.id, 7).await.data.unwrap().len(),
        0
    );
}

#[tokio::test]
async fn test_project_tasks_listing() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let project = common::create_project(&ctx).await;
    let other = common::create_project(&ctx).await;
    let task = common::create_task(&ctx, "in project", project.id, user.id, 0).await;
    common::create_task(&ctx, "elsewhere", other.id, user.id, 0).await;

    let res = ctx.state.project_service().get_tasks(project.id).await;

    assert_eq!(res.status_code, 200);
    let tasks = res.data.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);
}

#[tokio::test]
async fn test_forgot_password_stores_token_and_emails_it() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let svc = ctx.state.user_service();

    let res = svc.forgot_password(&user.user_name, &user.email).await;
    assert_eq!(res.status_code, 200);
    assert_eq!(res.message, "Forgot password success");

    let stored = User::find_by_id(&ctx.db, user.id).await.unwrap().unwrap();
    let token = stored.reset_token.expect("reset token should be stored");
    assert!(stored.reset_token_expires_at.is_some());

    assert!(common::wait_for(|| async { ctx.mailer.sent().len() == 1 }, 5).await);
    let sent = ctx.mailer.sent();
    assert_eq!(sent[0].to, user.email);
    assert!(sent[0].html_body.contains(&token));
    // The password itself never leaves the system
    assert!(!sent[0].html_body.contains(PASSWORD));

    let miss = svc.forgot_password(&user.user_name, "other@example.com").await;
    assert_eq!(miss.status_code, 400);
    assert_eq!(miss.message, "User does not exist");
}

#[tokio::test]
async fn test_user_delete_and_repeat_delete() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;
    let svc = ctx.state.user_service();

    let first = svc.delete(user.id).await;
    assert_eq!(first.status_code, 200);

    let second = svc.delete(user.id).await;
    assert_eq!(second.status_code, 400);
    assert_eq!(second.message, "User not found");

    let gone = svc.get_by_id(user.id).await;
    assert_eq!(gone.status_code, 200);
    assert!(gone.data.is_none());
}

#[tokio::test]
async fn test_project_update_roundtrip() {
    let ctx = ctx_or_skip!();

    let project = common::create_project(&ctx).await;
    let svc = ctx.state.project_service();

    let res = svc
        .update(Some(UpdateProject {
            id: project.id,
            name: "Renamed project".to_string(),
            code: project.code.clone(),
            description: project.description.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
        }))
        .await;
    assert_eq!(res.status_code, 200);
    assert_eq!(res.data, Some(1));

    let fetched = svc.get_by_id(project.id).await;
    assert_eq!(fetched.data.unwrap().name, "Renamed project");
}

#[tokio::test]
async fn test_login_endpoint_over_http() {
    let ctx = ctx_or_skip!();

    let user = common::create_user(&ctx, PASSWORD).await;

    let request = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "user_name": user.user_name,
                "password": PASSWORD,
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();

    // The HTTP status line stays 200; the envelope carries the verdict
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status_code"], 200);
    assert_eq!(json["data"]["user_name"], user.user_name.as_str());
    assert!(json["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_malformed_body_flows_into_envelope_rejection() {
    let ctx = ctx_or_skip!();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/tasks")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status_code"], 400);
    assert!(json["data"].is_null());
    assert_eq!(json["message"], "Invalid payload");
}
