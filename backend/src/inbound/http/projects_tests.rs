//! Tests for project HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App};
use serde_json::{json, Value};

use super::*;
use crate::domain::ports::{
    MockProjectRepository, MockUserRepository, ProjectRepositoryError,
};
use crate::domain::project::{Project, ProjectDraft};
use crate::domain::{DirectoryService, ProjectService};

fn test_app(
    repo: MockProjectRepository,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        ProjectService::new(Arc::new(repo)),
        DirectoryService::new(Arc::new(MockUserRepository::new())),
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(crate::inbound::http::json_config())
        .service(
            web::scope("/api/v1")
                .service(rollover_weekly_updates)
                .service(list_projects)
                .service(create_project)
                .service(patch_project)
                .service(delete_project),
        )
}

fn stored_project(id: &str) -> Project {
    let draft: ProjectDraft = serde_json::from_value(json!({
        "name": "Checkout revamp",
        "backendDevelopers": [{ "userId": "u1" }],
    }))
    .expect("valid draft");
    Project::create(
        draft,
        ProjectId::new(id).expect("valid id"),
        chrono::Utc::now(),
    )
}

#[actix_web::test]
async fn list_projects_returns_roster_collections() {
    let mut repo = MockProjectRepository::new();
    repo.expect_load()
        .withf(|ids| ids.is_none())
        .return_once(|_| Ok(vec![stored_project("p1")]));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/projects")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body[0]["id"], "p1");
    assert_eq!(body[0]["backendDevelopers"][0]["userId"], "u1");
    assert!(body[0]["qaTesters"].as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn list_projects_forwards_id_filter() {
    let mut repo = MockProjectRepository::new();
    repo.expect_load()
        .withf(|ids| {
            ids.as_deref()
                .is_some_and(|ids| ids.len() == 2 && ids[0].as_str() == "p1")
        })
        .return_once(|_| Ok(Vec::new()));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/projects?ids=p1,p2")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn empty_id_filter_lists_everything() {
    let mut repo = MockProjectRepository::new();
    repo.expect_load()
        .withf(|ids| ids.is_none())
        .return_once(|_| Ok(Vec::new()));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/projects?ids=")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn create_project_returns_created_record() {
    let mut repo = MockProjectRepository::new();
    repo.expect_insert().return_once(|_| Ok(()));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/projects")
        .set_json(json!({ "priority": "urgent" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["name"], "Untitled project");
    assert_eq!(body["priority"], "urgent");
    assert!(body["id"].as_str().expect("id").starts_with('p'));
}

#[actix_web::test]
async fn patch_project_returns_merged_snapshot() {
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored_project("p1"))));
    repo.expect_update()
        .withf(|_, replace_slots| !replace_slots)
        .return_once(|_, _| Ok(true));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::patch()
        .uri("/api/v1/projects/p1")
        .set_json(json!({ "status": "in-progress" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["status"], "in-progress");
    assert_eq!(body["name"], "Checkout revamp");
}

#[actix_web::test]
async fn patch_with_roster_field_replaces_slots() {
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id()
        .return_once(|_| Ok(Some(stored_project("p1"))));
    repo.expect_update()
        .withf(|_, replace_slots| *replace_slots)
        .return_once(|_, _| Ok(true));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::patch()
        .uri("/api/v1/projects/p1")
        .set_json(json!({ "qaTesters": [] }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn patch_unknown_project_is_not_found() {
    let mut repo = MockProjectRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::patch()
        .uri("/api/v1/projects/missing")
        .set_json(json!({ "status": "done" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn patch_with_malformed_date_is_rejected() {
    let app = actix_test::init_service(test_app(MockProjectRepository::new())).await;
    let req = actix_test::TestRequest::patch()
        .uri("/api/v1/projects/p1")
        .set_json(json!({ "launchDate": "next tuesday" }))
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Malformed bodies use the standard error envelope, not plain text.
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn delete_project_returns_no_content() {
    let mut repo = MockProjectRepository::new();
    repo.expect_delete().return_once(|_| Ok(true));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::delete()
        .uri("/api/v1/projects/p1")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn delete_unknown_project_is_not_found() {
    let mut repo = MockProjectRepository::new();
    repo.expect_delete().return_once(|_| Ok(false));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::delete()
        .uri("/api/v1/projects/missing")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn rollover_reports_updated_ids() {
    let mut repo = MockProjectRepository::new();
    repo.expect_rollover_weekly_updates().return_once(|| {
        Ok(vec![
            ProjectId::new("p1").expect("valid id"),
            ProjectId::new("p2").expect("valid id"),
        ])
    });

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::post()
        .uri("/api/v1/projects/rollover")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["updatedProjectIds"], json!(["p1", "p2"]));
}

#[actix_web::test]
async fn repository_outage_maps_to_service_unavailable() {
    let mut repo = MockProjectRepository::new();
    repo.expect_load()
        .return_once(|_| Err(ProjectRepositoryError::connection("pool exhausted")));

    let app = actix_test::init_service(test_app(repo)).await;
    let req = actix_test::TestRequest::get()
        .uri("/api/v1/projects")
        .to_request();
    let res = actix_test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
