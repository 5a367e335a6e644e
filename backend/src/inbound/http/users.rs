//! User directory REST handlers.
//!
//! ```text
//! GET /api/v1/users   List directory users
//! ```

use actix_web::{get, web, HttpResponse};

use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// List every directory user ordered by display name.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Directory users", body = [crate::domain::User]),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let users = state.directory.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, web, App};
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{MockProjectRepository, MockUserRepository};
    use crate::domain::{DirectoryService, ProjectService, User, UserId};

    #[actix_web::test]
    async fn lists_users_as_json() {
        let mut users = MockUserRepository::new();
        users.expect_list_all().return_once(|| {
            Ok(vec![User {
                id: UserId::new("u1").expect("valid id"),
                name: "Alice Zhang".to_owned(),
                email: Some("alice@example.com".to_owned()),
                avatar_url: None,
            }])
        });
        let state = HttpState::new(
            ProjectService::new(Arc::new(MockProjectRepository::new())),
            DirectoryService::new(Arc::new(users)),
        );

        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::scope("/api/v1").service(list_users)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/users")
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["id"], "u1");
        assert_eq!(body[0]["email"], "alice@example.com");
        assert!(body[0].get("avatarUrl").is_none());
    }
}
