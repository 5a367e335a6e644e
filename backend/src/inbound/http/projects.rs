//! Project REST handlers.
//!
//! ```text
//! GET    /api/v1/projects            List projects (optionally by id)
//! POST   /api/v1/projects            Create a project
//! PATCH  /api/v1/projects/{id}       Partially update a project
//! DELETE /api/v1/projects/{id}       Delete a project
//! POST   /api/v1/projects/rollover   Roll weekly updates into last week
//! ```

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ProjectDraft, ProjectId, ProjectPatch};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for the project list endpoint.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectsQuery {
    /// Comma-separated project ids; omit to list every project.
    pub ids: Option<String>,
}

/// Response body of the weekly rollover endpoint.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolloverResponse {
    pub updated_project_ids: Vec<ProjectId>,
}

fn parse_id(raw: &str) -> Result<ProjectId, Error> {
    ProjectId::new(raw)
        .map_err(|err| Error::invalid_request(format!("invalid project id {raw:?}: {err}")))
}

/// Parse the `ids` filter; an empty filter means "all projects".
fn parse_ids(raw: Option<&str>) -> Result<Option<Vec<ProjectId>>, Error> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_id)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if ids.is_empty() { None } else { Some(ids) })
}

/// List projects with their rosters and time slots, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(ProjectsQuery),
    responses(
        (status = 200, description = "Projects with rosters and time slots", body = [crate::domain::Project]),
        (status = 400, description = "Invalid id filter", body = crate::domain::Error),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    query: web::Query<ProjectsQuery>,
) -> ApiResult<HttpResponse> {
    let ids = parse_ids(query.ids.as_deref())?;
    let projects = state.projects.load_projects(ids).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Create a project and return the stored record.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = ProjectDraft,
    responses(
        (status = 201, description = "Project created", body = crate::domain::Project),
        (status = 400, description = "Malformed payload", body = crate::domain::Error),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    payload: web::Json<ProjectDraft>,
) -> ApiResult<HttpResponse> {
    let project = state.projects.create_project(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Partially update a project and return the merged snapshot.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}",
    request_body = ProjectPatch,
    responses(
        (status = 200, description = "Merged project snapshot", body = crate::domain::Project),
        (status = 400, description = "Malformed payload", body = crate::domain::Error),
        (status = 404, description = "Unknown project", body = crate::domain::Error),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    params(("project_id" = String, Path, description = "Project identifier")),
    tags = ["projects"],
    operation_id = "patchProject"
)]
#[patch("/projects/{project_id}")]
pub async fn patch_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProjectPatch>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path.into_inner())?;
    let project = state
        .projects
        .patch_project(id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Delete a project together with its time-slot rows.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}",
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Unknown project", body = crate::domain::Error),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    params(("project_id" = String, Path, description = "Project identifier")),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{project_id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path.into_inner())?;
    state.projects.delete_project(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Copy each non-empty weekly update into its last-week column.
#[utoipa::path(
    post,
    path = "/api/v1/projects/rollover",
    responses(
        (status = 200, description = "Ids of rolled-over projects", body = RolloverResponse),
        (status = 503, description = "Database unavailable", body = crate::domain::Error)
    ),
    tags = ["projects"],
    operation_id = "rolloverWeeklyUpdates"
)]
#[post("/projects/rollover")]
pub async fn rollover_weekly_updates(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let updated_project_ids = state.projects.rollover_weekly_updates().await?;
    Ok(HttpResponse::Ok().json(RolloverResponse {
        updated_project_ids,
    }))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
