//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct that generates the OpenAPI specification
//! for the REST API: project endpoints, the user directory, and health
//! probes. The document is served as JSON in debug builds and consumed by
//! external tooling.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Project tracker backend API",
        description = "HTTP interface for project rosters, time slots, and the user directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::patch_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::rollover_weekly_updates,
        crate::inbound::http::users::list_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::Project,
        crate::domain::ProjectDraft,
        crate::domain::ProjectPatch,
        crate::domain::User,
        crate::inbound::http::projects::RolloverResponse,
    )),
    tags(
        (name = "projects", description = "Project roster and time-slot management"),
        (name = "users", description = "User directory reads"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
