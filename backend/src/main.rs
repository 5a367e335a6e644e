//! Backend entry-point: wires the REST surface to the PostgreSQL adapters.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{DirectoryService, ProjectService};
use backend::inbound::http::health::{live, ready, HealthState};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{projects, users};
use backend::outbound::persistence::{
    DbPool, DieselProjectRepository, DieselUserRepository, PoolConfig,
};

/// Server configuration, sourced from flags or the environment.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Project tracker backend server")]
struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
    /// Address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: String,
    /// Maximum number of pooled database connections.
    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 10)]
    pool_size: u32,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = Config::parse();
    let pool = DbPool::new(
        PoolConfig::new(config.database_url.clone()).with_max_size(config.pool_size),
    )
    .await
    .map_err(std::io::Error::other)?;

    let state = HttpState::new(
        ProjectService::new(Arc::new(DieselProjectRepository::new(pool.clone()))),
        DirectoryService::new(Arc::new(DieselUserRepository::new(pool))),
    );

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the probes stay reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), state.clone())
    })
    .bind(config.bind_addr.as_str())?;

    info!(addr = %config.bind_addr, "starting server");
    health_state.mark_ready();
    server.run().await
}

fn build_app(
    health_state: web::Data<HealthState>,
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(projects::rollover_weekly_updates)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::patch_project)
        .service(projects::delete_project)
        .service(users::list_users);

    let app = App::new()
        .app_data(health_state)
        .app_data(web::Data::new(state))
        .app_data(backend::inbound::http::json_config())
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));

    app
}

#[cfg(debug_assertions)]
async fn openapi_json() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(ApiDoc::openapi())
}
