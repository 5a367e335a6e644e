//! PostgreSQL-backed project repository adapter.
//!
//! Projects are stored as one base row with JSONB role columns; their time
//! slots live denormalized in the `time_slots` table, one row per
//! (project, role, user, slot). Reads stitch the two together with exactly
//! two queries regardless of project count. Writes that touch the roster
//! replace the project's slot rows wholesale inside the same transaction as
//! the base-row write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::{debug, warn};

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::project::{Project, ProjectId, TeamMember};

use super::models::{NewProjectRow, ProjectChangeset, ProjectRow, TimeSlotRow};
use super::pool::{DbPool, PoolError};
use super::roster_slots::{attach_time_slots, roster_slot_rows};
use super::schema::{projects, time_slots};

/// Diesel-backed implementation of the project repository.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new project repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port persistence errors.
fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProjectRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to port persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    let error_message = error.to_string();
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                error = %error_message,
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            error = %error_message,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ProjectRepositoryError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            ProjectRepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => {
            ProjectRepositoryError::query(info.message().to_owned())
        }
        _ => ProjectRepositoryError::query(error_message),
    }
}

/// Decode one JSONB role column, tolerating malformed stored data.
fn decode_role(project_id: &str, role: &str, value: serde_json::Value) -> Vec<TeamMember> {
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(
            project_id,
            role_key = role,
            error = %err,
            "dropping undecodable role collection"
        );
        Vec::new()
    })
}

fn decode_collection<T>(project_id: &str, column: &str, value: serde_json::Value) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).unwrap_or_else(|err| {
        warn!(
            project_id,
            column,
            error = %err,
            "dropping undecodable stored collection"
        );
        Vec::new()
    })
}

/// Rebuild a domain project from its base row.
///
/// The roster comes back with whatever slot data was embedded in the JSONB
/// columns; callers must overwrite it from the `time_slots` table via
/// [`attach_time_slots`] before the project leaves the adapter.
fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let id = ProjectId::new(row.id.clone()).map_err(|err| {
        ProjectRepositoryError::query(format!("invalid stored project id {:?}: {err}", row.id))
    })?;

    let mut project = Project {
        id,
        name: row.name,
        priority: row.priority,
        status: row.status,
        business_problem: row.business_problem,
        key_result_ids: row.key_result_ids,
        weekly_update: row.weekly_update,
        last_week_update: row.last_week_update,
        roster: Default::default(),
        proposal_date: row.proposal_date,
        launch_date: row.launch_date,
        created_at: row.created_at,
        followers: row.followers,
        comments: decode_collection(&row.id, "comments", row.comments),
        change_log: decode_collection(&row.id, "change_log", row.change_log),
    };
    project.roster.product_managers =
        decode_role(&row.id, "productManagers", row.product_managers);
    project.roster.backend_developers =
        decode_role(&row.id, "backendDevelopers", row.backend_developers);
    project.roster.frontend_developers =
        decode_role(&row.id, "frontendDevelopers", row.frontend_developers);
    project.roster.qa_testers = decode_role(&row.id, "qaTesters", row.qa_testers);
    Ok(project)
}

/// Owned JSONB payloads for one project's write, kept alive so the row
/// structs can borrow them.
struct ProjectJson {
    product_managers: serde_json::Value,
    backend_developers: serde_json::Value,
    frontend_developers: serde_json::Value,
    qa_testers: serde_json::Value,
    comments: serde_json::Value,
    change_log: serde_json::Value,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ProjectRepositoryError> {
    serde_json::to_value(value).map_err(|err| ProjectRepositoryError::query(err.to_string()))
}

impl ProjectJson {
    fn encode(project: &Project) -> Result<Self, ProjectRepositoryError> {
        Ok(Self {
            product_managers: to_json(&project.roster.product_managers)?,
            backend_developers: to_json(&project.roster.backend_developers)?,
            frontend_developers: to_json(&project.roster.frontend_developers)?,
            qa_testers: to_json(&project.roster.qa_testers)?,
            comments: to_json(&project.comments)?,
            change_log: to_json(&project.change_log)?,
        })
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn load(
        &self,
        ids: Option<Vec<ProjectId>>,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = projects::table
            .select(ProjectRow::as_select())
            .order(projects::created_at.desc())
            .into_boxed();
        if let Some(ids) = &ids {
            let raw: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();
            query = query.filter(projects::id.eq_any(raw));
        }
        let rows = query
            .load::<ProjectRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut loaded = rows
            .into_iter()
            .map(row_to_project)
            .collect::<Result<Vec<_>, _>>()?;
        if loaded.is_empty() {
            return Ok(loaded);
        }

        // One batch query for every slot row of every loaded project.
        let project_ids: Vec<String> =
            loaded.iter().map(|p| p.id.as_str().to_owned()).collect();
        let slot_rows = time_slots::table
            .filter(time_slots::project_id.eq_any(project_ids))
            .order((
                time_slots::project_id.asc(),
                time_slots::role_key.asc(),
                time_slots::user_id.asc(),
                time_slots::start_date.asc(),
            ))
            .select(TimeSlotRow::as_select())
            .load::<TimeSlotRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        attach_time_slots(&mut loaded, slot_rows);
        Ok(loaded)
    }

    async fn find_by_id(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut loaded = ProjectRepository::load(self, Some(vec![id.clone()])).await?;
        Ok(loaded.pop())
    }

    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let json = ProjectJson::encode(project)?;
        let row = NewProjectRow {
            id: project.id.as_str(),
            name: &project.name,
            priority: &project.priority,
            business_problem: project.business_problem.as_deref(),
            key_result_ids: &project.key_result_ids,
            weekly_update: project.weekly_update.as_deref(),
            last_week_update: project.last_week_update.as_deref(),
            status: &project.status,
            product_managers: &json.product_managers,
            backend_developers: &json.backend_developers,
            frontend_developers: &json.frontend_developers,
            qa_testers: &json.qa_testers,
            proposal_date: project.proposal_date,
            launch_date: project.launch_date,
            created_at: project.created_at,
            followers: &project.followers,
            comments: &json.comments,
            change_log: &json.change_log,
        };
        let slot_rows = roster_slot_rows(project);

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(projects::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                if !slot_rows.is_empty() {
                    diesel::insert_into(time_slots::table)
                        .values(&slot_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)?;

        debug!(project_id = %project.id, "inserted project");
        Ok(())
    }

    async fn update(
        &self,
        project: &Project,
        replace_slots: bool,
    ) -> Result<bool, ProjectRepositoryError> {
        let json = ProjectJson::encode(project)?;
        let changeset = ProjectChangeset {
            name: &project.name,
            priority: &project.priority,
            business_problem: project.business_problem.as_deref(),
            key_result_ids: &project.key_result_ids,
            weekly_update: project.weekly_update.as_deref(),
            last_week_update: project.last_week_update.as_deref(),
            status: &project.status,
            product_managers: &json.product_managers,
            backend_developers: &json.backend_developers,
            frontend_developers: &json.frontend_developers,
            qa_testers: &json.qa_testers,
            proposal_date: project.proposal_date,
            launch_date: project.launch_date,
            followers: &project.followers,
            comments: &json.comments,
            change_log: &json.change_log,
        };
        // Expanded outside the transaction; the rows are pure data.
        let slot_rows = if replace_slots {
            roster_slot_rows(project)
        } else {
            Vec::new()
        };
        let project_id = project.id.as_str();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(projects::table.find(project_id))
                        .set(&changeset)
                        .execute(conn)
                        .await?;
                    if updated == 0 {
                        return Ok(false);
                    }
                    if replace_slots {
                        diesel::delete(
                            time_slots::table.filter(time_slots::project_id.eq(project_id)),
                        )
                        .execute(conn)
                        .await?;
                        if !slot_rows.is_empty() {
                            diesel::insert_into(time_slots::table)
                                .values(&slot_rows)
                                .execute(conn)
                                .await?;
                        }
                    }
                    Ok(true)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(project_id = %project.id, updated, replace_slots, "updated project");
        Ok(updated)
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        let project_id = id.as_str();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(
                        time_slots::table.filter(time_slots::project_id.eq(project_id)),
                    )
                    .execute(conn)
                    .await?;
                    let deleted = diesel::delete(projects::table.find(project_id))
                        .execute(conn)
                        .await?;
                    Ok(deleted > 0)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(project_id = %id, deleted, "deleted project");
        Ok(deleted)
    }

    async fn rollover_weekly_updates(&self) -> Result<Vec<ProjectId>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<String> = diesel::update(
            projects::table
                .filter(projects::weekly_update.is_not_null())
                .filter(projects::weekly_update.ne("")),
        )
        .set(projects::last_week_update.eq(projects::weekly_update))
        .returning(projects::id)
        .get_results(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        ids.into_iter()
            .map(|id| {
                ProjectId::new(id.clone()).map_err(|err| {
                    ProjectRepositoryError::query(format!("invalid stored project id {id:?}: {err}"))
                })
            })
            .collect()
    }
}
