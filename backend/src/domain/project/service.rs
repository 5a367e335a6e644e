//! Project domain service: batch reads, creation, patching, deletion.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::Error;

use super::model::{Project, ProjectDraft, ProjectId};
use super::patch::ProjectPatch;

fn map_repository_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

fn not_found(id: &ProjectId) -> Error {
    Error::not_found(format!("project {id} not found"))
}

/// Service implementing the project use-cases on top of the repository port.
#[derive(Clone)]
pub struct ProjectService {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    /// Create a new service with the given project repository.
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    /// Load projects with their nested roster and time-slot structure.
    ///
    /// With `ids` of `None` every project is returned, newest first.
    pub async fn load_projects(
        &self,
        ids: Option<Vec<ProjectId>>,
    ) -> Result<Vec<Project>, Error> {
        self.repo.load(ids).await.map_err(map_repository_error)
    }

    /// Create a project, applying server defaults, and return the stored
    /// record including its assigned identifier.
    pub async fn create_project(&self, draft: ProjectDraft) -> Result<Project, Error> {
        let project = Project::create(draft, ProjectId::generate(), Utc::now());
        self.repo
            .insert(&project)
            .await
            .map_err(map_repository_error)?;
        Ok(project)
    }

    /// Apply a partial update and return the merged snapshot.
    ///
    /// The time-slot store is replaced only when the patch touched roster
    /// fields; other patches leave the slot rows entirely untouched.
    pub async fn patch_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, Error> {
        let mut project = self
            .repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(&id))?;

        let replace_slots = patch.touches_roster();
        patch.apply_to(&mut project);

        let updated = self
            .repo
            .update(&project, replace_slots)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            // The project vanished between the read and the write.
            return Err(not_found(&id));
        }
        Ok(project)
    }

    /// Delete a project together with its time-slot rows.
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), Error> {
        let deleted = self
            .repo
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(not_found(&id));
        }
        Ok(())
    }

    /// Roll each non-empty weekly update over into the last-week column.
    pub async fn rollover_weekly_updates(&self) -> Result<Vec<ProjectId>, Error> {
        self.repo
            .rollover_weekly_updates()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
