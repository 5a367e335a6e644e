//! Port for project persistence: batch reads and synchronized writes.

use async_trait::async_trait;

use crate::domain::project::{Project, ProjectId};

/// Errors raised by project repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectRepositoryError {
    /// Repository connection could not be established.
    #[error("project repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("project repository query failed: {message}")]
    Query { message: String },
}

impl ProjectRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for project aggregates.
///
/// Adapters own both stored representations of a roster: the embedded role
/// collections on the project record and the denormalized time-slot rows.
/// Every mutation is atomic; a failure leaves both representations at their
/// previous state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Load projects with their full roster and time-slot structure.
    ///
    /// `ids` of `None` loads every project, newest first. Implementations
    /// must batch the time-slot retrieval: one round trip for the whole
    /// result set, never one per project.
    async fn load(
        &self,
        ids: Option<Vec<ProjectId>>,
    ) -> Result<Vec<Project>, ProjectRepositoryError>;

    /// Load a single project, or `None` when the id is unknown.
    async fn find_by_id(
        &self,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Insert a project and its time-slot rows in one transaction.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Update a project's base record and, when `replace_slots` is set,
    /// delete and re-insert its time-slot rows in the same transaction.
    ///
    /// Returns `false` when the project no longer exists.
    async fn update(
        &self,
        project: &Project,
        replace_slots: bool,
    ) -> Result<bool, ProjectRepositoryError>;

    /// Delete a project and its time-slot rows in one transaction.
    ///
    /// Returns `false` when the project did not exist.
    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError>;

    /// Copy each non-empty weekly update into the last-week column and
    /// return the affected project ids.
    async fn rollover_weekly_updates(&self) -> Result<Vec<ProjectId>, ProjectRepositoryError>;
}
