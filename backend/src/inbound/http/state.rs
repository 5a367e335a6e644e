//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! domain services only and remain testable with mocked ports.

use crate::domain::{DirectoryService, ProjectService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub projects: ProjectService,
    pub directory: DirectoryService,
}

impl HttpState {
    /// Bundle the domain services for handler injection.
    pub fn new(projects: ProjectService, directory: DirectoryService) -> Self {
        Self {
            projects,
            directory,
        }
    }
}
