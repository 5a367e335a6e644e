//! Domain ports: traits the outbound adapters implement.

mod project_repository;
mod user_repository;

pub use project_repository::{ProjectRepository, ProjectRepositoryError};
pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub use project_repository::MockProjectRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
