//! Project aggregate, patch semantics, and use-case service.

mod model;
mod patch;
mod service;

pub use model::{
    ChangeLogEntry, Comment, IdValidationError, Project, ProjectDraft, ProjectId, RoleKey, Roster,
    TeamMember, TimeSlot, UnknownRoleKey, UserId, DEFAULT_PRIORITY, DEFAULT_PROJECT_NAME,
    DEFAULT_STATUS,
};
pub use patch::{Patch, ProjectPatch};
pub use service::ProjectService;

pub(crate) use model::wire_date;
