//! Domain primitives, aggregates, and services.
//!
//! Types here are transport and storage agnostic. Inbound adapters map the
//! domain [`Error`] to protocol envelopes; outbound adapters implement the
//! [`ports`] traits against concrete stores.

pub mod directory;
pub mod error;
pub mod ports;
pub mod project;
pub mod user;

pub use self::directory::DirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::project::{Project, ProjectDraft, ProjectId, ProjectPatch, ProjectService, UserId};
pub use self::user::User;
