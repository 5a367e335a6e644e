//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod projects;
pub mod state;
pub mod users;

pub use error::{json_config, ApiResult};
