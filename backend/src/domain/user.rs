//! User directory data model.
//!
//! Users come from an external employee directory; this core only reads
//! them so rosters can resolve member identifiers to display data.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::project::UserId;

/// A directory user referenced by roster members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
