//! Project aggregate: roster roles, team members, and time slots.
//!
//! A project exclusively owns its four role collections and, transitively,
//! their members and time slots. Members reference users by identifier only;
//! the user directory is a separate aggregate with no ownership either way.
//!
//! Serde contracts follow the wire format: camelCase fields, dates as
//! `YYYY-MM-DD` strings where an empty string means "no date". Role
//! collections are never `null` in outward-facing results; missing
//! collections normalise to empty sequences on deserialisation.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for opaque string identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    Empty,
    SurroundingWhitespace,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "identifier must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for IdValidationError {}

fn validate_id(id: &str) -> Result<(), IdValidationError> {
    if id.is_empty() {
        return Err(IdValidationError::Empty);
    }
    if id.trim() != id {
        return Err(IdValidationError::SurroundingWhitespace);
    }
    Ok(())
}

/// Globally unique, opaque project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct ProjectId(String);

impl ProjectId {
    /// Validate and construct a [`ProjectId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh server-assigned identifier.
    pub fn generate() -> Self {
        Self(format!("p{}", Uuid::new_v4().simple()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for ProjectId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque user identifier; a weak reference into the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self(id))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for UserId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of exactly four fixed roster role identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKey {
    ProductManagers,
    BackendDevelopers,
    FrontendDevelopers,
    QaTesters,
}

impl RoleKey {
    /// All role keys in canonical order.
    pub const ALL: [Self; 4] = [
        Self::ProductManagers,
        Self::BackendDevelopers,
        Self::FrontendDevelopers,
        Self::QaTesters,
    ];

    /// Stable wire and storage key for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductManagers => "productManagers",
            Self::BackendDevelopers => "backendDevelopers",
            Self::FrontendDevelopers => "frontendDevelopers",
            Self::QaTesters => "qaTesters",
        }
    }
}

impl fmt::Display for RoleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleKey {
    type Err = UnknownRoleKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "productManagers" => Ok(Self::ProductManagers),
            "backendDevelopers" => Ok(Self::BackendDevelopers),
            "frontendDevelopers" => Ok(Self::FrontendDevelopers),
            "qaTesters" => Ok(Self::QaTesters),
            other => Err(UnknownRoleKey {
                key: other.to_owned(),
            }),
        }
    }
}

/// Error raised when a stored role key no longer maps to a fixed role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role key: {key}")]
pub struct UnknownRoleKey {
    pub key: String,
}

/// Wire representation of optional dates: `YYYY-MM-DD`, with the empty
/// string accepted as "no date" for compatibility with existing clients.
pub(crate) mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%d";

    pub(crate) fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw, FORMAT)
    }

    pub(crate) fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => parse(&s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// A date-range assignment of one member, possibly open-ended at either end.
///
/// A time slot exists only inside one (project, role, user) triple; it has
/// no identity of its own beyond the row identifier assigned on persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[serde(default)]
    pub id: String,
    #[serde(default, with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user staffed on one role of one project, holding zero or more slots.
///
/// The single `startDate`/`endDate` pair is a legacy representation kept for
/// backward compatibility; when the slot sequence is empty it is read as an
/// implicit single slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: UserId,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default, with = "wire_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "wire_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date")]
    pub end_date: Option<NaiveDate>,
}

impl TeamMember {
    /// Member with the given user id and no slots.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            time_slots: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// The canonical slot sequence, expanding the legacy pair when the slot
    /// sequence is empty. Slots produced from the legacy pair carry no
    /// identifier; the synchronizer assigns one on persist.
    pub fn effective_slots(&self) -> Vec<TimeSlot> {
        if !self.time_slots.is_empty() {
            return self.time_slots.clone();
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            return vec![TimeSlot {
                id: String::new(),
                start_date: self.start_date,
                end_date: self.end_date,
                description: None,
            }];
        }
        Vec::new()
    }
}

/// A comment on a project, stored as an opaque collection element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mentions: Vec<String>,
}

/// A change-log entry on a project, stored as an opaque collection element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub old_value: String,
    #[serde(default)]
    pub new_value: String,
    #[serde(default)]
    pub changed_at: String,
}

/// The four role collections belonging to one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Roster {
    pub product_managers: Vec<TeamMember>,
    pub backend_developers: Vec<TeamMember>,
    pub frontend_developers: Vec<TeamMember>,
    pub qa_testers: Vec<TeamMember>,
}

impl Roster {
    /// Members of the given role.
    pub fn role(&self, key: RoleKey) -> &[TeamMember] {
        match key {
            RoleKey::ProductManagers => &self.product_managers,
            RoleKey::BackendDevelopers => &self.backend_developers,
            RoleKey::FrontendDevelopers => &self.frontend_developers,
            RoleKey::QaTesters => &self.qa_testers,
        }
    }

    /// Mutable members of the given role.
    pub fn role_mut(&mut self, key: RoleKey) -> &mut Vec<TeamMember> {
        match key {
            RoleKey::ProductManagers => &mut self.product_managers,
            RoleKey::BackendDevelopers => &mut self.backend_developers,
            RoleKey::FrontendDevelopers => &mut self.frontend_developers,
            RoleKey::QaTesters => &mut self.qa_testers,
        }
    }

    /// Iterate all roles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RoleKey, &[TeamMember])> {
        RoleKey::ALL.into_iter().map(move |key| (key, self.role(key)))
    }
}

/// Placeholder name assigned to unnamed projects on create.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled project";
/// Priority assigned when the create request carries none.
pub const DEFAULT_PRIORITY: &str = "routine";
/// Status assigned when the create request carries none.
pub const DEFAULT_STATUS: &str = "not-started";

/// A tracked project with its roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub priority: String,
    pub status: String,
    pub business_problem: Option<String>,
    pub key_result_ids: Vec<String>,
    pub weekly_update: Option<String>,
    pub last_week_update: Option<String>,
    #[serde(flatten)]
    pub roster: Roster,
    // Wire name predates the roster rework and is kept for compatibility.
    #[serde(default, rename = "proposedDate", with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub proposal_date: Option<NaiveDate>,
    #[serde(default, with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub launch_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub followers: Vec<String>,
    pub comments: Vec<Comment>,
    pub change_log: Vec<ChangeLogEntry>,
}

impl Project {
    /// Build a storable project from a create request, applying server
    /// defaults for the identifier, timestamp, and required scalars.
    pub fn create(draft: ProjectDraft, id: ProjectId, created_at: DateTime<Utc>) -> Self {
        let ProjectDraft {
            name,
            priority,
            status,
            business_problem,
            weekly_update,
            last_week_update,
            proposal_date,
            launch_date,
            key_result_ids,
            followers,
            roster,
            comments,
            change_log,
        } = draft;

        Self {
            id,
            name: non_empty_or(name, DEFAULT_PROJECT_NAME),
            priority: non_empty_or(priority, DEFAULT_PRIORITY),
            status: non_empty_or(status, DEFAULT_STATUS),
            business_problem,
            key_result_ids,
            weekly_update,
            last_week_update,
            roster,
            proposal_date,
            launch_date,
            created_at,
            followers,
            comments,
            change_log,
        }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}

/// Create-request payload; every field is optional and normalises to its
/// empty or default value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    pub name: String,
    pub priority: String,
    pub status: String,
    pub business_problem: Option<String>,
    pub weekly_update: Option<String>,
    pub last_week_update: Option<String>,
    #[serde(rename = "proposedDate", with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub proposal_date: Option<NaiveDate>,
    #[serde(with = "wire_date")]
    #[schema(value_type = Option<String>, format = "date")]
    pub launch_date: Option<NaiveDate>,
    pub key_result_ids: Vec<String>,
    pub followers: Vec<String>,
    #[serde(flatten)]
    pub roster: Roster,
    pub comments: Vec<Comment>,
    pub change_log: Vec<ChangeLogEntry>,
}
