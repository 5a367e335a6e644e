//! Partial project updates and the present-field-wins merge.
//!
//! Patch fields are tri-state: a field can be *absent* from the request,
//! *null*, or carry a value. The distinction matters because the merge rules
//! are asymmetric:
//!
//! - scalars (`name`, `priority`, `status`) take the patch value only when it
//!   is present and non-empty; an empty string cannot clear a required scalar
//! - nullable text and date fields follow presence: a value overwrites, an
//!   explicit null clears, absence keeps the existing value
//! - collections are wholesale-replaced when a value is present; an explicit
//!   empty array clears them, absence keeps them; elements are never merged

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::model::{wire_date, ChangeLogEntry, Comment, Project, TeamMember};

/// Tri-state patch field: absent, explicitly null, or present with a value.
///
/// Deserialises from JSON via [`Option`]: a missing field stays [`Absent`]
/// (requires `#[serde(default)]` on the field), `null` becomes [`Null`], and
/// anything else becomes [`Value`].
///
/// [`Absent`]: Patch::Absent
/// [`Null`]: Patch::Null
/// [`Value`]: Patch::Value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Whether the field appeared in the request at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Borrow the carried value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Self::Null,
            Some(value) => Self::Value(value),
        })
    }
}

/// Dual of the [`Deserialize`] impl, via [`Option`]: [`Value`] serialises as
/// the carried value, [`Null`] and [`Absent`] as `null`. Required by the
/// `ToSchema` derive on [`ProjectPatch`], which serialises field defaults.
///
/// [`Absent`]: Patch::Absent
/// [`Null`]: Patch::Null
/// [`Value`]: Patch::Value
impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

/// Date patch fields accept `YYYY-MM-DD`; an empty string clears like null.
fn date_patch<'de, D>(deserializer: D) -> Result<Patch<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(Patch::Null),
        Some(s) if s.trim().is_empty() => Ok(Patch::Null),
        Some(s) => wire_date::parse(&s)
            .map(Patch::Value)
            .map_err(serde::de::Error::custom),
    }
}

/// Field-level partial update for one project.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    #[schema(value_type = Option<String>)]
    pub name: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub priority: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub status: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub business_problem: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub weekly_update: Patch<String>,
    #[schema(value_type = Option<String>)]
    pub last_week_update: Patch<String>,
    #[serde(rename = "proposedDate", deserialize_with = "date_patch")]
    #[schema(value_type = Option<String>, format = "date")]
    pub proposal_date: Patch<NaiveDate>,
    #[serde(deserialize_with = "date_patch")]
    #[schema(value_type = Option<String>, format = "date")]
    pub launch_date: Patch<NaiveDate>,
    #[schema(value_type = Option<Vec<String>>)]
    pub key_result_ids: Patch<Vec<String>>,
    #[schema(value_type = Option<Vec<String>>)]
    pub followers: Patch<Vec<String>>,
    #[schema(value_type = Option<Vec<TeamMember>>)]
    pub product_managers: Patch<Vec<TeamMember>>,
    #[schema(value_type = Option<Vec<TeamMember>>)]
    pub backend_developers: Patch<Vec<TeamMember>>,
    #[schema(value_type = Option<Vec<TeamMember>>)]
    pub frontend_developers: Patch<Vec<TeamMember>>,
    #[schema(value_type = Option<Vec<TeamMember>>)]
    pub qa_testers: Patch<Vec<TeamMember>>,
    #[schema(value_type = Option<Vec<Comment>>)]
    pub comments: Patch<Vec<Comment>>,
    #[schema(value_type = Option<Vec<ChangeLogEntry>>)]
    pub change_log: Patch<Vec<ChangeLogEntry>>,
}

impl ProjectPatch {
    /// Whether this patch touched roster data.
    ///
    /// Derived from field *presence* in the original request, not from value
    /// comparison: resending an identical roster still counts as a touch, so
    /// the synchronizer stays idempotent by data rather than by short-circuit.
    pub fn touches_roster(&self) -> bool {
        self.product_managers.is_present()
            || self.backend_developers.is_present()
            || self.frontend_developers.is_present()
            || self.qa_testers.is_present()
    }

    /// Overlay this patch onto an existing snapshot, consuming the patch.
    pub fn apply_to(self, project: &mut Project) {
        merge_scalar(&mut project.name, self.name);
        merge_scalar(&mut project.priority, self.priority);
        merge_scalar(&mut project.status, self.status);

        merge_optional(&mut project.business_problem, self.business_problem);
        merge_optional(&mut project.weekly_update, self.weekly_update);
        merge_optional(&mut project.last_week_update, self.last_week_update);
        merge_optional(&mut project.proposal_date, self.proposal_date);
        merge_optional(&mut project.launch_date, self.launch_date);

        merge_replace(&mut project.key_result_ids, self.key_result_ids);
        merge_replace(&mut project.followers, self.followers);
        merge_replace(&mut project.roster.product_managers, self.product_managers);
        merge_replace(&mut project.roster.backend_developers, self.backend_developers);
        merge_replace(
            &mut project.roster.frontend_developers,
            self.frontend_developers,
        );
        merge_replace(&mut project.roster.qa_testers, self.qa_testers);
        merge_replace(&mut project.comments, self.comments);
        merge_replace(&mut project.change_log, self.change_log);
    }
}

/// Required scalars: a present, non-empty value wins; anything else keeps
/// the existing value.
fn merge_scalar(target: &mut String, patch: Patch<String>) {
    if let Patch::Value(value) = patch {
        if !value.is_empty() {
            *target = value;
        }
    }
}

/// Nullable fields: presence wins, null clears, absence keeps.
fn merge_optional<T>(target: &mut Option<T>, patch: Patch<T>) {
    match patch {
        Patch::Absent => {}
        Patch::Null => *target = None,
        Patch::Value(value) => *target = Some(value),
    }
}

/// Collections: wholesale replacement when a value is present.
fn merge_replace<T>(target: &mut T, patch: Patch<T>) {
    if let Patch::Value(value) = patch {
        *target = value;
    }
}
