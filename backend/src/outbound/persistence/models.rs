//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{projects, time_slots, users};

/// Row struct for reading from the projects table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: String,
    pub name: String,
    pub priority: String,
    pub business_problem: Option<String>,
    pub key_result_ids: Vec<String>,
    pub weekly_update: Option<String>,
    pub last_week_update: Option<String>,
    pub status: String,
    pub product_managers: serde_json::Value,
    pub backend_developers: serde_json::Value,
    pub frontend_developers: serde_json::Value,
    pub qa_testers: serde_json::Value,
    pub proposal_date: Option<NaiveDate>,
    pub launch_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub followers: Vec<String>,
    pub comments: serde_json::Value,
    pub change_log: serde_json::Value,
}

/// Insertable struct for creating new project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub(crate) struct NewProjectRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub priority: &'a str,
    pub business_problem: Option<&'a str>,
    pub key_result_ids: &'a [String],
    pub weekly_update: Option<&'a str>,
    pub last_week_update: Option<&'a str>,
    pub status: &'a str,
    pub product_managers: &'a serde_json::Value,
    pub backend_developers: &'a serde_json::Value,
    pub frontend_developers: &'a serde_json::Value,
    pub qa_testers: &'a serde_json::Value,
    pub proposal_date: Option<NaiveDate>,
    pub launch_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub followers: &'a [String],
    pub comments: &'a serde_json::Value,
    pub change_log: &'a serde_json::Value,
}

/// Changeset struct for updating project base records.
///
/// `treat_none_as_null` matters here: a merged snapshot with a cleared
/// nullable field must write NULL, not skip the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProjectChangeset<'a> {
    pub name: &'a str,
    pub priority: &'a str,
    pub business_problem: Option<&'a str>,
    pub key_result_ids: &'a [String],
    pub weekly_update: Option<&'a str>,
    pub last_week_update: Option<&'a str>,
    pub status: &'a str,
    pub product_managers: &'a serde_json::Value,
    pub backend_developers: &'a serde_json::Value,
    pub frontend_developers: &'a serde_json::Value,
    pub qa_testers: &'a serde_json::Value,
    pub proposal_date: Option<NaiveDate>,
    pub launch_date: Option<NaiveDate>,
    pub followers: &'a [String],
    pub comments: &'a serde_json::Value,
    pub change_log: &'a serde_json::Value,
}

/// Row struct for reading from the time_slots table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = time_slots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TimeSlotRow {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role_key: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Insertable struct for creating time-slot rows.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = time_slots)]
pub(crate) struct NewTimeSlotRow {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role_key: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}
