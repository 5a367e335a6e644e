//! Assembly between roster members and denormalized time-slot rows.
//!
//! The loader side groups one batch of slot rows into a project → role →
//! user mapping and stitches it onto loaded projects; the synchronizer side
//! expands a project's roster back into the rows to insert. Both directions
//! are pure so the partitioning rules stay testable without a database.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::project::{wire_date, Project, RoleKey, TimeSlot};

use super::models::{NewTimeSlotRow, TimeSlotRow};

type UserSlots = HashMap<String, Vec<TimeSlot>>;
type RoleSlots = HashMap<RoleKey, UserSlots>;

/// Generate a unique identifier for one slot row.
///
/// One id per row, never derived from (user, role): a user holding two
/// slots in the same role must yield two distinct rows.
fn new_slot_id() -> String {
    format!("slot_{}", Uuid::new_v4().simple())
}

fn parse_row_date(raw: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => wire_date::parse(s).map(Some),
    }
}

/// Convert one stored row into a slot, or `None` when the row is malformed.
///
/// A malformed row is skipped rather than failing the whole batch; a row
/// with neither date is valid and kept.
fn row_to_slot(row: TimeSlotRow) -> Option<(String, RoleKey, String, TimeSlot)> {
    let role = match RoleKey::from_str(&row.role_key) {
        Ok(role) => role,
        Err(err) => {
            warn!(
                slot_id = %row.id,
                project_id = %row.project_id,
                role_key = %err.key,
                "skipping time-slot row with unknown role key"
            );
            return None;
        }
    };

    let (start_date, end_date) = match (
        parse_row_date(row.start_date.as_deref()),
        parse_row_date(row.end_date.as_deref()),
    ) {
        (Ok(start), Ok(end)) => (start, end),
        _ => {
            warn!(
                slot_id = %row.id,
                project_id = %row.project_id,
                "skipping time-slot row with unparseable date"
            );
            return None;
        }
    };

    let slot = TimeSlot {
        id: row.id,
        start_date,
        end_date,
        description: row.description,
    };
    Some((row.project_id, role, row.user_id, slot))
}

/// Group a batch of slot rows by project id, then role, then user.
///
/// Row order within each (project, role, user) bucket is preserved, so a
/// query ordered by start date yields ordered slot sequences.
fn group_slot_rows(rows: Vec<TimeSlotRow>) -> HashMap<String, RoleSlots> {
    let mut grouped: HashMap<String, RoleSlots> = HashMap::new();
    for row in rows {
        let Some((project_id, role, user_id, slot)) = row_to_slot(row) else {
            continue;
        };
        grouped
            .entry(project_id)
            .or_default()
            .entry(role)
            .or_default()
            .entry(user_id)
            .or_default()
            .push(slot);
    }
    grouped
}

/// Stitch one batch of slot rows onto the loaded projects.
///
/// Partitioning is strictly by project id first: a user holding the same
/// role on two projects can never leak slots across them. Every member ends
/// up with a slot list, empty when no rows matched. Rows referencing a
/// project absent from `projects` are discarded; a delete racing the two
/// loader queries makes such orphans legitimate.
pub(crate) fn attach_time_slots(projects: &mut [Project], rows: Vec<TimeSlotRow>) {
    let mut grouped = group_slot_rows(rows);

    for project in projects.iter_mut() {
        let mut role_slots = grouped.remove(project.id.as_str()).unwrap_or_default();
        for key in RoleKey::ALL {
            let mut user_slots = role_slots.remove(&key).unwrap_or_default();
            for member in project.roster.role_mut(key).iter_mut() {
                member.time_slots = user_slots
                    .remove(member.user_id.as_str())
                    .unwrap_or_default();
            }
            if !user_slots.is_empty() {
                debug!(
                    project_id = %project.id,
                    role_key = %key,
                    user_count = user_slots.len(),
                    "discarding slot rows for users no longer on the role"
                );
            }
        }
    }

    if !grouped.is_empty() {
        debug!(
            project_count = grouped.len(),
            "discarding orphaned time-slot rows for unknown projects"
        );
    }
}

/// Expand a project's roster into the denormalized rows to insert.
///
/// One row per (role, member, slot), using each member's canonical slot
/// sequence (the legacy single pair counts as one slot). Members with zero
/// slots produce no rows; their role membership lives on the project record.
pub(crate) fn roster_slot_rows(project: &Project) -> Vec<NewTimeSlotRow> {
    let mut rows = Vec::new();
    for (role, members) in project.roster.iter() {
        for member in members {
            for slot in member.effective_slots() {
                rows.push(NewTimeSlotRow {
                    id: new_slot_id(),
                    project_id: project.id.as_str().to_owned(),
                    user_id: member.user_id.as_str().to_owned(),
                    role_key: role.as_str().to_owned(),
                    start_date: slot
                        .start_date
                        .map(|d| d.format(wire_date::FORMAT).to_string()),
                    end_date: slot
                        .end_date
                        .map(|d| d.format(wire_date::FORMAT).to_string()),
                    description: slot.description,
                });
            }
        }
    }
    rows
}
