//! Black-box tests for the project wire contract and patch merge.
//!
//! These exercise the crate's public surface the way an HTTP client sees it:
//! JSON in, JSON out, with the legacy field names preserved.

use backend::domain::{Project, ProjectDraft, ProjectId, ProjectPatch};
use chrono::Utc;
use serde_json::{json, Value};

fn create_from(value: Value) -> Project {
    let draft: ProjectDraft = serde_json::from_value(value).expect("valid create payload");
    Project::create(
        draft,
        ProjectId::new("p1").expect("valid id"),
        Utc::now(),
    )
}

fn patch_from(value: Value) -> ProjectPatch {
    serde_json::from_value(value).expect("valid patch payload")
}

#[test]
fn proposal_date_keeps_its_legacy_wire_name() {
    let project = create_from(json!({
        "name": "Checkout revamp",
        "proposedDate": "2025-03-01",
    }));

    let wire = serde_json::to_value(&project).expect("serializes");
    assert_eq!(wire["proposedDate"], "2025-03-01");
    assert!(wire.get("proposalDate").is_none());
}

#[test]
fn role_collections_serialize_at_the_top_level() {
    let project = create_from(json!({
        "backendDevelopers": [{
            "userId": "u1",
            "timeSlots": [{ "id": "s1", "startDate": "2024-06-01", "endDate": "" }],
        }],
    }));

    let wire = serde_json::to_value(&project).expect("serializes");
    assert_eq!(wire["backendDevelopers"][0]["userId"], "u1");
    assert_eq!(wire["backendDevelopers"][0]["timeSlots"][0]["startDate"], "2024-06-01");
    // Empty-string input reads as no date and serializes as null.
    assert_eq!(wire["backendDevelopers"][0]["timeSlots"][0]["endDate"], Value::Null);
    assert!(wire["frontendDevelopers"].as_array().expect("array").is_empty());
}

#[test]
fn scalar_patches_ignore_empty_strings() {
    let mut project = create_from(json!({ "name": "Checkout revamp", "status": "in-progress" }));
    patch_from(json!({ "name": "", "status": "done" })).apply_to(&mut project);

    assert_eq!(project.name, "Checkout revamp");
    assert_eq!(project.status, "done");
}

#[test]
fn nullable_fields_follow_presence() {
    let mut project = create_from(json!({
        "businessProblem": "Slow checkout",
        "launchDate": "2025-06-01",
    }));
    patch_from(json!({ "businessProblem": null, "launchDate": "" })).apply_to(&mut project);

    assert_eq!(project.business_problem, None);
    assert_eq!(project.launch_date, None);
}

#[test]
fn absent_fields_leave_the_snapshot_untouched() {
    let mut project = create_from(json!({
        "name": "Checkout revamp",
        "weeklyUpdate": "Shipped the cart fix",
        "qaTesters": [{ "userId": "u9" }],
    }));
    patch_from(json!({ "priority": "urgent" })).apply_to(&mut project);

    assert_eq!(project.weekly_update.as_deref(), Some("Shipped the cart fix"));
    assert_eq!(project.roster.qa_testers.len(), 1);
    assert_eq!(project.priority, "urgent");
}

#[test]
fn collections_replace_wholesale() {
    let mut project = create_from(json!({
        "followers": ["u1", "u2"],
        "backendDevelopers": [{ "userId": "u1" }, { "userId": "u2" }],
    }));
    patch_from(json!({
        "followers": [],
        "backendDevelopers": [{ "userId": "u3" }],
    }))
    .apply_to(&mut project);

    assert!(project.followers.is_empty());
    assert_eq!(project.roster.backend_developers.len(), 1);
    assert_eq!(project.roster.backend_developers[0].user_id.as_str(), "u3");
}

#[test]
fn roster_touch_is_derived_from_presence() {
    assert!(!patch_from(json!({ "name": "Renamed" })).touches_roster());
    assert!(patch_from(json!({ "qaTesters": [] })).touches_roster());
    // Resending the same members still counts as a roster change.
    assert!(patch_from(json!({ "qaTesters": [{ "userId": "u9" }] })).touches_roster());
}

#[test]
fn merged_snapshot_round_trips_through_the_wire() {
    let mut project = create_from(json!({ "name": "Checkout revamp" }));
    patch_from(json!({
        "productManagers": [{
            "userId": "u5",
            "timeSlots": [{ "startDate": "2024-09-01", "description": "launch prep" }],
        }],
    }))
    .apply_to(&mut project);

    let wire = serde_json::to_value(&project).expect("serializes");
    let reread: Project = serde_json::from_value(wire).expect("deserializes");
    assert_eq!(reread, project);
}
