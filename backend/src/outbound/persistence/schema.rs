//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Project base records.
    ///
    /// The four role columns hold the embedded roster (JSONB member arrays);
    /// they are authoritative for role membership. Slot data inside them is
    /// incidental: the `time_slots` table is the authoritative slot store.
    projects (id) {
        /// Opaque project identifier, server assigned.
        id -> Varchar,
        name -> Text,
        priority -> Varchar,
        business_problem -> Nullable<Text>,
        key_result_ids -> Array<Text>,
        weekly_update -> Nullable<Text>,
        last_week_update -> Nullable<Text>,
        status -> Varchar,
        product_managers -> Jsonb,
        backend_developers -> Jsonb,
        frontend_developers -> Jsonb,
        qa_testers -> Jsonb,
        proposal_date -> Nullable<Date>,
        launch_date -> Nullable<Date>,
        created_at -> Timestamptz,
        followers -> Array<Text>,
        comments -> Jsonb,
        change_log -> Jsonb,
    }
}

diesel::table! {
    /// Denormalized time-slot rows, one per (project, role, user, slot).
    ///
    /// Rows exist only while their project's roster references them; the
    /// synchronizer replaces a project's rows wholesale on roster writes.
    /// Dates are stored as text in wire format; rows that fail to parse on
    /// load are skipped, not fatal.
    time_slots (id) {
        id -> Varchar,
        project_id -> Varchar,
        user_id -> Varchar,
        role_key -> Varchar,
        start_date -> Nullable<Varchar>,
        end_date -> Nullable<Varchar>,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// User directory rows, synchronized externally.
    users (id) {
        id -> Varchar,
        name -> Varchar,
        email -> Nullable<Varchar>,
        avatar_url -> Nullable<Varchar>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(projects, time_slots, users);
