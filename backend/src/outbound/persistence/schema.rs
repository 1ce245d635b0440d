//! Diesel table definitions mirroring the placement portal migration.

diesel::table! {
    students (id) {
        id -> Uuid,
        user_id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        roll_number -> Varchar,
        mobile_number -> Varchar,
        branch -> Varchar,
        percentage -> Double,
        resume -> Nullable<Varchar>,
        is_placed -> Bool,
        placed_companies -> Array<Text>,
        selected_count -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    companies (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Varchar,
        logo -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    placement_drives (id) {
        id -> Uuid,
        company_id -> Uuid,
        company_name -> Varchar,
        title -> Varchar,
        description -> Varchar,
        requirements -> Varchar,
        eligible_branches -> Array<Text>,
        minimum_percentage -> Double,
        ctc_min -> Double,
        ctc_max -> Double,
        number_of_rounds -> Int4,
        application_link -> Nullable<Varchar>,
        drive_date -> Timestamptz,
        last_date_to_apply -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    applications (id) {
        id -> Uuid,
        student_id -> Uuid,
        drive_id -> Uuid,
        status -> Varchar,
        resume_url -> Nullable<Varchar>,
        is_present -> Bool,
        current_round -> Int4,
        next_round_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        title -> Varchar,
        message -> Varchar,
        recipient_kind -> Varchar,
        recipient_student_ids -> Array<Uuid>,
        read_by -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    events (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Nullable<Varchar>,
        date -> Timestamptz,
        drive_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    resume_scores (id) {
        id -> Uuid,
        student_id -> Uuid,
        ats_score -> Double,
        technical_score -> Double,
        communication_score -> Double,
        experience_score -> Double,
        skills_score -> Double,
        overall_score -> Double,
        feedback -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(placement_drives -> companies (company_id));
diesel::joinable!(resume_scores -> students (student_id));
diesel::joinable!(applications -> students (student_id));
diesel::joinable!(applications -> placement_drives (drive_id));
diesel::joinable!(events -> placement_drives (drive_id));

diesel::allow_tables_to_appear_in_same_query!(
    students,
    companies,
    placement_drives,
    applications,
    notifications,
    events,
    resume_scores,
);
