//! Row types and domain conversions for the placement portal tables.
//!
//! Closed string sets (branch, status, recipient kind) are stored as text.
//! Decoding tolerates unrecognised values with a warning rather than
//! failing the whole read, matching how the rest of the persistence layer
//! degrades on dirty data.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::application::{Application, ApplicationStatus};
use crate::domain::company::Company;
use crate::domain::drive::{CtcRange, PlacementDrive};
use crate::domain::event::Event;
use crate::domain::ids::{
    ApplicationId, CompanyId, DriveId, EventId, NotificationId, ResumeScoreId, StudentId, UserId,
};
use crate::domain::notification::{Notification, RecipientGroup, RecipientSpec};
use crate::domain::resume_score::ResumeScore;
use crate::domain::student::{Branch, Student};

use super::schema::{
    applications, companies, events, notifications, placement_drives, resume_scores, students,
};

/// Decode a stored branch list, dropping unrecognised entries.
pub(super) fn decode_branches(values: Vec<String>) -> Vec<Branch> {
    values
        .into_iter()
        .filter_map(|value| match value.parse::<Branch>() {
            Ok(branch) => Some(branch),
            Err(_) => {
                tracing::warn!(value, "unrecognised branch value in database, dropping");
                None
            }
        })
        .collect()
}

/// Encode a branch list for storage.
pub(super) fn encode_branches(branches: &[Branch]) -> Vec<String> {
    branches.iter().map(|b| b.as_str().to_owned()).collect()
}

/// Decode a stored application status, defaulting dirty data to `applied`.
pub(super) fn decode_status(value: &str) -> ApplicationStatus {
    value.parse().unwrap_or_else(|_| {
        tracing::warn!(value, "unrecognised application status in database");
        ApplicationStatus::Applied
    })
}

/// Encode a recipient spec as its `(kind, student ids)` storage pair.
pub(super) fn encode_recipients(spec: &RecipientSpec) -> (&'static str, Vec<Uuid>) {
    match spec {
        RecipientSpec::Group(RecipientGroup::All) => ("all", Vec::new()),
        RecipientSpec::Group(RecipientGroup::Placed) => ("placed", Vec::new()),
        RecipientSpec::Group(RecipientGroup::Unplaced) => ("unplaced", Vec::new()),
        RecipientSpec::Students(ids) => {
            ("students", ids.iter().map(StudentId::as_uuid).collect())
        }
    }
}

/// Decode the stored `(kind, student ids)` pair back into a spec.
pub(super) fn decode_recipients(kind: &str, ids: Vec<Uuid>) -> RecipientSpec {
    match kind {
        "all" => RecipientSpec::Group(RecipientGroup::All),
        "placed" => RecipientSpec::Group(RecipientGroup::Placed),
        "unplaced" => RecipientSpec::Group(RecipientGroup::Unplaced),
        "students" => {
            RecipientSpec::Students(ids.into_iter().map(StudentId::from_uuid).collect())
        }
        other => {
            tracing::warn!(
                value = other,
                "unrecognised recipient kind in database, defaulting to all"
            );
            RecipientSpec::Group(RecipientGroup::All)
        }
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = students, check_for_backend(diesel::pg::Pg))]
pub struct StudentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub mobile_number: String,
    pub branch: String,
    pub percentage: f64,
    pub resume: Option<String>,
    pub is_placed: bool,
    pub placed_companies: Vec<String>,
    pub selected_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRow {
    pub fn into_domain(self) -> Student {
        let branch = self.branch.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value = self.branch,
                student_id = %self.id,
                "unrecognised branch in database, defaulting to cse"
            );
            Branch::Cse
        });
        Student {
            id: StudentId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: self.email,
            roll_number: self.roll_number,
            mobile_number: self.mobile_number,
            branch,
            percentage: self.percentage,
            resume: self.resume,
            is_placed: self.is_placed,
            placed_companies: self.placed_companies,
            selected_count: self.selected_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub mobile_number: String,
    pub branch: String,
    pub percentage: f64,
    pub resume: Option<String>,
}

/// Identity-field changes; placement columns are deliberately absent.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = students)]
pub struct StudentProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub roll_number: Option<String>,
    pub mobile_number: Option<String>,
    pub branch: Option<String>,
    pub percentage: Option<f64>,
    pub resume: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Placement columns, written only by the workflow store commit.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = students)]
pub struct StudentPlacementChanges {
    pub is_placed: bool,
    pub placed_companies: Vec<String>,
    pub selected_count: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = companies, check_for_backend(diesel::pg::Pg))]
pub struct CompanyRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CompanyRow {
    pub fn into_domain(self) -> Company {
        Company {
            id: CompanyId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            logo: self.logo,
            website: self.website,
            location: self.location,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = companies)]
pub struct NewCompanyRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = companies)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = placement_drives, check_for_backend(diesel::pg::Pg))]
pub struct DriveRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub eligible_branches: Vec<String>,
    pub minimum_percentage: f64,
    pub ctc_min: f64,
    pub ctc_max: f64,
    pub number_of_rounds: i32,
    pub application_link: Option<String>,
    pub drive_date: DateTime<Utc>,
    pub last_date_to_apply: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DriveRow {
    pub fn into_domain(self) -> PlacementDrive {
        PlacementDrive {
            id: DriveId::from_uuid(self.id),
            company_id: CompanyId::from_uuid(self.company_id),
            company_name: self.company_name,
            title: self.title,
            description: self.description,
            requirements: self.requirements,
            eligible_branches: decode_branches(self.eligible_branches),
            minimum_percentage: self.minimum_percentage,
            ctc_range: CtcRange {
                min: self.ctc_min,
                max: self.ctc_max,
            },
            number_of_rounds: self.number_of_rounds,
            application_link: self.application_link,
            drive_date: self.drive_date,
            last_date_to_apply: self.last_date_to_apply,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = placement_drives)]
pub struct NewDriveRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub eligible_branches: Vec<String>,
    pub minimum_percentage: f64,
    pub ctc_min: f64,
    pub ctc_max: f64,
    pub number_of_rounds: i32,
    pub application_link: Option<String>,
    pub drive_date: DateTime<Utc>,
    pub last_date_to_apply: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = placement_drives)]
pub struct DriveChanges {
    pub company_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub eligible_branches: Option<Vec<String>>,
    pub minimum_percentage: Option<f64>,
    pub ctc_min: Option<f64>,
    pub ctc_max: Option<f64>,
    pub number_of_rounds: Option<i32>,
    pub application_link: Option<String>,
    pub drive_date: Option<DateTime<Utc>>,
    pub last_date_to_apply: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = applications, check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub drive_id: Uuid,
    pub status: String,
    pub resume_url: Option<String>,
    pub is_present: bool,
    pub current_round: i32,
    pub next_round_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    pub fn into_domain(self) -> Application {
        Application {
            id: ApplicationId::from_uuid(self.id),
            student_id: StudentId::from_uuid(self.student_id),
            drive_id: DriveId::from_uuid(self.drive_id),
            status: decode_status(&self.status),
            resume_url: self.resume_url,
            is_present: self.is_present,
            current_round: self.current_round,
            next_round_date: self.next_round_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub drive_id: Uuid,
    pub resume_url: Option<String>,
}

/// The guarded field writes of a workflow transition.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = applications)]
pub struct ApplicationTransitionChanges {
    pub status: Option<String>,
    pub current_round: Option<i32>,
    pub next_round_date: Option<DateTime<Utc>>,
    pub is_present: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = notifications, check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub recipient_kind: String,
    pub recipient_student_ids: Vec<Uuid>,
    pub read_by: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl NotificationRow {
    pub fn into_domain(self) -> Notification {
        Notification {
            id: NotificationId::from_uuid(self.id),
            title: self.title,
            message: self.message,
            recipients: decode_recipients(&self.recipient_kind, self.recipient_student_ids),
            read_by: self.read_by.into_iter().map(UserId::from_uuid).collect(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub recipient_kind: String,
    pub recipient_student_ids: Vec<Uuid>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = events, check_for_backend(diesel::pg::Pg))]
pub struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub drive_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl EventRow {
    pub fn into_domain(self) -> Event {
        Event {
            id: EventId::from_uuid(self.id),
            title: self.title,
            description: self.description,
            date: self.date,
            drive_id: self.drive_id.map(DriveId::from_uuid),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = events)]
pub struct NewEventRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub drive_id: Option<Uuid>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = events)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = resume_scores, check_for_backend(diesel::pg::Pg))]
pub struct ResumeScoreRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub ats_score: f64,
    pub technical_score: f64,
    pub communication_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub overall_score: f64,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl ResumeScoreRow {
    pub fn into_domain(self) -> ResumeScore {
        ResumeScore {
            id: ResumeScoreId::from_uuid(self.id),
            student_id: StudentId::from_uuid(self.student_id),
            ats_score: self.ats_score,
            technical_score: self.technical_score,
            communication_score: self.communication_score,
            experience_score: self.experience_score,
            skills_score: self.skills_score,
            overall_score: self.overall_score,
            feedback: self.feedback,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = resume_scores)]
pub struct NewResumeScoreRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub ats_score: f64,
    pub technical_score: f64,
    pub communication_score: f64,
    pub experience_score: f64,
    pub skills_score: f64,
    pub overall_score: f64,
    pub feedback: String,
}
