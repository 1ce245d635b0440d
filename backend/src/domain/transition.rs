//! Pure planning of application status, round, and attendance changes.
//!
//! The planner turns a loaded [`TransitionContext`] plus the requested
//! change into a [`TransitionPlan`]: the exact field writes, the optional
//! drive round widening, the optional student placement effect, and the
//! notification to emit. The plan is then applied atomically by the
//! [`WorkflowStore`](crate::domain::ports::WorkflowStore) adapter in a
//! single transaction, guarded by the application's `updated_at` token so
//! concurrent transitions cannot silently overwrite each other.

use chrono::{DateTime, Utc};

use super::application::{Application, ApplicationStatus};
use super::drive::PlacementDrive;
use super::error::Error;
use super::ids::{ApplicationId, DriveId, StudentId};
use super::notification::{NotificationDraft, RecipientSpec};
use super::student::Student;

/// Machine-readable conflict code: the application is frozen by absence.
pub const ABSENT_STUDENT: &str = "ABSENT_STUDENT";
/// Machine-readable conflict code: round progress is meaningless for the
/// requested status.
pub const INVALID_ROUND_UPDATE: &str = "INVALID_ROUND_UPDATE";

/// Snapshot of the three records a transition touches, plus the highest
/// `current_round` across all applications for the same drive.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionContext {
    /// The application being transitioned.
    pub application: Application,
    /// Its drive.
    pub drive: PlacementDrive,
    /// Its student.
    pub student: Student,
    /// Highest round reached by any application for this drive.
    pub drive_max_round: i32,
}

/// A requested status/round change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionRequest {
    /// Target status, if changing.
    pub status: Option<ApplicationStatus>,
    /// Round reached, possibly fractional as supplied by the caller.
    pub current_round: Option<f64>,
    /// Scheduled next round date, stored when shortlisting.
    pub next_round_date: Option<DateTime<Utc>>,
}

/// Side effect on the student's placement record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementEffect {
    /// The application newly entered `selected`.
    Grant {
        /// Denormalised company name to add to the student's list.
        company_name: String,
    },
    /// The application left `selected`.
    Revoke {
        /// Company name to remove from the student's list.
        company_name: String,
    },
}

/// The committed unit of work for one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    /// Application to update.
    pub application_id: ApplicationId,
    /// Optimistic concurrency token: the `updated_at` the plan was
    /// computed against. The commit fails with a conflict if the stored
    /// value has moved on.
    pub expected_updated_at: DateTime<Utc>,
    /// New status, if changing.
    pub status: Option<ApplicationStatus>,
    /// New round, if changing (already rounded to an integer).
    pub current_round: Option<i32>,
    /// Next round date, when shortlisting supplied one.
    pub next_round_date: Option<DateTime<Utc>>,
    /// New presence flag, for attendance transitions.
    pub is_present: Option<bool>,
    /// Widen the drive's stated round count to `max(existing, round + 1)`.
    pub widen_drive_rounds: Option<DriveWidening>,
    /// Placement effect to apply to the student row.
    pub placement: Option<(StudentId, PlacementEffect)>,
    /// Notification to insert in the same transaction.
    pub notification: Option<NotificationDraft>,
}

/// Drive round-count widening carried by a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriveWidening {
    /// The drive whose round count widens.
    pub drive_id: DriveId,
    /// The round that triggered the widening; the stored count becomes
    /// `max(number_of_rounds, round + 1)` and never decreases.
    pub round: i32,
}

impl TransitionPlan {
    fn empty(application: &Application) -> Self {
        Self {
            application_id: application.id,
            expected_updated_at: application.updated_at,
            status: None,
            current_round: None,
            next_round_date: None,
            is_present: None,
            widen_drive_rounds: None,
            placement: None,
            notification: None,
        }
    }
}

/// Round a caller-supplied round value to a non-negative integer.
///
/// Fractional input rounds to the nearest integer (the original model's
/// behaviour wins over its route-level truncation, since the model re-rounds
/// whatever the route stores).
fn parse_round(value: f64) -> Result<i32, Error> {
    if !value.is_finite() || value < 0.0 || value > f64::from(i32::MAX) {
        return Err(Error::invalid_request(
            "currentRound must be a non-negative number",
        ));
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "range checked above before the cast"
    )]
    let rounded = value.round() as i32;
    Ok(rounded)
}

/// Plan a status/round transition.
///
/// Preconditions, first failure wins:
/// - the application must be present (`ABSENT_STUDENT` conflict otherwise);
/// - a round supplied together with a status requires that status to be
///   `shortlisted` or `selected` (`INVALID_ROUND_UPDATE` conflict).
pub fn plan_status_update(
    ctx: &TransitionContext,
    request: &TransitionRequest,
) -> Result<TransitionPlan, Error> {
    let application = &ctx.application;

    if !application.is_present {
        return Err(Error::state_conflict(
            ABSENT_STUDENT,
            "Cannot update status for absent students",
        ));
    }

    let round = request.current_round.map(parse_round).transpose()?;

    if round.is_some() {
        if let Some(status) = request.status {
            if !status.progressable() {
                return Err(Error::state_conflict(
                    INVALID_ROUND_UPDATE,
                    "Round updates only allowed for shortlisted or selected students",
                ));
            }
        }
    }

    let mut plan = TransitionPlan::empty(application);
    plan.status = request.status;
    plan.current_round = round;

    if let Some(round) = round {
        if round > ctx.drive_max_round {
            plan.widen_drive_rounds = Some(DriveWidening {
                drive_id: ctx.drive.id,
                round,
            });
        }
    }

    if request.status == Some(ApplicationStatus::Shortlisted) {
        plan.next_round_date = request.next_round_date;
    }

    if let Some(new_status) = request.status {
        let previous = application.status;
        if new_status == ApplicationStatus::Selected && previous != ApplicationStatus::Selected {
            plan.placement = Some((
                ctx.student.id,
                PlacementEffect::Grant {
                    company_name: ctx.drive.company_name.clone(),
                },
            ));
        } else if previous == ApplicationStatus::Selected
            && new_status != ApplicationStatus::Selected
        {
            plan.placement = Some((
                ctx.student.id,
                PlacementEffect::Revoke {
                    company_name: ctx.drive.company_name.clone(),
                },
            ));
        }
        plan.notification = Some(status_notification(ctx, new_status));
    }

    Ok(plan)
}

/// Plan an attendance change.
///
/// Marking a present application absent freezes it: the status is forced to
/// `rejected` and the student is notified. Placement state is deliberately
/// not reverted. Restoring presence touches only the flag.
pub fn plan_attendance(ctx: &TransitionContext, is_present: bool) -> TransitionPlan {
    let application = &ctx.application;
    let mut plan = TransitionPlan::empty(application);
    plan.is_present = Some(is_present);

    if application.is_present && !is_present {
        plan.status = Some(ApplicationStatus::Rejected);
        plan.notification = Some(NotificationDraft {
            title: format!("{} drive update", ctx.drive.company_name),
            message: format!(
                "You were marked absent for the {} drive and your application has been rejected.",
                ctx.drive.company_name
            ),
            recipients: RecipientSpec::Students(vec![ctx.student.id]),
        });
    }

    plan
}

/// Build the per-status notification addressed to the affected student.
fn status_notification(ctx: &TransitionContext, status: ApplicationStatus) -> NotificationDraft {
    let company = ctx.drive.company_name.as_str();
    let message = match status {
        ApplicationStatus::Selected => {
            format!("Congratulations! You have been selected by {company}.")
        }
        ApplicationStatus::Shortlisted => {
            format!("You have been shortlisted for the next round at {company}.")
        }
        ApplicationStatus::Rejected => {
            format!("Your application to {company} was not successful this time.")
        }
        ApplicationStatus::Applied => {
            format!("Your application status for {company} changed to applied.")
        }
    };
    NotificationDraft {
        title: format!("{company} application update"),
        message,
        recipients: RecipientSpec::Students(vec![ctx.student.id]),
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
