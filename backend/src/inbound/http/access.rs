//! Ownership checks shared by student-scoped endpoints.

use std::sync::Arc;

use crate::domain::ids::StudentId;
use crate::domain::ports::StudentRepository;
use crate::domain::Error;
use crate::inbound::http::auth::Identity;

/// Allow admins through; otherwise require the identity to own the given
/// student profile.
pub(crate) async fn require_self_or_admin(
    students: &Arc<dyn StudentRepository>,
    identity: &Identity,
    student_id: StudentId,
) -> Result<(), Error> {
    if identity.is_admin() {
        return Ok(());
    }
    let student = students
        .find(student_id)
        .await?
        .ok_or_else(|| Error::not_found("Student not found"))?;
    if student.user_id == identity.user_id {
        Ok(())
    } else {
        Err(Error::forbidden("Access limited to your own records"))
    }
}
