//! Drive administration with lockstep calendar events.
//!
//! Every drive owns exactly one system-managed calendar event. Creation,
//! renaming, and deletion of the event happen here so the calendar can
//! never drift from the drive list.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::drive::{DriveUpdate, NewDrive, PlacementDrive};
use super::error::Error;
use super::event::{Event, EventUpdate, NewEvent};
use super::ids::{CompanyId, DriveId};
use super::ports::{CompanyRepository, DriveAdmin, DriveRepository, EventRepository};

/// Concrete implementation of [`DriveAdmin`].
pub struct DriveAdminService<D, C, E> {
    drives: Arc<D>,
    companies: Arc<C>,
    events: Arc<E>,
}

impl<D, C, E> DriveAdminService<D, C, E> {
    /// Create a new drive administration service over its ports.
    pub fn new(drives: Arc<D>, companies: Arc<C>, events: Arc<E>) -> Self {
        Self {
            drives,
            companies,
            events,
        }
    }
}

fn check_date_order(
    last_date_to_apply: DateTime<Utc>,
    drive_date: DateTime<Utc>,
) -> Result<(), Error> {
    if last_date_to_apply > drive_date {
        return Err(Error::invalid_request(
            "Last date to apply must be on or before the drive date",
        ));
    }
    Ok(())
}

/// Calendar headline for a drive's system-managed event.
fn event_title(company_name: &str) -> String {
    format!("{company_name} Placement Drive")
}

#[async_trait]
impl<D, C, E> DriveAdmin for DriveAdminService<D, C, E>
where
    D: DriveRepository,
    C: CompanyRepository,
    E: EventRepository,
{
    async fn create(&self, mut drive: NewDrive) -> Result<(PlacementDrive, Event), Error> {
        let company = self
            .companies
            .find(drive.company_id)
            .await?
            .ok_or_else(|| Error::not_found("Company not found"))?;

        check_date_order(drive.last_date_to_apply, drive.drive_date)?;

        // The stored name wins over whatever the caller supplied.
        drive.company_name = company.name;

        let created = self.drives.insert(drive).await?;
        let event = self
            .events
            .insert(NewEvent {
                title: event_title(&created.company_name),
                description: Some(created.title.clone()),
                date: created.drive_date,
                drive_id: Some(created.id),
            })
            .await?;
        Ok((created, event))
    }

    async fn update(&self, id: DriveId, update: DriveUpdate) -> Result<PlacementDrive, Error> {
        let existing = self
            .drives
            .find(id)
            .await?
            .ok_or_else(|| Error::not_found("Placement drive not found"))?;

        let effective_deadline = update
            .last_date_to_apply
            .unwrap_or(existing.last_date_to_apply);
        let effective_drive_date = update.drive_date.unwrap_or(existing.drive_date);
        check_date_order(effective_deadline, effective_drive_date)?;

        let updated = self
            .drives
            .update(id, update)
            .await?
            .ok_or_else(|| Error::not_found("Placement drive not found"))?;

        // Keep the calendar event in lockstep. A missing event is tolerated
        // so a partially migrated record cannot wedge drive updates.
        if let Some(event) = self.events.find_by_drive(id).await? {
            self.events
                .update(
                    event.id,
                    EventUpdate {
                        title: Some(event_title(&updated.company_name)),
                        description: Some(updated.title.clone()),
                        date: Some(updated.drive_date),
                    },
                )
                .await?;
        }

        Ok(updated)
    }

    async fn delete(&self, id: DriveId) -> Result<(), Error> {
        if self.drives.delete_cascade(id).await? {
            Ok(())
        } else {
            Err(Error::not_found("Placement drive not found"))
        }
    }

    async fn delete_company(&self, id: CompanyId) -> Result<(), Error> {
        let drive_count = self.drives.count_for_company(id).await?;
        if drive_count > 0 {
            return Err(Error::invalid_request(
                "Delete this company's placement drives before deleting the company",
            ));
        }

        if self.companies.delete(id).await? {
            Ok(())
        } else {
            Err(Error::not_found("Company not found"))
        }
    }
}

#[cfg(test)]
#[path = "drive_admin_tests.rs"]
mod tests;
