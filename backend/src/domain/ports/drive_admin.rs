//! Driving port for drive administration with lockstep calendar events.

use async_trait::async_trait;

use crate::domain::drive::{DriveUpdate, NewDrive, PlacementDrive};
use crate::domain::error::Error;
use crate::domain::event::Event;
use crate::domain::ids::{CompanyId, DriveId};

/// Use-case surface for drive administration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DriveAdmin: Send + Sync {
    /// Create a drive and its system-managed calendar event.
    async fn create(&self, drive: NewDrive) -> Result<(PlacementDrive, Event), Error>;

    /// Update a drive and sync its calendar event's title, description,
    /// and date.
    async fn update(&self, id: DriveId, update: DriveUpdate) -> Result<PlacementDrive, Error>;

    /// Delete a drive, cascading to its applications and linked event.
    async fn delete(&self, id: DriveId) -> Result<(), Error>;

    /// Delete a company, refused while any drive still references it.
    async fn delete_company(&self, id: CompanyId) -> Result<(), Error>;
}
