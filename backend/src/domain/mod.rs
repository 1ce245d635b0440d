//! Core domain model and services for the placement portal.
//!
//! Everything in this module is transport and persistence agnostic: HTTP
//! concerns live in [`inbound`](crate::inbound) and Diesel concerns in
//! [`outbound`](crate::outbound), both talking to the domain through the
//! traits in [`ports`].

pub mod application;
pub mod company;
pub mod drive;
pub mod drive_admin;
pub mod error;
pub mod event;
pub mod ids;
pub mod notification;
pub mod notifications;
pub mod ports;
pub mod resume_score;
pub mod student;
pub mod transition;
pub mod user;
pub mod workflow;

pub use drive_admin::DriveAdminService;
pub use error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use notifications::NotificationService;
pub use workflow::ApplicationWorkflowService;
