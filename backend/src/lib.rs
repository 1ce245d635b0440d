//! Campus placement portal backend.
//!
//! Students apply to company placement drives; administrators move
//! applications through hiring rounds, with selection and rejection
//! fanning out to student placement records, notifications, and the
//! shared calendar.
//!
//! The crate is laid out hexagonally: `domain` holds the entities,
//! services, and ports; `inbound::http` adapts Actix requests onto the
//! driving ports; `outbound::persistence` implements the driven ports on
//! PostgreSQL via Diesel.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
