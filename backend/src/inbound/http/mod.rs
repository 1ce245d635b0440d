//! HTTP adapter: request DTOs, auth extraction, and route handlers.
//!
//! Handlers stay thin: they validate shape, enforce role access, and call
//! the domain services through [`state::HttpState`].

mod access;
pub mod applications;
pub mod auth;
pub mod companies;
pub mod drives;
mod error;
pub mod events;
pub mod health;
pub mod notifications;
pub mod resume_scores;
pub mod state;
pub mod students;
mod validation;

#[cfg(test)]
mod test_support;

pub use error::ApiResult;
