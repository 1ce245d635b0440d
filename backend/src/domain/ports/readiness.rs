//! Port abstraction for dependency readiness checks.

use async_trait::async_trait;

/// Reports whether backing dependencies can serve traffic.
///
/// Backed by the database pool in production; the readiness endpoint uses
/// this to distinguish "process up" from "dependencies reachable".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Whether the dependencies behind this probe are reachable.
    async fn is_ready(&self) -> bool;
}
