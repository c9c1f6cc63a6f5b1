//! HTTP layer for the rungate gateway.
//!
//! Axum-based webhook surface: the run-task receiver on `POST /`, a
//! health endpoint, and the error-to-status mapping.

pub mod error;
pub mod handlers;
pub mod router;
