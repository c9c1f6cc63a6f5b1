//! Shared domain types for the rungate Run Task gateway.
//!
//! This crate contains the wire-format types exchanged with HCP Terraform
//! (run-task callback payload, task-result envelope) and the error taxonomy
//! shared across the workspace.
//!
//! Zero infrastructure dependencies -- only serde, secrecy, thiserror.

pub mod error;
pub mod run_task;
