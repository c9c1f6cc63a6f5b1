//! Domain logic for the rungate Run Task gateway.
//!
//! This crate is infrastructure-free: it defines the signature verifier,
//! the validation policy seam, the outbound-call ports (secret resolution,
//! plan fetch, result notification), and the [`service::RunTaskService`]
//! orchestrator that ties them together. Concrete HTTP implementations of
//! the ports live in rungate-infra.

pub mod policy;
pub mod ports;
pub mod service;
pub mod signature;
