//! Outbound HTTP implementations of the rungate-core ports.
//!
//! One shared `reqwest::Client` (built by [`client::build_client`]) backs
//! all three outbound calls so the per-request timeout applies uniformly
//! to secret fetch, plan fetch, and the result callback.

pub mod callback;
pub mod client;
pub mod plan;
pub mod secrets;
