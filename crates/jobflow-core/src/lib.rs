//! Business logic for Jobflow: the job orchestrator, the poll state
//! machine, and the capability ports they call.
//!
//! Services are generic over the port traits to maintain clean
//! architecture -- jobflow-core never depends on jobflow-infra.

pub mod export;
pub mod port;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
