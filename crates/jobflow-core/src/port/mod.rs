//! Capability ports: the external collaborators the core calls.
//!
//! Each port is a trait using native async fn in traits (Rust 2024 edition,
//! no async_trait macro). The infrastructure layer (jobflow-infra)
//! implements them against the real services; tests use in-memory fakes.

mod record;
mod runner;
mod scheduler;

pub use record::RecordStore;
pub use runner::TransformRunner;
pub use scheduler::PollScheduler;
