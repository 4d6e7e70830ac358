//! Request handlers.

pub mod job;
