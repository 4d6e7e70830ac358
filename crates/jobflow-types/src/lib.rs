//! Shared domain types for Jobflow.
//!
//! This crate holds the vocabulary every other layer speaks: job run
//! identifiers and states, the boundary request/response schemas, and the
//! error taxonomy. It depends on nothing but serde and thiserror so that
//! jobflow-core can stay free of infrastructure concerns.

pub mod error;
pub mod job;
pub mod run;
