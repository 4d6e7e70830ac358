//! Infrastructure adapters for Jobflow.
//!
//! Concrete implementations of the jobflow-core ports against Google Cloud
//! Dataform (transformation runs), Cloud Tasks (delayed polls) and AppSheet
//! (completion records), plus configuration and credential plumbing.

pub mod appsheet;
pub mod auth;
pub mod config;
pub mod dataform;
pub mod secret;
pub mod tasks;
