//! Minimal client for the Nuxeo REST API
//!
//! Covers the repository, workflow, task and batch upload endpoints a scenario needs.

mod client;
mod models;

pub use client::*;
pub use models::*;
