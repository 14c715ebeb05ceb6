//! Scenario execution against the document server
//!
//! This module contains:
//! - The scenario runner: document creation, workflow start, final checks and cleanup
//! - Step execution: picking the workflow task for a role and completing it

mod scenario;
mod step;

pub use scenario::*;
