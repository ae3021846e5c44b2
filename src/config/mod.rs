//! Configuration Management
//!
//! A single immutable [`Config`] is loaded once at startup from
//! `agent-docs.config.json` and passed by reference to every component.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
