//! Built-in reference doc generators
//!
//! Deterministic inventories that categories can name as their `genCommand`
//! (`agent-guard generate env`, `agent-guard generate api-routes`).

pub mod api_routes;
pub mod env;

use std::path::PathBuf;

use crate::config::Config;
use crate::types::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Env,
    ApiRoutes,
}

impl Generator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::ApiRoutes => "api-routes",
        }
    }

    /// Write the inventory and return the file it produced
    pub fn run(self, config: &Config) -> Result<PathBuf> {
        match self {
            Self::Env => env::generate(config),
            Self::ApiRoutes => api_routes::generate(config),
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
