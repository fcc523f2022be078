//! Application state management

use mongodb::{Client, Database};

use crate::config::Config;

/// Where the resource collections live
#[derive(Clone)]
pub enum Storage {
    Mongo { client: Client, db: Database },
    /// Process-local maps; contents are lost on restart
    InMemory,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Storage,
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            Storage::Mongo { .. } => "mongodb",
            Storage::InMemory => "in-memory",
        }
    }
}
