//! Configuration for Shop API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Path of a JSON array of products imported at startup
pub const SEED_FILE_VAR: &str = "PRODUCTS_SEED_FILE";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    /// `None` selects the in-memory backend
    pub mongodb: Option<MongoConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env_optional()?;
        let server = ServerConfig::from_env()?;

        let seed_file = std::env::var(SEED_FILE_VAR)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            seed_file,
        })
    }
}
