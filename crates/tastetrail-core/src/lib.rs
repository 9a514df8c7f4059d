pub mod app_config;
pub mod config;
pub mod places;
pub mod search_config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use places::{identity_key, Coordinate, EnrichedPlace, EnrichmentResult, PlaceCandidate};
pub use search_config::{SearchConfig, MAX_IDENTITY_PRECISION};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
