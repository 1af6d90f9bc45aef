pub mod app_config;
pub mod config;
pub mod destination_id;
pub mod destinations;
pub mod validation;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, GoogleOAuthConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use destination_id::{api_id, display_id, map_to_guid, map_to_slug, DestinationId};
pub use destinations::Destination;
pub use validation::ValidationError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
