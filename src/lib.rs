#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::{toml_config::TomlConfig, OutputFormat, ResolvedConfig};
pub use crate::core::{venue_service::VenueService, SmokingPolicy, Venue, VenueApi, VenueReview};
pub use utils::error::{Result, VenueError};
