//! Fantasy Premier League Gameweek Calendar Library
//!
//! This library queries a public fantasy league API for season calendar
//! facts: the latest completed gameweek, the next deadline, month phase
//! boundaries, and per-manager gameweek scores.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fpl_gameweek::config::Config;
//! use fpl_gameweek::data_fetcher::{fetch_latest_completed_gameweek, fetch_upcoming_deadline};
//! use fpl_gameweek::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = reqwest::Client::new();
//!
//!     let completed = fetch_latest_completed_gameweek(&client, &config).await;
//!     println!("latest completed gameweek: {}", completed.id);
//!
//!     if let Some(deadline) = fetch_upcoming_deadline(&client, &config).await? {
//!         println!("next deadline: {deadline}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod logging;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{fetch_bootstrap, fetch_player_gameweek_record};
pub use data_fetcher::models::{
    BootstrapResponse, CompletedGameweek, Gameweek, Manager, Phase, PlayerGameweekRecord,
};
pub use error::AppError;

// Re-export cache maintenance helpers for external tools and tests
pub use data_fetcher::cache::{clear_snapshot_cache, get_snapshot_cache_size};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
