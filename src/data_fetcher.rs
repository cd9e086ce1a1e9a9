//! Fetching and deriving season calendar facts from the fantasy league API
//!
//! `api` talks to the upstream endpoints, `processors` holds the pure
//! derivations over already-fetched data, `cache` time-boxes bootstrap
//! snapshots, and `models` mirrors the wire format.

pub mod api;
pub mod cache;
pub mod models;
pub mod processors;

pub use api::{
    fetch_bootstrap, fetch_current_phase, fetch_elapsed_phases, fetch_latest_completed_gameweek,
    fetch_manager_history, fetch_phases, fetch_player_gameweek_record,
    fetch_player_gameweek_records, fetch_upcoming_deadline,
};
pub use cache::clear_snapshot_cache;
pub use models::{
    BootstrapResponse, CompletedGameweek, Gameweek, GameweekHistoryEntry, Manager,
    ManagerHistoryResponse, Phase, PlayerGameweekRecord,
};
