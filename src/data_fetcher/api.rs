use crate::config::Config;
use crate::constants::endpoints;
use crate::data_fetcher::cache::{cache_snapshot, get_cached_snapshot};
use crate::data_fetcher::models::{
    BootstrapResponse, CompletedGameweek, Manager, ManagerHistoryResponse, Phase,
    PlayerGameweekRecord,
};
use crate::data_fetcher::processors::{
    current_phase, elapsed_phases, gameweek_record, latest_completed_gameweek, phase_spans,
    upcoming_deadline,
};
use crate::error::AppError;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

/// Joins an endpoint path onto the configured base URL, tolerating a base
/// with or without a trailing slash.
fn build_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

pub fn build_bootstrap_url(base: &str) -> String {
    build_url(base, endpoints::BOOTSTRAP)
}

pub fn build_history_url(base: &str, entry_id: i64) -> String {
    build_url(
        base,
        &format!(
            "{}{}{}",
            endpoints::ENTRY_PREFIX,
            entry_id,
            endpoints::HISTORY_SUFFIX
        ),
    )
}

#[instrument(skip(client))]
async fn fetch<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, AppError> {
    debug!("Fetching data from URL: {}", url);
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            AppError::network_timeout(url)
        } else if e.is_connect() {
            AppError::network_connection(url, e.to_string())
        } else {
            AppError::ApiFetch(e)
        }
    })?;

    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("API request failed: {} (URL: {})", status, url);
        return Err(match status.as_u16() {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            s if status.is_client_error() => AppError::api_client_error(s, reason, url),
            s => AppError::api_server_error(s, reason, url),
        });
    }

    let response_text = response.text().await?;
    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse API response: {} (URL: {})", e, url);
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );
            Err(AppError::ApiParse(e))
        }
    }
}

/// Fetches the full season calendar snapshot (gameweeks and phases).
///
/// Served from the time-boxed snapshot cache when a fresh entry exists;
/// `force_refresh` bypasses the cache and overwrites it with live data.
#[instrument(skip(client, config))]
pub async fn fetch_bootstrap(
    client: &Client,
    config: &Config,
    force_refresh: bool,
) -> Result<BootstrapResponse, AppError> {
    let cache_key = config.api_base_url.clone();

    if !force_refresh {
        if let Some(snapshot) = get_cached_snapshot(&cache_key).await {
            info!("Using cached bootstrap snapshot");
            return Ok(snapshot);
        }
    }

    let url = build_bootstrap_url(&config.api_base_url);
    let snapshot: BootstrapResponse = fetch(client, &url).await?;
    info!(
        "Fetched bootstrap snapshot: {} gameweeks, {} phases",
        snapshot.events.len(),
        snapshot.phases.len()
    );

    cache_snapshot(cache_key, snapshot.clone()).await;
    Ok(snapshot)
}

/// Fetches one manager's per-gameweek history
#[instrument(skip(client, config))]
pub async fn fetch_manager_history(
    client: &Client,
    config: &Config,
    entry_id: i64,
) -> Result<ManagerHistoryResponse, AppError> {
    let url = build_history_url(&config.api_base_url, entry_id);
    let history: ManagerHistoryResponse = fetch(client, &url).await?;
    debug!(
        "Fetched history for entry {}: {} gameweek rows",
        entry_id,
        history.current.len()
    );
    Ok(history)
}

/// Resolves the most recent gameweek whose deadline has passed.
///
/// Never fails: a fetch error is logged and the sentinel
/// `CompletedGameweek { id: 0, finished: false }` returned, so callers that
/// only need "how far along is the season" keep working while the API is
/// down.
#[instrument(skip(client, config))]
pub async fn fetch_latest_completed_gameweek(
    client: &Client,
    config: &Config,
) -> CompletedGameweek {
    match fetch_bootstrap(client, config, false).await {
        Ok(snapshot) => latest_completed_gameweek(&snapshot.events, Utc::now()),
        Err(e) => {
            error!("Failed to resolve latest completed gameweek: {}", e);
            CompletedGameweek::default()
        }
    }
}

/// Resolves the next future deadline, shifted to the +05:30 display offset.
/// Returns `Ok(None)` when the season has no future gameweek left.
#[instrument(skip(client, config))]
pub async fn fetch_upcoming_deadline(
    client: &Client,
    config: &Config,
) -> Result<Option<DateTime<FixedOffset>>, AppError> {
    let snapshot = fetch_bootstrap(client, config, false).await?;
    Ok(upcoming_deadline(&snapshot.events, Utc::now()))
}

/// Lists phase boundaries in API order, "Overall" excluded
#[instrument(skip(client, config))]
pub async fn fetch_phases(client: &Client, config: &Config) -> Result<Vec<Phase>, AppError> {
    let snapshot = fetch_bootstrap(client, config, false).await?;
    Ok(phase_spans(&snapshot.phases))
}

/// Resolves the phases that have fully elapsed. A fetch failure is logged
/// and surfaces as `None` rather than an error.
#[instrument(skip(client, config))]
pub async fn fetch_elapsed_phases(client: &Client, config: &Config) -> Option<Vec<Phase>> {
    match fetch_bootstrap(client, config, false).await {
        Ok(snapshot) => {
            let completed = latest_completed_gameweek(&snapshot.events, Utc::now());
            Some(elapsed_phases(&snapshot.phases, &completed))
        }
        Err(e) => {
            error!("Failed to resolve elapsed phases: {}", e);
            None
        }
    }
}

/// Resolves the name of the phase currently in progress, falling back to
/// the real-world month name. A fetch failure is logged and surfaces as
/// `None`.
#[instrument(skip(client, config))]
pub async fn fetch_current_phase(client: &Client, config: &Config) -> Option<String> {
    match fetch_bootstrap(client, config, false).await {
        Ok(snapshot) => {
            let now = Utc::now();
            let completed = latest_completed_gameweek(&snapshot.events, now);
            Some(current_phase(&snapshot.phases, &completed, now))
        }
        Err(e) => {
            error!("Failed to resolve current phase: {}", e);
            None
        }
    }
}

/// Fetches one manager's score record for a single gameweek.
/// Returns `Ok(None)` when their history has no row for that gameweek.
#[instrument(skip(client, config, manager), fields(entry_id = manager.id))]
pub async fn fetch_player_gameweek_record(
    client: &Client,
    config: &Config,
    manager: &Manager,
    gameweek: i32,
) -> Result<Option<PlayerGameweekRecord>, AppError> {
    let history = fetch_manager_history(client, config, manager.id).await?;
    let record = gameweek_record(manager, &history.current, gameweek);
    if record.is_none() {
        warn!(
            "No history entry for entry {} in gameweek {}",
            manager.id, gameweek
        );
    }
    Ok(record)
}

/// Fetches gameweek records for several managers concurrently.
///
/// Managers without a row for the gameweek are dropped from the result
/// (already logged by the per-manager fetch); any fetch error fails the
/// whole batch.
#[instrument(skip(client, config, managers), fields(manager_count = managers.len()))]
pub async fn fetch_player_gameweek_records(
    client: &Client,
    config: &Config,
    managers: &[Manager],
    gameweek: i32,
) -> Result<Vec<PlayerGameweekRecord>, AppError> {
    let records = futures::future::try_join_all(
        managers
            .iter()
            .map(|manager| fetch_player_gameweek_record(client, config, manager, gameweek)),
    )
    .await?;

    let found: Vec<PlayerGameweekRecord> = records.into_iter().flatten().collect();
    info!(
        "Fetched {} of {} manager records for gameweek {}",
        found.len(),
        managers.len(),
        gameweek
    );
    Ok(found)
}
