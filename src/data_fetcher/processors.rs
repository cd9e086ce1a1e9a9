use crate::constants::{DISPLAY_UTC_OFFSET_SECONDS, OVERALL_PHASE_NAME};
use crate::data_fetcher::models::{
    CompletedGameweek, Gameweek, GameweekHistoryEntry, Manager, Phase, PlayerGameweekRecord,
};
use crate::error::AppError;
use chrono::{DateTime, FixedOffset, Utc};
use tracing::{debug, info, warn};

/// Parses a gameweek deadline from its wire form into a UTC timestamp.
///
/// The API sends RFC 3339 timestamps with a `Z` suffix
/// (e.g. `2025-08-15T17:30:00Z`).
pub fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::datetime_parse_error(format!("invalid deadline '{raw}': {e}")))
}

/// Finds the most recent gameweek whose deadline is strictly before `now`.
///
/// Gameweeks are scanned in descending id order. Rows with malformed
/// deadlines are logged and skipped rather than failing the whole lookup.
/// When nothing qualifies (season not started, or every row malformed) the
/// sentinel `CompletedGameweek { id: 0, finished: false }` is returned.
pub fn latest_completed_gameweek(events: &[Gameweek], now: DateTime<Utc>) -> CompletedGameweek {
    let mut sorted: Vec<&Gameweek> = events.iter().collect();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));

    for gw in sorted {
        match parse_deadline(&gw.deadline_time) {
            Ok(deadline) if deadline < now => {
                info!(
                    "Gameweek details: {} - {} - {}",
                    gw.id, gw.deadline_time, gw.finished
                );
                return CompletedGameweek::new(gw.id, gw.finished);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Skipping gameweek {} with bad deadline: {}", gw.id, e);
            }
        }
    }

    debug!("No completed gameweek found, returning sentinel");
    CompletedGameweek::default()
}

/// Finds the next deadline strictly after `now`, shifted to the fixed
/// +05:30 display offset. Returns `None` once the season has run out of
/// future gameweeks.
pub fn upcoming_deadline(
    events: &[Gameweek],
    now: DateTime<Utc>,
) -> Option<DateTime<FixedOffset>> {
    let display_offset = FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECONDS)
        .expect("+05:30 is a valid UTC offset");

    let mut sorted: Vec<&Gameweek> = events.iter().collect();
    sorted.sort_by_key(|gw| gw.id);

    for gw in sorted {
        match parse_deadline(&gw.deadline_time) {
            Ok(deadline) if deadline > now => {
                debug!("Next deadline is gameweek {}: {}", gw.id, gw.deadline_time);
                return Some(deadline.with_timezone(&display_offset));
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Skipping gameweek {} with bad deadline: {}", gw.id, e);
            }
        }
    }

    None
}

/// Lists phase boundaries in API order, excluding the "Overall" sentinel
/// phase that spans the entire season.
pub fn phase_spans(phases: &[Phase]) -> Vec<Phase> {
    phases
        .iter()
        .filter(|p| p.name != OVERALL_PHASE_NAME)
        .cloned()
        .collect()
}

/// Returns the phases that have fully elapsed given the latest completed
/// gameweek: the completed gameweek lies past the phase's stop boundary, or
/// sits exactly on it with the gameweek finished.
pub fn elapsed_phases(phases: &[Phase], completed: &CompletedGameweek) -> Vec<Phase> {
    phase_spans(phases)
        .into_iter()
        .filter(|p| {
            completed.id > p.stop_event || (completed.id == p.stop_event && completed.finished)
        })
        .collect()
}

/// Resolves the name of the phase currently in progress.
///
/// Scans phases in API order and returns the first one containing the
/// latest completed gameweek that is not yet complete: the gameweek is
/// strictly inside the span, or sits on the stop boundary without having
/// finished. When no phase matches (season not started, or between
/// seasons) the current real-world month name derived from `now` is
/// returned instead.
pub fn current_phase(phases: &[Phase], completed: &CompletedGameweek, now: DateTime<Utc>) -> String {
    for phase in phase_spans(phases) {
        let in_span = completed.id >= phase.start_event && completed.id <= phase.stop_event;
        let still_open =
            completed.id < phase.stop_event || (completed.id == phase.stop_event && !completed.finished);
        if in_span && still_open {
            debug!(
                "Current phase {} covers gameweeks {}..={}",
                phase.name, phase.start_event, phase.stop_event
            );
            return phase.name;
        }
    }

    let month = now.format("%B").to_string();
    debug!("No phase in progress, falling back to month name {}", month);
    month
}

/// Title-cases the first two whitespace-separated tokens of a manager name
/// and drops the rest, matching how names are shown in score tables.
pub fn format_manager_name(raw: &str) -> String {
    raw.split_whitespace()
        .take(2)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str(),
        None => String::new(),
    }
}

/// Builds a manager's score record for one gameweek from their history.
///
/// Net points are gross points minus the transfer penalty cost. Returns
/// `None` when the history has no row for the requested gameweek, e.g. the
/// manager joined mid-season.
pub fn gameweek_record(
    manager: &Manager,
    history: &[GameweekHistoryEntry],
    gameweek: i32,
) -> Option<PlayerGameweekRecord> {
    let entry = history.iter().find(|e| e.event == gameweek)?;

    Some(PlayerGameweekRecord {
        player_id: manager.id,
        player_name: format_manager_name(&manager.name),
        gross_points: entry.points,
        transfer_cost: entry.event_transfers_cost,
        net_points: entry.points - entry.event_transfers_cost,
        rank: None,
        gameweek,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn gw(id: i32, deadline: &str, finished: bool) -> Gameweek {
        Gameweek {
            id,
            deadline_time: deadline.to_string(),
            finished,
        }
    }

    fn phase(name: &str, start: i32, stop: i32) -> Phase {
        Phase {
            name: name.to_string(),
            start_event: start,
            stop_event: stop,
        }
    }

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_latest_completed_gameweek_past_and_future() {
        let events = vec![
            gw(1, "2025-08-15T17:30:00Z", true),
            gw(2, "2025-09-20T17:30:00Z", false),
        ];
        let completed = latest_completed_gameweek(&events, test_now());
        assert_eq!(completed, CompletedGameweek::new(1, true));
    }

    #[test]
    fn test_latest_completed_gameweek_prefers_highest_id() {
        // Events arrive in arbitrary order; the scan must be by descending id
        let events = vec![
            gw(2, "2025-08-22T17:30:00Z", false),
            gw(1, "2025-08-15T17:30:00Z", true),
            gw(3, "2025-10-04T11:00:00Z", false),
        ];
        let completed = latest_completed_gameweek(&events, test_now());
        assert_eq!(completed, CompletedGameweek::new(2, false));
    }

    #[test]
    fn test_latest_completed_gameweek_sentinel_when_all_future() {
        let events = vec![
            gw(1, "2025-09-15T17:30:00Z", false),
            gw(2, "2025-09-22T17:30:00Z", false),
        ];
        let completed = latest_completed_gameweek(&events, test_now());
        assert!(completed.is_sentinel());
        assert_eq!(completed, CompletedGameweek::new(0, false));
    }

    #[test]
    fn test_latest_completed_gameweek_skips_malformed_rows() {
        let events = vec![
            gw(2, "not a timestamp", false),
            gw(1, "2025-08-15T17:30:00Z", true),
        ];
        let completed = latest_completed_gameweek(&events, test_now());
        assert_eq!(completed, CompletedGameweek::new(1, true));

        // All rows malformed degrades to the sentinel instead of failing
        let garbage = vec![gw(1, "garbage", true)];
        assert!(latest_completed_gameweek(&garbage, test_now()).is_sentinel());
    }

    #[test]
    fn test_upcoming_deadline_shifted_to_display_offset() {
        let events = vec![
            gw(1, "2025-08-15T17:30:00Z", true),
            gw(2, "2025-09-20T17:30:00Z", false),
        ];
        let deadline = upcoming_deadline(&events, test_now()).unwrap();
        // 17:30 UTC shown as 23:00 at +05:30
        assert_eq!(deadline.offset().local_minus_utc(), 5 * 3600 + 30 * 60);
        assert_eq!(deadline.format("%Y-%m-%d %H:%M").to_string(), "2025-09-20 23:00");
    }

    #[test]
    fn test_upcoming_deadline_none_when_season_over() {
        let events = vec![gw(1, "2025-08-15T17:30:00Z", true)];
        assert!(upcoming_deadline(&events, test_now()).is_none());
    }

    #[test]
    fn test_phase_spans_excludes_overall() {
        let phases = vec![
            phase("Overall", 1, 38),
            phase("August", 1, 3),
            phase("September", 4, 6),
        ];
        let spans = phase_spans(&phases);
        assert_eq!(spans.len(), 2);
        assert!(spans.iter().all(|p| p.name != "Overall"));
        // API order preserved
        assert_eq!(spans[0].name, "August");
        assert_eq!(spans[1].name, "September");
    }

    #[test]
    fn test_elapsed_phases_on_stop_boundary() {
        let phases = vec![
            phase("Overall", 1, 38),
            phase("August", 1, 3),
            phase("September", 4, 6),
        ];

        // Gameweek 3 finished: August has fully elapsed
        let elapsed = elapsed_phases(&phases, &CompletedGameweek::new(3, true));
        assert_eq!(elapsed, vec![phase("August", 1, 3)]);

        // Gameweek 3 still running: nothing has elapsed yet
        let elapsed = elapsed_phases(&phases, &CompletedGameweek::new(3, false));
        assert!(elapsed.is_empty());
    }

    #[test]
    fn test_elapsed_phases_sentinel_yields_nothing() {
        let phases = vec![phase("August", 1, 3)];
        assert!(elapsed_phases(&phases, &CompletedGameweek::default()).is_empty());
    }

    #[test]
    fn test_current_phase_inside_span() {
        let phases = vec![
            phase("Overall", 1, 38),
            phase("August", 1, 3),
            phase("September", 4, 6),
        ];
        let name = current_phase(&phases, &CompletedGameweek::new(5, true), test_now());
        assert_eq!(name, "September");
    }

    #[test]
    fn test_current_phase_unfinished_stop_boundary_keeps_phase_open() {
        let phases = vec![phase("August", 1, 3), phase("September", 4, 6)];

        let name = current_phase(&phases, &CompletedGameweek::new(3, false), test_now());
        assert_eq!(name, "August");

        // Once gameweek 3 finishes, August is no longer current
        let name = current_phase(&phases, &CompletedGameweek::new(3, true), test_now());
        assert_ne!(name, "August");
    }

    #[test]
    fn test_current_phase_falls_back_to_month_name() {
        let phases = vec![phase("August", 1, 3)];
        let name = current_phase(&phases, &CompletedGameweek::default(), test_now());
        assert_eq!(name, "September");
    }

    #[test]
    fn test_format_manager_name() {
        assert_eq!(format_manager_name("himanshu masani"), "Himanshu Masani");
        assert_eq!(format_manager_name("JOHN SMITH jr"), "John Smith");
        assert_eq!(format_manager_name("cher"), "Cher");
        assert_eq!(format_manager_name(""), "");
    }

    #[test]
    fn test_gameweek_record_net_points() {
        let manager = Manager::new(123, "himanshu masani");
        let history = vec![
            GameweekHistoryEntry {
                event: 22,
                points: 48,
                event_transfers_cost: 0,
            },
            GameweekHistoryEntry {
                event: 23,
                points: 92,
                event_transfers_cost: 8,
            },
        ];

        let record = gameweek_record(&manager, &history, 23).unwrap();
        assert_eq!(record.player_id, 123);
        assert_eq!(record.player_name, "Himanshu Masani");
        assert_eq!(record.gross_points, 92);
        assert_eq!(record.transfer_cost, 8);
        assert_eq!(record.net_points, 84);
        assert_eq!(record.rank, None);
        assert_eq!(record.gameweek, 23);
    }

    #[test]
    fn test_gameweek_record_missing_entry() {
        let manager = Manager::new(123, "himanshu masani");
        let history = vec![GameweekHistoryEntry {
            event: 22,
            points: 48,
            event_transfers_cost: 0,
        }];
        assert!(gameweek_record(&manager, &history, 30).is_none());
    }
}
