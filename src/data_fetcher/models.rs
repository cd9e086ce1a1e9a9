use serde::{Deserialize, Serialize};

/// One round of fixtures in the season, as returned in the bootstrap
/// `events` array. The deadline is kept in its wire form and parsed where
/// it is compared against the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gameweek {
    pub id: i32,
    pub deadline_time: String,
    #[serde(default)]
    pub finished: bool,
}

/// A named span of consecutive gameweeks, typically a calendar month.
/// The API also returns a sentinel phase named "Overall" covering the whole
/// season; it is filtered out before any boundary reasoning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start_event: i32,
    pub stop_event: i32,
}

/// Model for the bootstrap-static API response structure.
/// One immutable snapshot of the season calendar per fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapResponse {
    pub events: Vec<Gameweek>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// One row of a manager's per-gameweek history from the entry history API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameweekHistoryEntry {
    pub event: i32,
    pub points: i32,
    #[serde(default)]
    pub event_transfers_cost: i32,
}

/// Model for the entry history API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerHistoryResponse {
    pub current: Vec<GameweekHistoryEntry>,
}

/// A fantasy-league participant: external numeric id plus display name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: i64,
    pub name: String,
}

impl Manager {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Manager {
            id,
            name: name.into(),
        }
    }
}

/// The most recent gameweek whose deadline has passed.
///
/// `Default` doubles as the sentinel for "season not started": gameweek ids
/// start at 1, so id 0 never matches a real gameweek.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletedGameweek {
    pub id: i32,
    pub finished: bool,
}

impl CompletedGameweek {
    pub fn new(id: i32, finished: bool) -> Self {
        CompletedGameweek { id, finished }
    }

    /// True when this is the "no completed gameweek yet" sentinel
    pub fn is_sentinel(&self) -> bool {
        self.id == 0
    }
}

/// One manager's score line for a single gameweek. Derived per request,
/// never persisted. `rank` is left unset at construction and filled in by
/// callers that compute standings across several records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerGameweekRecord {
    pub player_id: i64,
    pub player_name: String,
    pub gross_points: i32,
    pub transfer_cost: i32,
    pub net_points: i32,
    pub rank: Option<u32>,
    pub gameweek: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gameweek_deserialization_with_extra_fields() {
        // The live API sends far more fields than we model; serde must
        // ignore them and default `finished` when absent.
        let json = r#"{
            "id": 7,
            "name": "Gameweek 7",
            "deadline_time": "2025-10-04T11:00:00Z",
            "average_entry_score": 52
        }"#;
        let gw: Gameweek = serde_json::from_str(json).unwrap();
        assert_eq!(gw.id, 7);
        assert_eq!(gw.deadline_time, "2025-10-04T11:00:00Z");
        assert!(!gw.finished);
    }

    #[test]
    fn test_bootstrap_response_deserialization() {
        let json = r#"{
            "events": [
                {"id": 1, "deadline_time": "2025-08-15T17:30:00Z", "finished": true}
            ],
            "phases": [
                {"id": 1, "name": "Overall", "start_event": 1, "stop_event": 38},
                {"id": 2, "name": "August", "start_event": 1, "stop_event": 3}
            ]
        }"#;
        let snapshot: BootstrapResponse = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.events.len(), 1);
        assert_eq!(snapshot.phases.len(), 2);
        assert_eq!(snapshot.phases[1].name, "August");
        assert_eq!(snapshot.phases[1].start_event, 1);
        assert_eq!(snapshot.phases[1].stop_event, 3);
    }

    #[test]
    fn test_history_entry_defaults_transfer_cost() {
        let json = r#"{"event": 12, "points": 61}"#;
        let entry: GameweekHistoryEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.event, 12);
        assert_eq!(entry.points, 61);
        assert_eq!(entry.event_transfers_cost, 0);
    }

    #[test]
    fn test_completed_gameweek_sentinel() {
        let sentinel = CompletedGameweek::default();
        assert_eq!(sentinel.id, 0);
        assert!(!sentinel.finished);
        assert!(sentinel.is_sentinel());
        assert!(!CompletedGameweek::new(1, false).is_sentinel());
    }
}
