use anyhow::{Context, Result};

use crate::domain::Event;

pub fn export_json(events: &[Event]) -> Result<String> {
    serde_json::to_string_pretty(events).context("Failed to serialize events")
}

/// Parses a full ledger payload. Rank legality, finisher counts and team
/// shape are checked while decoding each event.
pub fn parse_json(payload: &str) -> Result<Vec<Event>> {
    serde_json::from_str(payload).context("Invalid ledger payload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_payload() {
        let payload = r#"[
            {
                "id": 4,
                "size": 5,
                "placements": { "1": ["Ann", "Ben"], "2": ["Cal", "Dee"], "5": ["Eve"] },
                "gameStats": [
                    { "team1": ["Ann", "Ben"], "team2": ["Cal", "Dee"], "s1": 15, "s2": 12, "stage": "bracket", "label": "Final" }
                ]
            }
        ]"#;

        let events = parse_json(payload).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].size(), 5);
        assert_eq!(events[0].placements.rank_of("Eve"), Some(5));
        assert_eq!(events[0].games[0].label.as_deref(), Some("Final"));

        let again = parse_json(&export_json(&events).unwrap()).unwrap();
        assert_eq!(again, events);
    }

    #[test]
    fn test_rejects_illegal_rank() {
        let payload = r#"[{ "id": 1, "size": 4, "placements": { "3": ["Ann"] } }]"#;
        assert!(parse_json(payload).is_err());
    }

    #[test]
    fn test_rejects_three_finishers() {
        let payload = r#"[{ "id": 1, "size": 4, "placements": { "1": ["Ann", "Ben", "Cal"] } }]"#;
        assert!(parse_json(payload).is_err());
    }

    #[test]
    fn test_rejects_one_player_team() {
        let payload = r#"[{ "id": 1, "size": 4, "gameStats": [
            { "team1": ["Ann", "Ann"], "team2": ["Cal", "Dee"], "s1": 11, "s2": 3 }
        ] }]"#;
        assert!(parse_json(payload).is_err());
    }

    #[test]
    fn test_rejects_player_at_two_ranks() {
        let payload = r#"[{ "id": 1, "size": 4, "placements": { "1": ["Ann", "Ben"], "2": ["Ann", "Ben"] } }]"#;
        assert!(parse_json(payload).is_err());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(parse_json(r#"{ "id": 1 }"#).is_err());
    }
}
