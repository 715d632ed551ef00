use crate::domain::{Placements, RosterSize, Team};
use crate::errors::EngineError;

use super::schedule::{find_result, MatchResult};
use super::seeding::LetterAssignment;
use super::templates::{bracket_template, BRONZE, FINAL, SEMI};

/// Maps finished bracket results to ranks. Ranks whose match has no result
/// are left out.
pub fn resolve_placements(
    size: RosterSize,
    results: &[MatchResult],
    letters: &LetterAssignment,
) -> Result<Placements, EngineError> {
    let winner = |label: &str| find_result(results, label).map(|r| r.winner.clone());
    let loser = |label: &str| find_result(results, label).map(|r| r.loser.clone());

    let mut ranks: Vec<(u8, Option<Vec<String>>)> = vec![
        (1, winner(FINAL).map(team_names)),
        (2, loser(FINAL).map(team_names)),
    ];
    match size {
        RosterSize::Six | RosterSize::Seven => ranks.push((3, loser(SEMI).map(team_names))),
        RosterSize::Eight => {
            ranks.push((3, winner(BRONZE).map(team_names)));
            ranks.push((4, loser(BRONZE).map(team_names)));
        }
        RosterSize::Four | RosterSize::Five => {}
    }
    if let Some((rank, letter)) = bracket_template(size).sits_out {
        let player = letters
            .player(letter)
            .ok_or(EngineError::UnknownLetter(letter))?;
        ranks.push((rank, Some(vec![player.to_string()])));
    }

    Placements::from_ranks(
        size.as_u8(),
        ranks
            .into_iter()
            .filter_map(|(rank, names)| names.map(|names| (rank, names))),
    )
}

fn team_names(team: Team) -> Vec<String> {
    team.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::schedule::Phase;
    use crate::engine::templates::{SEMI_ONE, SEMI_TWO};

    fn team(a: &str, b: &str) -> Team {
        [a.to_string(), b.to_string()]
    }

    fn result(label: &'static str, winner: Team, loser: Team) -> MatchResult {
        MatchResult {
            phase: Phase::Bracket,
            label: Some(label),
            winner,
            loser,
            s1: 15,
            s2: 10,
        }
    }

    fn letters(names: &[&str]) -> LetterAssignment {
        LetterAssignment::from_ordered(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_four_player_final() {
        let results = vec![result(FINAL, team("A", "B"), team("C", "D"))];
        let placements =
            resolve_placements(RosterSize::Four, &results, &letters(&["A", "B", "C", "D"])).unwrap();
        let map = placements.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], vec!["A", "B"]);
        assert_eq!(map[&2], vec!["C", "D"]);
    }

    #[test]
    fn test_five_player_sits_out_last() {
        let results = vec![result(FINAL, team("C", "D"), team("A", "B"))];
        let placements =
            resolve_placements(RosterSize::Five, &results, &letters(&["A", "B", "C", "D", "E"]))
                .unwrap();
        assert_eq!(placements.get(5).unwrap().names(), &["E".to_string()]);
        assert_eq!(placements.rank_of("C"), Some(1));
    }

    #[test]
    fn test_seven_player_semifinal_loser_third() {
        let results = vec![
            result(SEMI, team("E", "F"), team("C", "D")),
            result(FINAL, team("A", "B"), team("E", "F")),
        ];
        let placements = resolve_placements(
            RosterSize::Seven,
            &results,
            &letters(&["A", "B", "C", "D", "E", "F", "G"]),
        )
        .unwrap();
        assert_eq!(placements.rank_of("C"), Some(3));
        assert_eq!(placements.rank_of("G"), Some(7));
        assert_eq!(placements.rank_of("F"), Some(2));
    }

    #[test]
    fn test_eight_player_bronze() {
        let results = vec![
            result(SEMI_ONE, team("A", "B"), team("G", "H")),
            result(SEMI_TWO, team("E", "F"), team("C", "D")),
            result(BRONZE, team("G", "H"), team("C", "D")),
            result(FINAL, team("E", "F"), team("A", "B")),
        ];
        let placements = resolve_placements(
            RosterSize::Eight,
            &results,
            &letters(&["A", "B", "C", "D", "E", "F", "G", "H"]),
        )
        .unwrap();
        assert_eq!(placements.rank_of("E"), Some(1));
        assert_eq!(placements.rank_of("A"), Some(2));
        assert_eq!(placements.rank_of("H"), Some(3));
        assert_eq!(placements.rank_of("D"), Some(4));
    }

    #[test]
    fn test_missing_results_are_dropped() {
        let placements =
            resolve_placements(RosterSize::Six, &[], &letters(&["A", "B", "C", "D", "E", "F"]))
                .unwrap();
        assert!(placements.is_empty());
    }
}
