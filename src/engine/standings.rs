//! Pool-phase standings and the tie-break cascade that turns them into
//! bracket seeds.

use std::collections::HashMap;

use crate::domain::{GameRecord, PoolAudit, PoolStandingRow, Stage};

use super::hashing::order_deterministically;
use super::seeding::LetterAssignment;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PoolLine {
    name: String,
    wins: u32,
    losses: u32,
    points_for: u32,
    points_against: u32,
}

impl PoolLine {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            wins: 0,
            losses: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    fn diff(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    fn tie_key(&self) -> (u32, i64, u32) {
        (self.wins, self.diff(), self.points_for)
    }
}

/// Final pool order (best first) plus how every tie was broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStandings {
    pub rows: Vec<PoolStandingRow>,
    pub notes: Vec<String>,
}

impl PoolStandings {
    pub fn order(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.player.clone()).collect()
    }

    /// Rank 1 becomes `A`, rank 2 `B`, and so on.
    pub fn bracket_letters(&self) -> LetterAssignment {
        LetterAssignment::from_ordered(self.order())
    }

    pub fn to_audit(&self) -> PoolAudit {
        PoolAudit {
            rows: self.rows.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Ranks the pool from its games. Sorting is wins, differential, points for,
/// name; blocks still level on the first three are then re-ordered: a pair by
/// head-to-head or a deterministic draw, larger blocks by the draw alone.
pub fn resolve_pool_standings(participants: &[String], games: &[GameRecord]) -> PoolStandings {
    let pool_games: Vec<&GameRecord> = games.iter().filter(|g| g.is_stage(Stage::Pool)).collect();
    let mut lines = tally(participants, &pool_games);
    lines.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.diff().cmp(&a.diff()))
            .then_with(|| b.points_for.cmp(&a.points_for))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut notes = Vec::new();
    let mut start = 0;
    while start < lines.len() {
        let end = block_end(&lines, start);
        match end - start {
            1 => {}
            2 => break_pair(&mut lines[start..end], &pool_games, &mut notes),
            _ => break_block(&mut lines[start..end], &mut notes),
        }
        start = end;
    }

    PoolStandings {
        rows: build_rows(lines),
        notes,
    }
}

fn tally(participants: &[String], games: &[&GameRecord]) -> Vec<PoolLine> {
    let mut lines: Vec<PoolLine> = participants.iter().map(|p| PoolLine::new(p)).collect();
    let index: HashMap<String, usize> = participants
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), idx))
        .collect();

    for game in games {
        for name in game.players() {
            let (Some(&idx), Some((own, opponent))) = (index.get(name), game.scores_for(name))
            else {
                continue;
            };
            let line = &mut lines[idx];
            line.points_for += own;
            line.points_against += opponent;
            if own > opponent {
                line.wins += 1;
            } else if own < opponent {
                line.losses += 1;
            }
        }
    }
    lines
}

fn block_end(lines: &[PoolLine], start: usize) -> usize {
    let key = lines[start].tie_key();
    lines[start..]
        .iter()
        .position(|line| line.tie_key() != key)
        .map_or(lines.len(), |offset| start + offset)
}

fn break_pair(pair: &mut [PoolLine], games: &[&GameRecord], notes: &mut Vec<String>) {
    let (first, second) = (pair[0].name.clone(), pair[1].name.clone());
    let (first_wins, second_wins) = head_to_head(&first, &second, games);

    if first_wins != second_wins {
        if second_wins > first_wins {
            pair.swap(0, 1);
        }
        let (high, low) = (first_wins.max(second_wins), first_wins.min(second_wins));
        notes.push(format!(
            "{} placed above {} on head-to-head ({}-{})",
            pair[0].name, pair[1].name, high, low
        ));
        return;
    }

    reorder_by_draw(pair);
    notes.push(format!(
        "{} and {} level with no head-to-head separation ({}-{}); deterministic draw placed {} first",
        first, second, first_wins, second_wins, pair[0].name
    ));
}

fn break_block(block: &mut [PoolLine], notes: &mut Vec<String>) {
    let tied: Vec<String> = block.iter().map(|line| line.name.clone()).collect();
    reorder_by_draw(block);
    let drawn: Vec<&str> = block.iter().map(|line| line.name.as_str()).collect();
    notes.push(format!(
        "{}-way tie between {}; deterministic draw order: {}",
        tied.len(),
        tied.join(", "),
        drawn.join(", ")
    ));
}

/// Wins of each player in games where the two stood on opposite sides.
fn head_to_head(first: &str, second: &str, games: &[&GameRecord]) -> (u32, u32) {
    let mut tally = (0, 0);
    for game in games {
        let first_on_one = game.team1.iter().any(|n| n == first);
        let second_on_one = game.team1.iter().any(|n| n == second);
        let first_on_two = game.team2.iter().any(|n| n == first);
        let second_on_two = game.team2.iter().any(|n| n == second);

        let opposed = (first_on_one && second_on_two) || (first_on_two && second_on_one);
        if !opposed {
            continue;
        }
        match game.scores_for(first) {
            Some((own, opponent)) if own > opponent => tally.0 += 1,
            Some((own, opponent)) if own < opponent => tally.1 += 1,
            _ => {}
        }
    }
    tally
}

fn reorder_by_draw(block: &mut [PoolLine]) {
    let names: Vec<&str> = block.iter().map(|line| line.name.as_str()).collect();
    let drawn = order_deterministically(&names);
    block.sort_by_key(|line| drawn.iter().position(|name| *name == line.name));
}

fn build_rows(lines: Vec<PoolLine>) -> Vec<PoolStandingRow> {
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| PoolStandingRow {
            rank: idx + 1,
            diff: line.diff(),
            player: line.name,
            wins: line.wins,
            losses: line.losses,
            points_for: line.points_for,
            points_against: line.points_against,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(t1: [&str; 2], t2: [&str; 2], s1: u32, s2: u32) -> GameRecord {
        GameRecord::new(
            [t1[0].to_string(), t1[1].to_string()],
            [t2[0].to_string(), t2[1].to_string()],
            s1,
            s2,
            Stage::Pool,
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn row<'a>(standings: &'a PoolStandings, name: &str) -> &'a PoolStandingRow {
        standings.rows.iter().find(|r| r.player == name).unwrap()
    }

    // Zoe and Abe both finish 2-1, +10, 30 points for; Zoe beat Abe once.
    fn head_to_head_games() -> Vec<GameRecord> {
        vec![
            pool(["Zoe", "Cal"], ["Abe", "Dan"], 11, 6),
            pool(["Zoe", "Eve"], ["Cal", "Fay"], 11, 5),
            pool(["Zoe", "Dan"], ["Eve", "Fay"], 8, 9),
            pool(["Abe", "Cal"], ["Eve", "Dan"], 12, 4),
            pool(["Abe", "Fay"], ["Cal", "Eve"], 12, 5),
        ]
    }

    // Same records for Zoe and Abe, but they only ever partner each other.
    fn no_meeting_games() -> Vec<GameRecord> {
        vec![
            pool(["Zoe", "Abe"], ["Cal", "Dan"], 11, 6),
            pool(["Zoe", "Eve"], ["Cal", "Fay"], 11, 5),
            pool(["Zoe", "Dan"], ["Eve", "Fay"], 8, 9),
            pool(["Abe", "Cal"], ["Eve", "Dan"], 12, 4),
            pool(["Abe", "Fay"], ["Cal", "Eve"], 7, 10),
        ]
    }

    fn roster() -> Vec<String> {
        names(&["Abe", "Cal", "Dan", "Eve", "Fay", "Zoe"])
    }

    #[test]
    fn test_pair_broken_by_head_to_head() {
        let standings = resolve_pool_standings(&roster(), &head_to_head_games());

        for name in ["Zoe", "Abe"] {
            let line = row(&standings, name);
            assert_eq!((line.wins, line.diff, line.points_for), (2, 10, 30));
        }
        let order = standings.order();
        let zoe = order.iter().position(|n| n == "Zoe").unwrap();
        let abe = order.iter().position(|n| n == "Abe").unwrap();
        assert!(zoe < abe);
        assert_eq!(zoe + 1, abe);
        assert!(standings.notes.iter().any(|n| n.contains("head-to-head (1-0)")));
    }

    #[test]
    fn test_pair_without_meeting_uses_draw() {
        let first = resolve_pool_standings(&roster(), &no_meeting_games());
        let second = resolve_pool_standings(&roster(), &no_meeting_games());
        assert_eq!(first, second);

        for name in ["Zoe", "Abe"] {
            let line = row(&first, name);
            assert_eq!((line.wins, line.diff, line.points_for), (2, 10, 30));
        }

        let drawn = order_deterministically(&["Zoe", "Abe"]);
        let order = first.order();
        let tied: Vec<&String> = order.iter().filter(|n| *n == "Zoe" || *n == "Abe").collect();
        assert_eq!(tied, drawn.iter().collect::<Vec<_>>());
        assert!(first.notes.iter().any(|n| n.contains("deterministic draw")));
    }

    #[test]
    fn test_primary_sort() {
        let games = vec![
            pool(["A", "B"], ["C", "D"], 11, 3),
            pool(["A", "D"], ["B", "C"], 11, 9),
            pool(["A", "C"], ["B", "D"], 11, 7),
        ];
        let standings = resolve_pool_standings(&names(&["A", "B", "C", "D"]), &games);
        assert_eq!(standings.rows[0].player, "A");
        assert_eq!(standings.rows[0].wins, 3);
        assert_eq!(standings.rows[0].rank, 1);
        assert_eq!(standings.rows[3].rank, 4);
        assert_eq!(standings.bracket_letters().player('A'), Some("A"));
    }

    #[test]
    fn test_larger_tie_ignores_head_to_head() {
        // Everyone 1-1 with identical points: a single four-way block.
        let games = vec![
            pool(["A", "B"], ["C", "D"], 11, 5),
            pool(["C", "D"], ["A", "B"], 11, 5),
        ];
        let participants = names(&["A", "B", "C", "D"]);
        let standings = resolve_pool_standings(&participants, &games);

        assert_eq!(standings.order(), order_deterministically(&participants));
        assert_eq!(standings.notes.len(), 1);
        assert!(standings.notes[0].starts_with("4-way tie"));
    }

    #[test]
    fn test_non_pool_games_are_ignored() {
        let mut games = vec![pool(["A", "B"], ["C", "D"], 11, 2)];
        games.push(
            GameRecord::new(
                ["C".to_string(), "D".to_string()],
                ["A".to_string(), "B".to_string()],
                15,
                0,
                Stage::Bracket,
            )
            .labeled("Final"),
        );
        let standings = resolve_pool_standings(&names(&["A", "B", "C", "D"]), &games);
        assert_eq!(row(&standings, "C").wins, 0);
    }
}
