use std::cmp::Ordering;

use super::aggregate::{PlayerAggregate, SeasonTable};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub position: usize,
    pub name: String,
    pub aggregate: PlayerAggregate,
}

/// Points, then wins, then points for, then average differential, then name.
pub fn compare_standing(
    (a_name, a): (&str, &PlayerAggregate),
    (b_name, b): (&str, &PlayerAggregate),
) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| b.points_for.cmp(&a.points_for))
        .then_with(|| b.avg_diff().total_cmp(&a.avg_diff()))
        .then_with(|| a_name.cmp(b_name))
}

/// Season standings, best first.
pub fn rank_players(table: &SeasonTable) -> Vec<RankedPlayer> {
    let mut entries: Vec<(&String, &PlayerAggregate)> = table.iter().collect();
    entries.sort_by(|a, b| compare_standing((a.0.as_str(), a.1), (b.0.as_str(), b.1)));

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (name, aggregate))| RankedPlayer {
            position: idx + 1,
            name: name.clone(),
            aggregate: *aggregate,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(points: u32, wins: u32, losses: u32, pf: u32, pa: u32) -> PlayerAggregate {
        PlayerAggregate {
            points,
            wins,
            losses,
            points_for: pf,
            points_against: pa,
            ..Default::default()
        }
    }

    fn table(rows: &[(&str, PlayerAggregate)]) -> SeasonTable {
        let mut table = SeasonTable::new();
        for (name, row) in rows {
            *table.entry(name) = *row;
        }
        table
    }

    fn order(table: &SeasonTable) -> Vec<String> {
        rank_players(table).into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_points_first() {
        let t = table(&[
            ("Ann", aggregate(100, 9, 0, 99, 10)),
            ("Ben", aggregate(250, 0, 3, 10, 45)),
        ]);
        assert_eq!(order(&t), vec!["Ben", "Ann"]);
    }

    #[test]
    fn test_cascade_through_avg_diff() {
        let t = table(&[
            ("Ann", aggregate(300, 2, 2, 40, 40)),
            ("Ben", aggregate(300, 2, 1, 40, 30)),
            ("Cal", aggregate(300, 3, 0, 10, 0)),
            ("Dee", aggregate(300, 2, 2, 41, 60)),
        ]);
        // Cal has most wins; Dee has most PF among the two-win group;
        // Ben beats Ann on average differential.
        assert_eq!(order(&t), vec!["Cal", "Dee", "Ben", "Ann"]);
    }

    #[test]
    fn test_name_breaks_full_tie() {
        let row = aggregate(50, 1, 1, 20, 20);
        let t = table(&[("Zed", row), ("Amy", row)]);
        let ranked = rank_players(&t);
        assert_eq!(ranked[0].name, "Amy");
        assert_eq!(ranked[0].position, 1);
        assert_eq!(ranked[1].position, 2);
    }
}
