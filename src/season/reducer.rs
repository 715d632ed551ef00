use log::debug;

use crate::config::{points_for, Tier};
use crate::domain::{Event, GameRecord};

use super::aggregate::SeasonTable;

/// Folds the whole ledger, oldest event first.
pub fn reduce(events: &[Event]) -> SeasonTable {
    events.iter().fold(SeasonTable::new(), |mut table, event| {
        apply_event(&mut table, event);
        table
    })
}

/// Adds one event to the running totals. Events of a size without an award
/// table contribute nothing at all, games included.
pub fn apply_event(table: &mut SeasonTable, event: &Event) {
    let size = event.size();
    let Some(tier) = Tier::for_size(size) else {
        debug!("Skipping event {} with unsupported size {}", event.id, size);
        return;
    };

    award_placements(table, event, tier);
    for game in &event.games {
        apply_game(table, game);
    }
}

fn award_placements(table: &mut SeasonTable, event: &Event, tier: Tier) {
    let size = event.size();
    for (rank, finishers) in event.placements.populated() {
        let points = points_for(size, rank).unwrap_or(0);
        if points == 0 {
            continue;
        }
        for name in finishers.names() {
            let aggregate = table.entry(name);
            aggregate.points += points;
            if rank == 1 {
                aggregate.titles.record(tier);
            }
        }
    }
}

fn apply_game(table: &mut SeasonTable, game: &GameRecord) {
    credit_team(table, &game.team1, game.s1, game.s2);
    credit_team(table, &game.team2, game.s2, game.s1);
}

fn credit_team(table: &mut SeasonTable, team: &[String; 2], own: u32, opponent: u32) {
    for name in team {
        let aggregate = table.entry(name);
        aggregate.points_for += own;
        aggregate.points_against += opponent;
        if own > opponent {
            aggregate.wins += 1;
        } else if own < opponent {
            aggregate.losses += 1;
        }
    }
}
