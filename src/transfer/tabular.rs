use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use crate::domain::{EventDraft, GameRecord, Placements, Stage, Team};
use crate::engine::templates::{BRONZE, FINAL};

pub const CSV_HEADER: &str = "event,size,team1_a,team1_b,team2_a,team2_b,s1,s2";

#[derive(Debug, Deserialize)]
struct GameRow {
    event: String,
    size: u8,
    team1_a: String,
    team1_b: String,
    team2_a: String,
    team2_b: String,
    s1: u32,
    s2: u32,
}

struct Group {
    key: String,
    size: u8,
    games: Vec<GameRecord>,
}

/// Parses a game sheet into one draft per `event` key, in first-appearance
/// order. Any bad row or group rejects the whole sheet.
pub fn parse_csv(data: &str) -> Result<Vec<EventDraft>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut groups: Vec<Group> = Vec::new();
    for (idx, row) in reader.deserialize::<GameRow>().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        let row = row.with_context(|| format!("Line {}: malformed row", line))?;
        add_row(&mut groups, row).with_context(|| format!("Line {}", line))?;
    }

    if groups.is_empty() {
        bail!("No games found");
    }

    groups
        .into_iter()
        .map(|group| {
            let key = group.key.clone();
            into_draft(group).with_context(|| format!("Event `{}`", key))
        })
        .collect()
}

fn add_row(groups: &mut Vec<Group>, row: GameRow) -> Result<()> {
    let game = GameRecord::new(
        [row.team1_a, row.team1_b],
        [row.team2_a, row.team2_b],
        row.s1,
        row.s2,
        Stage::Pool,
    )
    .normalized()?;

    match groups.iter_mut().find(|g| g.key == row.event) {
        Some(group) if group.size != row.size => {
            bail!("size {} disagrees with earlier rows ({})", row.size, group.size)
        }
        Some(group) => group.games.push(game),
        None => {
            if row.size != 4 && row.size != 8 {
                bail!("size {} needs a guided matchday; only 4 and 8 import", row.size);
            }
            groups.push(Group {
                key: row.event,
                size: row.size,
                games: vec![game],
            });
        }
    }
    Ok(())
}

fn into_draft(group: Group) -> Result<EventDraft> {
    let Group { size, mut games, .. } = group;

    let mut players: Vec<&String> = Vec::new();
    for name in games.iter().flat_map(GameRecord::players) {
        if !players.contains(&name) {
            players.push(name);
        }
    }
    if players.len() > size as usize {
        bail!("{} distinct players for a {}-player matchday", players.len(), size);
    }

    let deciding = if size == 8 { 2 } else { 1 };
    if games.len() < deciding {
        bail!("needs at least {} games", deciding);
    }

    let first_deciding = games.len() - deciding;
    let mut deciding_players: Vec<&String> = Vec::new();
    for name in games[first_deciding..].iter().flat_map(GameRecord::players) {
        if deciding_players.contains(&name) {
            bail!("{} plays in both bronze and final", name);
        }
        deciding_players.push(name);
    }

    let mut placements = Placements::empty(size);
    let labels: &[(&str, u8)] = if size == 8 {
        &[(BRONZE, 3), (FINAL, 1)]
    } else {
        &[(FINAL, 1)]
    };

    for (game, &(label, top_rank)) in games[first_deciding..].iter_mut().zip(labels) {
        let (winner, loser) = split(game).ok_or_else(|| anyhow!("{} ended in a tie", label))?;
        placements.assign(top_rank, winner.to_vec())?;
        placements.assign(top_rank + 1, loser.to_vec())?;
        game.stage = Some(Stage::Bracket);
        game.label = Some(label.to_string());
    }

    Ok(EventDraft {
        placements,
        games,
        pool_audit: None,
    })
}

fn split(game: &GameRecord) -> Option<(&Team, &Team)> {
    let winner = game.winner()?;
    let loser = if winner == &game.team1 { &game.team2 } else { &game.team1 };
    Some((winner, loser))
}
