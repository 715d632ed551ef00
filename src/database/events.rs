use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;

use crate::domain::{Event, EventId, GameRecord, Placements, PoolAudit, Stage};

struct EventRow {
    id: i64,
    size: u8,
    recorded_at: Option<DateTime<Utc>>,
    pool_audit: Option<String>,
}

pub fn delete_all(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM games", [])
        .context("Failed to clear games")?;
    conn.execute("DELETE FROM placements", [])
        .context("Failed to clear placements")?;
    conn.execute("DELETE FROM events", [])
        .context("Failed to clear events")?;
    Ok(())
}

pub fn insert_event(conn: &Connection, seq: usize, event: &Event) -> Result<()> {
    let audit = event
        .pool_audit
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to serialize pool audit")?;

    conn.execute(
        "INSERT INTO events (id, seq, size, recorded_at, pool_audit) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![event.id.0 as i64, seq as i64, event.size(), event.recorded_at, audit],
    )
    .with_context(|| format!("Failed to insert event {}", event.id))?;

    for (rank, finishers) in event.placements.populated() {
        for (position, player) in finishers.names().iter().enumerate() {
            insert_placement(conn, event.id, rank, position, player)?;
        }
    }

    for (position, game) in event.games.iter().enumerate() {
        insert_game(conn, event.id, position, game)?;
    }

    Ok(())
}

fn insert_placement(
    conn: &Connection,
    event_id: EventId,
    rank: u8,
    position: usize,
    player: &str,
) -> Result<()> {
    let sql = "INSERT INTO placements (event_id, rank, position, player) VALUES (?1, ?2, ?3, ?4)";
    conn.execute(sql, params![event_id.0 as i64, rank, position as i64, player])
        .context("Failed to insert placement")
        .map(|_| ())
}

fn insert_game(conn: &Connection, event_id: EventId, position: usize, game: &GameRecord) -> Result<()> {
    let sql = "INSERT INTO games (event_id, position, team1_a, team1_b, team2_a, team2_b, s1, s2, stage, label) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
    conn.execute(
        sql,
        params![
            event_id.0 as i64,
            position as i64,
            game.team1[0],
            game.team1[1],
            game.team2[0],
            game.team2[1],
            game.s1,
            game.s2,
            game.stage.as_ref().map(Stage::as_str),
            game.label
        ],
    )
    .context("Failed to insert game")
    .map(|_| ())
}

pub fn list_all(conn: &Connection) -> Result<Vec<Event>> {
    let sql = "SELECT id, size, recorded_at, pool_audit FROM events ORDER BY seq";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_event_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter().map(|row| build_event(conn, row)).collect()
}

fn parse_event_row(row: &rusqlite::Row) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        size: row.get(1)?,
        recorded_at: row.get(2)?,
        pool_audit: row.get(3)?,
    })
}

fn build_event(conn: &Connection, row: EventRow) -> Result<Event> {
    let placements = Placements::from_ranks(row.size, list_placements(conn, row.id)?)
        .with_context(|| format!("Invalid placements stored for event {}", row.id))?;
    let pool_audit = row
        .pool_audit
        .as_deref()
        .map(serde_json::from_str::<PoolAudit>)
        .transpose()
        .with_context(|| format!("Invalid pool audit stored for event {}", row.id))?;

    Ok(Event {
        id: EventId(row.id as u64),
        placements,
        games: list_games(conn, row.id)?,
        pool_audit,
        recorded_at: row.recorded_at,
    })
}

fn list_placements(conn: &Connection, event_id: i64) -> Result<BTreeMap<u8, Vec<String>>> {
    let sql = "SELECT rank, player FROM placements WHERE event_id = ?1 ORDER BY rank, position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![event_id], |row| Ok((row.get::<_, u8>(0)?, row.get::<_, String>(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut ranks: BTreeMap<u8, Vec<String>> = BTreeMap::new();
    for (rank, player) in rows {
        ranks.entry(rank).or_default().push(player);
    }
    Ok(ranks)
}

fn list_games(conn: &Connection, event_id: i64) -> Result<Vec<GameRecord>> {
    let sql = "SELECT team1_a, team1_b, team2_a, team2_b, s1, s2, stage, label FROM games WHERE event_id = ?1 ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![event_id], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<GameRecord> {
    let stage = match row.get::<_, Option<String>>(6)? {
        Some(raw) => Some(parse_stage(&raw)?),
        None => None,
    };
    Ok(GameRecord {
        team1: [row.get(0)?, row.get(1)?],
        team2: [row.get(2)?, row.get(3)?],
        s1: row.get(4)?,
        s2: row.get(5)?,
        stage,
        label: row.get(7)?,
    })
}

fn parse_stage(raw: &str) -> rusqlite::Result<Stage> {
    match raw {
        "pool" => Ok(Stage::Pool),
        "bracket" => Ok(Stage::Bracket),
        "manual" => Ok(Stage::Manual),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            6,
            Type::Text,
            format!("unknown game stage `{}`", other).into(),
        )),
    }
}
