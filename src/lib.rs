pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod season;
pub mod services;
pub mod transfer;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::fs;
use std::io;
use std::path::Path;

use crate::config::AppConfig;
use crate::domain::{EventId, RosterSize};
use crate::engine::SeedingMethod;
use crate::services::league::LeagueService;
use crate::services::matchday::{MatchdayRunner, Outcome};
use crate::services::reporting;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_standings(config: &AppConfig) -> Result<()> {
    let league = LeagueService::from_config(config)?;
    print!("{}", reporting::standings(&league.ledger().standings()));
    Ok(())
}

pub fn handle_events(config: &AppConfig) -> Result<()> {
    let league = LeagueService::from_config(config)?;
    print!("{}", reporting::event_list(league.ledger().events()));
    Ok(())
}

pub fn handle_show(config: &AppConfig, id: u64) -> Result<()> {
    let league = LeagueService::from_config(config)?;
    let event = league
        .ledger()
        .get(EventId(id))
        .with_context(|| format!("No event with id {}", id))?;
    print!("{}", reporting::event_detail(event));
    Ok(())
}

pub fn handle_player(config: &AppConfig, name: &str) -> Result<()> {
    let league = LeagueService::from_config(config)?;
    let profile = reporting::player_profile(league.ledger(), name.trim())
        .with_context(|| format!("No player named {}", name.trim()))?;
    print!("{}", profile);
    Ok(())
}

pub fn handle_matchday(
    config: &AppConfig,
    size: u8,
    players: &[String],
    seeding: Option<SeedingMethod>,
) -> Result<()> {
    let size = RosterSize::try_from(size)?;
    let mut league = LeagueService::from_config(config)?;

    let stdin = io::stdin();
    let mut runner = MatchdayRunner::new(stdin.lock(), io::stdout());
    let outcome = runner.run(
        &mut league,
        players,
        size,
        seeding.unwrap_or(config.seeding),
        &config.scoring,
    )?;

    if let Outcome::Recorded(id) = outcome {
        println!("Recorded event {}", id);
    }
    Ok(())
}

pub fn handle_record(config: &AppConfig, size: u8, places: &[(u8, Vec<String>)]) -> Result<()> {
    let mut league = LeagueService::from_config(config)?;
    let id = league.record_manual(size, places.to_vec(), Vec::new())?;
    println!("Recorded event {}", id);
    Ok(())
}

pub fn handle_delete(config: &AppConfig, id: u64) -> Result<()> {
    let mut league = LeagueService::from_config(config)?;
    let removed = league.delete(EventId(id))?;
    println!("Deleted event {} ({} players)", removed.id, removed.size());
    Ok(())
}

pub fn handle_import(config: &AppConfig, file: &Path) -> Result<()> {
    let payload = read_file(file)?;
    let mut league = LeagueService::from_config(config)?;
    let count = league.import_json(&payload, &file.display().to_string())?;
    println!("Ledger replaced with {} events", count);
    Ok(())
}

pub fn handle_import_csv(config: &AppConfig, file: &Path) -> Result<()> {
    let data = read_file(file)?;
    let mut league = LeagueService::from_config(config)?;
    let ids = league.import_csv(&data, &file.display().to_string())?;
    println!("Appended {} events", ids.len());
    Ok(())
}

pub fn handle_export(config: &AppConfig, file: Option<&Path>) -> Result<()> {
    let league = LeagueService::from_config(config)?;
    let json = league.export()?;
    match file {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write export to {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

pub fn handle_completions(shell: clap_complete::Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
