use anyhow::Result;

use doubles_league::cli::{Cli, Command};
use doubles_league::config::AppConfig;
use doubles_league::{
    handle_completions, handle_delete, handle_events, handle_export, handle_import,
    handle_import_csv, handle_matchday, handle_player, handle_record, handle_show,
    handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let Cli {
        store,
        path,
        command,
    } = interpret();
    let config = AppConfig::from_env().with_overrides(store, path);
    execute_command(&command, &config)
}

fn execute_command(command: &Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Standings => handle_standings(config),
        Command::Events => handle_events(config),
        Command::Show { id } => handle_show(config, *id),
        Command::Player { name } => handle_player(config, name),
        Command::Matchday {
            size,
            players,
            seeding,
        } => handle_matchday(config, *size, players, *seeding),
        Command::Record { size, places } => handle_record(config, *size, places),
        Command::Delete { id } => handle_delete(config, *id),
        Command::Import { file } => handle_import(config, file),
        Command::ImportCsv { file } => handle_import_csv(config, file),
        Command::Export { file } => handle_export(config, file.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
