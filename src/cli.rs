use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::StoreKind;
use crate::engine::SeedingMethod;

#[derive(Parser, Debug)]
#[command(author, version, about = "doubles league matchdays and season standings")]
pub struct Cli {
    /// Ledger backend (overrides LEAGUE_STORE)
    #[arg(long, global = true, value_enum)]
    pub store: Option<StoreKind>,

    /// Ledger location (overrides LEAGUE_PATH)
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Show the season standings
    Standings,
    /// List recorded events
    Events,
    /// Show one event in detail
    Show { id: u64 },
    /// Show a player's season line and results
    Player { name: String },
    /// Play a guided matchday, reading one `s1 s2` score per line from stdin
    Matchday {
        /// Number of players (4 to 8)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(4..=8))]
        size: u8,
        /// Comma separated roster
        #[arg(short, long, value_delimiter = ',', required = true)]
        players: Vec<String>,
        /// Seeding method to note for the session
        #[arg(long, value_enum)]
        seeding: Option<SeedingMethod>,
    },
    /// Record placements entered by hand
    Record {
        #[arg(short, long)]
        size: u8,
        /// RANK=NAME[,NAME], repeatable
        #[arg(long = "place", value_parser = parse_place, required = true)]
        places: Vec<(u8, Vec<String>)>,
    },
    /// Delete an event by id
    Delete { id: u64 },
    /// Replace the ledger with a JSON export
    Import { file: PathBuf },
    /// Append events built from a CSV game sheet (sizes 4 and 8)
    ImportCsv { file: PathBuf },
    /// Write the ledger as JSON to a file or stdout
    Export { file: Option<PathBuf> },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_place(raw: &str) -> Result<(u8, Vec<String>), String> {
    let (rank, names) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected RANK=NAME[,NAME], got `{}`", raw))?;
    let rank = rank
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("invalid rank `{}`", rank.trim()))?;
    let names = names.split(',').map(|n| n.trim().to_string()).collect();
    Ok((rank, names))
}
