use std::env;
use std::path::PathBuf;

use crate::engine::{ScoreTarget, SeedingMethod};

pub const STORE_ENV: &str = "LEAGUE_STORE";
pub const PATH_ENV: &str = "LEAGUE_PATH";
pub const CONFIRM_ENV: &str = "LEAGUE_CONFIRM_ANOMALIES";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    Json,
    Sqlite,
}

impl StoreKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(StoreKind::Json),
            "sqlite" | "db" => Some(StoreKind::Sqlite),
            _ => None,
        }
    }

    fn default_path(&self) -> PathBuf {
        match self {
            StoreKind::Json => PathBuf::from("league.json"),
            StoreKind::Sqlite => PathBuf::from("league.db"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub kind: StoreKind,
    pub path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        let kind = StoreKind::Json;
        Self {
            path: kind.default_path(),
            kind,
        }
    }
}

impl StorageSettings {
    /// Changes backend; a path the user chose is kept, a default one follows
    /// the new backend.
    fn switch_kind(&mut self, kind: StoreKind) {
        if self.path == self.kind.default_path() {
            self.path = kind.default_path();
        }
        self.kind = kind;
    }
}

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub pool_target: ScoreTarget,
    pub bracket_target: ScoreTarget,
    /// Ask before accepting scores under target or under the win-by margin.
    pub confirm_anomalies: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            pool_target: ScoreTarget::POOL,
            bracket_target: ScoreTarget::BRACKET,
            confirm_anomalies: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub scoring: ScoringSettings,
    pub seeding: SeedingMethod,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            storage: StorageSettings::default(),
            scoring: ScoringSettings::default(),
            seeding: SeedingMethod::Standings,
        }
    }

    /// Defaults overlaid with `LEAGUE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.apply_env();
        config
    }

    /// Command-line values win over everything else.
    pub fn with_overrides(mut self, kind: Option<StoreKind>, path: Option<PathBuf>) -> Self {
        if let Some(kind) = kind {
            self.storage.switch_kind(kind);
        }
        if let Some(path) = path {
            self.storage.path = path;
        }
        self
    }

    fn apply_env(&mut self) {
        if let Some(kind) = env_value(STORE_ENV).and_then(|v| StoreKind::parse(&v)) {
            self.storage.switch_kind(kind);
        }
        if let Some(path) = env_value(PATH_ENV) {
            self.storage.path = PathBuf::from(path);
        }
        if let Some(flag) = env_value(CONFIRM_ENV) {
            self.scoring.confirm_anomalies = parse_flag(&flag);
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
