//! Drives a guided matchday over a line-based terminal session.

use anyhow::{bail, Result};
use colored::Colorize;
use log::{info, warn};
use std::io::{BufRead, Write};

use crate::config::ScoringSettings;
use crate::domain::{EventId, RosterSize};
use crate::engine::{Matchday, PendingMatch, Progress, ScoreAnomaly, SeedingMethod};
use crate::errors::EngineError;

use super::league::LeagueService;
use super::reporting;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recorded(EventId),
    /// The session ended before the last match; the ledger is unchanged.
    Abandoned,
}

enum Reply {
    Scores(u32, u32),
    Quit,
    Invalid,
}

pub struct MatchdayRunner<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> MatchdayRunner<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run(
        &mut self,
        league: &mut LeagueService,
        roster: &[String],
        size: RosterSize,
        method: SeedingMethod,
        scoring: &ScoringSettings,
    ) -> Result<Outcome> {
        let mut matchday = Matchday::start(roster, size, league.ledger().table(), method, scoring)?;
        info!("Matchday started with {} players", size);

        writeln!(self.output, "{}", "Pool seeds".bold())?;
        for (letter, name) in matchday.pool_letters().iter() {
            writeln!(self.output, "  {}  {}", letter, name)?;
        }

        loop {
            let Some(pending) = matchday.current()? else {
                bail!("Matchday has no match waiting");
            };
            self.announce(&pending)?;

            let (s1, s2) = match self.prompt("score")? {
                Some(Reply::Scores(s1, s2)) => (s1, s2),
                Some(Reply::Invalid) => {
                    writeln!(self.output, "Enter two scores like `11 7`, or `q` to quit")?;
                    continue;
                }
                Some(Reply::Quit) | None => return self.abandon(),
            };

            let progress = match matchday.submit(s1, s2, false) {
                Err(EngineError::TiedScore(score)) => {
                    writeln!(self.output, "{}-{} is a tie; a match needs a winner", score, score)?;
                    continue;
                }
                other => other?,
            };

            let progress = match progress {
                Progress::NeedsConfirmation(anomalies) => {
                    for anomaly in &anomalies {
                        writeln!(self.output, "{} {}", "Warning:".yellow(), anomaly)?;
                    }
                    match self.confirm()? {
                        Some(true) => {
                            warn!("Accepted {}-{} despite: {}", s1, s2, describe(&anomalies));
                            matchday.submit(s1, s2, true)?
                        }
                        Some(false) => continue,
                        None => return self.abandon(),
                    }
                }
                other => other,
            };

            match progress {
                Progress::NeedsConfirmation(_) | Progress::Recorded(_) => {}
                Progress::PoolComplete { standings, .. } => {
                    info!("Pool complete, bracket seeded");
                    write!(self.output, "{}", reporting::pool_standings(&standings))?;
                }
                Progress::Completed { draft, .. } => {
                    let id = league.record(draft)?;
                    info!("Matchday recorded as event {}", id);
                    if let Some(event) = league.ledger().get(id) {
                        write!(self.output, "{}", reporting::event_detail(event))?;
                    }
                    return Ok(Outcome::Recorded(id));
                }
            }
        }
    }

    fn announce(&mut self, pending: &PendingMatch) -> Result<()> {
        let label = pending.entry.label.unwrap_or("Pool");
        writeln!(
            self.output,
            "{} {}/{} {}: {} vs {} ({})",
            "Match".bold(),
            pending.number,
            pending.total,
            label,
            pending.team1.join(" & "),
            pending.team2.join(" & "),
            pending.entry.target
        )?;
        Ok(())
    }

    fn prompt(&mut self, what: &str) -> Result<Option<Reply>> {
        write!(self.output, "{}> ", what)?;
        self.output.flush()?;
        Ok(self.read_line()?.map(|line| parse_reply(&line)))
    }

    /// `Some(true)` only on an explicit yes; `None` when the input ended.
    fn confirm(&mut self) -> Result<Option<bool>> {
        write!(self.output, "Accept anyway? [y/N] ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .map(|line| matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn abandon(&mut self) -> Result<Outcome> {
        warn!("Matchday abandoned; nothing was recorded");
        writeln!(self.output, "Matchday abandoned")?;
        Ok(Outcome::Abandoned)
    }
}

fn describe(anomalies: &[ScoreAnomaly]) -> String {
    anomalies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn parse_reply(line: &str) -> Reply {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Reply::Quit;
    }
    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == '-' || c == ':')
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [a, b] => match (a.parse(), b.parse()) {
            (Ok(s1), Ok(s2)) => Reply::Scores(s1, s2),
            _ => Reply::Invalid,
        },
        _ => Reply::Invalid,
    }
}
