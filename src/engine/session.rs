//! The guided matchday: one match at a time, pool first, then the bracket
//! seeded from the pool standings.

use log::debug;

use crate::config::ScoringSettings;
use crate::domain::{EventDraft, GameRecord, RosterSize, Team};
use crate::errors::EngineError;
use crate::season::SeasonTable;

use super::placement::resolve_placements;
use super::schedule::{
    bracket_schedule, find_result, pool_schedule, MatchResult, Phase, ScheduleEntry, ScoreAnomaly,
};
use super::seeding::{assign_pool_letters, LetterAssignment, SeedingMethod};
use super::standings::{resolve_pool_standings, PoolStandings};
use super::templates::{bracket_template, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchdayState {
    #[default]
    Idle,
    PoolInProgress {
        index: usize,
    },
    Reseeding,
    BracketInProgress {
        index: usize,
    },
    Finished,
}

impl MatchdayState {
    /// State after the current step completes.
    pub fn advance(self, pool_len: usize, bracket_len: usize) -> MatchdayState {
        match self {
            MatchdayState::Idle => MatchdayState::PoolInProgress { index: 0 },
            MatchdayState::PoolInProgress { index } if index + 1 < pool_len => {
                MatchdayState::PoolInProgress { index: index + 1 }
            }
            MatchdayState::PoolInProgress { .. } => MatchdayState::Reseeding,
            MatchdayState::Reseeding => MatchdayState::BracketInProgress { index: 0 },
            MatchdayState::BracketInProgress { index } if index + 1 < bracket_len => {
                MatchdayState::BracketInProgress { index: index + 1 }
            }
            MatchdayState::BracketInProgress { .. } => MatchdayState::Finished,
            MatchdayState::Finished => MatchdayState::Idle,
        }
    }
}

/// The match waiting for a score, with both teams resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMatch {
    pub number: usize,
    pub total: usize,
    pub entry: ScheduleEntry,
    pub team1: Team,
    pub team2: Team,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    /// Nothing was recorded; resubmit with `confirmed` to accept the score.
    NeedsConfirmation(Vec<ScoreAnomaly>),
    Recorded(MatchResult),
    /// Last pool match recorded and the bracket seeded from the standings.
    PoolComplete {
        result: MatchResult,
        standings: PoolStandings,
    },
    /// Last match recorded; the draft is ready for the ledger.
    Completed {
        result: MatchResult,
        draft: EventDraft,
    },
}

#[derive(Debug, Clone)]
pub struct Matchday {
    size: RosterSize,
    scoring: ScoringSettings,
    state: MatchdayState,
    pool_letters: LetterAssignment,
    bracket_letters: Option<LetterAssignment>,
    schedule: Vec<ScheduleEntry>,
    pool_len: usize,
    results: Vec<MatchResult>,
    games: Vec<GameRecord>,
    standings: Option<PoolStandings>,
}

impl Matchday {
    /// Seeds the roster and opens the first pool match. A roster that does
    /// not fit the size is rejected before anything is created.
    pub fn start(
        roster: &[String],
        size: RosterSize,
        season: &SeasonTable,
        method: SeedingMethod,
        scoring: &ScoringSettings,
    ) -> Result<Self, EngineError> {
        let pool_letters = assign_pool_letters(roster, size, season, method)?;
        let schedule = pool_schedule(size, scoring.pool_target);
        let pool_len = schedule.len();

        Ok(Self {
            size,
            scoring: scoring.clone(),
            state: MatchdayState::Idle.advance(pool_len, 0),
            pool_letters,
            bracket_letters: None,
            schedule,
            pool_len,
            results: Vec::new(),
            games: Vec::new(),
            standings: None,
        })
    }

    pub fn size(&self) -> RosterSize {
        self.size
    }

    pub fn state(&self) -> MatchdayState {
        self.state
    }

    pub fn pool_letters(&self) -> &LetterAssignment {
        &self.pool_letters
    }

    pub fn bracket_letters(&self) -> Option<&LetterAssignment> {
        self.bracket_letters.as_ref()
    }

    pub fn standings(&self) -> Option<&PoolStandings> {
        self.standings.as_ref()
    }

    pub fn schedule(&self) -> &[ScheduleEntry] {
        &self.schedule
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    fn bracket_len(&self) -> usize {
        bracket_template(self.size).matches.len()
    }

    fn current_index(&self) -> Option<usize> {
        match self.state {
            MatchdayState::PoolInProgress { index } => Some(index),
            MatchdayState::BracketInProgress { index } => Some(self.pool_len + index),
            _ => None,
        }
    }

    /// The match to be played next, if any.
    pub fn current(&self) -> Result<Option<PendingMatch>, EngineError> {
        let Some(index) = self.current_index() else {
            return Ok(None);
        };
        let entry = self.schedule[index];
        let (team1, team2) = self.resolve_teams(&entry)?;
        Ok(Some(PendingMatch {
            number: index + 1,
            total: self.pool_len + self.bracket_len(),
            entry,
            team1,
            team2,
        }))
    }

    /// Records a score for the current match and moves the state machine on.
    pub fn submit(&mut self, s1: u32, s2: u32, confirmed: bool) -> Result<Progress, EngineError> {
        let pending = self.current()?.ok_or(EngineError::NoActiveMatch)?;
        if s1 == s2 {
            return Err(EngineError::TiedScore(s1));
        }
        if self.scoring.confirm_anomalies && !confirmed {
            let anomalies = pending.entry.target.anomalies(s1, s2);
            if !anomalies.is_empty() {
                return Ok(Progress::NeedsConfirmation(anomalies));
            }
        }

        debug!(
            "Match {}/{}: {} vs {} {}-{}",
            pending.number,
            pending.total,
            pending.team1.join(" & "),
            pending.team2.join(" & "),
            s1,
            s2
        );
        let result = self.record(pending, s1, s2);
        self.state = self.state.advance(self.pool_len, self.bracket_len());

        match self.state {
            MatchdayState::Reseeding => {
                let standings = self.reseed();
                Ok(Progress::PoolComplete { result, standings })
            }
            MatchdayState::Finished => {
                let draft = self.finish()?;
                Ok(Progress::Completed { result, draft })
            }
            _ => Ok(Progress::Recorded(result)),
        }
    }

    fn record(&mut self, pending: PendingMatch, s1: u32, s2: u32) -> MatchResult {
        let entry = pending.entry;
        let (winner, loser) = if s1 > s2 {
            (pending.team1.clone(), pending.team2.clone())
        } else {
            (pending.team2.clone(), pending.team1.clone())
        };

        let mut game = GameRecord::new(pending.team1, pending.team2, s1, s2, entry.phase.stage());
        game.label = entry.label.map(str::to_string);
        self.games.push(game);

        let result = MatchResult {
            phase: entry.phase,
            label: entry.label,
            winner,
            loser,
            s1,
            s2,
        };
        self.results.push(result.clone());
        result
    }

    fn reseed(&mut self) -> PoolStandings {
        let standings = resolve_pool_standings(self.pool_letters.players(), &self.games);
        self.bracket_letters = Some(standings.bracket_letters());
        self.schedule
            .extend(bracket_schedule(self.size, self.scoring.bracket_target));
        self.standings = Some(standings.clone());
        self.state = self.state.advance(self.pool_len, self.bracket_len());
        standings
    }

    fn finish(&mut self) -> Result<EventDraft, EngineError> {
        let letters = self
            .bracket_letters
            .as_ref()
            .ok_or_else(|| EngineError::UnresolvedReference("bracket seeds".to_string()))?;
        let placements = resolve_placements(self.size, &self.results, letters)?;
        let draft = EventDraft {
            placements,
            games: self.games.clone(),
            pool_audit: self.standings.as_ref().map(PoolStandings::to_audit),
        };
        self.state = self.state.advance(self.pool_len, self.bracket_len());
        Ok(draft)
    }

    fn resolve_teams(&self, entry: &ScheduleEntry) -> Result<(Team, Team), EngineError> {
        Ok((
            self.resolve_side(entry.side1, entry.phase)?,
            self.resolve_side(entry.side2, entry.phase)?,
        ))
    }

    fn resolve_side(&self, side: Side, phase: Phase) -> Result<Team, EngineError> {
        match side {
            Side::Seeded(pair) => self.letters_for(phase)?.team(pair),
            Side::WinnerOf(label) => find_result(&self.results, label)
                .map(|r| r.winner.clone())
                .ok_or_else(|| EngineError::UnresolvedReference(label.to_string())),
            Side::LoserOf(label) => find_result(&self.results, label)
                .map(|r| r.loser.clone())
                .ok_or_else(|| EngineError::UnresolvedReference(label.to_string())),
        }
    }

    fn letters_for(&self, phase: Phase) -> Result<&LetterAssignment, EngineError> {
        match phase {
            Phase::Pool => Ok(&self.pool_letters),
            Phase::Bracket => self
                .bracket_letters
                .as_ref()
                .ok_or_else(|| EngineError::UnresolvedReference("bracket seeds".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;
    use crate::engine::templates::LetterPair;

    fn roster(size: RosterSize) -> Vec<String> {
        ["Ann", "Ben", "Cal", "Dee", "Eve", "Fay", "Gus", "Hal"][..size.players()]
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    fn start(size: RosterSize) -> Matchday {
        Matchday::start(
            &roster(size),
            size,
            &SeasonTable::new(),
            SeedingMethod::Standings,
            &ScoringSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_state_transitions() {
        let state = MatchdayState::Idle.advance(2, 1);
        assert_eq!(state, MatchdayState::PoolInProgress { index: 0 });
        let state = state.advance(2, 1);
        assert_eq!(state, MatchdayState::PoolInProgress { index: 1 });
        let state = state.advance(2, 1);
        assert_eq!(state, MatchdayState::Reseeding);
        let state = state.advance(2, 1);
        assert_eq!(state, MatchdayState::BracketInProgress { index: 0 });
        let state = state.advance(2, 1);
        assert_eq!(state, MatchdayState::Finished);
        assert_eq!(state.advance(2, 1), MatchdayState::Idle);
    }

    #[test]
    fn test_roster_mismatch_rejected() {
        let err = Matchday::start(
            &roster(RosterSize::Four),
            RosterSize::Five,
            &SeasonTable::new(),
            SeedingMethod::Standings,
            &ScoringSettings::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::RosterMismatch {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_anomaly_needs_confirmation() {
        let mut matchday = start(RosterSize::Four);
        let progress = matchday.submit(9, 4, false).unwrap();
        assert!(matches!(progress, Progress::NeedsConfirmation(_)));
        assert!(matchday.games().is_empty());
        assert_eq!(matchday.state(), MatchdayState::PoolInProgress { index: 0 });

        let progress = matchday.submit(9, 4, true).unwrap();
        assert!(matches!(progress, Progress::Recorded(_)));
        assert_eq!(matchday.games().len(), 1);
    }

    #[test]
    fn test_anomaly_check_can_be_disabled() {
        let scoring = ScoringSettings {
            confirm_anomalies: false,
            ..Default::default()
        };
        let mut matchday = Matchday::start(
            &roster(RosterSize::Four),
            RosterSize::Four,
            &SeasonTable::new(),
            SeedingMethod::Standings,
            &scoring,
        )
        .unwrap();
        assert!(matches!(
            matchday.submit(3, 1, false).unwrap(),
            Progress::Recorded(_)
        ));
    }

    #[test]
    fn test_tied_score_rejected() {
        let mut matchday = start(RosterSize::Four);
        assert_eq!(matchday.submit(11, 11, true), Err(EngineError::TiedScore(11)));
    }

    #[test]
    fn test_four_player_run() {
        let mut matchday = start(RosterSize::Four);
        // Team 1 wins every pool match.
        for _ in 0..2 {
            assert!(matches!(
                matchday.submit(11, 5, false).unwrap(),
                Progress::Recorded(_)
            ));
        }
        let progress = matchday.submit(11, 5, false).unwrap();
        let Progress::PoolComplete { standings, .. } = progress else {
            panic!("expected pool to complete");
        };
        assert_eq!(standings.rows.len(), 4);
        assert_eq!(
            matchday.state(),
            MatchdayState::BracketInProgress { index: 0 }
        );

        let pending = matchday.current().unwrap().unwrap();
        let letters = matchday.bracket_letters().unwrap();
        assert_eq!(pending.entry.label, Some("Final"));
        assert_eq!(pending.team1, letters.team(LetterPair('A', 'B')).unwrap());
        assert_eq!(pending.number, 4);
        assert_eq!(pending.total, 4);

        let progress = matchday.submit(12, 15, false).unwrap();
        let Progress::Completed { draft, result } = progress else {
            panic!("expected matchday to complete");
        };
        assert_eq!(result.winner, pending.team2);
        assert_eq!(matchday.state(), MatchdayState::Idle);
        assert_eq!(draft.games.len(), 4);
        assert!(draft.games[3].is_stage(Stage::Bracket));
        assert_eq!(draft.games[3].label.as_deref(), Some("Final"));
        assert!(draft.pool_audit.is_some());
        assert_eq!(draft.placements.get(1).unwrap().names(), &pending.team2[..]);

        assert_eq!(matchday.submit(15, 3, false), Err(EngineError::NoActiveMatch));
    }

    #[test]
    fn test_derived_match_uses_earlier_result() {
        let mut matchday = start(RosterSize::Six);
        for _ in 0..6 {
            matchday.submit(11, 7, false).unwrap();
        }
        let semi = matchday.current().unwrap().unwrap();
        assert_eq!(semi.entry.label, Some("SF"));
        matchday.submit(10, 15, false).unwrap();

        let final_match = matchday.current().unwrap().unwrap();
        assert_eq!(final_match.entry.label, Some("Final"));
        assert_eq!(final_match.team2, semi.team2);
    }
}
