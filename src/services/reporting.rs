//! Plain-text views over the ledger for the terminal.

use colored::Colorize;

use crate::config::Tier;
use crate::domain::Event;
use crate::engine::PoolStandings;
use crate::ledger::Ledger;
use crate::season::RankedPlayer;

fn tier_label(size: u8) -> &'static str {
    Tier::for_size(size).map_or("-", |tier| tier.as_str())
}

pub fn standings(players: &[RankedPlayer]) -> String {
    if players.is_empty() {
        return "No events recorded yet\n".to_string();
    }

    let mut out = format!(
        "{}\n",
        format!(
            "{:>3}  {:<16} {:>6} {:>7} {:>5} {:>5} {:>8} {:>7}",
            "#", "Player", "Pts", "W-L", "PF", "PA", "AvgDiff", "Titles"
        )
        .bold()
    );
    for player in players {
        let agg = &player.aggregate;
        out.push_str(&format!(
            "{:>3}  {:<16} {:>6} {:>7} {:>5} {:>5} {:>8.1} {:>7}\n",
            player.position,
            player.name,
            agg.points,
            format!("{}-{}", agg.wins, agg.losses),
            agg.points_for,
            agg.points_against,
            agg.avg_diff(),
            format!("{}/{}/{}", agg.titles.slam, agg.titles.signature, agg.titles.challenger),
        ));
    }
    out
}

pub fn event_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events recorded yet\n".to_string();
    }

    let mut out = format!(
        "{}\n",
        format!("{:>4}  {:>4}  {:<10}  {:<20}  {}", "Id", "Size", "Tier", "Recorded", "Winners").bold()
    );
    for event in events {
        let recorded = event
            .recorded_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let winners = event
            .placements
            .get(1)
            .map(|f| f.joined())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>4}  {:>4}  {:<10}  {:<20}  {}\n",
            event.id,
            event.size(),
            tier_label(event.size()),
            recorded,
            winners
        ));
    }
    out
}

pub fn event_detail(event: &Event) -> String {
    let mut out = format!(
        "{}\n",
        format!("Event {} ({} players, {})", event.id, event.size(), tier_label(event.size())).bold()
    );

    out.push_str(&format!("{}\n", "Placements".underline()));
    for (rank, finishers) in event.placements.populated() {
        out.push_str(&format!("  {:>2}. {}\n", rank, finishers.joined()));
    }

    if !event.games.is_empty() {
        out.push_str(&format!("{}\n", "Games".underline()));
        for game in &event.games {
            let stage = game
                .label
                .as_deref()
                .or(game.stage.map(|s| s.as_str()))
                .unwrap_or("-");
            out.push_str(&format!(
                "  {:<8} {} vs {}  {}-{}\n",
                stage,
                game.team1.join(" & "),
                game.team2.join(" & "),
                game.s1,
                game.s2
            ));
        }
    }

    if let Some(audit) = &event.pool_audit {
        out.push_str(&format!("{}\n", "Pool".underline()));
        for row in &audit.rows {
            out.push_str(&format!(
                "  {:>2}. {:<16} {}-{}  {:>+4}  ({} for)\n",
                row.rank, row.player, row.wins, row.losses, row.diff, row.points_for
            ));
        }
        for note in &audit.notes {
            out.push_str(&format!("  * {}\n", note));
        }
    }
    out
}

/// Pool table shown when the bracket is seeded.
pub fn pool_standings(standings: &PoolStandings) -> String {
    let mut out = format!("{}\n", "Pool standings".bold());
    for (row, letter) in standings.rows.iter().zip('A'..) {
        out.push_str(&format!(
            "  {} {:<16} {}-{}  {:>+4}  ({} for)\n",
            letter, row.player, row.wins, row.losses, row.diff, row.points_for
        ));
    }
    for note in &standings.notes {
        out.push_str(&format!("  * {}\n", note));
    }
    out
}

/// Season line and finishing history for one player.
pub fn player_profile(ledger: &Ledger, name: &str) -> Option<String> {
    let ranked = ledger.standings().into_iter().find(|p| p.name == name)?;
    let agg = &ranked.aggregate;

    let mut out = format!("{}\n", format!("{} (#{})", ranked.name, ranked.position).bold());
    out.push_str(&format!(
        "  Points {}  W-L {}-{}  PF {}  PA {}  AvgDiff {:.1}\n",
        agg.points,
        agg.wins,
        agg.losses,
        agg.points_for,
        agg.points_against,
        agg.avg_diff()
    ));
    out.push_str(&format!(
        "  Titles: Slam {}  Signature {}  Challenger {}\n",
        agg.titles.slam, agg.titles.signature, agg.titles.challenger
    ));

    out.push_str(&format!("{}\n", "Events".underline()));
    for event in ledger.events() {
        let played = event.games.iter().any(|g| g.players().any(|p| p == name));
        let rank = event.placements.rank_of(name);
        if !played && rank.is_none() {
            continue;
        }
        let finish = rank
            .map(|r| format!("rank {}", r))
            .unwrap_or_else(|| "unplaced".to_string());
        out.push_str(&format!(
            "  #{:<4} {}-player {:<10} {}\n",
            event.id,
            event.size(),
            tier_label(event.size()),
            finish
        ));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventId, GameRecord, Placements, Stage};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn ledger() -> Ledger {
        let event = Event {
            id: EventId(1),
            placements: Placements::from_ranks(
                5,
                vec![
                    (1, names(&["Ann", "Ben"])),
                    (2, names(&["Cal", "Dee"])),
                    (5, names(&["Eve"])),
                ],
            )
            .unwrap(),
            games: vec![
                GameRecord::new(
                    ["Ann".to_string(), "Cal".to_string()],
                    ["Dee".to_string(), "Eve".to_string()],
                    11,
                    8,
                    Stage::Pool,
                ),
                GameRecord::new(
                    ["Ann".to_string(), "Ben".to_string()],
                    ["Cal".to_string(), "Dee".to_string()],
                    15,
                    12,
                    Stage::Bracket,
                )
                .labeled("Final"),
            ],
            pool_audit: None,
            recorded_at: None,
        };
        Ledger::from_events(vec![event]).unwrap()
    }

    #[test]
    fn test_standings_rows() {
        let ledger = ledger();
        let out = standings(&ledger.standings());

        let ann = out.lines().find(|l| l.contains("Ann")).unwrap();
        assert!(ann.contains("300"));
        assert!(ann.contains("2-0"));
        assert!(ann.contains("3.0"));
        assert!(ann.contains("0/0/1"));
    }

    #[test]
    fn test_event_listing_and_detail() {
        let ledger = ledger();

        let list = event_list(ledger.events());
        assert!(list.contains("Challenger"));
        assert!(list.contains("Ann & Ben"));

        let detail = event_detail(&ledger.events()[0]);
        assert!(detail.contains(" 5. Eve"));
        assert!(detail.contains("Final"));
        assert!(detail.contains("15-12"));
    }

    #[test]
    fn test_player_profile() {
        let ledger = ledger();

        let profile = player_profile(&ledger, "Eve").unwrap();
        assert!(profile.contains("rank 5"));
        assert!(profile.contains("Points 50"));
        assert!(player_profile(&ledger, "Zed").is_none());
    }

    #[test]
    fn test_empty_ledger() {
        assert!(standings(&[]).contains("No events"));
        assert!(event_list(&[]).contains("No events"));
    }
}
