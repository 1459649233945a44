use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::exposure::ParticipationRecord;
use crate::injuries::InjuryReport;
use crate::position_group::PositionGroup;
use crate::schedule::Game;

// A stable subset of club codes so the builtin registry resolves every
// synthetic game.
const TEAMS: [&str; 8] = ["ARI", "BUF", "DAL", "GB", "KC", "MIA", "SEA", "SF"];

const INJURY_LABELS: [&str; 8] = [
    "Knee",
    "Ankle",
    "Hamstring",
    "Shoulder",
    "Wrist",
    "Concussion",
    "Back",
    "Illness",
];

const STATUSES: [&str; 4] = ["Out", "Doubtful", "Questionable", "None"];

/// Deterministic schedule feed: each week pairs the fixed team pool off a
/// rotating offset, with occasional long-rest (bye) weeks. Seeded, so tests
/// and benches see identical data for identical inputs.
pub fn synthetic_games(seed: u64, seasons: &[i32], weeks: u32) -> Vec<Game> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut games = Vec::new();

    for &season in seasons {
        for week in 1..=weeks {
            let rot = week as usize % TEAMS.len();
            for pair in 0..TEAMS.len() / 2 {
                let home = TEAMS[(2 * pair + rot) % TEAMS.len()];
                let away = TEAMS[(2 * pair + 1 + rot) % TEAMS.len()];
                let day = start_of_season(season) + 7 * (week as i64 - 1);
                games.push(Game {
                    game_id: format!("{season}_{week:02}_{away}_{home}"),
                    season,
                    week,
                    gameday: date_string(day),
                    gametime: "13:00".to_string(),
                    weekday: Some("Sunday".to_string()),
                    home_team: home.to_string(),
                    away_team: away.to_string(),
                    home_rest: rest_days(&mut rng, week),
                    away_rest: rest_days(&mut rng, week),
                    stadium: None,
                    location: None,
                    roof: None,
                    surface: None,
                    temp: Some(rng.gen_range(20.0..85.0)),
                    wind: Some(rng.gen_range(0.0..20.0)),
                    div_game: rng.gen_bool(0.3),
                });
            }
        }
    }
    games
}

/// Snap-count feed matching a synthetic schedule: one line per position
/// label per side per game.
pub fn synthetic_participation(games: &[Game], seed: u64) -> Vec<ParticipationRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();
    for game in games {
        for team in [&game.home_team, &game.away_team] {
            for (label, offense) in [
                ("QB", true),
                ("T", true),
                ("G", true),
                ("WR", true),
                ("RB", true),
                ("TE", true),
                ("DE", false),
                ("DT", false),
                ("LB", false),
                ("CB", false),
                ("S", false),
                ("K", true),
            ] {
                let snaps = rng.gen_range(15..=75_u32);
                records.push(ParticipationRecord {
                    season: game.season,
                    week: game.week,
                    team: team.clone(),
                    position: Some(label.to_string()),
                    offense_snaps: offense.then_some(snaps),
                    defense_snaps: (!offense).then_some(snaps),
                });
            }
        }
    }
    records
}

/// Injury-report feed matching a synthetic schedule.
pub fn synthetic_injuries(games: &[Game], seed: u64) -> Vec<InjuryReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut reports = Vec::new();
    for game in games {
        for team in [&game.home_team, &game.away_team] {
            for _ in 0..rng.gen_range(0..4) {
                let position = ["QB", "WR", "RB", "LB", "CB", "S", "DE", "G"]
                    [rng.gen_range(0..8)];
                reports.push(InjuryReport {
                    season: game.season,
                    week: game.week,
                    team: team.clone(),
                    position: Some(position.to_string()),
                    report_status: Some(STATUSES[rng.gen_range(0..STATUSES.len())].to_string()),
                    primary_injury: Some(
                        INJURY_LABELS[rng.gen_range(0..INJURY_LABELS.len())].to_string(),
                    ),
                });
            }
        }
    }
    reports
}

fn rest_days(rng: &mut StdRng, week: u32) -> i32 {
    if week > 5 && rng.gen_bool(0.08) {
        rng.gen_range(13..=14)
    } else {
        rng.gen_range(6..=8)
    }
}

// Days since an arbitrary epoch for the first Sunday of September; only
// needs to be monotone and render as a valid calendar date.
fn start_of_season(season: i32) -> i64 {
    i64::from(season) * 365 + 244
}

fn date_string(day: i64) -> String {
    let year = day / 365;
    let rest = day % 365;
    let month = (rest / 31).clamp(1, 12);
    let dom = (rest % 31).max(1);
    format!("{year:04}-{month:02}-{dom:02}")
}
