use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::stadiums::{StadiumInfo, StadiumRegistry};

/// One scheduled contest as delivered by the game feed. Immutable once
/// loaded; environmental fields ride along for downstream consumers but do
/// not drive the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub season: i32,
    pub week: u32,
    /// Calendar date string, `YYYY-MM-DD`.
    pub gameday: String,
    /// Local kickoff time string, `HH:MM`.
    pub gametime: String,
    #[serde(default)]
    pub weekday: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_rest: i32,
    pub away_rest: i32,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub roof: Option<String>,
    #[serde(default)]
    pub surface: Option<String>,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub wind: Option<f64>,
    #[serde(default)]
    pub div_game: bool,
}

/// One team's perspective on one game. The normalizer fills the schedule
/// fields; the stressor calculator enriches the rest. Exactly two records
/// exist per game, and per team the records are totally ordered by
/// (season, week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeekRecord {
    pub season: i32,
    pub week: u32,
    pub team: String,
    pub opponent: String,
    pub is_home: bool,
    pub rest_days: i32,
    /// Opponent rest via self-join; 0 when the opposing row is absent.
    pub opp_rest_days: i32,
    pub coming_off_bye: bool,
    pub opp_coming_off_bye: bool,
    /// Opponent rest minus own rest; positive means a rest disadvantage.
    pub rest_diff: i32,
    /// `None` when the kickoff time string did not parse.
    pub kickoff: Option<NaiveDateTime>,
    pub game_lat: Option<f64>,
    pub game_lon: Option<f64>,
    pub game_tz: Option<Tz>,
    /// UTC offset in hours at the reference instant, DST aware.
    pub tz_offset: Option<f64>,
    pub travel_miles: f64,
    pub timezone_shift: f64,
}

/// Split each game into a home and an away perspective, resolve the game
/// site, and order the result by (team, season, week). Games repeating an
/// already seen id are dropped (first occurrence wins).
pub fn normalize_games(games: &[Game], registry: &StadiumRegistry) -> Vec<TeamWeekRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(games.len());
    let mut rows = Vec::with_capacity(games.len() * 2);

    for game in games {
        if !seen.insert(game.game_id.as_str()) {
            debug!("duplicate game id {} dropped", game.game_id);
            continue;
        }
        let kickoff = parse_kickoff(&game.gameday, &game.gametime);
        let site = registry.resolve(&game.home_team, game.location.as_deref());
        if site.is_none() {
            warn!(
                "game {}: no site for home team {} (location {:?})",
                game.game_id, game.home_team, game.location
            );
        }
        rows.push(team_row(game, true, kickoff, site));
        rows.push(team_row(game, false, kickoff, site));
    }

    rows.sort_by(|a, b| {
        a.team
            .cmp(&b.team)
            .then(a.season.cmp(&b.season))
            .then(a.week.cmp(&b.week))
    });
    info!("normalized {} games into {} team-week rows", seen.len(), rows.len());
    rows
}

fn team_row(
    game: &Game,
    home: bool,
    kickoff: Option<NaiveDateTime>,
    site: Option<StadiumInfo>,
) -> TeamWeekRecord {
    let (team, opponent, rest_days) = if home {
        (&game.home_team, &game.away_team, game.home_rest)
    } else {
        (&game.away_team, &game.home_team, game.away_rest)
    };
    TeamWeekRecord {
        season: game.season,
        week: game.week,
        team: team.clone(),
        opponent: opponent.clone(),
        is_home: home,
        rest_days,
        opp_rest_days: 0,
        coming_off_bye: false,
        opp_coming_off_bye: false,
        rest_diff: 0,
        kickoff,
        game_lat: site.map(|s| s.lat),
        game_lon: site.map(|s| s.lon),
        game_tz: site.map(|s| s.tz),
        tz_offset: None,
        travel_miles: 0.0,
        timezone_shift: 0.0,
    }
}

/// Date and time are parsed separately; an unparseable time leaves the
/// kickoff undefined without dropping the game.
fn parse_kickoff(gameday: &str, gametime: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(gameday.trim(), "%Y-%m-%d").ok()?;
    let raw = gametime.trim();
    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()?;
    Some(date.and_time(time))
}
