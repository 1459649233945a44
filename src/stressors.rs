use std::collections::HashMap;

use chrono::{NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use log::info;

use crate::schedule::TeamWeekRecord;

pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Rest-day count at or above which a week is treated as coming off a bye.
pub const BYE_REST_DAYS: i32 = 13;

/// Great-circle distance in miles between two lat/lon points.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * a.sqrt().atan2((1.0 - a).sqrt())
}

/// UTC offset in hours for a zone, evaluated at a single fixed reference
/// instant so every row sees the same standard/daylight rule. The instant is
/// local wall-clock 2023-10-01 00:00, when DST is active in the US and EU.
pub fn tz_offset_hours(tz: Tz) -> Option<f64> {
    let reference = NaiveDate::from_ymd_opt(2023, 10, 1)?.and_hms_opt(0, 0, 0)?;
    let local = tz.from_local_datetime(&reference).earliest()?;
    Some(f64::from(local.offset().fix().local_minus_utc()) / 3600.0)
}

/// Enrich normalized team-week rows with the schedule stressors.
///
/// Rows are re-sorted by (team, season, week); the ascending order per team
/// is a correctness precondition for the previous-game lookups. Week-1 rows
/// still receive zero-filled travel and shift values; the panel assembler is
/// responsible for excluding them from statistical use.
pub fn derive_stressors(rows: &mut [TeamWeekRecord]) {
    rows.sort_by(|a, b| {
        a.team
            .cmp(&b.team)
            .then(a.season.cmp(&b.season))
            .then(a.week.cmp(&b.week))
    });

    for row in rows.iter_mut() {
        row.tz_offset = row.game_tz.and_then(tz_offset_hours);
        row.coming_off_bye = row.rest_days >= BYE_REST_DAYS;
    }

    // Opponent rest and bye flag via self-join on (season, week, opponent).
    // A missing opposing row leaves rest at 0 and the flag unset.
    let by_key: HashMap<(i32, u32, String), (i32, bool)> = rows
        .iter()
        .map(|r| ((r.season, r.week, r.team.clone()), (r.rest_days, r.coming_off_bye)))
        .collect();
    for row in rows.iter_mut() {
        let (opp_rest, opp_bye) = by_key
            .get(&(row.season, row.week, row.opponent.clone()))
            .copied()
            .unwrap_or((0, false));
        row.opp_rest_days = opp_rest;
        row.opp_coming_off_bye = opp_bye;
        row.rest_diff = opp_rest - row.rest_days;
    }

    // Travel and time-zone shift against the team's immediately preceding
    // game. The lookback crosses season boundaries within a team; a team's
    // first recorded game gets 0.0 for both, as does any pair where either
    // endpoint is unresolved.
    let mut prev_team: Option<String> = None;
    let mut prev_coords: Option<(f64, f64)> = None;
    let mut prev_offset: Option<f64> = None;

    for row in rows.iter_mut() {
        let same_team = prev_team.as_deref() == Some(row.team.as_str());
        let coords = match (row.game_lat, row.game_lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        };
        let prior_coords = if same_team { prev_coords } else { None };
        let prior_offset = if same_team { prev_offset } else { None };

        row.travel_miles = match (prior_coords, coords) {
            (Some((plat, plon)), Some((lat, lon))) => haversine_miles(plat, plon, lat, lon),
            _ => 0.0,
        };
        row.timezone_shift = match (prior_offset, row.tz_offset) {
            (Some(prev), Some(cur)) => (cur - prev).abs(),
            _ => 0.0,
        };

        prev_team = Some(row.team.clone());
        prev_coords = coords;
        prev_offset = row.tz_offset;
    }

    info!("derived stressors for {} team-week rows", rows.len());
}
