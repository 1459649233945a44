use std::collections::HashMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::exposure::ExposureRecord;
use crate::injuries::InjuryCount;
use crate::position_group::PositionGroup;
use crate::schedule::TeamWeekRecord;

/// Schedule-derived variables hypothesized to affect injury risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stressor {
    RestDiff,
    OppComingOffBye,
    IsAway,
    TravelMiles,
    TimezoneShift,
}

impl Stressor {
    pub const ALL: [Stressor; 5] = [
        Stressor::RestDiff,
        Stressor::OppComingOffBye,
        Stressor::IsAway,
        Stressor::TravelMiles,
        Stressor::TimezoneShift,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stressor::RestDiff => "rest_diff",
            Stressor::OppComingOffBye => "opp_coming_off_bye",
            Stressor::IsAway => "is_away",
            Stressor::TravelMiles => "travel_miles",
            Stressor::TimezoneShift => "timezone_shift",
        }
    }
}

/// One row of the team-week-position panel. Key (season, week, team,
/// pos_group) is unique by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    pub season: i32,
    pub week: u32,
    pub team: String,
    pub pos_group: PositionGroup,
    pub is_home: bool,
    pub rest_diff: i32,
    pub coming_off_bye: bool,
    pub opp_coming_off_bye: bool,
    pub travel_miles: f64,
    pub timezone_shift: f64,
    pub snaps: u32,
    pub injuries: u32,
    /// `None` when snaps = 0; a team with no exposure has no rate, which is
    /// different from a team with snaps and zero injuries.
    pub injury_rate_per_1000: Option<f64>,
}

impl PanelRow {
    /// Stressor value as it enters the statistical engines. Flags become
    /// 0/1 indicators; travel stays in raw miles here.
    pub fn stressor_value(&self, stressor: Stressor) -> f64 {
        match stressor {
            Stressor::RestDiff => f64::from(self.rest_diff),
            Stressor::OppComingOffBye => f64::from(u8::from(self.opp_coming_off_bye)),
            Stressor::IsAway => f64::from(u8::from(!self.is_home)),
            Stressor::TravelMiles => self.travel_miles,
            Stressor::TimezoneShift => self.timezone_shift,
        }
    }
}

/// Cross-join team-week rows with the six position groups, left-join snap
/// and injury counts (absence means zero observed, not missing data), then
/// drop week 1, whose travel and shift are undefined by construction.
///
/// Before the week-1 drop the row count is exactly team-week count times
/// six, regardless of aggregator coverage.
pub fn assemble_panel(
    team_weeks: &[TeamWeekRecord],
    exposure: &[ExposureRecord],
    injuries: &[InjuryCount],
) -> Vec<PanelRow> {
    let snaps_by_key: HashMap<(i32, u32, &str, PositionGroup), u32> = exposure
        .iter()
        .map(|e| ((e.season, e.week, e.team.as_str(), e.pos_group), e.snaps))
        .collect();
    let injuries_by_key: HashMap<(i32, u32, &str, PositionGroup), u32> = injuries
        .iter()
        .map(|i| ((i.season, i.week, i.team.as_str(), i.pos_group), i.injuries))
        .collect();

    let mut rows = Vec::with_capacity(team_weeks.len() * PositionGroup::PANEL.len());
    for tw in team_weeks {
        for group in PositionGroup::PANEL {
            let key = (tw.season, tw.week, tw.team.as_str(), group);
            let snaps = snaps_by_key.get(&key).copied().unwrap_or(0);
            let injuries = injuries_by_key.get(&key).copied().unwrap_or(0);
            rows.push(PanelRow {
                season: tw.season,
                week: tw.week,
                team: tw.team.clone(),
                pos_group: group,
                is_home: tw.is_home,
                rest_diff: tw.rest_diff,
                coming_off_bye: tw.coming_off_bye,
                opp_coming_off_bye: tw.opp_coming_off_bye,
                travel_miles: tw.travel_miles,
                timezone_shift: tw.timezone_shift,
                snaps,
                injuries,
                injury_rate_per_1000: (snaps > 0)
                    .then(|| 1000.0 * f64::from(injuries) / f64::from(snaps)),
            });
        }
    }

    let before = rows.len();
    rows.retain(|row| row.week > 1);
    info!(
        "assembled panel: {} rows ({} before week-1 drop)",
        rows.len(),
        before
    );
    rows
}
