use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::position_group::PositionGroup;

/// One player participation line from the snap-count feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub season: i32,
    pub week: u32,
    pub team: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub offense_snaps: Option<u32>,
    #[serde(default)]
    pub defense_snaps: Option<u32>,
}

/// Total snaps per (season, week, team, position group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureRecord {
    pub season: i32,
    pub week: u32,
    pub team: String,
    pub pos_group: PositionGroup,
    pub snaps: u32,
}

/// Sum offense + defense snaps per key, a missing count reading as 0.
/// Rows mapping to `Other` are discarded before aggregation. Keys present
/// in the feed stay in the output even when their total is zero.
pub fn aggregate_snaps(records: &[ParticipationRecord]) -> Vec<ExposureRecord> {
    let mut totals: BTreeMap<(i32, u32, String, PositionGroup), u32> = BTreeMap::new();
    for rec in records {
        let group = PositionGroup::from_label(rec.position.as_deref());
        if !group.in_panel() {
            continue;
        }
        let snaps = rec.offense_snaps.unwrap_or(0) + rec.defense_snaps.unwrap_or(0);
        *totals
            .entry((rec.season, rec.week, rec.team.clone(), group))
            .or_insert(0) += snaps;
    }
    totals
        .into_iter()
        .map(|((season, week, team, pos_group), snaps)| ExposureRecord {
            season,
            week,
            team,
            pos_group,
            snaps,
        })
        .collect()
}
