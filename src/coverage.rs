use log::warn;
use serde::{Deserialize, Serialize};

use crate::schedule::TeamWeekRecord;

/// Share of team-week rows whose game site failed to resolve. Computed
/// before the panel is built so bad registry coverage is visible early.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub rows: usize,
    pub missing_coords: f64,
    pub missing_tz: f64,
}

pub fn coverage_report(rows: &[TeamWeekRecord]) -> CoverageReport {
    if rows.is_empty() {
        return CoverageReport {
            rows: 0,
            missing_coords: 0.0,
            missing_tz: 0.0,
        };
    }
    let n = rows.len() as f64;
    let no_coords = rows.iter().filter(|r| r.game_lat.is_none()).count();
    let no_tz = rows.iter().filter(|r| r.game_tz.is_none()).count();
    let report = CoverageReport {
        rows: rows.len(),
        missing_coords: no_coords as f64 / n,
        missing_tz: no_tz as f64 / n,
    };
    if no_coords > 0 || no_tz > 0 {
        warn!(
            "site coverage gaps: {:.1}% rows without coords, {:.1}% without tz",
            report.missing_coords * 100.0,
            report.missing_tz * 100.0
        );
    }
    report
}
