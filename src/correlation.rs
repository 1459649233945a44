use serde::{Deserialize, Serialize};

use crate::panel::{PanelRow, Stressor};
use crate::position_group::PositionGroup;

/// Pearson correlation between one stressor and the injury rate for one
/// position group. `correlation` is `None` (never 0) when the subset is too
/// small or either variable is constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub pos_group: PositionGroup,
    pub stressor: Stressor,
    pub samples: usize,
    pub correlation: Option<f64>,
}

/// Pearson correlation coefficient, `None` with fewer than two points or
/// zero variance on either side.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0_f64;
    let mut var_x = 0.0_f64;
    let mut var_y = 0.0_f64;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Correlate every stressor with the injury rate, per position group, over
/// the rows where the group actually took snaps (rate defined).
pub fn correlation_table(panel: &[PanelRow]) -> Vec<CorrelationResult> {
    let mut out = Vec::with_capacity(PositionGroup::PANEL.len() * Stressor::ALL.len());
    for group in PositionGroup::PANEL {
        let subset: Vec<(&PanelRow, f64)> = panel
            .iter()
            .filter(|r| r.pos_group == group)
            .filter_map(|r| r.injury_rate_per_1000.map(|rate| (r, rate)))
            .collect();
        let rates: Vec<f64> = subset.iter().map(|(_, rate)| *rate).collect();

        for stressor in Stressor::ALL {
            let values: Vec<f64> = subset
                .iter()
                .map(|(row, _)| row.stressor_value(stressor))
                .collect();
            out.push(CorrelationResult {
                pos_group: group,
                stressor,
                samples: subset.len(),
                correlation: pearson(&values, &rates),
            });
        }
    }
    out
}
