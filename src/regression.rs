use std::collections::HashMap;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::panel::{PanelRow, Stressor};
use crate::position_group::PositionGroup;

/// Position groups with enough weekly turnover to make the fixed-effects
/// design worth fitting.
pub const HIGH_RISK_GROUPS: [PositionGroup; 3] = [
    PositionGroup::Skill,
    PositionGroup::LB,
    PositionGroup::DB,
];

/// Stressor regressors in design-matrix order. Travel enters in thousands
/// of miles so its coefficient reads on the same scale as the others.
pub const REGRESSORS: [Stressor; 4] = [
    Stressor::TravelMiles,
    Stressor::TimezoneShift,
    Stressor::RestDiff,
    Stressor::IsAway,
];

const Z_95: f64 = 1.96;
const PIVOT_EPS: f64 = 1e-9;

/// Point estimate and cluster-robust interval for one stressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressorEstimate {
    pub stressor: Stressor,
    pub coef: f64,
    pub se: f64,
    pub lower: f64,
    pub upper: f64,
}

/// One fitted position-group model. Team and week dummies are estimated but
/// only the stressor terms are reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub pos_group: PositionGroup,
    pub n_obs: usize,
    pub n_clusters: usize,
    pub estimates: Vec<StressorEstimate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error("{pos_group:?}: {n_obs} observations cannot identify {n_params} parameters")]
    InsufficientData {
        pos_group: PositionGroup,
        n_obs: usize,
        n_params: usize,
    },
    #[error("{pos_group:?}: fixed-effects design matrix is rank deficient")]
    RankDeficient { pos_group: PositionGroup },
    #[error("{pos_group:?}: clustered errors need at least two teams, found {n_clusters}")]
    TooFewClusters {
        pos_group: PositionGroup,
        n_clusters: usize,
    },
}

/// Fit injury rate per 1,000 snaps on the stressors with team and week
/// fixed effects, restricted to rows where the group took snaps.
///
/// Standard errors are heteroskedasticity- and cluster-robust with teams as
/// clusters (sandwich estimator, G/(G-1) x (N-1)/(N-K) small-sample scale);
/// intervals are the normal-approximation 95% band.
pub fn fit_group(pos_group: PositionGroup, panel: &[PanelRow]) -> Result<RegressionResult, FitError> {
    // Rows with a defined rate; zero-snap rows never enter the arithmetic.
    let rows: Vec<(&PanelRow, f64)> = panel
        .iter()
        .filter(|r| r.pos_group == pos_group)
        .filter_map(|r| r.injury_rate_per_1000.map(|rate| (r, rate)))
        .collect();

    // Fixed-effect levels; the first team and the lowest week are the
    // dropped reference categories.
    let mut teams: Vec<&str> = rows.iter().map(|(r, _)| r.team.as_str()).collect();
    teams.sort_unstable();
    teams.dedup();
    let mut weeks: Vec<u32> = rows.iter().map(|(r, _)| r.week).collect();
    weeks.sort_unstable();
    weeks.dedup();

    if teams.len() < 2 {
        return Err(FitError::TooFewClusters {
            pos_group,
            n_clusters: teams.len(),
        });
    }

    let n = rows.len();
    let k = 1 + REGRESSORS.len() + (teams.len() - 1) + (weeks.len() - 1);
    if n <= k {
        return Err(FitError::InsufficientData {
            pos_group,
            n_obs: n,
            n_params: k,
        });
    }

    let mut x = vec![0.0_f64; n * k];
    let mut y = vec![0.0_f64; n];
    let team_offset = 1 + REGRESSORS.len();
    let week_offset = team_offset + teams.len() - 1;
    for (i, (row, rate)) in rows.iter().enumerate() {
        y[i] = *rate;
        x[i * k] = 1.0;
        for (j, stressor) in REGRESSORS.iter().enumerate() {
            let raw = row.stressor_value(*stressor);
            x[i * k + 1 + j] = if *stressor == Stressor::TravelMiles {
                raw / 1000.0
            } else {
                raw
            };
        }
        if let Ok(t) = teams[1..].binary_search(&row.team.as_str()) {
            x[i * k + team_offset + t] = 1.0;
        }
        if let Ok(w) = weeks[1..].binary_search(&row.week) {
            x[i * k + week_offset + w] = 1.0;
        }
    }

    let xtx = gram(&x, n, k);
    let xty = xt_vec(&x, &y, n, k);
    let xtx_inv = invert(&xtx, k).ok_or(FitError::RankDeficient { pos_group })?;
    let beta = mat_vec(&xtx_inv, &xty, k);

    // Clustered sandwich meat: sum over teams of (X_g' u_g)(X_g' u_g)'.
    let mut scores: HashMap<&str, Vec<f64>> = HashMap::with_capacity(teams.len());
    for (i, (row, _)) in rows.iter().enumerate() {
        let mut fitted = 0.0;
        for j in 0..k {
            fitted += x[i * k + j] * beta[j];
        }
        let resid = y[i] - fitted;
        let score = scores
            .entry(row.team.as_str())
            .or_insert_with(|| vec![0.0; k]);
        for j in 0..k {
            score[j] += x[i * k + j] * resid;
        }
    }
    let mut meat = vec![0.0_f64; k * k];
    for score in scores.values() {
        for a in 0..k {
            for b in 0..k {
                meat[a * k + b] += score[a] * score[b];
            }
        }
    }

    let g = scores.len() as f64;
    let (n_f, k_f) = (n as f64, k as f64);
    let scale = (g / (g - 1.0)) * ((n_f - 1.0) / (n_f - k_f));
    let cov = mat_mul(&mat_mul(&xtx_inv, &meat, k), &xtx_inv, k);

    let estimates = REGRESSORS
        .iter()
        .enumerate()
        .map(|(j, stressor)| {
            let idx = 1 + j;
            let coef = beta[idx];
            let se = (scale * cov[idx * k + idx]).max(0.0).sqrt();
            StressorEstimate {
                stressor: *stressor,
                coef,
                se,
                lower: coef - Z_95 * se,
                upper: coef + Z_95 * se,
            }
        })
        .collect();

    info!(
        "{:?} fit: {} obs, {} clusters, {} params",
        pos_group,
        n,
        scores.len(),
        k
    );
    Ok(RegressionResult {
        pos_group,
        n_obs: n,
        n_clusters: scores.len(),
        estimates,
    })
}

/// Fit the three emphasized groups. Each fit is independent and pure, so
/// the groups run in parallel; a failed group does not disturb the others.
pub fn fit_high_risk_groups(panel: &[PanelRow]) -> Vec<Result<RegressionResult, FitError>> {
    HIGH_RISK_GROUPS
        .par_iter()
        .map(|group| fit_group(*group, panel))
        .collect()
}

fn gram(x: &[f64], n: usize, k: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; k * k];
    for i in 0..n {
        let row = &x[i * k..(i + 1) * k];
        for a in 0..k {
            if row[a] == 0.0 {
                continue;
            }
            for b in a..k {
                out[a * k + b] += row[a] * row[b];
            }
        }
    }
    for a in 0..k {
        for b in 0..a {
            out[a * k + b] = out[b * k + a];
        }
    }
    out
}

fn xt_vec(x: &[f64], y: &[f64], n: usize, k: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; k];
    for i in 0..n {
        for j in 0..k {
            out[j] += x[i * k + j] * y[i];
        }
    }
    out
}

fn mat_vec(m: &[f64], v: &[f64], k: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; k];
    for a in 0..k {
        for b in 0..k {
            out[a] += m[a * k + b] * v[b];
        }
    }
    out
}

fn mat_mul(a: &[f64], b: &[f64], k: usize) -> Vec<f64> {
    let mut out = vec![0.0_f64; k * k];
    for i in 0..k {
        for l in 0..k {
            let v = a[i * k + l];
            if v == 0.0 {
                continue;
            }
            for j in 0..k {
                out[i * k + j] += v * b[l * k + j];
            }
        }
    }
    out
}

/// Gauss-Jordan inverse with partial pivoting. `None` signals a pivot too
/// small relative to the matrix scale, i.e. a rank-deficient design.
fn invert(m: &[f64], k: usize) -> Option<Vec<f64>> {
    let scale = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
    let tol = PIVOT_EPS * scale;

    let mut a = m.to_vec();
    let mut inv = vec![0.0_f64; k * k];
    for i in 0..k {
        inv[i * k + i] = 1.0;
    }

    for col in 0..k {
        let mut pivot_row = col;
        let mut pivot_val = a[col * k + col].abs();
        for r in (col + 1)..k {
            let v = a[r * k + col].abs();
            if v > pivot_val {
                pivot_val = v;
                pivot_row = r;
            }
        }
        if pivot_val < tol {
            return None;
        }
        if pivot_row != col {
            for j in 0..k {
                a.swap(col * k + j, pivot_row * k + j);
                inv.swap(col * k + j, pivot_row * k + j);
            }
        }
        let p = a[col * k + col];
        for j in 0..k {
            a[col * k + j] /= p;
            inv[col * k + j] /= p;
        }
        for r in 0..k {
            if r == col {
                continue;
            }
            let f = a[r * k + col];
            if f == 0.0 {
                continue;
            }
            for j in 0..k {
                a[r * k + j] -= f * a[col * k + j];
                inv[r * k + j] -= f * inv[col * k + j];
            }
        }
    }
    Some(inv)
}
