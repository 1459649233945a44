//! Schedule-stress and injury analytics over NFL team-weeks.
//!
//! The pipeline turns three provider feeds (schedule, snap counts, weekly
//! injury reports) into a team-week-position panel and quantifies how
//! schedule stressors relate to injury incidence:
//!
//! 1. [`schedule::normalize_games`] splits every game into a home and an
//!    away perspective and resolves the game site through a
//!    [`stadiums::StadiumRegistry`].
//! 2. [`stressors::derive_stressors`] adds travel miles, time-zone shift,
//!    rest differential and bye flags from each team's own history.
//! 3. [`exposure::aggregate_snaps`] and [`injuries::aggregate_injuries`]
//!    reduce the granular feeds to per-group counts.
//! 4. [`panel::assemble_panel`] cross-joins and zero-fills the panel,
//!    dropping week 1.
//! 5. [`correlation::correlation_table`] and
//!    [`regression::fit_high_risk_groups`] produce the statistical outputs.
//!
//! Every stage is a pure transform over immutable tables; feed acquisition
//! and persistence formats live outside this crate ([`export`] only speaks
//! JSON Lines for interchange).

pub mod correlation;
pub mod coverage;
pub mod export;
pub mod exposure;
pub mod injuries;
pub mod panel;
pub mod position_group;
pub mod regression;
pub mod schedule;
pub mod stadiums;
pub mod stressors;
pub mod synthetic;
