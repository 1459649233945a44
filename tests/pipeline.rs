use chrono_tz::Tz;

use gridiron_stress::correlation::correlation_table;
use gridiron_stress::coverage::coverage_report;
use gridiron_stress::exposure::{ExposureRecord, aggregate_snaps};
use gridiron_stress::injuries::aggregate_injuries;
use gridiron_stress::panel::assemble_panel;
use gridiron_stress::position_group::PositionGroup;
use gridiron_stress::schedule::{Game, normalize_games};
use gridiron_stress::stadiums::{StadiumInfo, StadiumRegistry};
use gridiron_stress::stressors::derive_stressors;
use gridiron_stress::synthetic::{synthetic_games, synthetic_injuries, synthetic_participation};

fn game(id: &str, season: i32, week: u32, home: &str, away: &str) -> Game {
    Game {
        game_id: id.to_string(),
        season,
        week,
        gameday: "2022-10-02".to_string(),
        gametime: "13:00".to_string(),
        weekday: Some("Sunday".to_string()),
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_rest: 7,
        away_rest: 7,
        stadium: None,
        location: None,
        roof: None,
        surface: None,
        temp: None,
        wind: None,
        div_game: false,
    }
}

#[test]
fn full_pipeline_upholds_panel_invariants() {
    let games = synthetic_games(11, &[2022, 2023], 10);
    let registry = StadiumRegistry::builtin();
    let mut team_weeks = normalize_games(&games, &registry);
    derive_stressors(&mut team_weeks);

    // Synthetic games only use registered clubs, so coverage is complete.
    let report = coverage_report(&team_weeks);
    assert_eq!(report.rows, games.len() * 2);
    assert_eq!(report.missing_coords, 0.0);
    assert_eq!(report.missing_tz, 0.0);

    let exposure = aggregate_snaps(&synthetic_participation(&games, 5));
    let injuries = aggregate_injuries(&synthetic_injuries(&games, 9));
    let panel = assemble_panel(&team_weeks, &exposure, &injuries);

    // Cardinality: surviving team-weeks times the six panel groups, no
    // matter what the aggregators covered.
    let surviving = team_weeks.iter().filter(|r| r.week > 1).count();
    assert_eq!(panel.len(), surviving * PositionGroup::PANEL.len());
    assert!(panel.iter().all(|row| row.week > 1));
    assert!(panel.iter().all(|row| row.pos_group.in_panel()));

    // Rate definition holds row by row.
    for row in &panel {
        match row.injury_rate_per_1000 {
            Some(rate) => {
                assert!(row.snaps > 0);
                let expect = 1000.0 * f64::from(row.injuries) / f64::from(row.snaps);
                assert!((rate - expect).abs() < 1e-9);
            }
            None => assert_eq!(row.snaps, 0),
        }
    }

    // Every (group, stressor) pair is reported and stays in bounds.
    let correlations = correlation_table(&panel);
    assert_eq!(correlations.len(), 6 * 5);
    for c in &correlations {
        if let Some(r) = c.correlation {
            assert!((-1.0..=1.0).contains(&r));
        }
    }
}

#[test]
fn week_one_never_reaches_statistics() {
    let games = synthetic_games(2, &[2022], 4);
    let mut team_weeks = normalize_games(&games, &StadiumRegistry::builtin());
    derive_stressors(&mut team_weeks);
    let panel = assemble_panel(&team_weeks, &[], &[]);
    assert!(panel.iter().all(|row| row.week != 1));
}

#[test]
fn uncovered_team_week_group_is_zero_filled() {
    // No feed rows exist for (2022, 5, "BBB", QB): the panel row must carry
    // zero snaps, zero injuries and an undefined rate.
    let registry = custom_registry();
    let games = vec![
        game("g4", 2022, 4, "AAA", "BBB"),
        game("g5", 2022, 5, "BBB", "AAA"),
    ];
    let mut team_weeks = normalize_games(&games, &registry);
    derive_stressors(&mut team_weeks);

    let exposure = vec![ExposureRecord {
        season: 2022,
        week: 5,
        team: "AAA".to_string(),
        pos_group: PositionGroup::QB,
        snaps: 66,
    }];
    let panel = assemble_panel(&team_weeks, &exposure, &[]);

    let bbb_qb = panel
        .iter()
        .find(|r| r.team == "BBB" && r.week == 5 && r.pos_group == PositionGroup::QB)
        .unwrap();
    assert_eq!(bbb_qb.snaps, 0);
    assert_eq!(bbb_qb.injuries, 0);
    assert_eq!(bbb_qb.injury_rate_per_1000, None);

    let aaa_qb = panel
        .iter()
        .find(|r| r.team == "AAA" && r.week == 5 && r.pos_group == PositionGroup::QB)
        .unwrap();
    assert_eq!(aaa_qb.snaps, 66);
    assert_eq!(aaa_qb.injury_rate_per_1000, Some(0.0));
}

#[test]
fn back_to_back_games_at_one_site_mean_zero_travel() {
    // AAA hosts in consecutive weeks; both sides sit at the same coordinates
    // in week 2, so neither records travel.
    let registry = custom_registry();
    let games = vec![
        game("g1", 2022, 1, "AAA", "BBB"),
        game("g2", 2022, 2, "AAA", "BBB"),
        game("g3", 2022, 3, "BBB", "AAA"),
    ];
    let mut team_weeks = normalize_games(&games, &registry);
    derive_stressors(&mut team_weeks);

    let aaa2 = team_weeks
        .iter()
        .find(|r| r.team == "AAA" && r.week == 2)
        .unwrap();
    assert_eq!(aaa2.travel_miles, 0.0);
    assert_eq!(aaa2.timezone_shift, 0.0);

    // Week 3 moves to BBB's stadium one zone west.
    let aaa3 = team_weeks
        .iter()
        .find(|r| r.team == "AAA" && r.week == 3)
        .unwrap();
    assert!(aaa3.travel_miles > 500.0);
    assert_eq!(aaa3.timezone_shift, 1.0);
}

fn custom_registry() -> StadiumRegistry {
    StadiumRegistry::new(
        [
            (
                "AAA".to_string(),
                StadiumInfo {
                    lat: 40.0,
                    lon: -80.0,
                    tz: Tz::US__Eastern,
                },
            ),
            (
                "BBB".to_string(),
                StadiumInfo {
                    lat: 40.0,
                    lon: -95.0,
                    tz: Tz::US__Central,
                },
            ),
        ],
        Vec::<(String, StadiumInfo)>::new(),
    )
}
