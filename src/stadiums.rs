use std::collections::HashMap;

use chrono_tz::Tz;
use once_cell::sync::Lazy;

/// Coordinates and local time zone of a game site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StadiumInfo {
    pub lat: f64,
    pub lon: f64,
    pub tz: Tz,
}

/// Immutable site lookup handed to the schedule normalizer.
///
/// Resolution checks the ordered neutral-site override list first (case
/// insensitive substring match on the game's location label, first entry
/// wins), then falls back to the home team's stadium. An unknown home team
/// with no override match resolves to `None`; callers must carry that
/// absence instead of substituting coordinates.
#[derive(Debug, Clone)]
pub struct StadiumRegistry {
    homes: HashMap<String, StadiumInfo>,
    overrides: Vec<(String, StadiumInfo)>,
}

// Home stadium coordinates and time zones for the 32 clubs.
const HOME_SITES: [(&str, f64, f64, Tz); 32] = [
    // AFC East
    ("BUF", 42.7738, -78.7868, Tz::US__Eastern),
    ("MIA", 25.9580, -80.2389, Tz::US__Eastern),
    ("NE", 42.0909, -71.2643, Tz::US__Eastern),
    ("NYJ", 40.8135, -74.0745, Tz::US__Eastern),
    // AFC North
    ("BAL", 39.2780, -76.6227, Tz::US__Eastern),
    ("CIN", 39.0954, -84.5160, Tz::US__Eastern),
    ("CLE", 41.5061, -81.6995, Tz::US__Eastern),
    ("PIT", 40.4468, -80.0158, Tz::US__Eastern),
    // AFC South
    ("HOU", 29.6847, -95.4107, Tz::US__Central),
    ("IND", 39.7601, -86.1639, Tz::US__Eastern),
    ("JAX", 30.3239, -81.6373, Tz::US__Eastern),
    ("TEN", 36.1665, -86.7713, Tz::US__Central),
    // AFC West
    ("DEN", 39.7439, -105.0201, Tz::US__Mountain),
    ("KC", 39.0489, -94.4839, Tz::US__Central),
    ("LV", 36.0908, -115.1830, Tz::US__Pacific),
    ("LAC", 33.9535, -118.3392, Tz::US__Pacific),
    // NFC East
    ("DAL", 32.7473, -97.0945, Tz::US__Central),
    ("NYG", 40.8135, -74.0745, Tz::US__Eastern),
    ("PHI", 39.9008, -75.1675, Tz::US__Eastern),
    ("WAS", 38.9077, -76.8645, Tz::US__Eastern),
    // NFC North
    ("CHI", 41.8623, -87.6167, Tz::US__Central),
    ("DET", 42.3400, -83.0456, Tz::US__Eastern),
    ("GB", 44.5013, -88.0622, Tz::US__Central),
    ("MIN", 44.9738, -93.2581, Tz::US__Central),
    // NFC South
    ("ATL", 33.7554, -84.4008, Tz::US__Eastern),
    ("CAR", 35.2258, -80.8528, Tz::US__Eastern),
    ("NO", 29.9511, -90.0812, Tz::US__Central),
    ("TB", 27.9759, -82.5033, Tz::US__Eastern),
    // NFC West
    ("ARI", 33.5277, -112.2626, Tz::US__Arizona),
    ("LAR", 33.9535, -118.3392, Tz::US__Pacific),
    ("SF", 37.4030, -121.9700, Tz::US__Pacific),
    ("SEA", 47.5952, -122.3316, Tz::US__Pacific),
];

// International and neutral sites, matched by substring on the location
// label. Order matters: the first matching entry wins.
const NEUTRAL_SITES: [(&str, f64, f64, Tz); 8] = [
    ("London", 51.5074, -0.1278, Tz::Europe__London),
    ("Munich", 48.1351, 11.5820, Tz::Europe__Berlin),
    ("Frankfurt", 50.1109, 8.6821, Tz::Europe__Berlin),
    ("Berlin", 52.5200, 13.4050, Tz::Europe__Berlin),
    ("Mexico", 19.4326, -99.1332, Tz::America__Mexico_City),
    ("Sao", -23.5505, -46.6333, Tz::America__Sao_Paulo),
    ("Brazil", -23.5505, -46.6333, Tz::America__Sao_Paulo),
    ("Germany", 50.1109, 8.6821, Tz::Europe__Berlin),
];

static BUILTIN: Lazy<StadiumRegistry> = Lazy::new(|| {
    StadiumRegistry::new(
        HOME_SITES
            .iter()
            .map(|&(team, lat, lon, tz)| (team.to_string(), StadiumInfo { lat, lon, tz })),
        NEUTRAL_SITES
            .iter()
            .map(|&(key, lat, lon, tz)| (key.to_string(), StadiumInfo { lat, lon, tz })),
    )
});

impl StadiumRegistry {
    pub fn new(
        homes: impl IntoIterator<Item = (String, StadiumInfo)>,
        overrides: impl IntoIterator<Item = (String, StadiumInfo)>,
    ) -> Self {
        Self {
            homes: homes.into_iter().collect(),
            overrides: overrides
                .into_iter()
                .map(|(key, info)| (key.to_lowercase(), info))
                .collect(),
        }
    }

    /// Registry covering the 32 NFL home stadiums and the known
    /// international series sites.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Resolve where a game is actually played.
    pub fn resolve(&self, home_team: &str, location: Option<&str>) -> Option<StadiumInfo> {
        if let Some(label) = location {
            let label = label.to_lowercase();
            for (key, info) in &self.overrides {
                if label.contains(key.as_str()) {
                    return Some(*info);
                }
            }
        }
        self.homes.get(home_team).copied()
    }

    pub fn home_count(&self) -> usize {
        self.homes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_all_clubs() {
        let reg = StadiumRegistry::builtin();
        assert_eq!(reg.home_count(), 32);
        let kc = reg.resolve("KC", None).unwrap();
        assert!((kc.lat - 39.0489).abs() < 1e-9);
        assert_eq!(kc.tz, Tz::US__Central);
    }

    #[test]
    fn unknown_team_without_override_is_none() {
        let reg = StadiumRegistry::builtin();
        assert!(reg.resolve("XYZ", None).is_none());
        assert!(reg.resolve("XYZ", Some("Foxborough, MA")).is_none());
    }

    #[test]
    fn override_beats_home_stadium() {
        let reg = StadiumRegistry::builtin();
        let site = reg.resolve("JAX", Some("Wembley Stadium, London")).unwrap();
        assert_eq!(site.tz, Tz::Europe__London);
        assert!(site.lat > 51.0);
    }

    #[test]
    fn override_match_is_case_insensitive() {
        let reg = StadiumRegistry::builtin();
        let site = reg.resolve("NE", Some("estadio azteca, MEXICO city")).unwrap();
        assert_eq!(site.tz, Tz::America__Mexico_City);
    }

    #[test]
    fn first_listed_override_wins() {
        // "Frankfurt, Germany" matches both the Frankfurt and Germany rules;
        // the Frankfurt entry is listed first and must decide.
        let reg = StadiumRegistry::builtin();
        let site = reg.resolve("KC", Some("Frankfurt, Germany")).unwrap();
        assert_eq!(site.tz, Tz::Europe__Berlin);
        assert!((site.lat - 50.1109).abs() < 1e-9);

        // An unknown home team still resolves through the override.
        assert!(reg.resolve("???", Some("Frankfurt, Germany")).is_some());
    }
}
