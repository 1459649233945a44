use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::position_group::PositionGroup;

/// One line from the weekly injury-report feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryReport {
    pub season: i32,
    pub week: u32,
    pub team: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub report_status: Option<String>,
    #[serde(default)]
    pub primary_injury: Option<String>,
}

/// Injury events per (season, week, team, position group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryCount {
    pub season: i32,
    pub week: u32,
    pub team: String,
    pub pos_group: PositionGroup,
    pub injuries: u32,
}

/// Broad anatomical buckets for primary-injury free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InjuryBucket {
    Knee,
    FootAnkle,
    SoftTissueLower,
    ShoulderArm,
    UpperExtremityDistal,
    Head,
    BackNeck,
    Other,
}

impl InjuryBucket {
    pub fn label(self) -> &'static str {
        match self {
            InjuryBucket::Knee => "Knee",
            InjuryBucket::FootAnkle => "Foot/Ankle",
            InjuryBucket::SoftTissueLower => "Soft Tissue (Lower)",
            InjuryBucket::ShoulderArm => "Shoulder/Arm",
            InjuryBucket::UpperExtremityDistal => "Upper Extremity (Distal)",
            InjuryBucket::Head => "Head",
            InjuryBucket::BackNeck => "Back/Neck",
            InjuryBucket::Other => "Other",
        }
    }
}

// Designations that appear in the primary-injury field but are not injuries.
const NON_INJURY: [&str; 3] = ["None", "Reserve/COVID activation", "COVID Protocols"];

// Priority-ordered keyword rules over the normalized label; the first rule
// with any matching keyword wins, Other is the fallback.
const BUCKET_RULES: [(&[&str], InjuryBucket); 7] = [
    (&["knee"], InjuryBucket::Knee),
    (&["ankle", "foot", "toe", "heel"], InjuryBucket::FootAnkle),
    (&["hamstring", "groin", "quad", "calf"], InjuryBucket::SoftTissueLower),
    (&["shoulder", "clavicle", "arm"], InjuryBucket::ShoulderArm),
    (&["elbow", "wrist", "hand", "finger"], InjuryBucket::UpperExtremityDistal),
    (&["concussion", "head"], InjuryBucket::Head),
    (&["back", "spine", "neck"], InjuryBucket::BackNeck),
];

/// A report line counts as an injury event when the club designated the
/// player Out or Doubtful for the week. The match is exact and case
/// sensitive; "out" or "OUT" would be a different feed and should surface
/// as a zero count, not silently count.
fn is_injury_event(status: Option<&str>) -> bool {
    matches!(status, Some("Out") | Some("Doubtful"))
}

/// Sum the event indicator per key. Rows mapping to `Other` are discarded;
/// keys whose reports are all non-events keep a zero-count row, mirroring
/// feed coverage.
pub fn aggregate_injuries(reports: &[InjuryReport]) -> Vec<InjuryCount> {
    let mut totals: BTreeMap<(i32, u32, String, PositionGroup), u32> = BTreeMap::new();
    for report in reports {
        let group = PositionGroup::from_label(report.position.as_deref());
        if !group.in_panel() {
            continue;
        }
        let event = u32::from(is_injury_event(report.report_status.as_deref()));
        *totals
            .entry((report.season, report.week, report.team.clone(), group))
            .or_insert(0) += event;
    }
    totals
        .into_iter()
        .map(|((season, week, team, pos_group), injuries)| InjuryCount {
            season,
            week,
            team,
            pos_group,
            injuries,
        })
        .collect()
}

/// Classify a primary-injury label into its anatomical bucket.
pub fn classify_injury(label: &str) -> InjuryBucket {
    let norm = label.trim().to_lowercase();
    for (keywords, bucket) in BUCKET_RULES {
        if keywords.iter().any(|k| norm.contains(k)) {
            return bucket;
        }
    }
    InjuryBucket::Other
}

/// Anatomical distribution of reported injuries, most frequent first.
/// Non-injury designations and missing labels are excluded before
/// classification.
pub fn bucket_counts(reports: &[InjuryReport]) -> Vec<(InjuryBucket, usize)> {
    let mut counts: HashMap<InjuryBucket, usize> = HashMap::new();
    for report in reports {
        let Some(label) = report.primary_injury.as_deref() else {
            continue;
        };
        if NON_INJURY.contains(&label) {
            continue;
        }
        *counts.entry(classify_injury(label)).or_insert(0) += 1;
    }
    let mut out: Vec<(InjuryBucket, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out
}

/// The n most frequent buckets from a `bucket_counts` result.
pub fn top_buckets(counts: &[(InjuryBucket, usize)], n: usize) -> &[(InjuryBucket, usize)] {
    &counts[..counts.len().min(n)]
}
