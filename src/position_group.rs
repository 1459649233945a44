use serde::{Deserialize, Serialize};

/// Broad role classification used as the unit of exposure and injury
/// analysis. `Other` collects kickers, punters, long snappers and anything
/// unrecognized; it never reaches the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PositionGroup {
    QB,
    OL,
    DL,
    LB,
    DB,
    #[serde(rename = "SKILL")]
    Skill,
    #[serde(rename = "OTHER")]
    Other,
}

impl PositionGroup {
    /// The six groups that appear in aggregation and panel output.
    pub const PANEL: [PositionGroup; 6] = [
        PositionGroup::QB,
        PositionGroup::OL,
        PositionGroup::DL,
        PositionGroup::LB,
        PositionGroup::DB,
        PositionGroup::Skill,
    ];

    /// Map a granular roster position label onto its group. Missing labels
    /// and anything outside the known set land in `Other`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(raw) = label else {
            return PositionGroup::Other;
        };
        let pos = raw.trim().to_ascii_uppercase();
        match pos.as_str() {
            "QB" => PositionGroup::QB,
            "C" | "G" | "T" | "OL" => PositionGroup::OL,
            "DT" | "NT" | "DE" | "DL" => PositionGroup::DL,
            "LB" | "ILB" | "OLB" => PositionGroup::LB,
            "CB" | "DB" | "S" | "FS" | "SS" => PositionGroup::DB,
            "RB" | "WR" | "TE" | "FB" => PositionGroup::Skill,
            _ => PositionGroup::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PositionGroup::QB => "QB",
            PositionGroup::OL => "OL",
            PositionGroup::DL => "DL",
            PositionGroup::LB => "LB",
            PositionGroup::DB => "DB",
            PositionGroup::Skill => "SKILL",
            PositionGroup::Other => "OTHER",
        }
    }

    pub fn in_panel(self) -> bool {
        self != PositionGroup::Other
    }
}

#[cfg(test)]
mod tests {
    use super::PositionGroup;

    #[test]
    fn known_labels_map_to_groups() {
        assert_eq!(PositionGroup::from_label(Some("QB")), PositionGroup::QB);
        assert_eq!(PositionGroup::from_label(Some("G")), PositionGroup::OL);
        assert_eq!(PositionGroup::from_label(Some("NT")), PositionGroup::DL);
        assert_eq!(PositionGroup::from_label(Some("ILB")), PositionGroup::LB);
        assert_eq!(PositionGroup::from_label(Some("FS")), PositionGroup::DB);
        assert_eq!(PositionGroup::from_label(Some("TE")), PositionGroup::Skill);
    }

    #[test]
    fn labels_are_trimmed_and_upcased() {
        assert_eq!(PositionGroup::from_label(Some(" wr ")), PositionGroup::Skill);
        assert_eq!(PositionGroup::from_label(Some("cb")), PositionGroup::DB);
    }

    #[test]
    fn unknown_and_missing_are_other() {
        assert_eq!(PositionGroup::from_label(Some("K")), PositionGroup::Other);
        assert_eq!(PositionGroup::from_label(Some("LS")), PositionGroup::Other);
        assert_eq!(PositionGroup::from_label(None), PositionGroup::Other);
        assert!(!PositionGroup::Other.in_panel());
    }

    #[test]
    fn panel_excludes_other() {
        assert_eq!(PositionGroup::PANEL.len(), 6);
        assert!(PositionGroup::PANEL.iter().all(|g| g.in_panel()));
    }
}
