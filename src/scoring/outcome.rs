use serde::{Deserialize, Serialize};

/// How an at-bat outcome feeds the hit and out bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeCategory {
    Hit,
    WalkOrError,
    Sacrifice,
    Out,
}

/// Static attributes of one outcome kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeInfo {
    pub label: &'static str,
    pub short: &'static str,
    pub category: OutcomeCategory,
    pub outs: u32,
}

/// Every result a plate appearance can be scored as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AtBatOutcome {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    Error,
    Sacrifice,
    Out,
    DoublePlay,
    TriplePlay,
}

impl AtBatOutcome {
    pub const ALL: [AtBatOutcome; 10] = [
        AtBatOutcome::Single,
        AtBatOutcome::Double,
        AtBatOutcome::Triple,
        AtBatOutcome::HomeRun,
        AtBatOutcome::Walk,
        AtBatOutcome::Error,
        AtBatOutcome::Sacrifice,
        AtBatOutcome::Out,
        AtBatOutcome::DoublePlay,
        AtBatOutcome::TriplePlay,
    ];

    pub const fn info(self) -> OutcomeInfo {
        use OutcomeCategory::*;
        match self {
            AtBatOutcome::Single => OutcomeInfo { label: "Single", short: "1B", category: Hit, outs: 0 },
            AtBatOutcome::Double => OutcomeInfo { label: "Double", short: "2B", category: Hit, outs: 0 },
            AtBatOutcome::Triple => OutcomeInfo { label: "Triple", short: "3B", category: Hit, outs: 0 },
            AtBatOutcome::HomeRun => OutcomeInfo { label: "Home run", short: "HR", category: Hit, outs: 0 },
            AtBatOutcome::Walk => OutcomeInfo { label: "Walk / hit by pitch", short: "BB", category: WalkOrError, outs: 0 },
            AtBatOutcome::Error => OutcomeInfo { label: "Reached on error", short: "E", category: WalkOrError, outs: 0 },
            AtBatOutcome::Sacrifice => OutcomeInfo { label: "Sacrifice", short: "SAC", category: Sacrifice, outs: 1 },
            AtBatOutcome::Out => OutcomeInfo { label: "Out", short: "OUT", category: Out, outs: 1 },
            AtBatOutcome::DoublePlay => OutcomeInfo { label: "Double play", short: "DP", category: Out, outs: 2 },
            AtBatOutcome::TriplePlay => OutcomeInfo { label: "Triple play", short: "TP", category: Out, outs: 3 },
        }
    }

    pub const fn category(self) -> OutcomeCategory {
        self.info().category
    }

    pub const fn outs(self) -> u32 {
        self.info().outs
    }

    pub fn is_hit(self) -> bool {
        self.category() == OutcomeCategory::Hit
    }

    /// Bases credited toward slugging. Zero for anything that is not a hit.
    pub const fn total_bases(self) -> u32 {
        match self {
            AtBatOutcome::Single => 1,
            AtBatOutcome::Double => 2,
            AtBatOutcome::Triple => 3,
            AtBatOutcome::HomeRun => 4,
            _ => 0,
        }
    }

    /// Walks, errors and sacrifices do not count as official at-bats.
    pub fn counts_as_at_bat(self) -> bool {
        matches!(self.category(), OutcomeCategory::Hit | OutcomeCategory::Out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outs_follow_category() {
        for outcome in AtBatOutcome::ALL {
            match outcome.category() {
                OutcomeCategory::Hit | OutcomeCategory::WalkOrError => assert_eq!(outcome.outs(), 0),
                OutcomeCategory::Sacrifice => assert_eq!(outcome.outs(), 1),
                OutcomeCategory::Out => assert!(outcome.outs() >= 1),
            }
        }
        assert_eq!(AtBatOutcome::DoublePlay.outs(), 2);
        assert_eq!(AtBatOutcome::TriplePlay.outs(), 3);
    }

    #[test]
    fn only_hits_carry_bases() {
        let hits: Vec<_> = AtBatOutcome::ALL.into_iter().filter(|o| o.is_hit()).collect();
        assert_eq!(hits.len(), 4);
        assert_eq!(AtBatOutcome::ALL.iter().map(|o| o.total_bases()).sum::<u32>(), 10);
    }

    #[test]
    fn walks_errors_and_sacrifices_are_not_at_bats() {
        assert!(!AtBatOutcome::Walk.counts_as_at_bat());
        assert!(!AtBatOutcome::Error.counts_as_at_bat());
        assert!(!AtBatOutcome::Sacrifice.counts_as_at_bat());
        assert!(AtBatOutcome::DoublePlay.counts_as_at_bat());
    }

    #[test]
    fn serializes_as_camel_case_key() {
        assert_eq!(serde_json::to_string(&AtBatOutcome::HomeRun).unwrap(), "\"homeRun\"");
        let parsed: AtBatOutcome = serde_json::from_str("\"doublePlay\"").unwrap();
        assert_eq!(parsed, AtBatOutcome::DoublePlay);
    }
}
