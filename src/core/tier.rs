/// Coarse talent tiers derived from potential.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Player-facing label for a potential score, ordered lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Limited,
    Average,
    Promising,
    Talented,
    Exceptional,
    Generational,
}

/// Inclusive upper bound of each band, ascending.
const TIER_BANDS: [(u8, Tier); 6] = [
    (20, Tier::Limited),
    (35, Tier::Average),
    (50, Tier::Promising),
    (70, Tier::Talented),
    (85, Tier::Exceptional),
    (100, Tier::Generational),
];

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Limited,
        Tier::Average,
        Tier::Promising,
        Tier::Talented,
        Tier::Exceptional,
        Tier::Generational,
    ];

    /// Classify a potential score.
    ///
    /// Bands: 5–20 Limited, 21–35 Average, 36–50 Promising, 51–70 Talented,
    /// 71–85 Exceptional, 86–100 Generational. Scores below the first band
    /// are Limited; scores above 100 are Generational.
    pub fn from_potential(potential: u8) -> Tier {
        TIER_BANDS
            .iter()
            .find(|(upper, _)| potential <= *upper)
            .map(|(_, tier)| *tier)
            .unwrap_or(Tier::Generational)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Limited => "Limited",
            Self::Average => "Average",
            Self::Promising => "Promising",
            Self::Talented => "Talented",
            Self::Exceptional => "Exceptional",
            Self::Generational => "Generational",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
