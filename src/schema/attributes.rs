use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five named capability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Technique,
    Balance,
    Endurance,
    Mental,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Strength,
        Stat::Technique,
        Stat::Balance,
        Stat::Endurance,
        Stat::Mental,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Technique => "technique",
            Self::Balance => "balance",
            Self::Endurance => "endurance",
            Self::Mental => "mental",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five stat values, each in `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub strength: u8,
    pub technique: u8,
    pub balance: u8,
    pub endurance: u8,
    pub mental: u8,
}

impl Stats {
    /// Every stat at `value`.
    pub fn uniform(value: u8) -> Self {
        Self {
            strength: value,
            technique: value,
            balance: value,
            endurance: value,
            mental: value,
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Technique => self.technique,
            Stat::Balance => self.balance,
            Stat::Endurance => self.endurance,
            Stat::Mental => self.mental,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut u8 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Technique => &mut self.technique,
            Stat::Balance => &mut self.balance,
            Stat::Endurance => &mut self.endurance,
            Stat::Mental => &mut self.mental,
        }
    }

    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|s| u32::from(self.get(*s))).sum()
    }
}

/// Potential, current ability, and the stats that make up current ability.
///
/// Invariants: `5 <= current <= potential <= 100` and
/// `stats.total() == current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSet {
    pub potential: u8,
    pub current: u8,
    pub stats: Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_get_mut_agree() {
        let mut stats = Stats::uniform(1);
        *stats.get_mut(Stat::Balance) += 4;
        assert_eq!(stats.get(Stat::Balance), 5);
        assert_eq!(stats.balance, 5);
        assert_eq!(stats.total(), 9);
    }

    #[test]
    fn stat_names() {
        let names: Vec<String> = Stat::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["strength", "technique", "balance", "endurance", "mental"]);
    }
}
