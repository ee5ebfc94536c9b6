/// Potential, current ability and stat distribution for new recruits,
/// plus the growth and training rules that move them afterwards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use thiserror::Error;

use crate::schema::attributes::{AttributeSet, Stat, Stats};

pub const MIN_POTENTIAL: u8 = 5;
pub const MEAN_POTENTIAL: f64 = 30.0;
pub const SIGMA_POTENTIAL: f64 = 20.0;
pub const MAX_POTENTIAL: u8 = 100;

pub const MIN_STAT: u8 = 1;
pub const MAX_STAT: u8 = 20;
pub const NUM_STATS: u8 = 5;

/// Range of the starting-ability base draw, before the potential bonus.
const BASE_CURRENT: (f64, f64) = (5.0, 12.0);

/// Current ability gained per point of potential above the mean.
const POTENTIAL_BONUS: f64 = 0.15;

/// XP spent per stat level when training.
const XP_PER_LEVEL: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{stat} is already at the maximum of {max}")]
    StatMaxed { stat: Stat, max: u8 },
    #[error("current ability has reached potential ({potential})")]
    PotentialReached { potential: u8 },
    #[error("training {stat} costs {cost} XP but only {available} is available")]
    InsufficientXp { stat: Stat, cost: u32, available: u32 },
}

/// Rolls attribute sets for new recruits.
pub struct AttributeGenerator {
    rng: StdRng,
}

impl AttributeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self) -> Result<AttributeSet, AttributeError> {
        let potential = self.potential();
        let current = self.current(potential);
        let floor = i32::from(MIN_STAT) * i32::from(NUM_STATS);
        let stats = self.distribute_points(i32::from(current) - floor)?;

        Ok(AttributeSet {
            potential,
            current,
            stats,
        })
    }

    /// Gaussian around the mean, clamped to `[5, 100]`.
    fn potential(&mut self) -> u8 {
        let z: f64 = self.rng.sample(StandardNormal);
        let raw = MEAN_POTENTIAL + SIGMA_POTENTIAL * z;
        raw.clamp(f64::from(MIN_POTENTIAL), f64::from(MAX_POTENTIAL)).round() as u8
    }

    /// Low base with a small hint of potential, never above potential.
    fn current(&mut self, potential: u8) -> u8 {
        let base = self.rng.gen_range(BASE_CURRENT.0..=BASE_CURRENT.1);
        let bonus = (f64::from(potential) - MEAN_POTENTIAL) * POTENTIAL_BONUS;
        let current = (base + bonus).max(f64::from(MIN_POTENTIAL)).round() as u8;
        current.min(potential)
    }

    /// Spread `points` over stats that all start at 1.
    ///
    /// Negative budgets are a caller bug and are rejected, not clamped.
    pub fn distribute_points(&mut self, points: i32) -> Result<Stats, AttributeError> {
        let points = u32::try_from(points).map_err(|_| {
            AttributeError::InvalidArgument(format!("points must be non-negative, got {}", points))
        })?;
        let mut stats = Stats::uniform(MIN_STAT);
        spread(&mut stats, points, &mut self.rng);
        Ok(stats)
    }
}

/// Add up to `points` one at a time to uniformly chosen uncapped stats.
/// Returns how many were placed.
fn spread(stats: &mut Stats, points: u32, rng: &mut StdRng) -> u32 {
    let mut placed = 0;
    while placed < points {
        let open: Vec<Stat> = Stat::ALL
            .into_iter()
            .filter(|s| stats.get(*s) < MAX_STAT)
            .collect();
        if open.is_empty() {
            break;
        }
        *stats.get_mut(open[rng.gen_range(0..open.len())]) += 1;
        placed += 1;
    }
    placed
}

/// XP needed to raise a stat from `level` to `level + 1`.
pub fn xp_cost(level: u8) -> u32 {
    u32::from(level) * XP_PER_LEVEL
}

impl AttributeSet {
    /// Grow by up to `amount` points without passing potential or the stat caps.
    pub fn grow(&self, amount: u8, rng: &mut StdRng) -> AttributeSet {
        let headroom = self.potential.saturating_sub(self.current);
        let mut stats = self.stats;
        let placed = spread(&mut stats, u32::from(amount.min(headroom)), rng);

        AttributeSet {
            potential: self.potential,
            current: self.current + placed as u8,
            stats,
        }
    }

    /// Spend XP to raise one stat by a single point.
    ///
    /// Returns the trained set and the XP left over.
    pub fn train(&self, stat: Stat, xp: u32) -> Result<(AttributeSet, u32), AttributeError> {
        let level = self.stats.get(stat);
        if level >= MAX_STAT {
            return Err(AttributeError::StatMaxed { stat, max: MAX_STAT });
        }
        if self.current >= self.potential {
            return Err(AttributeError::PotentialReached {
                potential: self.potential,
            });
        }
        let cost = xp_cost(level);
        if xp < cost {
            return Err(AttributeError::InsufficientXp {
                stat,
                cost,
                available: xp,
            });
        }

        let mut trained = *self;
        *trained.stats.get_mut(stat) += 1;
        trained.current += 1;
        Ok((trained, xp - cost))
    }
}
