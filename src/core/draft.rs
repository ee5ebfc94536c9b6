/// Draft pool assembly: name, origin and attributes per slot, tiered.
///
/// Every sub-generator runs on its own stream derived from the builder's
/// master seed, so adding draws to one never shifts another.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::core::attributes::{AttributeError, AttributeGenerator};
use crate::core::collaborators::{CollaboratorError, Interpreter, NameRegistry, Transliterator};
use crate::core::markov::TransitionModel;
use crate::core::name::{self, NameError, NameGenerator};
use crate::core::origin::{OriginError, OriginGenerator};
use crate::core::sampling::{derive_seed, stream_rng};
use crate::core::tier::Tier;
use crate::schema::attributes::AttributeSet;
use crate::schema::name::GeneratedName;
use crate::schema::origin::Origin;

pub const MIN_POOL_SIZE: usize = 5;
pub const MAX_POOL_SIZE: usize = 8;

/// Candidate attempts per pool slot before the pool is left short.
const ATTEMPTS_PER_SLOT: usize = 3;

const POOL_STREAM: u64 = 1;
const NAME_STREAM: u64 = 2;
const ORIGIN_STREAM: u64 = 3;
const ATTRIBUTE_STREAM: u64 = 4;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("name error: {0}")]
    Name(#[from] NameError),
    #[error("origin error: {0}")]
    Origin(#[from] OriginError),
    #[error("attribute error: {0}")]
    Attribute(#[from] AttributeError),
    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// One recruit offered in a draft.
///
/// `potential` stays on the candidate so it can be persisted on signing;
/// player-facing views show `tier` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftCandidate {
    pub name: GeneratedName,
    pub meaning: Option<String>,
    pub origin: Origin,
    pub attributes: AttributeSet,
    pub tier: Tier,
    pub potential: u8,
}

/// Builds draft pools of 5 to 8 candidates.
pub struct DraftPoolBuilder {
    names: NameGenerator,
    origins: OriginGenerator,
    attributes: AttributeGenerator,
    interpreter: Option<Arc<dyn Interpreter>>,
    rng: StdRng,
}

impl DraftPoolBuilder {
    pub fn new(
        model: &TransitionModel,
        transliterator: Arc<dyn Transliterator>,
        registry: Arc<dyn NameRegistry>,
        seed: u64,
    ) -> Result<Self, DraftError> {
        Ok(Self {
            names: NameGenerator::new(
                model,
                transliterator,
                registry,
                derive_seed(seed, NAME_STREAM),
            )?,
            origins: OriginGenerator::new(derive_seed(seed, ORIGIN_STREAM))?,
            attributes: AttributeGenerator::new(derive_seed(seed, ATTRIBUTE_STREAM)),
            interpreter: None,
            rng: stream_rng(seed, POOL_STREAM),
        })
    }

    /// Annotate every candidate's name with a meaning.
    pub fn with_interpreter(mut self, interpreter: Arc<dyn Interpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    /// Build a pool of 5 to 8 candidates.
    ///
    /// A slot whose name generator runs out of attempts is skipped and
    /// retried, up to three tries per slot; if tries run out the pool is
    /// returned short. Any other failure aborts the build. Variety is not
    /// enforced here; see [`has_variety`].
    pub fn build(&mut self) -> Result<Vec<DraftCandidate>, DraftError> {
        let size = self.rng.gen_range(MIN_POOL_SIZE..=MAX_POOL_SIZE);
        let mut pool = Vec::with_capacity(size);

        for _ in 0..size * ATTEMPTS_PER_SLOT {
            if pool.len() == size {
                break;
            }
            match self.candidate() {
                Ok(candidate) => pool.push(candidate),
                Err(DraftError::Name(err @ NameError::GenerationExhausted { .. })) => {
                    log::warn!("skipping draft slot: {}", err);
                }
                Err(err) => return Err(err),
            }
        }

        if pool.len() < size {
            log::warn!("draft pool short: {} of {} candidates", pool.len(), size);
        }
        log::info!(
            "built draft pool of {} candidates (variety: {})",
            pool.len(),
            has_variety(&pool)
        );
        Ok(pool)
    }

    pub fn candidate(&mut self) -> Result<DraftCandidate, DraftError> {
        let generated = self.names.generate()?;
        let origin = self.origins.generate();
        let attributes = self.attributes.generate()?;

        let (name, meaning) = match &self.interpreter {
            Some(interpreter) => {
                let context = origin.to_string();
                let annotated = name::annotate(generated, interpreter.as_ref(), Some(&context))?;
                (annotated.name, Some(annotated.meaning))
            }
            None => (generated, None),
        };

        Ok(DraftCandidate {
            name,
            meaning,
            origin,
            tier: Tier::from_potential(attributes.potential),
            potential: attributes.potential,
            attributes,
        })
    }
}

/// True when the pool spans at least two tiers.
pub fn has_variety(pool: &[DraftCandidate]) -> bool {
    pool.first()
        .is_some_and(|first| pool.iter().any(|c| c.tier != first.tier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::{CharacterTable, InMemoryRegistry};
    use crate::schema::attributes::Stats;

    fn table() -> CharacterTable {
        let mut table = CharacterTable::new();
        table.insert('白', "haku", "white");
        table.insert('大', "dai", "great");
        table.insert('鵬', "hou", "phoenix");
        table.insert('龍', "ryuu", "dragon");
        table.insert('里', "sato", "village");
        table.insert('山', "yama", "mountain");
        table.insert('海', "umi", "sea");
        table
    }

    fn model() -> TransitionModel {
        TransitionModel::build([
            "白大龍", "龍鵬里", "里白鵬", "大里龍", "鵬白大", "山海白", "海山龍", "大海鵬",
            "白山里", "龍海大",
        ])
    }

    fn builder(seed: u64) -> DraftPoolBuilder {
        DraftPoolBuilder::new(
            &model(),
            Arc::new(table()),
            Arc::new(InMemoryRegistry::new()),
            seed,
        )
        .unwrap()
    }

    fn candidate_with(potential: u8) -> DraftCandidate {
        DraftCandidate {
            name: GeneratedName {
                native: "白鵬".to_string(),
                romanized: "hakuho".to_string(),
            },
            meaning: None,
            origin: Origin::japan("JP-13"),
            attributes: AttributeSet {
                potential,
                current: 5,
                stats: Stats::uniform(1),
            },
            tier: Tier::from_potential(potential),
            potential,
        }
    }

    #[test]
    fn pool_size_in_range() {
        let mut seen = [false; MAX_POOL_SIZE + 1];
        for seed in 0..1_000 {
            let pool = builder(seed).build().unwrap();
            assert!((MIN_POOL_SIZE..=MAX_POOL_SIZE).contains(&pool.len()), "seed {}", seed);
            seen[pool.len()] = true;
        }
        assert!(seen[MIN_POOL_SIZE..].iter().all(|s| *s));
    }

    #[test]
    fn candidates_are_consistent() {
        let pool = builder(3).build().unwrap();
        for candidate in &pool {
            assert_eq!(candidate.potential, candidate.attributes.potential);
            assert_eq!(candidate.tier, Tier::from_potential(candidate.potential));
            assert!(candidate.meaning.is_none());
        }
    }

    #[test]
    fn names_unique_within_pool() {
        let pool = builder(11).build().unwrap();
        let mut natives: Vec<&str> = pool.iter().map(|c| c.name.native.as_str()).collect();
        natives.sort_unstable();
        natives.dedup();
        assert_eq!(natives.len(), pool.len());
    }

    #[test]
    fn same_seed_same_pool() {
        assert_eq!(builder(42).build().unwrap(), builder(42).build().unwrap());
    }

    #[test]
    fn interpreter_adds_meaning_with_origin_context() {
        let mut builder = builder(5).with_interpreter(Arc::new(table()));
        let candidate = builder.candidate().unwrap();
        let meaning = candidate.meaning.unwrap();
        assert!(meaning.ends_with(&format!("({})", candidate.origin)), "{}", meaning);
    }

    #[test]
    fn variety_needs_two_tiers() {
        assert!(!has_variety(&[]));
        assert!(!has_variety(&[candidate_with(10), candidate_with(20)]));
        assert!(has_variety(&[candidate_with(10), candidate_with(21)]));
    }

    #[test]
    fn exhausted_names_leave_a_short_pool() {
        // Only 白鵬 and 大鵬 can ever be produced.
        let model = TransitionModel::build(["白鵬", "大鵬"]);
        let mut builder = DraftPoolBuilder::new(
            &model,
            Arc::new(table()),
            Arc::new(InMemoryRegistry::new()),
            7,
        )
        .unwrap();

        let pool = builder.build().unwrap();
        let mut natives: Vec<&str> = pool.iter().map(|c| c.name.native.as_str()).collect();
        natives.sort_unstable();
        assert_eq!(natives, ["大鵬", "白鵬"]);
    }

    #[test]
    fn collaborator_failure_still_aborts_the_pool() {
        struct Offline;

        impl Interpreter for Offline {
            fn interpret(
                &self,
                _native: &str,
                _context: Option<&str>,
            ) -> Result<crate::core::collaborators::Interpretation, CollaboratorError> {
                Err(CollaboratorError::Interpretation("offline".to_string()))
            }
        }

        let mut builder = builder(2).with_interpreter(Arc::new(Offline));
        assert!(matches!(
            builder.build(),
            Err(DraftError::Collaborator(CollaboratorError::Interpretation(_)))
        ));
    }

    #[test]
    fn empty_model_is_rejected() {
        let result = DraftPoolBuilder::new(
            &TransitionModel::default(),
            Arc::new(table()),
            Arc::new(InMemoryRegistry::new()),
            0,
        );
        assert!(matches!(result, Err(DraftError::Name(NameError::InvalidArgument(_)))));
    }
}
