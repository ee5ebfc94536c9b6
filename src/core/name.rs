/// Ring name generation: chain walk, normalization, and validation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;
use thiserror::Error;

use crate::core::collaborators::{CollaboratorError, Interpreter, NameRegistry, Transliterator};
use crate::core::markov::TransitionModel;
use crate::core::phonetics::Normalizer;
use crate::core::sampling::WeightedTable;
use crate::schema::name::{AnnotatedName, GeneratedName};

/// Attempts made by a single `generate()` call before giving up.
pub const MAX_ATTEMPTS: u32 = 100;

/// Shortest accepted native name, in characters.
pub const MIN_CHARACTERS: usize = 2;

/// Shortest accepted romanized reading, in characters.
pub const MIN_ROMANIZED_LEN: usize = 2;

/// Characters used as the genitive particle "no" in ring names.
pub const GENITIVE_PARTICLES: &[char] = &['の', 'ノ', '乃', '之'];

/// Romanized form a name may neither start nor end with.
const BOUNDARY_PARTICLE: &str = "no";

/// Distribution of target character counts.
const CHARACTER_COUNTS: [(usize, f64); 4] = [(2, 0.4067), (3, 0.4833), (4, 0.1072), (5, 0.0028)];

/// Distribution of the romanized length cap, drawn per attempt.
const ROMANIZED_CAPS: [(usize, f64); 3] = [(14, 0.5), (19, 0.4), (24, 0.1)];

#[derive(Debug, Error)]
pub enum NameError {
    #[error("failed to generate a valid name after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid phoneme rule: {0}")]
    PhonemeRule(#[from] regex::Error),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Why a single attempt was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The chain reached a character with no recorded successors.
    DeadEnd(char),
    TooFewCharacters(usize),
    /// Romanized length outside `[MIN_ROMANIZED_LEN, cap]`.
    RomanizedLength { len: usize, cap: usize },
    /// Native form starts or ends with a genitive particle.
    ParticleBoundary,
    /// Romanized form starts or ends with "no".
    RomanizedBoundary,
    /// Form already taken, by the registry or by this generator.
    Taken(String),
}

enum Attempt {
    Accepted(GeneratedName),
    Rejected(Rejection),
}

/// Produces unique, validated ring names from a transition model.
///
/// Each generator owns its random stream; two generators built from the
/// same model, collaborators and seed produce the same sequence.
pub struct NameGenerator {
    start: WeightedTable<char>,
    steps: FxHashMap<char, WeightedTable<char>>,
    counts: WeightedTable<usize>,
    caps: WeightedTable<usize>,
    normalizer: Normalizer,
    transliterator: Arc<dyn Transliterator>,
    registry: Arc<dyn NameRegistry>,
    issued: FxHashSet<String>,
    rng: StdRng,
}

impl NameGenerator {
    /// Build a generator over `model`.
    ///
    /// Fails with `InvalidArgument` if the model has no start distribution.
    pub fn new(
        model: &TransitionModel,
        transliterator: Arc<dyn Transliterator>,
        registry: Arc<dyn NameRegistry>,
        seed: u64,
    ) -> Result<Self, NameError> {
        let start = WeightedTable::new(model.start.iter().copied()).ok_or_else(|| {
            NameError::InvalidArgument("transition model has no start characters".to_string())
        })?;

        // The end event is dropped and successors renormalized: the walk
        // runs to the drawn length. Characters with no successors stay out
        // of `steps` and behave as dead ends.
        let steps = model
            .transitions
            .iter()
            .filter_map(|(c, t)| WeightedTable::new(t.next.iter().copied()).map(|table| (*c, table)))
            .collect();
        let counts = WeightedTable::new(CHARACTER_COUNTS).ok_or_else(|| {
            NameError::InvalidArgument("character count weights are degenerate".to_string())
        })?;
        let caps = WeightedTable::new(ROMANIZED_CAPS).ok_or_else(|| {
            NameError::InvalidArgument("romanized cap weights are degenerate".to_string())
        })?;

        Ok(Self {
            start,
            steps,
            counts,
            caps,
            normalizer: Normalizer::new()?,
            transliterator,
            registry,
            issued: FxHashSet::default(),
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Generate a name not yet taken in the registry or issued by this
    /// generator.
    ///
    /// Collaborator failures abort the call immediately; every other
    /// rejection counts against the attempt budget.
    pub fn generate(&mut self) -> Result<GeneratedName, NameError> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt()? {
                Attempt::Accepted(name) => {
                    self.issued.insert(name.native.clone());
                    self.issued.insert(name.romanized.clone());
                    return Ok(name);
                }
                Attempt::Rejected(reason) => {
                    log::debug!("name attempt {} rejected: {:?}", attempt, reason);
                }
            }
        }

        log::warn!("name generation exhausted after {} attempts", MAX_ATTEMPTS);
        Err(NameError::GenerationExhausted {
            attempts: MAX_ATTEMPTS,
        })
    }

    fn attempt(&mut self) -> Result<Attempt, NameError> {
        let target = *self.counts.sample(&mut self.rng);
        let cap = *self.caps.sample(&mut self.rng);

        let native = match self.walk(target) {
            Ok(native) => native,
            Err(reason) => return Ok(Attempt::Rejected(reason)),
        };
        if let Some(reason) = check_native(&native) {
            return Ok(Attempt::Rejected(reason));
        }
        if self.is_taken(&native)? {
            return Ok(Attempt::Rejected(Rejection::Taken(native)));
        }

        let romanized = self
            .normalizer
            .normalize(&self.transliterator.transliterate(&native)?);
        if let Some(reason) = check_romanized(&romanized, cap) {
            return Ok(Attempt::Rejected(reason));
        }
        if self.is_taken(&romanized)? {
            return Ok(Attempt::Rejected(Rejection::Taken(romanized)));
        }

        Ok(Attempt::Accepted(GeneratedName { native, romanized }))
    }

    /// Walk the chain for exactly `target` characters.
    ///
    /// A character with no successors fails the attempt rather than
    /// restarting from `start`.
    fn walk(&mut self, target: usize) -> Result<String, Rejection> {
        let mut chars = vec![*self.start.sample(&mut self.rng)];

        while chars.len() < target {
            let prev = chars[chars.len() - 1];
            let table = self.steps.get(&prev).ok_or(Rejection::DeadEnd(prev))?;
            chars.push(*table.sample(&mut self.rng));
        }

        Ok(chars.into_iter().collect())
    }

    fn is_taken(&self, form: &str) -> Result<bool, CollaboratorError> {
        if self.issued.contains(form) {
            return Ok(true);
        }
        self.registry.exists(form)
    }
}

/// Structural checks on the native form.
pub fn check_native(native: &str) -> Option<Rejection> {
    let count = native.chars().count();
    if count < MIN_CHARACTERS {
        return Some(Rejection::TooFewCharacters(count));
    }
    let is_particle = |c: Option<char>| c.is_some_and(|c| GENITIVE_PARTICLES.contains(&c));
    if is_particle(native.chars().next()) || is_particle(native.chars().next_back()) {
        return Some(Rejection::ParticleBoundary);
    }
    None
}

/// Length and boundary checks on the romanized form.
pub fn check_romanized(romanized: &str, cap: usize) -> Option<Rejection> {
    let len = romanized.chars().count();
    if !(MIN_ROMANIZED_LEN..=cap).contains(&len) {
        return Some(Rejection::RomanizedLength { len, cap });
    }
    let lower = romanized.to_lowercase();
    if lower.starts_with(BOUNDARY_PARTICLE) || lower.ends_with(BOUNDARY_PARTICLE) {
        return Some(Rejection::RomanizedBoundary);
    }
    None
}

/// Attach a meaning to a generated name.
///
/// Interpretation failures are returned as-is and never retried.
pub fn annotate(
    name: GeneratedName,
    interpreter: &dyn Interpreter,
    context: Option<&str>,
) -> Result<AnnotatedName, CollaboratorError> {
    let interpretation = interpreter.interpret(&name.native, context)?;
    Ok(AnnotatedName {
        name,
        meaning: interpretation.meaning,
    })
}
