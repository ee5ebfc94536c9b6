/// Character transition model: training, serialization, and lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building, saving, or loading engine data files.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),
}

/// Outgoing distribution for one source character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transition {
    /// Probability of each following character, ordered by character.
    pub next: Vec<(char, f64)>,
    /// Probability that the name ends after this character.
    pub end: f64,
}

impl Transition {
    /// Total outgoing probability, including the end event.
    pub fn total(&self) -> f64 {
        self.end + self.next.iter().map(|(_, p)| p).sum::<f64>()
    }
}

/// A first-order character transition table trained from known names.
///
/// `start` holds the distribution of first characters; `transitions` maps
/// every character seen in the corpus to its successor distribution. Each
/// entry's `end` plus its `next` probabilities sums to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TransitionModel {
    pub start: Vec<(char, f64)>,
    pub transitions: BTreeMap<char, Transition>,
}

impl TransitionModel {
    /// Count adjacent-character frequencies over `names` and normalize them.
    ///
    /// Blank names are skipped. An empty corpus yields an empty model.
    pub fn build<I, S>(names: I) -> TransitionModel
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut start_counts: BTreeMap<char, u32> = BTreeMap::new();
        let mut pair_counts: BTreeMap<char, BTreeMap<char, u32>> = BTreeMap::new();
        let mut end_counts: BTreeMap<char, u32> = BTreeMap::new();

        for name in names {
            let chars: Vec<char> = name.as_ref().trim().chars().collect();
            let (Some(first), Some(last)) = (chars.first(), chars.last()) else {
                continue;
            };

            *start_counts.entry(*first).or_default() += 1;
            for pair in chars.windows(2) {
                *pair_counts
                    .entry(pair[0])
                    .or_default()
                    .entry(pair[1])
                    .or_default() += 1;
            }
            *end_counts.entry(*last).or_default() += 1;
        }

        let start_total: u32 = start_counts.values().sum();
        let start = start_counts
            .iter()
            .map(|(c, count)| (*c, f64::from(*count) / f64::from(start_total)))
            .collect();

        let mut sources: Vec<char> = pair_counts.keys().copied().collect();
        sources.extend(end_counts.keys().copied());
        sources.sort_unstable();
        sources.dedup();

        let mut transitions = BTreeMap::new();
        for source in sources {
            let end = end_counts.get(&source).copied().unwrap_or(0);
            let successors = pair_counts.get(&source);
            let total = end + successors.map(|m| m.values().sum::<u32>()).unwrap_or(0);

            let next = successors
                .into_iter()
                .flatten()
                .map(|(c, count)| (*c, f64::from(*count) / f64::from(total)))
                .collect();
            transitions.insert(
                source,
                Transition {
                    next,
                    end: f64::from(end) / f64::from(total),
                },
            );
        }

        TransitionModel { start, transitions }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty()
    }

    pub fn transition(&self, c: char) -> Option<&Transition> {
        self.transitions.get(&c)
    }

    /// Number of (source, next) pairs with nonzero probability.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(|t| t.next.len()).sum()
    }
}

/// Trains transition models from corpus text.
pub struct CorpusTrainer;

impl CorpusTrainer {
    /// Train from a corpus with one name per line.
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn train(text: &str) -> TransitionModel {
        TransitionModel::build(corpus_names(text))
    }
}

/// Names listed in corpus text, one per line.
pub fn corpus_names(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Save a TransitionModel to a RON file.
pub fn save_model(model: &TransitionModel, path: &Path) -> Result<(), ModelError> {
    let serialized = ron::ser::to_string_pretty(model, ron::ser::PrettyConfig::default())?;
    std::fs::write(path, serialized)?;
    Ok(())
}

/// Load a TransitionModel from a RON file.
pub fn load_model(path: &Path) -> Result<TransitionModel, ModelError> {
    let contents = std::fs::read_to_string(path)?;
    let model: TransitionModel = ron::from_str(&contents)?;
    Ok(model)
}
