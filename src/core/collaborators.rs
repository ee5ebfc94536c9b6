/// Capability boundaries to the engine's external collaborators, plus
/// table-backed implementations loaded from RON.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::core::markov::ModelError;

/// A failure reported by a collaborator. Surfaced untouched, never retried.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("transliteration failed: {0}")]
    Transliteration(String),
    #[error("interpretation failed: {0}")]
    Interpretation(String),
    #[error("name registry failed: {0}")]
    Registry(String),
}

/// Converts a native-script name into a Latin-alphabet reading.
///
/// Must be deterministic for the same input.
pub trait Transliterator {
    fn transliterate(&self, native: &str) -> Result<String, CollaboratorError>;
}

/// Assigns a human-readable meaning to a native-script name.
pub trait Interpreter {
    fn interpret(
        &self,
        native: &str,
        context: Option<&str>,
    ) -> Result<Interpretation, CollaboratorError>;
}

/// Answers whether a name form (native or romanized) is already taken.
pub trait NameRegistry {
    fn exists(&self, form: &str) -> Result<bool, CollaboratorError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub meaning: String,
}

/// Reading and gloss for a single native character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub reading: String,
    pub gloss: String,
}

/// Per-character readings and glosses.
///
/// Serves as both transliterator (concatenated readings) and interpreter
/// (joined glosses). Any character missing from the table is a failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterTable {
    entries: BTreeMap<char, CharacterEntry>,
}

impl CharacterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, c: char, reading: &str, gloss: &str) {
        self.entries.insert(
            c,
            CharacterEntry {
                reading: reading.to_string(),
                gloss: gloss.to_string(),
            },
        );
    }

    pub fn get(&self, c: char) -> Option<&CharacterEntry> {
        self.entries.get(&c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn parse_ron(text: &str) -> Result<Self, ModelError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load_from_ron(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    fn lookup<'a>(&'a self, native: &str) -> Result<Vec<&'a CharacterEntry>, char> {
        native
            .chars()
            .map(|c| self.entries.get(&c).ok_or(c))
            .collect()
    }
}

impl Transliterator for CharacterTable {
    fn transliterate(&self, native: &str) -> Result<String, CollaboratorError> {
        let entries = self.lookup(native).map_err(|c| {
            CollaboratorError::Transliteration(format!("no reading for '{}' in '{}'", c, native))
        })?;
        Ok(entries.iter().map(|e| e.reading.as_str()).collect())
    }
}

impl Interpreter for CharacterTable {
    fn interpret(
        &self,
        native: &str,
        context: Option<&str>,
    ) -> Result<Interpretation, CollaboratorError> {
        let entries = self.lookup(native).map_err(|c| {
            CollaboratorError::Interpretation(format!("no gloss for '{}' in '{}'", c, native))
        })?;
        let glosses: Vec<&str> = entries.iter().map(|e| e.gloss.as_str()).collect();
        let mut meaning = glosses.join(" ");
        if let Some(context) = context {
            meaning = format!("{} ({})", meaning, context);
        }
        Ok(Interpretation { meaning })
    }
}

/// A set of taken name forms held in memory.
///
/// Suits a seed corpus, a bulk snapshot of persisted names, or both.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    forms: FxHashSet<String>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            forms: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, form: impl Into<String>) {
        self.forms.insert(form.into());
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Extend<String> for InMemoryRegistry {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.forms.extend(iter);
    }
}

impl NameRegistry for InMemoryRegistry {
    fn exists(&self, form: &str) -> Result<bool, CollaboratorError> {
        Ok(self.forms.contains(form))
    }
}
