/// Engine configuration: where the bundled data lives and an optional seed.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::collaborators::CharacterTable;
use crate::core::markov::{self, CorpusTrainer, ModelError, TransitionModel};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("data/shikona_corpus.txt")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("data/shikona_model.ron")
}

fn default_characters_path() -> PathBuf {
    PathBuf::from("data/characters.ron")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/names.ron")
}

/// Paths and seed shared by the tools.
///
/// Every field is optional in the RON file; `EngineConfig::default()`
/// points at the bundled `data/` directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,
    /// Pre-trained model. Trained from the corpus when the file is absent.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_characters_path")]
    pub characters_path: PathBuf,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            model_path: default_model_path(),
            characters_path: default_characters_path(),
            store_path: default_store_path(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// `load(path)` when a path is given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn corpus_text(&self) -> Result<String, ModelError> {
        Ok(std::fs::read_to_string(&self.corpus_path)?)
    }

    /// The saved model if present, otherwise one trained from the corpus.
    pub fn transition_model(&self) -> Result<TransitionModel, ModelError> {
        if self.model_path.exists() {
            log::debug!("loading transition model from {}", self.model_path.display());
            return markov::load_model(&self.model_path);
        }
        log::debug!(
            "no model at {}, training from {}",
            self.model_path.display(),
            self.corpus_path.display()
        );
        Ok(CorpusTrainer::train(&self.corpus_text()?))
    }

    pub fn character_table(&self) -> Result<CharacterTable, ModelError> {
        CharacterTable::load_from_ron(&self.characters_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: EngineConfig = ron::from_str("()").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn partial_config_overrides() {
        let config: EngineConfig =
            ron::from_str(r#"(seed: Some(7), store_path: "/tmp/names.ron")"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.store_path, PathBuf::from("/tmp/names.ron"));
        assert_eq!(config.corpus_path, default_corpus_path());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.ron");
        std::fs::write(&path, "(seed: Some(3))").unwrap();
        assert_eq!(EngineConfig::load(&path).unwrap().seed, Some(3));
        assert!(matches!(
            EngineConfig::load(&dir.path().join("missing.ron")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn model_trained_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("corpus.txt");
        std::fs::write(&corpus, "白鵬\n大鵬\n").unwrap();
        let config = EngineConfig {
            corpus_path: corpus,
            model_path: dir.path().join("absent.ron"),
            ..EngineConfig::default()
        };
        let model = config.transition_model().unwrap();
        assert_eq!(model.start.len(), 2);
    }
}
