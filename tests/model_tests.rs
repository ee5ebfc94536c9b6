/// Transition model tests against the bundled corpus and character table.

use rikishi_engine::config::EngineConfig;
use rikishi_engine::core::collaborators::Transliterator;
use rikishi_engine::core::markov::{corpus_names, load_model, save_model, CorpusTrainer};

fn bundled() -> EngineConfig {
    EngineConfig::default()
}

#[test]
fn bundled_corpus_trains_a_normalized_model() {
    let text = bundled().corpus_text().unwrap();
    let model = CorpusTrainer::train(&text);
    assert!(!model.is_empty());

    let start_total: f64 = model.start.iter().map(|(_, p)| p).sum();
    assert!((start_total - 1.0).abs() < 1e-9);
    for (c, t) in &model.transitions {
        assert!((t.total() - 1.0).abs() < 1e-9, "'{}' sums to {}", c, t.total());
    }
}

#[test]
fn every_corpus_character_has_a_reading() {
    let config = bundled();
    let table = config.character_table().unwrap();
    let text = config.corpus_text().unwrap();
    for name in corpus_names(&text) {
        for c in name.chars() {
            assert!(table.get(c).is_some(), "no entry for '{}' in '{}'", c, name);
        }
        assert!(table.transliterate(name).is_ok());
    }
}

#[test]
fn every_character_can_continue_or_end() {
    // No character in a trained model is a dead end.
    let model = CorpusTrainer::train(&bundled().corpus_text().unwrap());
    for (c, _) in &model.start {
        assert!(model.transition(*c).is_some(), "'{}' has no transitions", c);
    }
    for t in model.transitions.values() {
        for (next, _) in &t.next {
            assert!(model.transition(*next).is_some(), "'{}' has no transitions", next);
        }
    }
}

#[test]
fn bundled_model_survives_save_and_load() {
    let model = CorpusTrainer::train(&bundled().corpus_text().unwrap());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shikona_model.ron");

    save_model(&model, &path).unwrap();
    assert_eq!(load_model(&path).unwrap(), model);
}
