/// Generate Names: batch ring-name generation into the name store.
///
/// Usage: generate_names <count> [--seed N] [--config engine.ron]
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use rikishi_engine::config::EngineConfig;
use rikishi_engine::core::markov::corpus_names;
use rikishi_engine::core::name::{annotate, NameGenerator};
use rikishi_engine::core::store::{NameRecord, NameStore, StoreError};

/// Names echoed back after a run.
const SAMPLE_SIZE: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "generate_names")]
#[command(about = "Generate ring names and persist them to the name store")]
struct Args {
    /// How many names to generate
    count: usize,

    /// Random seed (config seed, then a random one, if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Engine config in RON (bundled data/ paths if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("Error {}: {}", context, err);
    process::exit(1);
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = EngineConfig::load_or_default(args.config.as_deref())
        .unwrap_or_else(|e| fail("loading config", e));
    let seed = args
        .seed
        .or(config.seed)
        .unwrap_or_else(rand::random::<u64>);

    let model = config
        .transition_model()
        .unwrap_or_else(|e| fail("loading transition model", e));
    let table = Arc::new(
        config
            .character_table()
            .unwrap_or_else(|e| fail("loading character table", e)),
    );
    let corpus = config
        .corpus_text()
        .unwrap_or_else(|e| fail("reading corpus", e));

    let mut store =
        NameStore::open(&config.store_path).unwrap_or_else(|e| fail("opening name store", e));
    let mut registry = store.snapshot();
    registry.extend(corpus_names(&corpus).into_iter().map(String::from));

    let mut generator = NameGenerator::new(&model, table.clone(), Arc::new(registry), seed)
        .unwrap_or_else(|e| fail("creating name generator", e));

    let mut created = Vec::with_capacity(args.count);
    let mut duplicates = 0;
    for _ in 0..args.count {
        let name = match generator.generate() {
            Ok(name) => name,
            Err(e) => {
                eprintln!("Stopping after {} names: {}", created.len(), e);
                break;
            }
        };
        let annotated =
            annotate(name, table.as_ref(), None).unwrap_or_else(|e| fail("interpreting name", e));
        let record = NameRecord::from(annotated);

        match store.insert(record.clone()) {
            Ok(()) => created.push(record),
            Err(StoreError::Duplicate { native, romanized }) => {
                log::warn!("skipping duplicate {} / {}", native, romanized);
                duplicates += 1;
            }
            Err(e) => fail("storing name", e),
        }
    }

    store.save().unwrap_or_else(|e| fail("saving name store", e));

    println!(
        "created {}, {} duplicates skipped (seed {}, store '{}')",
        created.len(),
        duplicates,
        seed,
        config.store_path.display()
    );
    for record in created.iter().take(SAMPLE_SIZE) {
        println!(
            "  {} ({}) - {}",
            record.romanized,
            record.native,
            record.meaning.as_deref().unwrap_or("")
        );
    }

    if created.len() + duplicates < args.count {
        process::exit(1);
    }
}
