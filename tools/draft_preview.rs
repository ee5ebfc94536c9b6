/// Draft Preview: builds one draft pool and prints it.
///
/// Usage: draft_preview [--seed N] [--config engine.ron]
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use rikishi_engine::config::EngineConfig;
use rikishi_engine::core::collaborators::InMemoryRegistry;
use rikishi_engine::core::draft::{has_variety, DraftPoolBuilder};
use rikishi_engine::core::markov::corpus_names;
use rikishi_engine::core::store::NameStore;

#[derive(Parser, Debug)]
#[command(name = "draft_preview")]
#[command(about = "Generate and print a draft pool of recruits")]
struct Args {
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

    // Corpus names and everything already persisted are taken.
    let corpus = config
        .corpus_text()
        .unwrap_or_else(|e| fail("reading corpus", e));
    let store = NameStore::open(&config.store_path).unwrap_or_else(|e| fail("opening store", e));
    let mut registry = InMemoryRegistry::from_names(corpus_names(&corpus));
    registry.extend(store.records().iter().flat_map(|r| [r.native.clone(), r.romanized.clone()]));

    let mut builder = DraftPoolBuilder::new(&model, table.clone(), Arc::new(registry), seed)
        .unwrap_or_else(|e| fail("creating draft builder", e))
        .with_interpreter(table);
    let pool = builder.build().unwrap_or_else(|e| fail("building draft pool", e));

    println!("=== Draft pool (seed {}) ===\n", seed);
    for (i, candidate) in pool.iter().enumerate() {
        let stats = &candidate.attributes.stats;
        println!("{}. {}  [{}]", i + 1, candidate.name, candidate.tier);
        if let Some(meaning) = &candidate.meaning {
            println!("   Meaning: {}", meaning);
        }
        println!("   From:    {}", candidate.origin);
        println!(
            "   Ability: {}  (STR {} TEC {} BAL {} END {} MEN {})",
            candidate.attributes.current,
            stats.strength,
            stats.technique,
            stats.balance,
            stats.endurance,
            stats.mental
        );
        println!();
    }

    if !has_variety(&pool) {
        println!("(every candidate shares one tier)");
    }
}
