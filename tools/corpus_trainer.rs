/// Corpus Trainer: builds a character transition model from a name corpus.
///
/// Usage: corpus_trainer --input <corpus.txt> --output <model.ron>
use clap::Parser;
use std::path::PathBuf;
use std::process;

use rikishi_engine::core::markov::{self, CorpusTrainer};

#[derive(Parser, Debug)]
#[command(name = "corpus_trainer")]
#[command(about = "Train a ring-name transition model from a corpus (one name per line)")]
struct Args {
    /// Corpus file, one native-script name per line
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the RON model
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let text = std::fs::read_to_string(&args.input).unwrap_or_else(|e| {
        eprintln!("Error reading input file '{}': {}", args.input.display(), e);
        process::exit(1);
    });

    println!("Training transition model from '{}'...", args.input.display());
    let names = markov::corpus_names(&text).len();
    let model = CorpusTrainer::train(&text);

    if model.is_empty() {
        eprintln!("Error: corpus '{}' contains no names", args.input.display());
        process::exit(1);
    }

    println!(
        "Model trained: {} names, {} start characters, {} characters, {} transitions",
        names,
        model.start.len(),
        model.transitions.len(),
        model.transition_count()
    );

    markov::save_model(&model, &args.output).unwrap_or_else(|e| {
        eprintln!("Error saving model to '{}': {}", args.output.display(), e);
        process::exit(1);
    });

    println!("Model saved to '{}'", args.output.display());
}
