use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

use rs_wordmine_core::detect::miner::{Miner, MinerConfig};
use rs_wordmine_core::detect::thresholds::Thresholds;

/// Batch new-word miner: scans a corpus directory and writes the ranked
/// table of discovered words.
#[derive(Parser, Debug)]
#[command(name = "wordmine", version, about = "Statistical new-word discovery over a raw corpus")]
struct Cli {
	/// Directory containing the corpus text files.
	#[arg(long, default_value = "./corpus")]
	corpus: PathBuf,

	/// File the ranked word table is written to.
	#[arg(long, default_value = "./results.dat")]
	result: PathBuf,

	/// Optional JSON file overriding the default thresholds; absent fields
	/// keep their defaults.
	#[arg(long)]
	config: Option<PathBuf>,

	/// Also run the pipeline over the reversed corpus and merge the results.
	#[arg(long)]
	reverse: bool,
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	match run(&cli) {
		// A run that finds nothing is reported as its own exit status so
		// callers can tell it apart from a crash.
		Ok(0) => {
			warn!("pipeline completed but found no new words");
			ExitCode::from(1)
		}
		Ok(count) => {
			info!("COMPLETED! Got {} new words", count);
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!("{:#}", err);
			ExitCode::from(2)
		}
	}
}

fn run(cli: &Cli) -> Result<usize> {
	let thresholds = load_thresholds(cli.config.as_deref())?;
	warn!(
		"running with frequency >= {}, cohesion >= {}, entropy >= {}",
		thresholds.min_frequence, thresholds.min_cohesion, thresholds.min_entropy
	);

	let miner = Miner::new(MinerConfig {
		corpus_dir: cli.corpus.clone(),
		result_path: cli.result.clone(),
		is_reverse: cli.reverse,
		thresholds,
	})?;

	let rows = miner.run()?;
	if rows.is_empty() {
		return Ok(0);
	}

	miner.write_results(&rows)?;
	Ok(rows.len())
}

fn load_thresholds(path: Option<&std::path::Path>) -> Result<Thresholds> {
	match path {
		Some(path) => {
			let text = fs::read_to_string(path)
				.with_context(|| format!("failed to read config {}", path.display()))?;
			let thresholds: Thresholds = serde_json::from_str(&text)
				.with_context(|| format!("failed to parse config {}", path.display()))?;
			Ok(thresholds)
		}
		None => Ok(Thresholds::default()),
	}
}
