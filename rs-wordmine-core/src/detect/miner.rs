use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::detect::detector::NewWordDetector;
use crate::detect::frequency::FrequencyTable;
use crate::detect::script;
use crate::detect::stats::WordStats;
use crate::detect::thresholds::Thresholds;
use crate::error::{MineError, MineResult};
use crate::io;

/// Everything a mining run needs to know.
///
/// Assembled by the caller (typically the CLI) and handed to [`Miner::new`]
/// in one piece, so a run never reads ambient state.
#[derive(Clone, Debug)]
pub struct MinerConfig {
	/// Directory whose files are concatenated into the corpus.
	pub corpus_dir: PathBuf,

	/// File the ranked word table is written to.
	pub result_path: PathBuf,

	/// Run the pipeline a second time over the reversed corpus and fold the
	/// results back in.
	pub is_reverse: bool,

	/// Numeric knobs for both passes.
	pub thresholds: Thresholds,
}

/// Serialized form of a loaded corpus: the script-filtered text plus the
/// frequency table built from it.
///
/// Written next to the corpus directory after the first run and reloaded on
/// later runs, skipping the two expensive steps. Purely an optimization; the
/// restored state is byte-identical to a fresh build.
#[derive(Serialize, Deserialize)]
struct CorpusSnapshot {
	corpus: String,
	table: FrequencyTable,
}

/// High-level entry point driving a whole mining run.
///
/// # Responsibilities
/// - Resolve and validate the corpus directory
/// - Load the corpus (or restore its snapshot) and build the frequency table
/// - Run the forward detector, and the reversed pass when configured
/// - Rank the surviving words deterministically and write the result table
///
/// Thin binaries construct a `Miner` and call [`Miner::run`]; nothing else
/// in the crate needs to be touched for the common case.
#[derive(Debug)]
pub struct Miner {
	config: MinerConfig,
}

impl Miner {
	/// Creates a miner after checking the configuration.
	///
	/// # Errors
	/// - [`MineError::InvalidThresholds`] if the knobs are degenerate.
	/// - [`MineError::NotADirectory`] if the corpus path is unusable.
	pub fn new(mut config: MinerConfig) -> MineResult<Self> {
		config.thresholds.validate()?;

		// Normalize "folder" / "folder/"
		config.corpus_dir = io::normalize_folder(&config.corpus_dir);
		if !config.corpus_dir.is_dir() {
			return Err(MineError::NotADirectory(config.corpus_dir));
		}

		Ok(Self { config })
	}

	/// The configuration the miner was built with.
	pub fn config(&self) -> &MinerConfig {
		&self.config
	}

	/// Runs the configured passes and returns the ranked result rows.
	///
	/// Rows are ordered by entropy descending, then frequency descending,
	/// then word ascending, so equal-entropy runs always produce identical
	/// files.
	///
	/// An empty return is a legitimate outcome (nothing cleared the
	/// thresholds), left to the caller to surface.
	pub fn run(&self) -> MineResult<Vec<(String, WordStats)>> {
		let thresholds = &self.config.thresholds;
		let (corpus, table) = self.load_corpus()?;
		info!(
			"corpus ready: {} characters, {} distinct n-grams",
			corpus.chars().count(),
			table.len()
		);

		let mut detector = NewWordDetector::from_table(table, thresholds);
		debug!("forward pass kept {} words", detector.len());

		if self.config.is_reverse {
			let reversed: String = corpus.chars().rev().collect();
			let backward = NewWordDetector::new(&reversed, thresholds)?;
			debug!("backward pass kept {} words", backward.len());
			detector.merge_reversed(&backward);
		}

		Ok(Self::rank(detector.into_words()))
	}

	/// Writes ranked rows to the configured result path as tab-separated
	/// text.
	pub fn write_results(&self, rows: &[(String, WordStats)]) -> MineResult<()> {
		io::write_results(&self.config.result_path, rows)?;
		info!("results written to {}", self.config.result_path.display());
		Ok(())
	}

	/// Loads the corpus and its frequency table, via the snapshot when one
	/// is usable.
	///
	/// - No snapshot: read the directory, filter to the target script, build
	///   the table, write the snapshot.
	/// - Snapshot with matching table depth: restore both without touching
	///   the corpus files.
	/// - Snapshot with a different depth: keep its corpus, rebuild the table
	///   and rewrite the snapshot.
	///
	/// Like any cache keyed only by path, editing the corpus files does not
	/// invalidate an existing snapshot; delete the `.bin` to force a rebuild.
	fn load_corpus(&self) -> MineResult<(String, FrequencyTable)> {
		let max_ngram = self.config.thresholds.max_ngram;
		let snapshot_path = io::build_output_path(&self.config.corpus_dir, "bin")?;

		if snapshot_path.exists() {
			let bytes = fs::read(&snapshot_path)?;
			let snapshot: CorpusSnapshot = postcard::from_bytes(&bytes)?;

			if snapshot.table.max_ngram() == max_ngram {
				info!("restored corpus snapshot from {}", snapshot_path.display());
				return Ok((snapshot.corpus, snapshot.table));
			}

			warn!(
				"snapshot table depth {} does not match max_ngram {}, rebuilding",
				snapshot.table.max_ngram(),
				max_ngram
			);
			let table = FrequencyTable::build(&snapshot.corpus, max_ngram);
			Self::write_snapshot(&snapshot_path, &snapshot.corpus, &table)?;
			return Ok((snapshot.corpus, table));
		}

		let raw = io::read_corpus_dir(&self.config.corpus_dir)?;
		let corpus = script::retain_script(&raw, &script::HAN);
		let table = FrequencyTable::build(&corpus, max_ngram);
		Self::write_snapshot(&snapshot_path, &corpus, &table)?;

		Ok((corpus, table))
	}

	fn write_snapshot(
		path: &std::path::Path,
		corpus: &str,
		table: &FrequencyTable,
	) -> MineResult<()> {
		let snapshot = CorpusSnapshot { corpus: corpus.to_owned(), table: table.clone() };
		let bytes = postcard::to_stdvec(&snapshot)?;
		fs::write(path, bytes)?;
		debug!("corpus snapshot written to {}", path.display());
		Ok(())
	}

	/// Orders the result set for output.
	fn rank(words: std::collections::HashMap<String, WordStats>) -> Vec<(String, WordStats)> {
		let mut rows: Vec<(String, WordStats)> = words.into_iter().collect();
		rows.sort_by(|a, b| {
			b.1.entropy
				.total_cmp(&a.1.entropy)
				.then_with(|| b.1.frequency.cmp(&a.1.frequency))
				.then_with(|| a.0.cmp(&b.0))
		});
		rows
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::tempdir;

	fn test_config(corpus_dir: PathBuf, result_path: PathBuf) -> MinerConfig {
		MinerConfig {
			corpus_dir,
			result_path,
			is_reverse: false,
			thresholds: Thresholds {
				max_ngram: 4,
				min_frequence: 2,
				min_length: 2,
				max_length: 4,
				min_cohesion: 0.0,
				min_entropy: 0.0,
			},
		}
	}

	#[test]
	fn mines_a_repeated_compound_from_files() {
		let dir = tempdir().unwrap();
		let corpus_dir = dir.path().join("corpus");
		fs::create_dir(&corpus_dir).unwrap();
		fs::write(corpus_dir.join("a.txt"), "深度学习深度学习").unwrap();
		fs::write(corpus_dir.join("b.txt"), "深度学习深度学习").unwrap();

		let result_path = dir.path().join("results.dat");
		let miner = Miner::new(test_config(corpus_dir, result_path.clone())).unwrap();
		let rows = miner.run().unwrap();

		assert!(rows.iter().any(|(word, _)| word == "深度学习"));

		miner.write_results(&rows).unwrap();
		let text = fs::read_to_string(&result_path).unwrap();
		assert!(text.starts_with("word\tfrequency\tcohesion\tentropy"));
		assert!(text.contains("深度学习"));
	}

	#[test]
	fn out_of_script_corpus_yields_no_words() {
		let dir = tempdir().unwrap();
		let corpus_dir = dir.path().join("corpus");
		fs::create_dir(&corpus_dir).unwrap();
		fs::write(corpus_dir.join("a.txt"), "only latin text 123 !!").unwrap();

		let miner =
			Miner::new(test_config(corpus_dir, dir.path().join("results.dat"))).unwrap();
		let rows = miner.run().unwrap();
		assert!(rows.is_empty());
	}

	#[test]
	fn snapshot_round_trip_is_invisible_in_the_results() {
		let dir = tempdir().unwrap();
		let corpus_dir = dir.path().join("corpus");
		fs::create_dir(&corpus_dir).unwrap();
		fs::write(corpus_dir.join("a.txt"), "深度学习深度学习深度学习").unwrap();

		let config = test_config(corpus_dir, dir.path().join("results.dat"));
		let first = Miner::new(config.clone()).unwrap().run().unwrap();
		assert!(dir.path().join("corpus.bin").exists());

		// Second run restores the snapshot instead of re-reading the files.
		let second = Miner::new(config).unwrap().run().unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn reverse_pass_never_shrinks_the_result() {
		let dir = tempdir().unwrap();
		let corpus_dir = dir.path().join("corpus");
		fs::create_dir(&corpus_dir).unwrap();
		fs::write(corpus_dir.join("a.txt"), "深度学习深度学习深度学习").unwrap();

		let mut config = test_config(corpus_dir, dir.path().join("results.dat"));
		let forward_only = Miner::new(config.clone()).unwrap().run().unwrap();

		config.is_reverse = true;
		let merged = Miner::new(config).unwrap().run().unwrap();
		assert!(merged.len() >= forward_only.len());
	}

	#[test]
	fn missing_corpus_directory_is_refused() {
		let dir = tempdir().unwrap();
		let config = test_config(dir.path().join("nowhere"), dir.path().join("r.dat"));
		assert!(matches!(Miner::new(config), Err(MineError::NotADirectory(_))));
	}

	#[test]
	fn ranking_breaks_entropy_ties_deterministically() {
		let mut words = std::collections::HashMap::new();
		words.insert(
			"bb".to_owned(),
			WordStats { frequency: 5, cohesion: 0.1, entropy: 1.0 },
		);
		words.insert(
			"aa".to_owned(),
			WordStats { frequency: 5, cohesion: 0.1, entropy: 1.0 },
		);
		words.insert(
			"cc".to_owned(),
			WordStats { frequency: 9, cohesion: 0.1, entropy: 1.0 },
		);
		words.insert(
			"dd".to_owned(),
			WordStats { frequency: 1, cohesion: 0.1, entropy: 2.0 },
		);

		let rows = Miner::rank(words);
		let order: Vec<&str> = rows.iter().map(|(word, _)| word.as_str()).collect();
		assert_eq!(order, vec!["dd", "cc", "aa", "bb"]);
	}
}
