use std::collections::{HashMap, HashSet};

use crate::detect::frequency::FrequencyTable;
use crate::detect::stats::WordStats;
use crate::detect::thresholds::Thresholds;
use crate::error::MineResult;

/// Statistical new-word detection over one corpus orientation.
///
/// Construction runs the whole pipeline eagerly: frequency counting,
/// candidate selection, cohesion and entropy scoring, threshold filtering
/// and redundancy pruning. The finished detector holds the surviving words
/// and the table they were scored against.
///
/// # Responsibilities
/// - Select candidates from the frequency table by length and count
/// - Score each candidate's worst split (cohesion) and right-boundary
///   freedom (entropy)
/// - Keep only candidates clearing every threshold, then drop survivors
///   contained in longer survivors
/// - Fold a reversed-corpus detector's results back in ([`Self::merge_reversed`])
///
/// # Invariants
/// - Every surviving word's length lies in `[min_length, max_length]`
/// - Before any merge, no surviving word is a contiguous substring of
///   another survivor
/// - Entropy is measured on the right boundary only; the reversed pass is
///   what contributes the mirrored boundary
pub struct NewWordDetector {
	table: FrequencyTable,
	words: HashMap<String, WordStats>,
}

impl NewWordDetector {
	/// Runs the full pipeline over an already script-filtered corpus.
	///
	/// # Errors
	/// Returns an error if `thresholds` fails validation.
	pub fn new(corpus: &str, thresholds: &Thresholds) -> MineResult<Self> {
		thresholds.validate()?;
		let table = FrequencyTable::build(corpus, thresholds.max_ngram);
		Ok(Self::from_table(table, thresholds))
	}

	/// Runs the scoring stages against a prebuilt table.
	///
	/// The caller guarantees the thresholds are valid and that the table was
	/// built with `thresholds.max_ngram`.
	pub(crate) fn from_table(table: FrequencyTable, thresholds: &Thresholds) -> Self {
		let mut candidates = Self::select_candidates(&table, thresholds);
		Self::score_cohesion(&table, &mut candidates, thresholds);
		Self::score_entropy(&table, &mut candidates, thresholds);

		let mut words = Self::apply_thresholds(candidates, thresholds);
		Self::prune_contained(&mut words);

		Self { table, words }
	}

	/// The surviving words and their scores.
	pub fn words(&self) -> &HashMap<String, WordStats> {
		&self.words
	}

	/// Consumes the detector, handing the result set to the caller.
	pub fn into_words(self) -> HashMap<String, WordStats> {
		self.words
	}

	/// The frequency table the words were scored against.
	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Number of surviving words.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	/// True when the run found nothing.
	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Picks every table entry meeting the count and length bounds.
	///
	/// Each selected word starts with its frequency filled and both scores
	/// zeroed; the scorers fill them in place.
	fn select_candidates(
		table: &FrequencyTable,
		thresholds: &Thresholds,
	) -> HashMap<String, WordStats> {
		let mut candidates = HashMap::new();

		for (gram, count) in table.iter() {
			if count < thresholds.min_frequence {
				continue;
			}
			let length = gram.chars().count();
			if length < thresholds.min_length || length > thresholds.max_length {
				continue;
			}
			candidates.insert(
				gram.to_owned(),
				WordStats { frequency: count, ..WordStats::default() },
			);
		}

		candidates
	}

	/// Scores how strongly each candidate's halves bind together.
	///
	/// For a word of length L, every split point in `[1, L-1]` yields
	/// `count(word) / (count(left) · count(right))`; the candidate keeps the
	/// **minimum** ratio, since the weakest split is where the word breaks.
	/// Parts absent from the table count as `min_frequence` occurrences, so
	/// the division can never hit zero.
	fn score_cohesion(
		table: &FrequencyTable,
		candidates: &mut HashMap<String, WordStats>,
		thresholds: &Thresholds,
	) {
		let floor = thresholds.min_frequence;

		for (word, stats) in candidates.iter_mut() {
			let chars: Vec<char> = word.chars().collect();
			let frequency = stats.frequency as f64;

			let mut weakest = f64::INFINITY;
			for split in 1..chars.len() {
				let left: String = chars[..split].iter().collect();
				let right: String = chars[split..].iter().collect();
				let ratio = frequency
					/ (table.count_or_floor(&left, floor) as f64
						* table.count_or_floor(&right, floor) as f64);
				weakest = weakest.min(ratio);
			}

			// min_length >= 2 guarantees at least one split was scored
			stats.cohesion = weakest;
		}
	}

	/// Scores how freely each candidate's right boundary varies.
	///
	/// One pass over the whole table: an entry one character longer than a
	/// candidate and sharing it as prefix contributes its count to that
	/// candidate's extension multiset. Each candidate then gets the Shannon
	/// entropy of its multiset; no extensions means 0.0.
	fn score_entropy(
		table: &FrequencyTable,
		candidates: &mut HashMap<String, WordStats>,
		thresholds: &Thresholds,
	) {
		let mut extensions: HashMap<&str, Vec<usize>> = HashMap::new();

		for (gram, count) in table.iter() {
			if gram.chars().count() < thresholds.min_length {
				continue;
			}
			let Some((last_start, _)) = gram.char_indices().last() else {
				continue;
			};
			let prefix = &gram[..last_start];
			if candidates.contains_key(prefix) {
				extensions.entry(prefix).or_default().push(count);
			}
		}

		for (word, stats) in candidates.iter_mut() {
			stats.entropy = match extensions.get(word.as_str()) {
				Some(counts) => Self::shannon_entropy(counts),
				None => 0.0,
			};
		}
	}

	/// Shannon entropy in nats of a multiset of counts.
	fn shannon_entropy(counts: &[usize]) -> f64 {
		if counts.is_empty() {
			return 0.0;
		}
		let total: usize = counts.iter().sum();
		let total = total as f64;

		counts
			.iter()
			.map(|&count| {
				let p = count as f64 / total;
				-p * p.ln()
			})
			.sum()
	}

	/// Keeps only candidates clearing all three minimums.
	fn apply_thresholds(
		candidates: HashMap<String, WordStats>,
		thresholds: &Thresholds,
	) -> HashMap<String, WordStats> {
		candidates
			.into_iter()
			.filter(|(_, stats)| {
				stats.frequency >= thresholds.min_frequence
					&& stats.cohesion >= thresholds.min_cohesion
					&& stats.entropy >= thresholds.min_entropy
			})
			.collect()
	}

	/// Removes every survivor occurring inside a longer survivor.
	///
	/// Containment alone decides; scores are never compared. A short word
	/// passing the thresholds next to a longer passing compound is taken to
	/// be an artifact of that compound.
	fn prune_contained(words: &mut HashMap<String, WordStats>) {
		let mut ordered: Vec<(String, usize)> = words
			.keys()
			.map(|word| (word.clone(), word.chars().count()))
			.collect();
		ordered.sort_by_key(|(_, length)| *length);

		let mut contained: HashSet<String> = HashSet::new();
		for ii in 0..ordered.len() {
			let (shorter, shorter_len) = &ordered[ii];
			for (longer, longer_len) in &ordered[ii + 1..] {
				if shorter_len < longer_len && longer.contains(shorter.as_str()) {
					contained.insert(shorter.clone());
					break;
				}
			}
		}

		for word in contained {
			words.remove(&word);
		}
	}

	/// Folds a reversed-corpus detector's results into this one.
	///
	/// Every word of `other` is flipped back to forward orientation. Words
	/// already present have their stats summed element-wise; the rest are
	/// inserted as new entries. One-directional: `other` is left untouched
	/// and this result set only grows.
	pub fn merge_reversed(&mut self, other: &Self) {
		for (word, stats) in &other.words {
			let forward: String = word.chars().rev().collect();
			match self.words.get_mut(&forward) {
				Some(existing) => existing.merge(stats),
				None => {
					self.words.insert(forward, *stats);
				}
			}
		}
	}
}
