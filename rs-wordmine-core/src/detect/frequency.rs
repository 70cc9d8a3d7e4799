use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Occurrence counts for every contiguous substring of the corpus up to a
/// fixed window length.
///
/// The table is the single source every later stage reads from: candidate
/// selection, cohesion ratios and right-extension entropy are all plain
/// lookups against it.
///
/// # Responsibilities
/// - Enumerate every window of length 1..=`max_ngram` over the corpus
/// - Answer exact occurrence counts, or a floor value for absent keys
/// - Serialize as part of a corpus snapshot
///
/// # Invariants
/// - `count(w)` equals the number of start positions `i` with
///   `corpus[i..i + len(w)] == w` (overlapping occurrences included)
/// - No key is empty or longer than `max_ngram` characters
/// - Built once, read-only afterward
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct FrequencyTable {
	/// Longest window length recorded in the table.
	max_ngram: usize,

	/// Mapping from substring to its occurrence count.
	counts: HashMap<String, usize>,
}

impl FrequencyTable {
	/// Builds the table with a single left-to-right scan of `corpus`.
	///
	/// For each window length `n` in `1..=max_ngram`, every valid start
	/// position contributes one count. Lengths exceeding the corpus are
	/// skipped, so an empty corpus yields an empty table.
	///
	/// Complexity is O(`max_ngram` · corpus length) windows.
	pub fn build(corpus: &str, max_ngram: usize) -> Self {
		let chars: Vec<char> = corpus.chars().collect();
		let mut counts: HashMap<String, usize> = HashMap::new();

		for n in 1..=max_ngram {
			if n > chars.len() {
				break;
			}
			for start in 0..=chars.len() - n {
				let gram: String = chars[start..start + n].iter().collect();
				*counts.entry(gram).or_insert(0) += 1;
			}
		}

		Self { max_ngram, counts }
	}

	/// Longest window length this table was built with.
	pub fn max_ngram(&self) -> usize {
		self.max_ngram
	}

	/// Occurrence count of `gram`, or 0 if it was never recorded.
	pub fn count(&self, gram: &str) -> usize {
		self.counts.get(gram).copied().unwrap_or(0)
	}

	/// Occurrence count of `gram`, substituting `floor` for absent keys.
	///
	/// Used by the cohesion scorer so a split part missing from the table is
	/// treated as occurring at the detection floor instead of dividing by
	/// zero.
	pub fn count_or_floor(&self, gram: &str, floor: usize) -> usize {
		self.counts.get(gram).copied().unwrap_or(floor)
	}

	/// Iterates over every recorded `(substring, count)` entry.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.counts.iter().map(|(gram, count)| (gram.as_str(), *count))
	}

	/// Number of distinct substrings recorded.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// True when nothing was recorded (empty or fully filtered corpus).
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_overlapping_occurrences() {
		let table = FrequencyTable::build("abcabcabcabc", 3);

		assert_eq!(table.count("a"), 4);
		assert_eq!(table.count("ab"), 4);
		assert_eq!(table.count("abc"), 4);
		assert_eq!(table.count("bca"), 3);
		assert_eq!(table.count("ca"), 3);
	}

	#[test]
	fn records_no_window_beyond_max_ngram() {
		let table = FrequencyTable::build("abcabcabcabc", 3);

		assert_eq!(table.count("abca"), 0);
		assert!(table.iter().all(|(gram, _)| gram.chars().count() <= 3));
		assert!(table.iter().all(|(gram, _)| !gram.is_empty()));
	}

	#[test]
	fn empty_corpus_yields_empty_table() {
		let table = FrequencyTable::build("", 5);
		assert!(table.is_empty());
	}

	#[test]
	fn corpus_shorter_than_window_is_partial() {
		let table = FrequencyTable::build("ab", 5);
		assert_eq!(table.count("a"), 1);
		assert_eq!(table.count("ab"), 1);
		assert_eq!(table.len(), 3);
	}

	#[test]
	fn floor_substitutes_for_absent_keys_only() {
		let table = FrequencyTable::build("abab", 2);
		assert_eq!(table.count_or_floor("ab", 10), 2);
		assert_eq!(table.count_or_floor("zz", 10), 10);
	}

	#[test]
	fn multibyte_characters_count_by_char_not_byte() {
		let table = FrequencyTable::build("中文中文", 2);
		assert_eq!(table.count("中"), 2);
		assert_eq!(table.count("中文"), 2);
		assert_eq!(table.count("文中"), 1);
	}
}
