use serde::{Deserialize, Serialize};

/// The three scores attached to a surviving word.
///
/// Created zeroed when a candidate is selected, then each field is filled
/// exactly once by its stage: `frequency` at selection, `cohesion` and
/// `entropy` by their scorers. After filtering, the only remaining mutation
/// is [`WordStats::merge`] during the bidirectional fold.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct WordStats {
	/// Occurrence count of the word in the corpus.
	pub frequency: usize,

	/// Worst-case split association score. Low means the word breaks easily
	/// at some internal position.
	pub cohesion: f64,

	/// Shannon entropy (nats) of the word's right extensions. 0.0 when the
	/// table holds no longer n-gram sharing the word as prefix.
	pub entropy: f64,
}

impl WordStats {
	/// Adds another record into this one, element-wise.
	///
	/// Used when a word found in the reversed-corpus pass matches a word of
	/// the forward pass: the two directions' evidence is summed.
	pub fn merge(&mut self, other: &Self) {
		self.frequency += other.frequency;
		self.cohesion += other.cohesion;
		self.entropy += other.entropy;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn merge_sums_all_three_fields() {
		let mut stats = WordStats { frequency: 4, cohesion: 0.25, entropy: 1.0 };
		stats.merge(&WordStats { frequency: 3, cohesion: 0.5, entropy: 0.5 });

		assert_eq!(stats.frequency, 7);
		assert_eq!(stats.cohesion, 0.75);
		assert_eq!(stats.entropy, 1.5);
	}
}
