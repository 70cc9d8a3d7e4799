use serde::{Deserialize, Serialize};

use crate::error::{MineError, MineResult};

/// The numeric knobs steering a detection run.
///
/// One value object is passed explicitly into the pipeline, so a run is a
/// pure function of (corpus, thresholds) and independently testable.
///
/// # Invariants (enforced by [`Thresholds::validate`])
/// - `max_ngram >= 2`: anything less records no multi-character window
/// - `min_length >= 2`: a single character has no split to score
/// - `min_length <= max_length`
/// - `max_length <= max_ngram`: the table cannot count longer words
/// - `min_frequence >= 1`: it doubles as the division floor in cohesion
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Thresholds {
	/// Longest substring length counted into the frequency table.
	pub max_ngram: usize,

	/// Minimum occurrence count for a candidate; also the substitute count
	/// for split parts absent from the table.
	pub min_frequence: usize,

	/// Shortest candidate length considered, in characters.
	pub min_length: usize,

	/// Longest candidate length considered, in characters.
	pub max_length: usize,

	/// Minimum cohesion a candidate must reach to survive.
	pub min_cohesion: f64,

	/// Minimum right-boundary entropy (nats) a candidate must reach.
	pub min_entropy: f64,
}

impl Default for Thresholds {
	fn default() -> Self {
		Self {
			max_ngram: 5,
			min_frequence: 5,
			min_length: 2,
			max_length: 4,
			min_cohesion: 0.0001,
			min_entropy: 1.0,
		}
	}
}

impl Thresholds {
	/// Checks that the knobs describe a runnable pipeline.
	///
	/// # Errors
	/// Returns [`MineError::InvalidThresholds`] naming the offending knob.
	pub fn validate(&self) -> MineResult<()> {
		if self.max_ngram < 2 {
			return Err(MineError::InvalidThresholds(format!(
				"max_ngram must be >= 2, got {}",
				self.max_ngram
			)));
		}
		if self.min_length < 2 {
			return Err(MineError::InvalidThresholds(format!(
				"min_length must be >= 2, got {}",
				self.min_length
			)));
		}
		if self.min_length > self.max_length {
			return Err(MineError::InvalidThresholds(format!(
				"min_length {} exceeds max_length {}",
				self.min_length, self.max_length
			)));
		}
		if self.max_length > self.max_ngram {
			return Err(MineError::InvalidThresholds(format!(
				"max_length {} exceeds max_ngram {}",
				self.max_length, self.max_ngram
			)));
		}
		if self.min_frequence == 0 {
			return Err(MineError::InvalidThresholds(
				"min_frequence must be >= 1".to_owned(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_validate() {
		assert!(Thresholds::default().validate().is_ok());
	}

	#[test]
	fn single_character_candidates_are_rejected() {
		let thresholds = Thresholds { min_length: 1, ..Thresholds::default() };
		assert!(thresholds.validate().is_err());
	}

	#[test]
	fn inverted_length_bounds_are_rejected() {
		let thresholds = Thresholds { min_length: 4, max_length: 3, ..Thresholds::default() };
		assert!(thresholds.validate().is_err());
	}

	#[test]
	fn candidates_longer_than_the_table_are_rejected() {
		let thresholds = Thresholds { max_ngram: 3, max_length: 4, ..Thresholds::default() };
		assert!(thresholds.validate().is_err());
	}

	#[test]
	fn zero_floor_is_rejected() {
		let thresholds = Thresholds { min_frequence: 0, ..Thresholds::default() };
		assert!(thresholds.validate().is_err());
	}
}
