use rs_wordmine_core::detect::detector::NewWordDetector;
use rs_wordmine_core::detect::script::{retain_script, HAN};
use rs_wordmine_core::detect::thresholds::Thresholds;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// A tiny inline corpus: three sentences about machine translation,
	// repeated so the compounds recur often enough to be detectable.
	// In a real run the corpus comes from a directory of files instead.
	let raw = "机器翻译很有用。机器翻译很流行。我们研究机器翻译。".repeat(4);

	// Strip everything outside the Han range; the detector expects the
	// dense in-script character sequence.
	let corpus = retain_script(&raw, &HAN);

	// Start from the defaults and open the gates wide so the demo corpus
	// yields something to print.
	let mut thresholds = Thresholds::default();

	// Count windows of up to four characters.
	thresholds.max_ngram = 4;

	// A word must occur at least four times.
	thresholds.min_frequence = 4;

	// Candidate lengths considered, in characters.
	thresholds.min_length = 2;
	thresholds.max_length = 4;

	// Score gates: with both at zero, only frequency, length and the
	// redundancy pruning decide.
	thresholds.min_cohesion = 0.0;
	thresholds.min_entropy = 0.0;

	// Forward pass over the corpus.
	let mut detector = NewWordDetector::new(&corpus, &thresholds)?;

	// Backward pass: same pipeline over the reversed corpus. Entropy only
	// measures the right boundary, so the reversed pass is what contributes
	// the mirrored side. Merging never shrinks the result set.
	let reversed: String = corpus.chars().rev().collect();
	let backward = NewWordDetector::new(&reversed, &thresholds)?;
	detector.merge_reversed(&backward);

	println!("discovered {} words:", detector.len());
	for (word, stats) in detector.words() {
		println!(
			"{}\tfrequency={}\tcohesion={:.6}\tentropy={:.6}",
			word, stats.frequency, stats.cohesion, stats.entropy
		);
	}

	Ok(())
}
