use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::detect::stats::WordStats;

/// Reads every direct file entry of a directory and concatenates the decoded
/// contents into one string.
///
/// - Bytes are decoded as UTF-8; invalid sequences are dropped, never fatal.
/// - Subdirectories are ignored.
/// - Files are visited in filesystem enumeration order.
pub(crate) fn read_corpus_dir<P: AsRef<Path>>(dir: P) -> io::Result<String> {
	let mut content = String::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() {
			let bytes = fs::read(&path)?;
			// Lossy decode inserts U+FFFD for invalid sequences; drop those
			// so undecodable bytes vanish instead of becoming noise.
			content.extend(
				String::from_utf8_lossy(&bytes)
					.chars()
					.filter(|c| *c != '\u{FFFD}'),
			);
		}
	}

	Ok(content)
}

/// Writes the ranked word table as tab-separated text.
///
/// One header line, then one row per word: `word  frequency  cohesion  entropy`.
pub(crate) fn write_results<P: AsRef<Path>>(
	path: P,
	rows: &[(String, WordStats)],
) -> io::Result<()> {
	let mut file = fs::File::create(path)?;
	writeln!(file, "word\tfrequency\tcohesion\tentropy")?;
	for (word, stats) in rows {
		writeln!(
			file,
			"{}\t{}\t{}\t{}",
			word, stats.frequency, stats.cohesion, stats.entropy
		)?;
	}
	Ok(())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/corpus` + `"bin"` → `data/corpus.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}
