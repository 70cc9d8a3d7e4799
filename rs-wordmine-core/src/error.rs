use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while mining a corpus.
///
/// Everything the library can fail on funnels through this enum so that
/// binaries get one type to match or wrap.
#[derive(Debug, Error)]
pub enum MineError {
	/// A threshold combination the pipeline cannot run with.
	#[error("invalid thresholds: {0}")]
	InvalidThresholds(String),

	/// The corpus path does not exist or is not a directory.
	#[error("expected a corpus directory, got: {}", .0.display())]
	NotADirectory(PathBuf),

	/// Reading the corpus or writing results failed.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// The corpus snapshot could not be encoded or decoded.
	#[error("snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),
}

/// Result alias used across the crate.
pub type MineResult<T> = Result<T, MineError>;
