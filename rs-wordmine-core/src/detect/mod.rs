//! Top-level module for the new-word detection pipeline.
//!
//! The pipeline is strictly staged: corpus → frequency table → candidates →
//! {cohesion, entropy} → filtered set → (optional) reversed-pass merge. Each
//! stage fully consumes the previous one before the next begins.

/// Script filtering: reduce raw text to the dense in-script character
/// sequence the counter scans.
pub mod script;

/// Sliding-window n-gram occurrence counts with floored lookups.
///
/// Every later stage is a read against this table.
pub mod frequency;

/// The per-word value record (frequency, cohesion, entropy) and its
/// element-wise merge.
pub mod stats;

/// The validated parameter object steering a run.
pub mod thresholds;

/// The detection pipeline itself: candidate selection, both scorers,
/// threshold filtering, redundancy pruning and the bidirectional fold.
pub mod detector;

/// High-level interface for running a whole mining job.
///
/// Owns corpus loading, snapshot reuse, both passes, ranking and result
/// writing; binaries talk to this and nothing else.
pub mod miner;
