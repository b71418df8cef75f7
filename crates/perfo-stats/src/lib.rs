//! Timing-sample statistics for the perfo tooling.
//!
//! This crate turns a batch of unsigned integer timing samples into the
//! summary printed by `perfo-computestats`:
//!
//! - **Samples**: a capacity-limited buffer filled from line-oriented input
//! - **Descriptive statistics**: integer-truncated mean, population standard
//!   deviation, coefficient of variation, min and max
//! - **Spread**: how many samples fall within 1, 2 and 3 standard deviations
//! - **Percentiles**: rank-based lookups on the sorted samples
//! - **Summary**: all of the above computed in one go
//!
//! # Modules
//!
//! - [`samples`]: Sample buffer and input parsing
//! - [`descriptive`]: Aggregates and derived statistics
//! - [`spread`]: Standard deviation bands
//! - [`percentiles`]: Rank percentiles
//! - [`summary`]: Combined summary of a sample set
//!
//! # Examples
//!
//! ## Reading samples
//!
//! ```
//! use perfo_stats::samples::{Capacity, SampleSet};
//!
//! let input = b"10\n20\n30\n";
//! let samples = SampleSet::read_from(&input[..], Capacity::default()).unwrap();
//! assert_eq!(samples.as_slice(), &[10, 20, 30]);
//! ```
//!
//! ## Summarizing samples
//!
//! ```
//! use perfo_stats::{samples::{Capacity, SampleSet}, summary::Summary};
//!
//! let samples = SampleSet::from_values((1..=100).collect(), Capacity::default()).unwrap();
//! let summary = Summary::new(samples).unwrap();
//! assert_eq!(summary.stats.mean, 50);
//! assert_eq!(summary.percentiles.get(50), Some(51));
//! assert_eq!(summary.percentiles.get(99), Some(100));
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod samples;
pub mod spread;
pub mod summary;

/// Errors raised while ingesting or summarizing samples.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("failed to read samples")]
    Io(std::io::Error),
    #[display("more than {capacity} samples in input, raise the sample capacity")]
    CapacityExceeded { capacity: usize },
    #[display("empty input, no samples to summarize")]
    EmptyInput,
    #[display("line {line}: not an unsigned integer: {content:?}")]
    Parse { line: usize, content: String },
    #[display("sum of squares overflowed while aggregating samples")]
    AccumulatorOverflow,
}
