use crate::{
    StatsError,
    descriptive::DescriptiveStats,
    percentiles::{Percentiles, REPORT_PERCENTILES},
    samples::SampleSet,
    spread::StdDevBands,
};

/// Everything the timing report needs from one sample set.
///
/// Combines:
/// - Descriptive statistics (mean, standard deviation, min, max)
/// - Standard deviation bands
/// - Rank percentiles at [`REPORT_PERCENTILES`]
///
/// # Examples
///
/// ```
/// use perfo_stats::{samples::{Capacity, SampleSet}, summary::Summary};
///
/// let samples = SampleSet::from_values(vec![9, 1, 5, 3, 7], Capacity::default()).unwrap();
/// let summary = Summary::new(samples).unwrap();
///
/// assert_eq!(summary.stats.mean, 5);
/// assert_eq!(summary.stats.min, 1);
/// assert_eq!(summary.percentiles.get(50), Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct Summary {
    /// Mean, standard deviation and range.
    pub stats: DescriptiveStats,
    /// Share of samples within 1, 2 and 3 standard deviations.
    pub bands: StdDevBands,
    /// 50th, 75th, 90th and 99th rank percentiles.
    pub percentiles: Percentiles,
}

impl Summary {
    /// Summarizes a sample set.
    ///
    /// Aggregates and bands are computed over the samples in input order,
    /// then the set is sorted in place for the percentile lookups.
    ///
    /// # Errors
    ///
    /// - [`StatsError::EmptyInput`] if the set is empty
    /// - [`StatsError::AccumulatorOverflow`] if the sum of squares overflows
    pub fn new(mut samples: SampleSet) -> Result<Self, StatsError> {
        let stats = DescriptiveStats::new(samples.as_slice())?;
        let bands = StdDevBands::new(samples.as_slice(), &stats);
        samples.sort();
        let percentiles = Percentiles::from_sorted(samples.as_slice(), &REPORT_PERCENTILES);

        Ok(Self {
            stats,
            bands,
            percentiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::Capacity;

    #[test]
    fn test_one_to_hundred() {
        let mut values = (1..=100).collect::<Vec<u64>>();
        values.reverse();
        let samples = SampleSet::from_values(values, Capacity::default()).unwrap();
        let summary = Summary::new(samples).unwrap();

        assert_eq!(summary.stats.mean, 50);
        assert_eq!(summary.stats.min, 1);
        assert_eq!(summary.stats.max, 100);
        assert_eq!(
            summary.percentiles.as_slice(),
            &[(50, 51), (75, 76), (90, 91), (99, 100)]
        );
        assert_eq!(summary.bands.outside_percent(), 0.0);
    }

    #[test]
    fn test_empty_set() {
        let samples = SampleSet::new(Capacity::default());
        assert!(matches!(Summary::new(samples), Err(StatsError::EmptyInput)));
    }
}
