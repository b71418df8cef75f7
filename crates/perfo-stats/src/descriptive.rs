use tracing::debug;

use crate::StatsError;

/// Single-pass accumulation over a sample set.
///
/// Sums are kept in `u128` with checked arithmetic, so any input whose sums
/// fit in a `u64` produces the same results as plain `u64` accumulation, and
/// larger inputs fail with [`StatsError::AccumulatorOverflow`] instead of
/// wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregates {
    /// Number of samples.
    pub count: usize,
    /// Sum of all samples.
    pub sum: u128,
    /// Sum of the squares of all samples.
    pub sum_sq: u128,
    /// Smallest sample.
    pub min: u64,
    /// Largest sample.
    pub max: u64,
}

impl Aggregates {
    /// Accumulates sum, sum of squares, min and max.
    ///
    /// Min and max are seeded from the first sample.
    ///
    /// # Arguments
    ///
    /// * `values` - Samples in any order
    ///
    /// # Returns
    ///
    /// The accumulated sums and range of `values`.
    ///
    /// # Errors
    ///
    /// - [`StatsError::EmptyInput`] if `values` is empty
    /// - [`StatsError::AccumulatorOverflow`] if the sum of squares exceeds `u128`
    ///
    /// # Examples
    ///
    /// ```
    /// # use perfo_stats::descriptive::Aggregates;
    /// let agg = Aggregates::new(&[3, 1, 2]).unwrap();
    /// assert_eq!(agg.sum, 6);
    /// assert_eq!(agg.sum_sq, 14);
    /// assert_eq!((agg.min, agg.max), (1, 3));
    /// ```
    pub fn new(values: &[u64]) -> Result<Self, StatsError> {
        let (&first, _) = values.split_first().ok_or(StatsError::EmptyInput)?;
        let mut agg = Self {
            count: values.len(),
            sum: 0,
            sum_sq: 0,
            min: first,
            max: first,
        };
        for &value in values {
            let wide = u128::from(value);
            agg.sum = agg
                .sum
                .checked_add(wide)
                .ok_or(StatsError::AccumulatorOverflow)?;
            agg.sum_sq = agg
                .sum_sq
                .checked_add(wide * wide)
                .ok_or(StatsError::AccumulatorOverflow)?;
            agg.min = agg.min.min(value);
            agg.max = agg.max.max(value);
        }
        Ok(agg)
    }
}

/// Descriptive statistics of a sample set.
///
/// The mean is truncated to an integer and that integer mean is used for the
/// variance, the coefficient of variation and the deviation bands. The
/// standard deviation is therefore a biased estimator, kept for
/// compatibility with existing report files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// Number of samples.
    pub count: usize,
    /// Smallest sample.
    pub min: u64,
    /// Largest sample.
    pub max: u64,
    /// `sum / count`, truncated.
    pub mean: u64,
    /// `sum_sq / count - mean²`, in integer arithmetic.
    pub variance: u128,
    /// Square root of `variance`.
    pub std_dev: f64,
    /// `std_dev` as a percentage of `mean`, or `0.0` when the mean is zero.
    pub std_dev_of_mean_percent: f64,
}

impl DescriptiveStats {
    /// Computes statistics from samples in any order.
    ///
    /// # Arguments
    ///
    /// * `values` - Samples in any order
    ///
    /// # Returns
    ///
    /// Mean, variance, standard deviation and range of `values`.
    ///
    /// # Errors
    ///
    /// Same as [`Aggregates::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use perfo_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
    /// assert_eq!(stats.mean, 5);
    /// assert_eq!(stats.variance, 4);
    /// assert_eq!(stats.std_dev, 2.0);
    /// assert_eq!(stats.std_dev_of_mean_percent, 40.0);
    /// ```
    pub fn new(values: &[u64]) -> Result<Self, StatsError> {
        let stats = Self::from_aggregates(&Aggregates::new(values)?);
        debug!(
            count = stats.count,
            mean = stats.mean,
            std_dev = stats.std_dev,
            "samples aggregated"
        );
        Ok(stats)
    }

    /// Derives statistics from precomputed aggregates.
    ///
    /// # Arguments
    ///
    /// * `agg` - Aggregates of a non-empty sample set
    ///
    /// # Panics
    ///
    /// Panics if `agg.count` is zero.
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_aggregates(agg: &Aggregates) -> Self {
        let n = agg.count as u128;
        // sum / n lies between min and max, so it fits in u64
        let mean = (agg.sum / n) as u64;
        let mean_wide = u128::from(mean);
        // floor(sum_sq / n) >= floor(sum / n)², so this never underflows
        let variance = agg.sum_sq / n - mean_wide * mean_wide;
        let std_dev = (variance as f64).sqrt();
        let std_dev_of_mean_percent = if mean == 0 {
            0.0
        } else {
            std_dev * 100.0 / mean as f64
        };

        Self {
            count: agg.count,
            min: agg.min,
            max: agg.max,
            mean,
            variance,
            std_dev,
            std_dev_of_mean_percent,
        }
    }
}
