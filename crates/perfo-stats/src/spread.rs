use crate::descriptive::DescriptiveStats;

/// A `mean ± k·std_dev` interval and the number of samples inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Width of the band in standard deviations.
    pub k: u32,
    /// Lower bound, inclusive.
    pub low: f64,
    /// Upper bound, inclusive.
    pub high: f64,
    /// Samples with `low <= value <= high`.
    pub within: usize,
}

impl Band {
    fn new(mean: u64, std_dev: f64, k: u32) -> Self {
        #[expect(clippy::cast_precision_loss)]
        let mean = mean as f64;
        let half_width = f64::from(k) * std_dev;
        Self {
            k,
            low: mean - half_width,
            high: mean + half_width,
            within: 0,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        let value = value as f64;
        value >= self.low && value <= self.high
    }
}

/// Distribution of samples around the mean in 1, 2 and 3 standard deviations.
///
/// # Examples
///
/// ```
/// use perfo_stats::{descriptive::DescriptiveStats, spread::StdDevBands};
///
/// let values = [2, 4, 4, 4, 5, 5, 7, 9];
/// let stats = DescriptiveStats::new(&values).unwrap();
/// let bands = StdDevBands::new(&values, &stats);
///
/// assert_eq!(bands.within_percent(1), Some(75.0));
/// assert_eq!(bands.within_percent(2), Some(100.0));
/// assert_eq!(bands.outside_percent(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StdDevBands {
    count: usize,
    bands: [Band; 3],
}

impl StdDevBands {
    /// Counts the samples falling into each band around `stats.mean`.
    #[must_use]
    pub fn new(values: &[u64], stats: &DescriptiveStats) -> Self {
        let mut bands = [1, 2, 3].map(|k| Band::new(stats.mean, stats.std_dev, k));
        for &value in values {
            for band in &mut bands {
                if band.contains(value) {
                    band.within += 1;
                }
            }
        }
        Self {
            count: values.len(),
            bands,
        }
    }

    /// Returns the band `k` standard deviations wide, for `k` in 1..=3.
    #[must_use]
    pub fn band(&self, k: u32) -> Option<&Band> {
        self.bands.iter().find(|band| band.k == k)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> + '_ {
        self.bands.iter()
    }

    /// Percentage of samples within `k` standard deviations.
    #[must_use]
    pub fn within_percent(&self, k: u32) -> Option<f64> {
        self.band(k).map(|band| self.percent_of_count(band.within))
    }

    /// Iterates over `(k, percentage within k standard deviations)`.
    pub fn within_percents(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.bands
            .iter()
            .map(|band| (band.k, self.percent_of_count(band.within)))
    }

    /// Percentage of samples strictly outside 3 standard deviations.
    #[must_use]
    pub fn outside_percent(&self) -> f64 {
        self.percent_of_count(self.count - self.bands[2].within)
    }

    #[expect(clippy::cast_precision_loss)]
    fn percent_of_count(&self, n: usize) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        n as f64 * 100.0 / self.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands_of(values: &[u64]) -> StdDevBands {
        let stats = DescriptiveStats::new(values).unwrap();
        StdDevBands::new(values, &stats)
    }

    #[test]
    fn test_constant_samples_all_within() {
        let bands = bands_of(&[5, 5, 5, 5]);
        for band in bands.iter() {
            assert_eq!(band.low, 5.0);
            assert_eq!(band.high, 5.0);
            assert_eq!(band.within, 4);
        }
        assert_eq!(bands.outside_percent(), 0.0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // mean 5, std dev 2: the 1 SD band is exactly [3, 7]
        let bands = bands_of(&[3, 7, 3, 7]);
        let one = bands.band(1).unwrap();
        assert_eq!((one.low, one.high), (3.0, 7.0));
        assert_eq!(one.within, 4);
    }

    #[test]
    fn test_outlier_outside_three_sd() {
        let mut values = vec![10; 99];
        values.push(1000);
        let bands = bands_of(&values);
        assert_eq!(bands.within_percent(3), Some(99.0));
        assert_eq!(bands.outside_percent(), 1.0);
    }

    #[test]
    fn test_bands_nest() {
        let bands = bands_of(&[1, 2, 3, 50, 80, 81, 82, 500, 900]);
        let within = bands.iter().map(|band| band.within).collect::<Vec<_>>();
        assert!(within.is_sorted());
    }

    #[test]
    fn test_low_bound_below_zero() {
        // mean 0 with spread gives a negative lower bound, zeros still count
        let bands = bands_of(&[0, 0, 0, 2]);
        let one = bands.band(1).unwrap();
        assert_eq!(one.low, -1.0);
        assert_eq!(one.within, 3);
    }

    #[test]
    fn test_within_percents_in_band_order() {
        let bands = bands_of(&[2, 4, 4, 4, 5, 5, 7, 9]);
        let percents = bands.within_percents().collect::<Vec<_>>();
        assert_eq!(percents, [(1, 75.0), (2, 100.0), (3, 100.0)]);
    }

    #[test]
    fn test_unknown_band() {
        let bands = bands_of(&[1]);
        assert!(bands.band(4).is_none());
        assert!(bands.within_percent(0).is_none());
    }
}
