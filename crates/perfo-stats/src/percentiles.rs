/// Percentile points printed in the timing report.
pub const REPORT_PERCENTILES: [u32; 4] = [50, 75, 90, 99];

/// Precomputed rank percentiles for a dataset.
///
/// Each percentile is read from the sorted samples at index
/// `floor(len * p / 100)`. No interpolation is done.
///
/// # Examples
///
/// ```
/// use perfo_stats::percentiles::Percentiles;
///
/// let values = (1..=100).collect::<Vec<u64>>();
/// let percentiles = Percentiles::from_sorted(&values, &[50, 75, 90, 99]);
///
/// assert_eq!(percentiles.get(50), Some(51));
/// assert_eq!(percentiles.get(75), Some(76));
/// assert_eq!(percentiles.get(90), Some(91));
/// assert_eq!(percentiles.get(99), Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percentiles {
    /// (percentile, value) pairs in the order they were requested.
    values: Vec<(u32, u64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Arguments
    ///
    /// * `sorted_values` - Values sorted in ascending order
    /// * `percentile_points` - The percentile points to compute (e.g., [50, 90, 99])
    ///
    /// # Returns
    ///
    /// A `Percentiles` instance with precomputed values. Percentiles of an
    /// empty dataset are left out.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[u64], percentile_points: &[u32]) -> Self {
        assert!(
            sorted_values.is_sorted(),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .filter_map(|&p| compute_percentile(sorted_values, p).map(|value| (p, value)))
            .collect();
        Self { values }
    }

    /// Gets the value at a precomputed percentile.
    ///
    /// # Arguments
    ///
    /// * `percentile` - The percentile to retrieve (0 to 100)
    ///
    /// # Returns
    ///
    /// The value at the specified percentile, or `None` if it was not precomputed.
    #[must_use]
    pub fn get(&self, percentile: u32) -> Option<u64> {
        self.values
            .iter()
            .find_map(|&(p, value)| (p == percentile).then_some(value))
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.values.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(u32, u64)] {
        &self.values
    }
}

/// Index of the `percentile`-th rank in a dataset of `len` values.
///
/// Returns `floor(len * percentile / 100)`, clamped to the last index.
/// Returns `None` for an empty dataset.
///
/// # Examples
///
/// ```
/// use perfo_stats::percentiles::rank_index;
///
/// assert_eq!(rank_index(10, 50), Some(5));
/// assert_eq!(rank_index(10, 99), Some(9));
/// assert_eq!(rank_index(10, 100), Some(9));
/// assert_eq!(rank_index(0, 50), None);
/// ```
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn rank_index(len: usize, percentile: u32) -> Option<usize> {
    let last = len.checked_sub(1)?;
    // computed in u128 so `len * percentile` cannot overflow
    let idx = (len as u128 * u128::from(percentile) / 100) as usize;
    Some(idx.min(last))
}

/// Computes a single rank percentile from sorted data.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0 to 100)
///
/// # Returns
///
/// The value at [`rank_index`], or `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use perfo_stats::percentiles::compute_percentile;
///
/// let values = [1, 2, 3, 4, 5];
/// assert_eq!(compute_percentile(&values, 50), Some(3));
/// assert_eq!(compute_percentile(&values, 25), Some(2));
/// assert_eq!(compute_percentile(&[], 50), None);
/// ```
#[must_use]
pub fn compute_percentile(sorted_values: &[u64], percentile: u32) -> Option<u64> {
    rank_index(sorted_values.len(), percentile).map(|idx| sorted_values[idx])
}
