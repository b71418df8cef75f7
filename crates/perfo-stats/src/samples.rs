use std::io::BufRead;

use tracing::debug;

use crate::StatsError;

/// Number of samples accepted when no other capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Upper bound on the number of samples a [`SampleSet`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// At most this many samples.
    Limited(usize),
    /// No limit other than available memory.
    Unbounded,
}

impl Default for Capacity {
    fn default() -> Self {
        Self::Limited(DEFAULT_CAPACITY)
    }
}

impl Capacity {
    /// Returns `true` if a set holding `len` samples is within this capacity.
    #[must_use]
    pub fn admits(self, len: usize) -> bool {
        match self {
            Self::Limited(max) => len <= max,
            Self::Unbounded => true,
        }
    }
}

/// Timing samples buffered in input order.
///
/// The set is filled once, then handed to [`Summary`](crate::summary::Summary),
/// which sorts it in place for percentile lookups.
#[derive(Debug, Clone)]
pub struct SampleSet {
    values: Vec<u64>,
    capacity: Capacity,
}

impl SampleSet {
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self {
            values: Vec::new(),
            capacity,
        }
    }

    /// Builds a set from already-parsed values.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::CapacityExceeded`] if `values` does not fit in `capacity`.
    pub fn from_values(values: Vec<u64>, capacity: Capacity) -> Result<Self, StatsError> {
        match capacity {
            Capacity::Limited(max) if !capacity.admits(values.len()) => {
                Err(StatsError::CapacityExceeded { capacity: max })
            }
            _ => Ok(Self { values, capacity }),
        }
    }

    /// Reads one sample per line until end of input.
    ///
    /// Each line is parsed with [`parse_sample`]. The capacity is checked
    /// before a line is parsed, so an oversized input fails on its first
    /// excess line.
    ///
    /// # Arguments
    ///
    /// * `reader` - Line-oriented input, one sample per line
    /// * `capacity` - Maximum number of samples accepted
    ///
    /// # Returns
    ///
    /// The samples in input order.
    ///
    /// # Errors
    ///
    /// - [`StatsError::Io`] if reading fails
    /// - [`StatsError::CapacityExceeded`] if there are more lines than `capacity`
    /// - [`StatsError::Parse`] if a line does not start with an unsigned integer
    /// - [`StatsError::EmptyInput`] if the input has no lines
    ///
    /// # Examples
    ///
    /// ```
    /// use perfo_stats::{StatsError, samples::{Capacity, SampleSet}};
    ///
    /// let err = SampleSet::read_from(&b"1\n2\n3\n"[..], Capacity::Limited(2)).unwrap_err();
    /// assert!(matches!(err, StatsError::CapacityExceeded { capacity: 2 }));
    /// ```
    pub fn read_from<R>(reader: R, capacity: Capacity) -> Result<Self, StatsError>
    where
        R: BufRead,
    {
        let mut set = Self::new(capacity);
        for (idx, line) in reader.split(b'\n').enumerate() {
            let line = line.map_err(StatsError::Io)?;
            set.check_room()?;
            let value = parse_sample(&line).ok_or_else(|| StatsError::Parse {
                line: idx + 1,
                content: String::from_utf8_lossy(&line).trim_end().to_owned(),
            })?;
            set.values.push(value);
        }
        if set.is_empty() {
            return Err(StatsError::EmptyInput);
        }
        debug!(count = set.len(), capacity = ?set.capacity, "samples ingested");
        Ok(set)
    }

    fn check_room(&self) -> Result<(), StatsError> {
        match self.capacity {
            Capacity::Limited(max) if self.values.len() >= max => {
                Err(StatsError::CapacityExceeded { capacity: max })
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Sorts the samples in ascending order.
    pub fn sort(&mut self) {
        self.values.sort_unstable();
    }
}

/// Parses the leading unsigned decimal integer of a line.
///
/// Leading whitespace and a single `+` sign are skipped, and everything after
/// the digits is ignored. Returns `None` if there are no digits or the value
/// does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use perfo_stats::samples::parse_sample;
///
/// assert_eq!(parse_sample(b"  42\r"), Some(42));
/// assert_eq!(parse_sample(b"17 ms"), Some(17));
/// assert_eq!(parse_sample(b"abc"), None);
/// ```
#[must_use]
pub fn parse_sample(line: &[u8]) -> Option<u64> {
    let start = line.iter().position(|b| !b.is_ascii_whitespace())?;
    let rest = &line[start..];
    let rest = rest.strip_prefix(b"+").unwrap_or(rest);
    let end = rest
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = std::str::from_utf8(&rest[..end]).ok()?;
    digits.parse().ok()
}
