//! CSV report file shared by successive runs
//!
//! Each run appends one summary row. The header is written by whichever run
//! finds the file empty, under an exclusive lock, so concurrent runs never
//! duplicate it or put a row before it.

use std::{
    borrow::Cow,
    fmt::{self, Write as _},
    fs::OpenOptions,
    io::Write as _,
    path::Path,
};

use anyhow::Context;
use perfo_stats::descriptive::DescriptiveStats;
use tracing::{debug, info};

/// File name used when none is configured.
pub(crate) const DEFAULT_REPORT_NAME: &str = "perfo-app-launcher_report.csv";

pub(crate) const HEADER: &str =
    "application,measure,mean(value),std_dev(value),std_dev_of_mean(per),min(value),max(value)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppendOutcome {
    /// The file was empty or missing; the header was written first.
    Created,
    Appended,
}

/// One summary row of the report file.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReportRow<'a> {
    pub app_name: &'a str,
    pub measure_name: &'a str,
    pub stats: &'a DescriptiveStats,
}

impl fmt::Display for ReportRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        write!(
            f,
            "{},{},{},{:.2},{:.2},{},{}",
            csv_field(self.app_name),
            csv_field(self.measure_name),
            stats.mean,
            stats.std_dev,
            stats.std_dev_of_mean_percent,
            stats.min,
            stats.max,
        )
    }
}

/// Quotes a field only when it would otherwise break the row.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Appends `row` to the report at `path`, creating the file if needed.
pub(crate) fn append_row(path: &Path, row: &ReportRow<'_>) -> anyhow::Result<AppendOutcome> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open report file: {}", path.display()))?;
    file.lock()
        .with_context(|| format!("Failed to lock report file: {}", path.display()))?;

    let len = file
        .metadata()
        .with_context(|| format!("Failed to stat report file: {}", path.display()))?
        .len();
    let outcome = if len == 0 {
        AppendOutcome::Created
    } else {
        AppendOutcome::Appended
    };

    let mut content = String::new();
    if outcome == AppendOutcome::Created {
        writeln!(&mut content, "{HEADER}")?;
    }
    writeln!(&mut content, "{row}")?;

    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    file.unlock()
        .with_context(|| format!("Failed to unlock report file: {}", path.display()))?;

    match outcome {
        AppendOutcome::Created => info!(path = %path.display(), "report file created"),
        AppendOutcome::Appended => debug!(path = %path.display(), "report row appended"),
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn stats() -> DescriptiveStats {
        DescriptiveStats::new(&[2, 4, 4, 4, 5, 5, 7, 9]).unwrap()
    }

    #[test]
    fn test_row_format() {
        let stats = stats();
        let row = ReportRow {
            app_name: "maps",
            measure_name: "cold_start",
            stats: &stats,
        };
        assert_eq!(row.to_string(), "maps,cold_start,5,2.00,40.00,2,9");
    }

    #[test]
    fn test_row_quotes_special_fields() {
        let stats = stats();
        let row = ReportRow {
            app_name: "media, radio",
            measure_name: "say \"hi\"",
            stats: &stats,
        };
        assert!(
            row.to_string()
                .starts_with("\"media, radio\",\"say \"\"hi\"\"\",5,")
        );
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_NAME);
        let stats = stats();
        let row = ReportRow {
            app_name: "app",
            measure_name: "launch",
            stats: &stats,
        };

        assert_eq!(append_row(&path, &row).unwrap(), AppendOutcome::Created);
        assert_eq!(append_row(&path, &row).unwrap(), AppendOutcome::Appended);

        let content = fs::read_to_string(&path).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines, [HEADER, "app,launch,5,2.00,40.00,2,9", "app,launch,5,2.00,40.00,2,9"]);
    }

    #[test]
    fn test_existing_rows_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_NAME);
        fs::write(&path, format!("{HEADER}\nold,row,1,0.00,0.00,1,1\n")).unwrap();
        let stats = stats();
        let row = ReportRow {
            app_name: "new",
            measure_name: "row",
            stats: &stats,
        };

        assert_eq!(append_row(&path, &row).unwrap(), AppendOutcome::Appended);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!("{HEADER}\nold,row,1,0.00,0.00,1,1\nnew,row,5,2.00,40.00,2,9\n")
        );
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join(DEFAULT_REPORT_NAME);
        let stats = stats();
        let row = ReportRow {
            app_name: "app",
            measure_name: "launch",
            stats: &stats,
        };
        let err = append_row(&path, &row).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open report file"));
    }
}
