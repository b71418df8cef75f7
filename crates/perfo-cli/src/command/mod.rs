use std::{
    ffi::OsString,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, error::ErrorKind};
use perfo_stats::{
    samples::{Capacity, DEFAULT_CAPACITY, SampleSet},
    summary::Summary,
};
use tracing::debug;

use crate::{
    input::Input,
    report_file::{self, DEFAULT_REPORT_NAME, ReportRow},
};

mod text_report;

const USAGE: &str = "\
Make sure you have the following arguments:
\targv[0] - Executable name:
\targv[1] - Application name
\targv[2] - Measure name
\targv[3] - Path to store the file if you want to use a different location to store it
";

/// Summarize timing samples read one per line and append them to a CSV report
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Application name recorded in the report
    #[arg(allow_hyphen_values = true)]
    app_name: OsString,

    /// Measure name recorded in the report
    #[arg(allow_hyphen_values = true)]
    measure_name: OsString,

    /// Directory holding the report file (default: current directory)
    #[arg(allow_hyphen_values = true)]
    output_dir: Option<PathBuf>,

    /// Maximum number of samples accepted
    #[arg(long, default_value_t = DEFAULT_CAPACITY, conflicts_with = "unbounded")]
    capacity: usize,

    /// Accept any number of samples
    #[arg(long)]
    unbounded: bool,

    /// Read samples from this file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,

    /// Name of the report file inside the output directory
    #[arg(long, default_value = DEFAULT_REPORT_NAME)]
    report_name: String,

    /// Fail on malformed arguments instead of printing usage and exiting successfully
    #[arg(long)]
    strict_usage: bool,
}

impl CommandArgs {
    fn capacity(&self) -> Capacity {
        if self.unbounded {
            Capacity::Unbounded
        } else {
            Capacity::Limited(self.capacity)
        }
    }

    fn report_path(&self) -> PathBuf {
        self.output_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .join(&self.report_name)
    }
}

#[derive(Debug)]
enum ParsedArgs {
    Run(CommandArgs),
    /// Wrong number of positional arguments, answered with the usage text.
    Usage,
    Fail(clap::Error),
}

fn parse_args<I, T>(raw: I) -> ParsedArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let raw = raw.into_iter().map(Into::into).collect::<Vec<OsString>>();
    match CommandArgs::try_parse_from(&raw) {
        Ok(args) => ParsedArgs::Run(args),
        Err(e) if is_usage_error(e.kind()) && !raw.iter().any(|arg| arg == "--strict-usage") => {
            ParsedArgs::Usage
        }
        Err(e) => ParsedArgs::Fail(e),
    }
}

fn is_usage_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
    )
}

pub fn run() -> anyhow::Result<()> {
    match parse_args(std::env::args_os()) {
        ParsedArgs::Run(args) => compute_stats(&args),
        ParsedArgs::Usage => {
            print!("{USAGE}");
            Ok(())
        }
        ParsedArgs::Fail(e) => e.exit(),
    }
}

fn compute_stats(args: &CommandArgs) -> anyhow::Result<()> {
    let report_path = args.report_path();
    let mut input = Input::from_input_path(args.input.clone())?;
    let source = input.display_path();
    debug!(%source, report = %report_path.display(), "reading samples");

    let samples = SampleSet::read_from(&mut input, args.capacity())
        .with_context(|| format!("Failed to read samples from {source}"))?;
    let summary = Summary::new(samples).context("Failed to summarize samples")?;

    let mut out = io::stdout().lock();
    text_report::write_dispersion(&mut out, &summary.stats)?;
    out.flush()?;

    let app_name = args.app_name.to_string_lossy();
    let measure_name = args.measure_name.to_string_lossy();
    let row = ReportRow {
        app_name: &app_name,
        measure_name: &measure_name,
        stats: &summary.stats,
    };
    report_file::append_row(&report_path, &row)?;

    text_report::write_bands(&mut out, &summary.bands)?;
    text_report::write_percentiles(&mut out, &summary.percentiles)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ParsedArgs {
        parse_args(std::iter::once("perfo-computestats").chain(args.iter().copied()))
    }

    #[test]
    fn test_two_positionals_use_current_dir() {
        let ParsedArgs::Run(args) = parse(&["maps", "launch"]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.report_path(), Path::new("./perfo-app-launcher_report.csv"));
        assert_eq!(args.capacity(), Capacity::Limited(DEFAULT_CAPACITY));
    }

    #[test]
    fn test_output_dir() {
        let ParsedArgs::Run(args) = parse(&["maps", "launch", "/tmp/out"]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(
            args.report_path(),
            Path::new("/tmp/out/perfo-app-launcher_report.csv")
        );
    }

    #[test]
    fn test_options() {
        let ParsedArgs::Run(args) = parse(&[
            "--unbounded",
            "--report-name",
            "boot.csv",
            "--input",
            "samples.txt",
            "maps",
            "launch",
        ]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.capacity(), Capacity::Unbounded);
        assert_eq!(args.report_path(), Path::new("./boot.csv"));
        assert_eq!(args.input.as_deref(), Some(Path::new("samples.txt")));
    }

    #[test]
    fn test_hyphenated_names_run() {
        let ParsedArgs::Run(args) = parse(&["maps", "-O2"]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.measure_name, "-O2");

        let ParsedArgs::Run(args) = parse(&["maps", "-1"]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.measure_name, "-1");

        let ParsedArgs::Run(args) = parse(&["app", "m", "-out"]) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.report_path(), Path::new("-out/perfo-app-launcher_report.csv"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_run() {
        use std::os::unix::ffi::OsStringExt as _;

        let raw = [
            OsString::from("perfo-computestats"),
            OsString::from_vec(vec![b'a', 0xff]),
            OsString::from("launch"),
        ];
        let ParsedArgs::Run(args) = parse_args(raw) else {
            panic!("expected arguments to parse");
        };
        assert_eq!(args.app_name.to_string_lossy(), "a\u{fffd}");
    }

    #[test]
    fn test_wrong_positional_count_prints_usage() {
        assert!(matches!(parse(&["maps"]), ParsedArgs::Usage));
        assert!(matches!(parse(&[]), ParsedArgs::Usage));
        assert!(matches!(
            parse(&["a", "b", "c", "d"]),
            ParsedArgs::Usage
        ));
    }

    #[test]
    fn test_strict_usage_fails() {
        assert!(matches!(
            parse(&["--strict-usage", "maps"]),
            ParsedArgs::Fail(_)
        ));
    }

    #[test]
    fn test_conflicting_capacity_fails() {
        assert!(matches!(
            parse(&["--capacity", "10", "--unbounded", "a", "b"]),
            ParsedArgs::Fail(_)
        ));
    }

    #[test]
    fn test_help_is_not_usage() {
        assert!(matches!(parse(&["--help"]), ParsedArgs::Fail(_)));
    }
}
