//! Tab-indented timing report printed to stdout

use std::io::{self, Write};

use perfo_stats::{descriptive::DescriptiveStats, percentiles::Percentiles, spread::StdDevBands};

pub(super) fn write_dispersion<W>(out: &mut W, stats: &DescriptiveStats) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "\tMean {}", stats.mean)?;
    writeln!(
        out,
        "\tStd Dev {:.2} ({:.2}% of mean)",
        stats.std_dev, stats.std_dev_of_mean_percent
    )
}

pub(super) fn write_bands<W>(out: &mut W, bands: &StdDevBands) -> io::Result<()>
where
    W: Write,
{
    for (k, percent) in bands.within_percents() {
        writeln!(out, "\tWithin {k} SD {percent:.2}%")?;
    }
    writeln!(out, "\tOutside 3 SD {:.2}%", bands.outside_percent())
}

pub(super) fn write_percentiles<W>(out: &mut W, percentiles: &Percentiles) -> io::Result<()>
where
    W: Write,
{
    for (p, value) in percentiles.iter() {
        writeln!(out, "\t{p}th percentile {value}")?;
    }
    Ok(())
}
