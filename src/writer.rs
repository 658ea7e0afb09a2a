use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;

use log::{debug, info};

use crate::cli::GenCfg;
use crate::error::{Result, ZeroGenError};
use crate::gen::{Dataset, Row, RowGenerator, HEADER};
use crate::stats::WriteStats;

/// Capacity of the buffer in front of the destination file.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

const PROGRESS_EVERY: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// csv crate writer fed through serde
    Csv,
    /// `write!` straight to the sink
    Plain,
}

impl FromStr for OutputFormat {
    type Err = ZeroGenError;

    fn from_str(s: &str) -> Result<OutputFormat> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err(ZeroGenError::Argument(format!("output format \"{}\" not understood, use csv or plain", s))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Plain => f.write_str("plain"),
        }
    }
}

/// Passes writes through while counting the bytes the inner writer accepted.
struct CountingWriter<W> {
    inner: W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Write the header and then every row, in order, and flush the sink.
///
/// Nothing is retried: the first failure is returned and whatever already
/// reached the sink stays there.
pub fn write_rows<W, I>(sink: W, rows: I, format: OutputFormat) -> Result<WriteStats>
where
    W: Write,
    I: IntoIterator<Item = Row>,
{
    let mut counter = CountingWriter { inner: sink, count: 0 };
    let rows_written = match format {
        OutputFormat::Csv => write_csv(&mut counter, rows)?,
        OutputFormat::Plain => write_plain(&mut counter, rows)?,
    };
    Ok(WriteStats {
        rows_written,
        bytes_written: counter.count,
        ..WriteStats::default()
    })
}

fn write_csv<W: Write, I: IntoIterator<Item = Row>>(sink: W, rows: I) -> Result<u64> {
    // header is written by hand so that an empty dataset still gets one
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
    wtr.write_record(&HEADER)?;

    let mut count = 0u64;
    for row in rows {
        wtr.serialize(&row)?;
        count += 1;
        log_progress(count);
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| ZeroGenError::Io(e.into_error()))?;
    Ok(count)
}

fn write_plain<W: Write, I: IntoIterator<Item = Row>>(mut sink: W, rows: I) -> Result<u64> {
    writeln!(sink, "{},{}", HEADER[0], HEADER[1])?;

    let mut count = 0u64;
    for row in rows {
        writeln!(sink, "{},{}", row.line, row.message)?;
        count += 1;
        log_progress(count);
    }
    sink.flush()?;
    Ok(count)
}

fn log_progress(count: u64) {
    if count % PROGRESS_EVERY == 0 {
        debug!("written {} rows", count);
    }
}

/// Create (or truncate) the destination and fill it with `row_count` rows.
///
/// The file is closed when this returns, on success or failure.  A failure
/// part way through leaves a truncated file behind.
pub fn generate_to_path(cfg: &GenCfg) -> Result<WriteStats> {
    let generator = RowGenerator::new(cfg.row_count);
    if generator.is_empty() {
        info!("no rows requested, only the header will be written");
    }

    let dataset = if cfg.materialize {
        let ds = Dataset::materialize(&generator)?;
        debug!("materialized {} rows before writing", ds.len());
        Some(ds)
    } else {
        None
    };

    let file = File::create(&cfg.destination).map_err(|source| ZeroGenError::Open {
        path: cfg.destination.clone(),
        source,
    })?;
    let sink = BufWriter::with_capacity(cfg.buffer_size, file);

    info!(
        "writing {} rows to \"{}\" as {}",
        generator.len(),
        cfg.destination.display(),
        cfg.format
    );
    let stats = match dataset {
        Some(ds) => write_rows(sink, ds, cfg.format)?,
        None => write_rows(sink, generator.rows(), cfg.format)?,
    };
    info!("wrote {} rows, {} bytes", stats.rows_written, stats.bytes_written);
    Ok(stats)
}
