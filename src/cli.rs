use std::path::PathBuf;

use lazy_static::lazy_static;
use log::{debug, info};
use structopt::StructOpt;

use crate::error::{Result, ZeroGenError};
use crate::writer::{OutputFormat, DEFAULT_BUFFER_SIZE};

lazy_static! {
    static ref DEFAULT_BUFFER_SIZE_STR: String = DEFAULT_BUFFER_SIZE.to_string();
}

#[derive(StructOpt, Debug, Clone)]
#[structopt(
global_settings(& [structopt::clap::AppSettings::ColoredHelp, structopt::clap::AppSettings::DeriveDisplayOrder]),
name = "zg",
after_help = r#"EXAMPLES:
    zg out.csv 3                 # line,message then 1,0  2,00  3,000
    zg -F plain out.csv 100000   # same bytes, formatted by hand
    zg -m --stats out.csv 5000   # build every row first, then write and report
"#
)]
/// Generate a csv of rows "<line>,<line zeros>" for lines 1 through N.
pub struct CliCfg {
    #[structopt(name = "destination", parse(from_os_str))]
    /// File to create or truncate
    pub destination: PathBuf,

    #[structopt(name = "n_max")]
    /// Number of rows to generate
    ///
    /// Must be a non-negative integer.  Zero writes only the header line.
    pub n_max: usize,

    #[structopt(short = "F", long = "format", default_value = "csv", possible_values = & ["csv", "plain"])]
    /// How rows are turned into text
    ///
    /// csv uses the csv crate writer, plain formats each line by hand.  Output is identical.
    pub format: OutputFormat,

    #[structopt(short = "b", long = "buffer_size", parse(try_from_str = from_human_size), default_value(& DEFAULT_BUFFER_SIZE_STR))]
    /// Write buffer size in front of the file
    ///
    /// Can be greek notation: 64K = 64*1024 bytes
    pub buffer_size: usize,

    #[structopt(short = "m", long = "materialize")]
    /// Build the whole dataset in memory before writing
    pub materialize: bool,

    #[structopt(long = "stats")]
    /// Write stats after generating
    pub stats: bool,

    #[structopt(short = "v", parse(from_occurrences))]
    /// Verbosity - use more than one v for greater detail
    pub verbose: usize,
}

/// Validated run settings handed to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct GenCfg {
    pub destination: PathBuf,
    pub row_count: usize,
    pub format: OutputFormat,
    pub buffer_size: usize,
    pub materialize: bool,
    pub stats: bool,
    pub verbose: usize,
}

impl GenCfg {
    /// Defaults for everything but the two required values.
    pub fn new<P: Into<PathBuf>>(destination: P, row_count: usize) -> GenCfg {
        GenCfg {
            destination: destination.into(),
            row_count,
            format: OutputFormat::Csv,
            buffer_size: DEFAULT_BUFFER_SIZE,
            materialize: false,
            stats: false,
            verbose: 0,
        }
    }
}

impl CliCfg {
    pub fn into_gen_cfg(self) -> Result<GenCfg> {
        if self.destination.as_os_str().is_empty() {
            return Err(ZeroGenError::Argument("destination path is empty".to_string()));
        }
        if self.destination.is_dir() {
            return Err(ZeroGenError::Argument(format!(
                "destination \"{}\" is a directory",
                self.destination.display()
            )));
        }
        if self.verbose == 1 {
            info!("CLI options: {:?}", self);
        } else if self.verbose > 1 {
            debug!("CLI options: {:#?}", self);
        }
        Ok(GenCfg {
            destination: self.destination,
            row_count: self.n_max,
            format: self.format,
            buffer_size: self.buffer_size,
            materialize: self.materialize,
            stats: self.stats,
            verbose: self.verbose,
        })
    }
}

fn from_human_size(s: &str) -> Result<usize> {
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (number, postfix) = s.split_at(split);
    let postfix = postfix.to_ascii_lowercase();
    if number.is_empty() {
        return Err(ZeroGenError::Argument(format!("missing numeric portion in size, found only: \"{}\"", s)));
    }
    let num: usize = number
        .parse()
        .map_err(|e| ZeroGenError::Argument(format!("size \"{}\" not understood: {}", s, e)))?;
    let mult = match postfix.as_str() {
        "" | "b" => 1usize,
        "k" | "kb" => 1024,
        "m" | "mb" => 1024 * 1024,
        _ => return Err(ZeroGenError::Argument(format!("human size postfix \"{}\" not understood", postfix))),
    };
    match num.checked_mul(mult) {
        Some(0) => Err(ZeroGenError::Argument("buffer size must be greater than zero".to_string())),
        Some(v) => Ok(v),
        None => Err(ZeroGenError::Argument(format!("size \"{}\" is too large", s))),
    }
}
