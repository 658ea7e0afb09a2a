use std::time::Instant;

use cpu_time::ProcessTime;
use log::{info, LevelFilter};
use structopt::StructOpt;

mod cli;
mod error;
mod gen;
mod stats;
mod writer;

use cli::CliCfg;
use error::Result;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", &err);
        std::process::exit(1);
    }
}

fn init_logging(verbose: usize) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run() -> Result<()> {
    let start_f = Instant::now();
    let startcpu = ProcessTime::now();

    let cli = CliCfg::from_args();
    init_logging(cli.verbose);
    let cfg = cli.into_gen_cfg()?;

    let mut stats = writer::generate_to_path(&cfg)?;
    stats.elapsed = start_f.elapsed();
    stats.cpu = startcpu.elapsed();

    info!("done in {:.3} secs, {:.0} rows/sec", stats.elapsed.as_secs_f64(), stats.rows_per_second());
    if cfg.stats {
        eprintln!("{}", stats);
    }
    Ok(())
}
