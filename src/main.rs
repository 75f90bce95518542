use clap::AppSettings;
use rom_patcher::{runner, Error};
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use tracing::{debug, error, Level};

#[derive(Debug, StructOpt)]
#[structopt(name = "rom-patcher", setting = AppSettings::ColoredHelp)]
struct Options {
    /// More output (-v debug, -vv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
    /// Only warnings and errors
    #[structopt(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Patch an existing output file instead of starting from a fresh copy
    #[structopt(long)]
    keep_output: bool,
    /// Write a JSON report of the run
    #[structopt(long, value_name = "REPORT", parse(from_os_str))]
    json: Option<PathBuf>,
    #[structopt(index = 1, required = true, name = "INPUT", parse(from_os_str))]
    input: PathBuf,
    #[structopt(index = 2, required = true, name = "PATCH", parse(from_os_str))]
    patch: PathBuf,
    #[structopt(index = 3, required = true, name = "OUTPUT", parse(from_os_str))]
    output: PathBuf,
}

impl Options {
    fn level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn execute(opt: &Options) -> Result<(), Error> {
    runner::check_paths(&opt.input, &opt.patch, &opt.output)?;
    if !opt.keep_output {
        runner::remove_stale_output(&opt.output)?;
    }

    let report = runner::run(&opt.input, &opt.patch, &opt.output)?;

    if let Some(path) = &opt.json {
        runner::write_report(&report, path)?;
    }
    Ok(())
}

fn main() {
    let opt = Options::from_args();

    tracing_subscriber::fmt()
        .with_max_level(opt.level())
        .with_target(false)
        .without_time()
        .init();
    debug!(?opt, "options");

    if let Err(err) = execute(&opt) {
        error!("{}", err);
        process::exit(err.exit_code());
    }
}
