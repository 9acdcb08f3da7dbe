//! Convert run, if needed, and distribute reads into sample directories.

use std::{
    path::PathBuf,
    time::Instant,
};
use colored::Colorize;
use const_format::{str_repeat, concatcp};
use crate::{
    err::{Error, exit},
    config::{self, Config},
    convert::{self, Threads},
    distrib::{self, Report},
    illumina::discover,
    ext,
};

struct Args {
    run_dir: Option<PathBuf>,
    sample_root: Option<PathBuf>,
    translator: PathBuf,
    bcl2fastq: PathBuf,
    threads: Threads,
    verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            run_dir: None,
            sample_root: None,
            translator: PathBuf::from(config::TRANSLATOR),
            bcl2fastq: PathBuf::from(config::BCL2FASTQ),
            threads: Threads::default(),
            verbose: false,
        }
    }
}

impl Args {
    /// Fills missing paths from the environment and converts arguments into configuration.
    fn into_config(self) -> Result<Config, Error> {
        Config::new(
            config::arg_or_env(self.run_dir, config::RUN_PATH_VAR),
            config::arg_or_env(self.sample_root, config::SAMPLE_PATH_VAR),
            self.translator,
            self.bcl2fastq,
            self.threads,
        )
    }
}

fn print_help() {
    const KEY: usize = 22;
    const VAL: usize = 4;
    const EMPTY: &'static str = str_repeat!(" ", KEY + VAL + 5);

    let defaults = Args::default();
    println!("{}", "Convert sequencing run and place reads into sample directories.".yellow());

    println!("\n{} {} run -r run_dir -s samples_dir [arguments]",
        "Usage:".bold(), super::PROGRAM);

    println!("\n{}", "Input/output arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Sequencing run directory [env. variable {}].\n\
        {EMPTY}  Runs with {} in the path are converted with bcl2fastq.",
        "-r, --run".green(), "DIR".yellow(), config::RUN_PATH_VAR.underline(),
        crate::illumina::RunKind::NEXTSEQ_MARKER.underline());
    println!("    {:KEY$} {:VAL$}  Sample storage root [env. variable {}].\n\
        {EMPTY}  Reads are copied to {}.",
        "-s, --samples".green(), "DIR".yellow(), config::SAMPLE_PATH_VAR.underline(),
        concatcp!("DIR/<sample>/", crate::paths::READS_DIR, "/", crate::paths::FASTQ_DIR).underline());

    println!("\n{}", "Conversion arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Library sheet translator [{}].",
        "    --translator".green(), "EXE".yellow(), super::fmt_def(defaults.translator.display()));
    println!("    {:KEY$} {:VAL$}  Bcl2fastq executable [{}].",
        "    --bcl2fastq".green(), "EXE".yellow(), super::fmt_def(defaults.bcl2fastq.display()));
    println!("    {:KEY$} {:VAL$}  Bcl2fastq processing threads [{}].",
        "    --processing-threads".green(), "INT".yellow(), super::fmt_def(defaults.threads.processing));
    println!("    {:KEY$} {:VAL$}  Bcl2fastq loading threads [{}].",
        "    --loading-threads".green(), "INT".yellow(), super::fmt_def(defaults.threads.loading));
    println!("    {:KEY$} {:VAL$}  Bcl2fastq writing threads [{}].",
        "    --writing-threads".green(), "INT".yellow(), super::fmt_def(defaults.threads.writing));

    println!("\n{}", "Other arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Verbose output.", "-v, --verbose".green(), super::flag());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), super::flag());
    println!("    {:KEY$} {:VAL$}  Show version.", "-V, --version".green(), super::flag());

    println!("\n{}", "Exit codes:".bold());
    println!("    {}  success, {}  sample IDs used before, {}  invalid arguments,",
        exit::SUCCESS, exit::COLLISIONS, exit::CONFIG);
    println!("    {}  sample sheet translation failed, {}  bcl2fastq failed, {}  other error.",
        exit::SAMPLE_SHEET, exit::CONVERSION, exit::RUNTIME);
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('r') | Long("run") | Long("run-path") => args.run_dir = Some(parser.value()?.parse()?),
            Short('s') | Long("samples") | Long("sample-path") => args.sample_root = Some(parser.value()?.parse()?),

            Long("translator") => args.translator = parser.value()?.parse()?,
            Long("bcl2fastq") => args.bcl2fastq = parser.value()?.parse()?,
            Long("processing-threads") => args.threads.processing = parser.value()?.parse()?,
            Long("loading-threads") => args.threads.loading = parser.value()?.parse()?,
            Long("writing-threads") => args.threads.writing = parser.value()?.parse()?,

            Short('v') | Long("verbose") => args.verbose = true,
            Short('V') | Long("version") => {
                super::print_version();
                std::process::exit(exit::SUCCESS);
            }
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(exit::SUCCESS);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

/// Runs all stages in order: conversion (NextSeq only), read discovery and distribution.
pub(crate) fn pipeline(config: &Config) -> Result<Report, Error> {
    convert::convert_if_needed(config)?;

    log::info!("Searching for read files in {}", ext::fmt::path(config.run.dir()));
    let samples = discover::find_sample_files(config.run.dir())?;
    log::info!("Found {} read files across {} samples", samples.n_files(), samples.len());

    log::info!("Placing reads into {}", ext::fmt::path(&config.sample_root));
    distrib::distribute(&samples, &config.sample_root)
}

pub(super) fn run(argv: &[String]) -> Result<i32, Error> {
    let args = parse_args(argv)?;
    if args.verbose {
        log::set_max_level(log::LevelFilter::Trace);
    }
    let config = args.into_config()?;
    let timer = Instant::now();
    log::info!("Processing {} ({})", config.run, ext::fmt::path(config.run.dir()));

    let report = pipeline(&config)?;
    log::info!("Placed {} samples in {}", report.placed.len(), ext::fmt::Duration(timer.elapsed()));
    match report.collision_message() {
        Some(msg) => {
            println!("{}", msg);
            Ok(exit::COLLISIONS)
        }
        None => Ok(exit::SUCCESS),
    }
}
