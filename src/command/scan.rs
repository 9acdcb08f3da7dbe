//! List read files of each sample in a run directory.

use std::{
    io::{self, Write},
    path::PathBuf,
};
use colored::Colorize;
use crate::{
    err::{Error, add_path},
    config,
    illumina::{RunContext, SampleFiles, discover},
};

#[derive(Default)]
struct Args {
    run_dir: Option<PathBuf>,
}

fn print_help() {
    const KEY: usize = 16;
    const VAL: usize = 4;

    println!("{}", "List read files of each sample, without converting or copying anything.".yellow());
    println!("\n{} {} scan -r run_dir", "Usage:".bold(), super::PROGRAM);
    println!("\n{}", "Arguments:".bold());
    println!("    {:KEY$} {:VAL$}  Sequencing run directory [env. variable {}].",
        "-r, --run".green(), "DIR".yellow(), config::RUN_PATH_VAR.underline());
    println!("    {:KEY$} {:VAL$}  Show this help message.", "-h, --help".green(), super::flag());
}

fn parse_args(argv: &[String]) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();
    let mut parser = lexopt::Parser::from_args(argv);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('r') | Long("run") | Long("run-path") => args.run_dir = Some(parser.value()?.parse()?),
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            _ => Err(arg.unexpected())?,
        }
    }
    Ok(args)
}

/// Writes `sample<TAB>path` for each read file.
fn write_samples(out: &mut impl Write, samples: &SampleFiles) -> io::Result<()> {
    for (sample, files) in samples {
        for file in files {
            writeln!(out, "{}\t{}", sample, file.display())?;
        }
    }
    out.flush()
}

pub(super) fn run(argv: &[String]) -> Result<(), Error> {
    let args = parse_args(argv)?;
    let run_dir = config::arg_or_env(args.run_dir, config::RUN_PATH_VAR).ok_or_else(|| Error::InvalidInput(
        format!("Run directory is not provided (see -r/--run or environment variable {})", config::RUN_PATH_VAR)))?;
    let run = RunContext::resolve(run_dir)?;
    log::info!("Scanning {}", run);
    let samples = discover::find_sample_files(run.dir())?;
    log::info!("Found {} read files across {} samples", samples.n_files(), samples.len());
    write_samples(&mut io::stdout().lock(), &samples).map_err(add_path!(!))
}

#[cfg(test)]
mod tests {
    use std::fs;
    use super::*;

    #[test]
    fn tab_separated_output() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b_S2_L001_R1_001.fastq.gz", "a_S1_L001_R1_001.fastq.gz", "a_S1_L001_R2_001.fastq.gz"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        let samples = discover::find_sample_files(tmp.path()).unwrap();
        let mut out = Vec::new();
        write_samples(&mut out, &samples).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("a\t") && lines[0].ends_with("a_S1_L001_R1_001.fastq.gz"));
        assert!(lines[1].starts_with("a\t") && lines[1].ends_with("a_S1_L001_R2_001.fastq.gz"));
        assert!(lines[2].starts_with("b\t"));
    }
}
