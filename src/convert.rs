//! External tools, needed to convert NextSeq runs: library sheet translation and bcl2fastq.

use std::{
    path::{Path, PathBuf},
    process::{Command, Output},
    time::Instant,
};
use crate::{
    config::Config,
    err::{Error, Stage, add_path},
    ext,
    paths,
};

/// Number of threads, passed to bcl2fastq.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threads {
    pub processing: u16,
    pub loading: u16,
    pub writing: u16,
}

impl Default for Threads {
    fn default() -> Self {
        Self {
            processing: 8,
            loading: 4,
            writing: 4,
        }
    }
}

/// Runs command until completion, capturing stdout and stderr.
/// Returns error if the process could not be started or finished unsuccessfully.
fn run_stage(stage: Stage, mut command: Command) -> Result<Output, Error> {
    log::debug!("    {}", ext::fmt::command(&command));
    let start = Instant::now();
    let output = command.output().map_err(add_path!(command.get_program()))?;
    log::debug!("    Finished in {}", ext::fmt::Duration(start.elapsed()));
    if output.status.success() {
        Ok(output)
    } else {
        Err(Error::Subprocess(stage, output))
    }
}

/// Path to the converted sample sheet within the run directory.
pub fn sample_sheet_path(run_dir: &Path) -> PathBuf {
    run_dir.join(paths::SAMPLE_SHEET)
}

/// Translates library sheet (`SampleSheet.csv`) into a sample sheet, suitable for bcl2fastq.
pub fn translate_library_sheet(config: &Config) -> Result<PathBuf, Error> {
    let run_dir = config.run.dir();
    let out_sheet = sample_sheet_path(run_dir);
    log::info!("Converting library sheet to sample sheet");
    let mut command = Command::new(&config.translator);
    command
        .arg("--run_parameters").arg(run_dir.join(paths::RUN_PARAMETERS))
        .arg("--library_sheet").arg(run_dir.join(paths::LIBRARY_SHEET))
        .arg("--output").arg(&out_sheet);
    run_stage(Stage::SampleSheet, command)?;
    Ok(out_sheet)
}

/// Converts BCL files in the run directory into FASTQ files.
/// Output location is determined by bcl2fastq (usually `Data/Intensities/BaseCalls`).
pub fn convert_bcl(config: &Config, sample_sheet: &Path) -> Result<(), Error> {
    let threads = &config.threads;
    log::info!("Running bcl2fastq in {}+{}+{} threads", threads.processing, threads.loading, threads.writing);
    let mut command = Command::new(&config.bcl2fastq);
    command
        .arg("--runfolder-dir").arg(config.run.dir())
        .arg("--sample-sheet").arg(sample_sheet)
        .args(&[
            "--processing-threads", &threads.processing.to_string(),
            "--loading-threads", &threads.loading.to_string(),
            "--writing-threads", &threads.writing.to_string(),
        ]);
    let output = run_stage(Stage::Conversion, command)?;
    // bcl2fastq reports its progress to stderr, last lines contain the summary.
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<_> = stderr.lines().collect();
    for line in &lines[lines.len().saturating_sub(3)..] {
        log::trace!("    [bcl2fastq] {}", line);
    }
    Ok(())
}

/// Performs both conversion stages if the run requires it.
/// Returns true if the conversion was performed.
pub fn convert_if_needed(config: &Config) -> Result<bool, Error> {
    if !config.run.kind().needs_conversion() {
        log::info!("{}: reads were produced by the sequencer, skipping conversion", config.run);
        return Ok(false);
    }
    let sample_sheet = translate_library_sheet(config)?;
    convert_bcl(config, &sample_sheet)?;
    Ok(true)
}

#[cfg(all(test, unix))]
pub(crate) mod tests {
    use std::{
        fs,
        os::unix::fs::PermissionsExt,
    };
    use crate::{
        illumina::RunContext,
        test_util::TestRun,
    };
    use super::*;

    /// Writes an executable shell script.
    pub(crate) fn write_script(path: &Path, body: &str) {
        fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn both_stages_in_order() {
        let test = TestRun::new("nextseq_01/XYZ123");
        let config = test.config();
        assert!(convert_if_needed(&config).unwrap());
        let log = test.tool_log();
        assert_eq!(log.len(), 2);
        assert!(log[0].starts_with("translator --run_parameters"));
        assert!(log[0].ends_with(&format!("--output {}", test.run_dir.join(paths::SAMPLE_SHEET).display())));
        assert!(log[1].starts_with("bcl2fastq --runfolder-dir"));
        assert!(log[1].ends_with("--processing-threads 8 --loading-threads 4 --writing-threads 4"));
    }

    #[test]
    fn miseq_skips_conversion() {
        let test = TestRun::new("miseq_02/ABC789");
        assert!(!convert_if_needed(&test.config()).unwrap());
        assert!(test.tool_log().is_empty());
    }

    #[test]
    fn translator_failure_stops() {
        let test = TestRun::new("nextseq_01/XYZ123");
        write_script(&test.translator, "echo 'RunParameters.xml not found' >&2\nexit 3");
        match convert_if_needed(&test.config()) {
            Err(e @ Error::Subprocess(Stage::SampleSheet, _)) => {
                assert_eq!(e.exit_code(), crate::err::exit::SAMPLE_SHEET);
                assert!(e.display().contains("RunParameters.xml not found"));
                assert!(e.display().contains("exit code 3"));
            }
            other => panic!("Unexpected result {:?}", other),
        }
        assert!(test.tool_log().is_empty());
    }

    #[test]
    fn converter_failure() {
        let test = TestRun::new("nextseq_01/XYZ123");
        write_script(&test.bcl2fastq, "echo 'bcl missing' >&2\nexit 1");
        let e = convert_if_needed(&test.config()).unwrap_err();
        assert_eq!(e.exit_code(), crate::err::exit::CONVERSION);
        assert_eq!(test.tool_log().len(), 1);
    }

    #[test]
    fn missing_executable() {
        let test = TestRun::new("nextseq_01/XYZ123");
        let mut config = test.config();
        config.bcl2fastq = test.tmp.path().join("no_such_tool");
        assert!(matches!(convert_if_needed(&config), Err(Error::Io(..))));
        config.run = RunContext::resolve(test.tmp.path().join("miseq")).unwrap();
        assert!(!convert_if_needed(&config).unwrap());
    }
}
