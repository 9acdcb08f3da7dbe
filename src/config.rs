//! Configuration of a single invocation, constructed once and passed to every stage.

use std::{
    env,
    path::PathBuf,
};
use crate::{
    err::{Error, validate_param, error},
    convert::Threads,
    illumina::RunContext,
    ext,
};

/// Environment variable with the run directory, used if the path is not provided via arguments.
pub const RUN_PATH_VAR: &'static str = "run_path";
/// Environment variable with the sample storage root.
pub const SAMPLE_PATH_VAR: &'static str = "sample_path";

/// Default executable, translating library sheets into sample sheets.
pub const TRANSLATOR: &'static str = "library_to_samplesheet";
/// Default BCL -> FASTQ converter.
pub const BCL2FASTQ: &'static str = "bcl2fastq";

/// Returns the argument if it is set, otherwise looks up the environment variable.
/// Empty environment variables are treated as unset.
pub fn arg_or_env(arg: Option<PathBuf>, var: &str) -> Option<PathBuf> {
    arg.or_else(|| env::var_os(var).filter(|s| !s.is_empty()).map(PathBuf::from))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub run: RunContext,
    /// Sample storage root, reads are placed to `sample_root/<sample>/reads/fastq`.
    pub sample_root: PathBuf,
    pub translator: PathBuf,
    pub bcl2fastq: PathBuf,
    pub threads: Threads,
}

impl Config {
    /// Creates configuration from the run directory and the sample storage root, both are required.
    /// External executables are searched in PATH only if the run requires conversion.
    pub fn new(
        run_dir: Option<PathBuf>,
        sample_root: Option<PathBuf>,
        translator: PathBuf,
        bcl2fastq: PathBuf,
        threads: Threads,
    ) -> Result<Self, Error>
    {
        let run_dir = run_dir.ok_or_else(|| error!(InvalidInput,
            "Run directory is not provided (see -r/--run or environment variable {})", RUN_PATH_VAR))?;
        let sample_root = sample_root.ok_or_else(|| error!(InvalidInput,
            "Sample storage root is not provided (see -s/--samples or environment variable {})", SAMPLE_PATH_VAR))?;
        validate_param!(threads.processing > 0 && threads.loading > 0 && threads.writing > 0,
            "Number of threads must be positive");
        let mut config = Self {
            run: RunContext::resolve(run_dir)?,
            sample_root,
            translator,
            bcl2fastq,
            threads,
        };
        if config.run.kind().needs_conversion() {
            config.translator = ext::sys::find_exe(&config.translator)?;
            config.bcl2fastq = ext::sys::find_exe(&config.bcl2fastq)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_paths() {
        let new = |run: Option<&str>, samples: Option<&str>| Config::new(
            run.map(PathBuf::from), samples.map(PathBuf::from),
            PathBuf::from(TRANSLATOR), PathBuf::from(BCL2FASTQ), Threads::default());
        let e = new(None, Some("/samples")).unwrap_err();
        assert_eq!(e.exit_code(), crate::err::exit::CONFIG);
        assert!(e.display().contains(RUN_PATH_VAR));
        let e = new(Some("/runs/miseq/ABC"), None).unwrap_err();
        assert!(e.display().contains(SAMPLE_PATH_VAR));

        let config = new(Some("/runs/miseq/ABC"), Some("/samples")).unwrap();
        assert_eq!(config.run.id(), "ABC");
        assert_eq!(config.translator, PathBuf::from(TRANSLATOR));
    }

    #[test]
    fn nextseq_requires_executables() {
        let e = Config::new(Some(PathBuf::from("/runs/nextseq/XYZ")), Some(PathBuf::from("/samples")),
            PathBuf::from("surely_absent_translator_exe"), PathBuf::from(BCL2FASTQ), Threads::default())
            .unwrap_err();
        assert!(matches!(e, Error::NoExec(_)));
        assert_eq!(e.exit_code(), crate::err::exit::CONFIG);
    }

    #[test]
    fn argument_has_priority() {
        let path = arg_or_env(Some(PathBuf::from("/a")), "READSTAGE_SURELY_UNSET_VARIABLE");
        assert_eq!(path, Some(PathBuf::from("/a")));
        assert_eq!(arg_or_env(None, "READSTAGE_SURELY_UNSET_VARIABLE"), None);
    }
}
