//! Temporary run directories and fake external tools for tests.

use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;
use crate::{
    config::Config,
    convert::Threads,
    illumina::RunContext,
};

pub(crate) struct TestRun {
    pub tmp: TempDir,
    pub run_dir: PathBuf,
    pub samples_dir: PathBuf,
    pub translator: PathBuf,
    pub bcl2fastq: PathBuf,
    log_file: PathBuf,
}

impl TestRun {
    /// Creates `<tmp>/<run>` and `<tmp>/samples`, as well as fake tools that record their calls.
    pub fn new(run: &str) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let run_dir = tmp.path().join(run);
        let samples_dir = tmp.path().join("samples");
        fs::create_dir_all(&run_dir).unwrap();
        fs::create_dir_all(&samples_dir).unwrap();
        let log_file = tmp.path().join("calls.log");
        let res = Self {
            translator: tmp.path().join("translator"),
            bcl2fastq: tmp.path().join("bcl2fastq"),
            tmp, run_dir, samples_dir, log_file,
        };
        #[cfg(unix)]
        {
            res.write_tool(&res.translator, "");
            res.write_tool(&res.bcl2fastq, "");
        }
        res
    }

    /// Fake tool appends its name and arguments to the log, and then executes `body`.
    #[cfg(unix)]
    fn write_tool(&self, path: &Path, body: &str) {
        crate::convert::tests::write_script(path,
            &format!("echo \"$(basename \"$0\") $*\" >> '{}'\n{}", self.log_file.display(), body));
    }

    /// Replaces bcl2fastq with a tool that creates empty files in `Data/Intensities/BaseCalls/Project`.
    #[cfg(unix)]
    pub fn converter_produces(&self, files: &[&str]) {
        let out_dir = self.run_dir.join("Data/Intensities/BaseCalls/Project");
        let mut body = format!("mkdir -p '{}'\n", out_dir.display());
        for file in files {
            body.push_str(&format!("echo {} > '{}'\n", file, out_dir.join(file).display()));
        }
        self.write_tool(&self.bcl2fastq, &body);
    }

    /// Creates files (relative to the run directory) with arbitrary content.
    pub fn add_run_files(&self, files: &[&str]) {
        for file in files {
            let path = self.run_dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, file.as_bytes()).unwrap();
        }
    }

    /// Calls to the fake tools: `<tool name> <args>`.
    pub fn tool_log(&self) -> Vec<String> {
        match fs::read_to_string(&self.log_file) {
            Ok(s) => s.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn config(&self) -> Config {
        Config {
            run: RunContext::resolve(self.run_dir.clone()).unwrap(),
            sample_root: self.samples_dir.clone(),
            translator: self.translator.clone(),
            bcl2fastq: self.bcl2fastq.clone(),
            threads: Threads::default(),
        }
    }
}
