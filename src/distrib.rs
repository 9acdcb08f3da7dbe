//! Placing reads into per-sample directories.
//!
//! For each new sample, the tree
//! ```text
//! <sample_root>/<sample>/reads/fastq/<read files>
//! <sample_root>/<sample>/<sample>.ready
//! ```
//! is first built in `<sample_root>/.<sample>.staging`, and then renamed into place.
//! Consequently, a sample directory either does not exist, or contains all reads and the readiness marker.

use std::{
    fs,
    path::{Path, PathBuf},
};
use crate::{
    err::{Error, add_path},
    ext,
    illumina::SampleFiles,
    paths,
};

/// Outcome of the distribution.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Samples that were successfully placed.
    pub placed: Vec<String>,
    /// Samples with previously used IDs. Their reads are left in the run directory.
    pub collisions: Vec<String>,
}

impl Report {
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Message, listing sample IDs that were used before (sorted).
    /// Returns None if there are no collisions.
    pub fn collision_message(&self) -> Option<String> {
        if self.collisions.is_empty() {
            return None;
        }
        let mut ids = self.collisions.clone();
        ids.sort();
        Some(format!("Run contains samples with previously used IDs:\n{}\nReads from these are left in run path.",
            ids.join("\n")))
    }
}

/// Final sample directory: `<sample_root>/<sample>`.
pub fn sample_dir(sample_root: &Path, sample: &str) -> PathBuf {
    sample_root.join(sample)
}

/// Temporary directory, where the sample tree is built: `<sample_root>/.<sample>.staging`.
fn staging_dir(sample_root: &Path, sample: &str) -> PathBuf {
    sample_root.join(format!(".{}{}", sample, paths::STAGING_EXT))
}

/// Directory `<name>` with its own readiness marker `<name>/<name>.ready` is a complete sample.
fn is_placed_sample(dir: &Path) -> bool {
    match dir.file_name() {
        Some(name) => ext::sys::append_path(&dir.join(name), paths::READY_EXT).exists(),
        None => false,
    }
}

/// Builds the whole sample tree within `dir`.
fn build_sample_tree(dir: &Path, sample: &str, files: &[PathBuf]) -> Result<(), Error> {
    let fastq_dir = dir.join(paths::READS_DIR).join(paths::FASTQ_DIR);
    fs::create_dir_all(&fastq_dir).map_err(add_path!(fastq_dir))?;
    for file in files {
        let dest = ext::sys::copy_into(file, &fastq_dir)?;
        log::trace!("        {} -> {}", ext::fmt::path(file), ext::fmt::path(&dest));
    }
    let marker = ext::sys::append_path(&dir.join(sample), paths::READY_EXT);
    ext::sys::touch(&marker).map_err(add_path!(marker))
}

/// Places one sample. Returns false if the sample directory already exists.
fn place_sample(sample_root: &Path, sample: &str, files: &[PathBuf]) -> Result<bool, Error> {
    let dest = sample_dir(sample_root, sample);
    if dest.exists() {
        return Ok(false);
    }

    let staging = staging_dir(sample_root, sample);
    if is_placed_sample(&staging) {
        log::warn!("    {} is a sample directory, not removing it", ext::fmt::path(&staging));
        return Ok(false);
    }
    if ext::sys::remove_dir_if_exists(&staging).map_err(add_path!(staging))? {
        log::warn!("    Removed incomplete sample directory {}", ext::fmt::path(&staging));
    }
    build_sample_tree(&staging, sample, files)?;

    if dest.exists() {
        log::warn!("    Sample directory {} appeared during copying", ext::fmt::path(&dest));
        ext::sys::remove_dir_if_exists(&staging).map_err(add_path!(staging))?;
        return Ok(false);
    }
    if let Err(e) = fs::rename(&staging, &dest) {
        // Destination could be created by someone else.
        if dest.exists() {
            ext::sys::remove_dir_if_exists(&staging).map_err(add_path!(staging))?;
            return Ok(false);
        }
        return Err(Error::Io(e, vec![staging, dest]));
    }
    Ok(true)
}

/// Copies reads of all samples into their directories under `sample_root`.
/// Samples, whose directories already exist, are not modified and are listed as collisions.
pub fn distribute(samples: &SampleFiles, sample_root: &Path) -> Result<Report, Error> {
    fs::create_dir_all(sample_root).map_err(add_path!(sample_root))?;
    let mut report = Report::default();
    for (sample, files) in samples {
        if place_sample(sample_root, sample, files)? {
            log::debug!("    {}: placed {} files", sample, files.len());
            report.placed.push(sample.clone());
        } else {
            log::warn!("    {}: sample ID was used before, leaving reads in the run directory", sample);
            report.collisions.push(sample.clone());
        }
    }
    report.collisions.sort();
    Ok(report)
}
