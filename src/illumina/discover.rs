//! Recursive search for FASTQ files in the run directory and grouping them by sample.

use std::{
    io,
    collections::{BTreeMap, btree_map},
    path::{Path, PathBuf},
};
use crate::{
    err::{Error, error},
    ext,
};
use super::FastqName;

/// Read files of each sample, ordered by sample name. Files within a sample are sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SampleFiles {
    samples: BTreeMap<String, Vec<PathBuf>>,
}

impl SampleFiles {
    /// Adds a file to the sample, unless the sample is `Undetermined`.
    /// Returns true if the file was added.
    pub fn insert(&mut self, name: FastqName, path: PathBuf) -> bool {
        if name.is_undetermined() {
            log::trace!("    Ignoring undetermined reads {}", ext::fmt::path(&path));
            return false;
        }
        self.samples.entry(name.sample).or_default().push(path);
        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total number of files across all samples.
    pub fn n_files(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    pub fn get(&self, sample: &str) -> Option<&[PathBuf]> {
        self.samples.get(sample).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<PathBuf>> {
        self.samples.iter()
    }

    /// Sorts files within each sample and checks that no two files of the same sample share a filename,
    /// as they would overwrite each other in the sample directory.
    fn finalize(&mut self) -> Result<(), Error> {
        for (sample, files) in self.samples.iter_mut() {
            files.sort();
            let mut names: Vec<_> = files.iter().filter_map(|f| f.file_name()).collect();
            names.sort();
            if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
                let dupl: Vec<_> = files.iter().filter(|f| f.file_name() == Some(w[0]))
                    .map(|f| ext::fmt::path(f)).collect();
                return Err(error!(InvalidData, "Sample {} has several files with the same name: {}",
                    sample, dupl.join(", ")));
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SampleFiles {
    type Item = (&'a String, &'a Vec<PathBuf>);
    type IntoIter = btree_map::Iter<'a, String, Vec<PathBuf>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Glob pattern, matching all gzip files in the run directory and all its subdirectories.
fn gz_pattern(run_dir: &Path) -> Result<String, Error> {
    let dir = run_dir.to_str().ok_or_else(||
        error!(InvalidInput, "Run path {} is not a valid UTF-8", ext::fmt::path(run_dir)))?;
    Ok(format!("{}/**/*.gz", glob::Pattern::escape(dir.trim_end_matches('/'))))
}

/// Finds all FASTQ files under the run directory (recursively) and groups them by sample.
/// Files that do not follow Illumina naming convention are skipped, `Undetermined` reads are ignored.
pub fn find_sample_files(run_dir: &Path) -> Result<SampleFiles, Error> {
    if !run_dir.is_dir() {
        return Err(error!(InvalidInput, "Run directory {} does not exist", ext::fmt::path(run_dir)));
    }
    let pattern = gz_pattern(run_dir)?;
    let entries = glob::glob(&pattern)
        .map_err(|e| error!(InvalidInput, "Cannot search for read files ({}): {}", pattern, e))?;

    let mut res = SampleFiles::default();
    let mut skipped = 0;
    let mut undetermined = 0;
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_owned();
            Error::Io(io::Error::from(e), vec![path])
        })?;
        if !path.is_file() {
            continue;
        }
        match FastqName::from_path(&path) {
            Some(name) => if !res.insert(name, path) {
                undetermined += 1;
            }
            None => {
                log::trace!("    Skipping {}", ext::fmt::path(&path));
                skipped += 1;
            }
        }
    }
    res.finalize()?;
    log::debug!("    Skipped {} non-FASTQ files and {} undetermined FASTQ files", skipped, undetermined);
    Ok(res)
}
