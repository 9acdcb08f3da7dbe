//! Illumina run directories and FASTQ files within them.

pub mod fastq;
pub mod discover;

use std::{
    fmt,
    path::{Path, PathBuf},
};
use crate::{
    err::{Error, error},
    ext,
};

pub use fastq::FastqName;
pub use discover::SampleFiles;

/// Sequencer model, that produced the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    /// NextSeq runs contain BCL files, which need to be converted to FASTQ.
    NextSeq,
    /// MiSeq runs already contain FASTQ files.
    MiSeq,
}

impl RunKind {
    /// Run path must contain this substring (case-sensitive) to be considered a NextSeq run.
    pub const NEXTSEQ_MARKER: &'static str = "nextseq";

    /// Determines run kind from the full run path.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().contains(Self::NEXTSEQ_MARKER) {
            Self::NextSeq
        } else {
            Self::MiSeq
        }
    }

    /// Does the run need BCL -> FASTQ conversion?
    pub fn needs_conversion(self) -> bool {
        self == Self::NextSeq
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::NextSeq => "NextSeq",
            Self::MiSeq => "MiSeq",
        })
    }
}

/// Run directory together with its ID and kind.
#[derive(Debug, Clone)]
pub struct RunContext {
    dir: PathBuf,
    id: String,
    kind: RunKind,
}

impl RunContext {
    /// Derives run ID (last path component) and run kind from the run directory path. Does not access the disk.
    pub fn resolve(dir: PathBuf) -> Result<Self, Error> {
        let id = dir.file_name()
            .ok_or_else(|| error!(InvalidInput, "Cannot get run ID from run path {}", ext::fmt::path(&dir)))?
            .to_string_lossy().into_owned();
        let kind = RunKind::from_path(&dir);
        Ok(Self { dir, id, kind })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RunKind {
        self.kind
    }
}

impl fmt::Display for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} run {}", self.kind, self.id)
    }
}
