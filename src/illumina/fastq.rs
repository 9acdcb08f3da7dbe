//! Illumina FASTQ filename convention:
//! `<sample>_S<number>_L<lane>_R<mate>_<chunk><suffix>.fastq.gz`,
//! for example `heart_1k_S1_L002_R2_001.fastq.gz`.

use std::path::Path;
use regex::Regex;

lazy_static::lazy_static! {
    /// Lanes 001-004, mates R1/R2, three-digit chunk followed by an optional non-whitespace suffix.
    /// Sample name is greedy, therefore it ends right before the last `_S<number>_L...` group.
    static ref FASTQ_NAME: Regex = Regex::new(concat!(
        r"^(?P<sample>.*)",
        r"_S(?P<number>[0-9]+)",
        r"_L(?P<lane>00[1-4])",
        r"_R(?P<mate>[12])",
        r"_(?P<chunk>[0-9]{3})(?P<suffix>\S*)",
        r"\.fastq\.gz$",
    )).unwrap();
}

/// Parsed Illumina FASTQ filename.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FastqName {
    pub sample: String,
    /// Sample number in the sample sheet (`S1` -> 1).
    pub number: u32,
    /// Lane 1-4.
    pub lane: u8,
    /// Mate 1 or 2.
    pub mate: u8,
    /// Chunk number (usually `001`).
    pub chunk: u16,
    pub suffix: String,
}

impl FastqName {
    /// Parses filename (without directories). Returns None if the name does not follow the convention.
    /// Empty sample names and names starting with `.` (including `.` and `..`) are rejected as well:
    /// hidden names under the sample storage are reserved for staging directories.
    pub fn parse(filename: &str) -> Option<Self> {
        let caps = FASTQ_NAME.captures(filename)?;
        let sample = &caps["sample"];
        if sample.is_empty() || sample.starts_with('.') {
            return None;
        }
        Some(Self {
            sample: caps["sample"].to_string(),
            number: caps["number"].parse().ok()?,
            lane: caps["lane"].parse().ok()?,
            mate: caps["mate"].parse().ok()?,
            chunk: caps["chunk"].parse().ok()?,
            suffix: caps["suffix"].to_string(),
        })
    }

    /// Parses the filename of the path. Returns None for non-UTF8 or non-matching names.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()?.to_str().and_then(Self::parse)
    }

    /// Reads that could not be assigned to any sample.
    pub fn is_undetermined(&self) -> bool {
        self.sample == crate::paths::UNDETERMINED
    }
}
