//! Names of files and directories within the run directory and the sample storage.

/// Run metadata, produced by the sequencer: `run/RUN_PARAMETERS`.
pub const RUN_PARAMETERS: &'static str = "RunParameters.xml";
/// Library sheet, written by the user: `run/LIBRARY_SHEET`.
pub const LIBRARY_SHEET: &'static str = "SampleSheet.csv";
/// Sample sheet, ready for bcl2fastq, is written to `run/SAMPLE_SHEET`.
pub const SAMPLE_SHEET: &'static str = "SampleSheet_ready.csv";

/// Reads of a sample are copied to `samples/<sample>/READS_DIR/FASTQ_DIR`.
pub const READS_DIR: &'static str = "reads";
pub const FASTQ_DIR: &'static str = "fastq";
/// Readiness marker is stored as `samples/<sample>/<sample>READY_EXT`.
pub const READY_EXT: &'static str = ".ready";
/// Sample tree is first built in `samples/.<sample>STAGING_EXT`, and then renamed.
pub const STAGING_EXT: &'static str = ".staging";

/// Sample ID, assigned to reads that could not be matched to any sample.
pub const UNDETERMINED: &'static str = "Undetermined";
