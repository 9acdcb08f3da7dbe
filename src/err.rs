use std::{
    io,
    fmt::Write,
    path::PathBuf,
    process::Output,
};
use colored::Colorize;
use crate::ext;

/// External stage, executed as a subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Library sheet to sample sheet translation.
    SampleSheet,
    /// BCL to FASTQ conversion.
    Conversion,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Self::SampleSheet => "Library to sample sheet translation",
            Self::Conversion => "Bcl2fastq conversion",
        }
    }
}

/// Process exit codes.
pub mod exit {
    /// All samples were placed.
    pub const SUCCESS: i32 = 0;
    /// Pipeline finished, but some sample IDs were used before.
    pub const COLLISIONS: i32 = 1;
    /// Invalid or missing arguments, executables not found.
    pub const CONFIG: i32 = 2;
    /// Library sheet translation failed.
    pub const SAMPLE_SHEET: i32 = 3;
    /// Bcl2fastq failed.
    pub const CONVERSION: i32 = 4;
    /// Any other runtime error.
    pub const RUNTIME: i32 = 5;
}

/// General enum, representing possible errors.
#[derive(Debug)]
pub enum Error {
    Io(io::Error, Vec<PathBuf>),
    /// Error, produced by an argument parser.
    Lexopt(lexopt::Error),
    /// Executable not found.
    NoExec(PathBuf),
    /// External stage finished with non-zero exit status.
    Subprocess(Stage, Output),
    InvalidInput(String),
    InvalidData(String),
}

impl From<lexopt::Error> for Error {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}

impl Error {
    /// Format error message.
    pub fn display(&self) -> String {
        let mut s = String::new();
        match self {
            Self::Io(e, files) => {
                write!(s, "{} in relation to ", "Input/Output error".red()).unwrap();
                if files.is_empty() {
                    write!(s, "unnamed streams").unwrap();
                } else {
                    write!(s, "{}", files.iter().map(|f| ext::fmt::path(f).cyan().to_string())
                        .collect::<Vec<_>>().join(", ")).unwrap();
                }
                write!(s, ": {}", e.kind()).unwrap();
                if let Some(e2) = e.get_ref() {
                    write!(s, ", {}", e2).unwrap();
                }
            }
            Self::Lexopt(e) => write!(s, "{} to parse command-line arguments: {}", "Failed".red(), e).unwrap(),
            Self::NoExec(path) => write!(s, "{} at {}", "Could not find executable".red(),
                ext::fmt::path(path).cyan()).unwrap(),
            Self::Subprocess(stage, output) => {
                write!(s, "{} failed with {}.", stage.name().red(), ext::fmt::status(&output.status)).unwrap();
                let stderr = String::from_utf8_lossy(&output.stderr);
                let stderr = stderr.trim_end();
                if !stderr.is_empty() {
                    write!(s, "\nError message:\n{}", stderr).unwrap();
                }
            }
            Self::InvalidInput(e) => write!(s, "{}: {}", "Invalid input".red(), e).unwrap(),
            Self::InvalidData(e) => write!(s, "{}: {}", "Invalid data".red(), e).unwrap(),
        };
        s
    }

    /// Exit code of the process, terminated with this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Lexopt(_) | Self::NoExec(_) | Self::InvalidInput(_) => exit::CONFIG,
            Self::Subprocess(Stage::SampleSheet, _) => exit::SAMPLE_SHEET,
            Self::Subprocess(Stage::Conversion, _) => exit::CONVERSION,
            Self::Io(..) | Self::InvalidData(_) => exit::RUNTIME,
        }
    }
}

macro_rules! validate_param {
    ($cond:expr, $($arg:expr),+) => {{
        if !($cond) {
            (
                Err($crate::Error::InvalidInput(format!($($arg),+)))
            ?)
        }
    }};
}
pub(crate) use validate_param;

macro_rules! add_path {
    (!) => {
        |e| $crate::Error::Io(e, Vec::new())
    };
    ($path:expr) => {
        |e| $crate::Error::Io(e, vec![std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned()])
    };
    ($($path:expr),+) => {
        |e| {
            let mut v = Vec::new();
            $(
                v.push(std::convert::AsRef::<std::path::Path>::as_ref(&$path).to_owned());
            )*
            $crate::Error::Io(e, v)
        }
    };
}
pub(crate) use add_path;

macro_rules! error {
    ($var:ident, $($arg:expr),+ $(,)?) => {
        $crate::Error::$var(format!($($arg),+))
    }
}
pub(crate) use error;

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn failed_output(code: i32, stderr: &str) -> Output {
        use std::os::unix::process::ExitStatusExt;
        Output {
            status: std::process::ExitStatus::from_raw(code << 8),
            stdout: Vec::new(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn subprocess_exit_codes() {
        let e = Error::Subprocess(Stage::SampleSheet, failed_output(7, "bad sheet"));
        assert_eq!(e.exit_code(), exit::SAMPLE_SHEET);
        let msg = e.display();
        assert!(msg.contains("exit code 7"));
        assert!(msg.contains("bad sheet"));

        let e = Error::Subprocess(Stage::Conversion, failed_output(1, ""));
        assert_eq!(e.exit_code(), exit::CONVERSION);
        assert!(!e.display().contains("Error message"));
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [exit::SUCCESS, exit::COLLISIONS, exit::CONFIG, exit::SAMPLE_SHEET, exit::CONVERSION,
            exit::RUNTIME];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(error!(InvalidInput, "{} missing", "run").exit_code(), exit::CONFIG);
        assert_eq!(Error::Io(io::Error::from(io::ErrorKind::NotFound), Vec::new()).exit_code(), exit::RUNTIME);
    }
}
