use std::{
    io,
    fs::{self, File},
    path::{Path, PathBuf},
    ffi::OsStr,
};
use crate::Error;

/// Finds an executable, and returns Error, if executable is not available.
pub fn find_exe(p: impl AsRef<Path>) -> Result<PathBuf, Error> {
    which::which(p.as_ref()).map_err(|_| Error::NoExec(p.as_ref().to_owned()))
}

/// Returns a path with a new suffix appended to the end.
pub fn append_path(path: &Path, suffix: impl AsRef<OsStr>) -> PathBuf {
    let mut os_string = path.as_os_str().to_owned();
    os_string.push(suffix.as_ref());
    os_string.into()
}

/// Creates an empty file, truncating it if it exists.
pub fn touch(path: &Path) -> io::Result<()> {
    File::create(path).map(|_| ())
}

/// Removes directory with all its contents, if it exists.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Copies `file` into `dir`, keeping the filename. Returns the new path.
pub fn copy_into(file: &Path, dir: &Path) -> Result<PathBuf, Error> {
    let filename = file.file_name().ok_or_else(|| Error::InvalidData(
        format!("Cannot copy {}: path has no filename", crate::ext::fmt::path(file))))?;
    let dest = dir.join(filename);
    fs::copy(file, &dest).map_err(crate::err::add_path!(file, dest))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_keeps_source() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a_S1_L001_R1_001.fastq.gz");
        fs::write(&src, b"@read\nACGT\n+\nIIII\n").unwrap();
        let dir = tmp.path().join("dest");
        fs::create_dir(&dir).unwrap();

        let dest = copy_into(&src, &dir).unwrap();
        assert_eq!(dest, dir.join("a_S1_L001_R1_001.fastq.gz"));
        assert_eq!(fs::read(&dest).unwrap(), fs::read(&src).unwrap());
        assert!(src.exists());
    }

    #[test]
    fn remove_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("x");
        assert!(!remove_dir_if_exists(&dir).unwrap());
        fs::create_dir_all(dir.join("y")).unwrap();
        touch(&dir.join("y").join("z")).unwrap();
        assert!(remove_dir_if_exists(&dir).unwrap());
        assert!(!dir.exists());
    }

    #[test]
    fn append_suffix() {
        assert_eq!(append_path(Path::new("/s/abc1"), ".ready"), PathBuf::from("/s/abc1.ready"));
    }
}
