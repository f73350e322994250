//! Sources a reader can scan.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Something that can be opened for one forward pass per query.
///
/// Each call to [`open`](Self::open) returns an independent reader, so
/// queries never share a cursor.
pub trait IniSource: std::fmt::Debug {
    /// Name used in error messages.
    fn name(&self) -> String;

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

/// An INI file on disk, reopened for every query.
#[derive(Debug, Clone)]
pub struct IniFile {
    path: PathBuf,
}

impl IniFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IniSource for IniFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}

const MEMORY: &str = "<memory>";

impl IniSource for str {
    fn name(&self) -> String {
        MEMORY.to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(self.as_bytes()))
    }
}

impl IniSource for String {
    fn name(&self) -> String {
        MEMORY.to_string()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        self.as_str().open()
    }
}

impl<S: IniSource + ?Sized> IniSource for &S {
    fn name(&self) -> String {
        (**self).name()
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        (**self).open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::NamedTempFile;

    fn read_all(source: &dyn IniSource) -> String {
        let mut text = String::new();
        source.open().unwrap().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_file_source_reopens_from_start() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[Section1]\nvar1=1").unwrap();

        let source = IniFile::new(file.path());
        assert_eq!(read_all(&source), "[Section1]\nvar1=1");
        assert_eq!(read_all(&source), "[Section1]\nvar1=1");
        assert_eq!(source.name(), file.path().display().to_string());
    }

    #[test]
    fn test_file_source_missing() {
        let source = IniFile::new("/nonexistent/path/file7.ini");
        let err = source.open().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_sources() {
        let text = String::from("[a]\nb=c");
        assert_eq!(read_all(&text), "[a]\nb=c");
        assert_eq!(read_all(&"[a]"), "[a]");
        assert_eq!(text.name(), "<memory>");
    }
}
