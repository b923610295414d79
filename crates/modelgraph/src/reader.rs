//! The file-reading collaborator used by the scan driver.

use std::{fs, io, path::Path};

/// Reads a candidate source file as UTF-8 text.
///
/// The scan driver holds one of these so callers can feed sources from
/// somewhere other than the local filesystem.
pub trait SourceReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Size of the file in bytes, if known without reading it.
    ///
    /// Files reported larger than the scan limit are never read.
    fn source_len(&self, _path: &Path) -> Option<u64> {
        None
    }
}

/// Reads straight from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn source_len(&self, path: &Path) -> Option<u64> {
        fs::metadata(path).ok().map(|metadata| metadata.len())
    }
}
