//! Utilities used in this crate.
//!
//! This is not part of the public interface of the crate.

use crate::{Error, Result};
use byteorder::ReadBytesExt;
use std::io::Read;
use std::path::Path;

/// Open `path` for reading, reporting a missing file by name.
pub fn open_file(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| Error::from_open(e, path))
}

/// Create or truncate `path` for writing.
pub fn create_file(path: &Path) -> Result<std::fs::File> {
    std::fs::File::create(path).map_err(|e| Error::from_open(e, path))
}

/// Read exactly `len` bytes from `src` one at a time, handing each to `sink`.
///
/// Running out of input is reported as `Error::TruncatedRead` against `path`.
pub fn read_bytes_with<R, F>(src: &mut R, len: u64, path: &Path, mut sink: F) -> Result<()>
where
    R: Read,
    F: FnMut(u8),
{
    for read in 0..len {
        match src.read_u8() {
            Ok(b) => sink(b),
            Err(ref e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(Error::TruncatedRead {
                    path: path.display().to_string(),
                    expected: len,
                    read,
                })
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bytes_with() {
        let mut src = std::io::Cursor::new(vec![1u8, 2, 3]);
        let mut seen = vec![];
        assert!(read_bytes_with(&mut src, 2, Path::new("mem"), |b| seen.push(b)).is_ok());
        assert_eq!(seen, vec![1, 2]);

        let err = read_bytes_with(&mut src, 4, Path::new("mem"), |_| {});
        match err {
            Err(Error::TruncatedRead { expected, read, .. }) => {
                assert_eq!(expected, 4);
                assert_eq!(read, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_file(&dir.path().join("absent.dump"));
        assert!(matches!(err, Err(Error::FileNotFound { .. })));
    }
}
