//! Slice region dumps out of a raw memory image.
//!
//! The image is addressed from offset 0, so a record's address is a byte offset into it. The
//! region at position `i` of the record file lands in `config.dump_path(i)`, which is where the
//! hex dump pipeline looks for it.

use crate::config::RitConfig;
use crate::record::{read_record_file, RegionRecord};
use crate::{Error, Result};
use log::info;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Copy the window described by `record` from `image` into `out`.
///
/// `path` only names the image in errors.
pub fn copy_region<R, W>(
    image: &mut R,
    record: &RegionRecord,
    out: &mut W,
    path: &Path,
) -> Result<()>
where
    R: Read + Seek,
    W: Write,
{
    // Record fields are signed on disk, the values are offsets and sizes.
    let start = u64::from(record.address as u32);
    let len = u64::from(record.length as u32);
    image.seek(SeekFrom::Start(start))?;
    let copied = std::io::copy(&mut image.take(len), out)?;
    if copied != len {
        return Err(Error::TruncatedRead {
            path: path.display().to_string(),
            expected: start + len,
            read: start + copied,
        });
    }
    Ok(())
}

/// Write one dump file per record of the record file, reading region bytes from `image_path`.
///
/// Returns the dump files in record order.
pub fn capture_regions(config: &RitConfig, image_path: &Path) -> Result<Vec<PathBuf>> {
    let records = read_record_file(config)?;
    if records.is_empty() {
        return Err(Error::EmptyRecordFile {
            path: config.record_path().display().to_string(),
        });
    }

    let mut image = crate::util::open_file(image_path)?;
    let mut written = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let dump_path = config.dump_path(i);
        info!("create {} for error dump", dump_path.display());
        let mut out = BufWriter::new(crate::util::create_file(&dump_path)?);
        copy_region(&mut image, record, &mut out, image_path)?;
        out.flush()?;
        written.push(dump_path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RegionDescriptor;
    use crate::record::write_record_file;

    #[test]
    fn test_copy_region() {
        let mut image = std::io::Cursor::new((0u8..32).collect::<Vec<u8>>());
        let record = RegionRecord {
            address: 4,
            length: 3,
        };
        let mut out: Vec<u8> = vec![];
        copy_region(&mut image, &record, &mut out, Path::new("mem")).unwrap();
        assert_eq!(out, vec![4, 5, 6]);

        let past_end = RegionRecord {
            address: 30,
            length: 4,
        };
        let err = copy_region(&mut image, &past_end, &mut Vec::<u8>::new(), Path::new("mem"));
        assert!(matches!(
            err,
            Err(Error::TruncatedRead {
                expected: 34,
                read: 32,
                ..
            })
        ));
    }

    #[test]
    fn test_capture_regions() {
        let dir = tempfile::tempdir().unwrap();
        let config = RitConfig::in_dir(dir.path());
        let image_path = dir.path().join("memory.img");
        std::fs::write(&image_path, (0u8..=255).collect::<Vec<u8>>()).unwrap();

        let regions = vec![
            RegionDescriptor::from_strs("hi", "0x80", "2").unwrap(),
            RegionDescriptor::from_strs("lo", "0x00", "3").unwrap(),
        ];
        write_record_file(&config, &regions).unwrap();

        let dumps = capture_regions(&config, &image_path).unwrap();
        assert_eq!(dumps, vec![config.dump_path(0), config.dump_path(1)]);
        assert_eq!(std::fs::read(&dumps[0]).unwrap(), vec![0x80, 0x81]);
        assert_eq!(std::fs::read(&dumps[1]).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RitConfig::in_dir(dir.path());
        std::fs::write(config.record_path(), b"").unwrap();
        let err = capture_regions(&config, &dir.path().join("memory.img"));
        assert!(matches!(err, Err(Error::EmptyRecordFile { .. })));
    }
}
