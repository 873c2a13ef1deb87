//! Fixed-width binary records holding the address and length of each region.
//!
//! Every region takes 8 bytes: the start address followed by the length, both as native-endian
//! signed 32-bit integers.

use crate::catalog::RegionDescriptor;
use crate::config::RitConfig;
use crate::{Error, Result};
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info};
use std::convert::TryFrom;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Size in bytes of one record.
pub const RECORD_SIZE: usize = 8;

/// Address and length of one region as stored in the record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionRecord {
    /// Start address.
    pub address: i32,
    /// Length in bytes.
    pub length: i32,
}

impl RegionRecord {
    /// Convert a descriptor, rejecting values that do not fit the signed record fields.
    pub fn from_descriptor(region: &RegionDescriptor) -> Result<Self> {
        let fit = |field: &'static str, value: u32| {
            i32::try_from(value).map_err(|_| Error::RecordOverflow {
                name: region.name.clone(),
                field,
                value: u64::from(value),
            })
        };
        Ok(RegionRecord {
            address: fit("address", region.address)?,
            length: fit("length", region.length)?,
        })
    }

    /// Parse one record from a reader.
    pub fn from_reader<R: Read>(rdr: &mut R) -> std::io::Result<Self> {
        Ok(RegionRecord {
            address: rdr.read_i32::<NativeEndian>()?,
            length: rdr.read_i32::<NativeEndian>()?,
        })
    }

    /// Serialize this record.
    pub fn write_to<W: Write>(&self, wtr: &mut W) -> std::io::Result<()> {
        wtr.write_i32::<NativeEndian>(self.address)?;
        wtr.write_i32::<NativeEndian>(self.length)
    }
}

/// Write one record per region, in order, to `wtr`.
pub fn write_records<'a, W, I>(wtr: &mut W, regions: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a RegionDescriptor>,
{
    let mut count = 0;
    for region in regions {
        let record = RegionRecord::from_descriptor(region)?;
        record.write_to(wtr)?;
        debug!("{} {} {}", region.name, region.address_text, region.length);
        count += 1;
    }
    Ok(count)
}

/// Create the record file named by `config` and fill it from `regions`.
///
/// Returns the number of records written.
pub fn write_record_file<'a, I>(config: &RitConfig, regions: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a RegionDescriptor>,
{
    let path = config.record_path();
    let mut wtr = BufWriter::new(crate::util::create_file(&path)?);
    let count = write_records(&mut wtr, regions)?;
    wtr.flush()?;
    info!("wrote {} records to {}", count, path.display());
    Ok(count)
}

/// Read every record from `rdr` until it is exhausted.
///
/// Input that stops partway through a record is reported as `Error::TruncatedRead` against
/// `path`.
pub fn read_records<R: Read>(rdr: R, path: &Path) -> Result<Vec<RegionRecord>> {
    let mut bytes = vec![];
    BufReader::new(rdr).read_to_end(&mut bytes)?;
    let whole = bytes.len() / RECORD_SIZE * RECORD_SIZE;
    if whole != bytes.len() {
        return Err(Error::TruncatedRead {
            path: path.display().to_string(),
            expected: (whole + RECORD_SIZE) as u64,
            read: bytes.len() as u64,
        });
    }

    let mut cursor = std::io::Cursor::new(bytes);
    (0..whole / RECORD_SIZE)
        .map(|_| RegionRecord::from_reader(&mut cursor).map_err(Error::from))
        .collect()
}

/// Read the record file named by `config`.
pub fn read_record_file(config: &RitConfig) -> Result<Vec<RegionRecord>> {
    let path = config.record_path();
    let file = crate::util::open_file(&path)?;
    read_records(file, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str, address: &str, length: &str) -> RegionDescriptor {
        RegionDescriptor::from_strs(name, address, length).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let regions = vec![region("a", "0x00001000", "16"), region("b", "0x20", "4")];
        let mut buf = vec![];
        assert_eq!(write_records(&mut buf, &regions).unwrap(), 2);
        assert_eq!(buf.len(), 2 * RECORD_SIZE);

        let mut expected = vec![];
        for v in &[0x1000i32, 16, 0x20, 4] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_read_back() {
        let regions = vec![region("a", "0x7fffffff", "2147483647"), region("b", "0x0", "0")];
        let mut buf = vec![];
        write_records(&mut buf, &regions).unwrap();

        let records = read_records(buf.as_slice(), Path::new("mem")).unwrap();
        assert_eq!(
            records,
            vec![
                RegionRecord {
                    address: i32::MAX,
                    length: i32::MAX
                },
                RegionRecord {
                    address: 0,
                    length: 0
                },
            ]
        );
    }

    #[test]
    fn test_overflow_rejected() {
        let regions = vec![region("ok", "0x10", "1"), region("high", "0x80000000", "1")];
        let mut buf = vec![];
        match write_records(&mut buf, &regions) {
            Err(Error::RecordOverflow { name, field, .. }) => {
                assert_eq!(name, "high");
                assert_eq!(field, "address");
            }
            other => panic!("unexpected {:?}", other),
        }
        // The record before the failing one is already out.
        assert_eq!(buf.len(), RECORD_SIZE);
    }

    #[test]
    fn test_partial_record() {
        let err = read_records(&[0u8; 12][..], Path::new("rit_cfg.bin"));
        assert!(matches!(
            err,
            Err(Error::TruncatedRead {
                expected: 16,
                read: 12,
                ..
            })
        ));
        assert!(read_records(&[0u8; 0][..], Path::new("rit_cfg.bin")).unwrap().is_empty());
    }

    #[test]
    fn test_record_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = RitConfig::in_dir(dir.path());
        let regions = vec![region("a", "0x40", "8")];
        assert_eq!(write_record_file(&config, &regions).unwrap(), 1);
        assert_eq!(std::fs::metadata(config.record_path()).unwrap().len(), 8);
        assert_eq!(
            read_record_file(&config).unwrap(),
            vec![RegionRecord {
                address: 0x40,
                length: 8
            }]
        );
    }
}
