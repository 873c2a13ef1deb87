//! Render per-region dump files as human readable hex text.
//!
//! Output layout for every region, in catalog order:
//! ```text
//! [name::address::length]
//! 0a  ff  ...
//!
//! ```
//! The address and length are reproduced exactly as written in the configuration.

use crate::catalog::RegionDescriptor;
use crate::config::RitConfig;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::fmt::Write as FmtWrite;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Result of a hex dump run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpOutcome {
    /// Blocks were written to `path`.
    Written {
        /// Output file that was created.
        path: PathBuf,
        /// Number of region blocks in it.
        blocks: usize,
    },
    /// Every candidate output name already exists; nothing was written.
    NamesExhausted {
        /// Names that were tried.
        tried: Vec<PathBuf>,
    },
}

/// Header line of a region block, without the trailing newline.
pub fn block_header(region: &RegionDescriptor) -> String {
    format!(
        "[{}::{}::{}]",
        region.name, region.address_text, region.length_text
    )
}

/// Append `byte` to `buf` as two lowercase hex digits followed by two spaces.
#[inline]
pub fn push_hex(buf: &mut String, byte: u8) {
    // Writing into a `String` cannot fail.
    let _ = write!(buf, "{:02x}  ", byte);
}

/// Format one complete block for `region`, reading `region.length` bytes from `src`.
///
/// `path` only names the source in errors.
pub fn format_block<R: Read>(
    region: &RegionDescriptor,
    src: &mut R,
    path: &Path,
) -> Result<String> {
    // Sized by the bytes actually read, never by the configured length.
    let mut text = String::new();
    crate::util::read_bytes_with(src, u64::from(region.length), path, |b| {
        push_hex(&mut text, b)
    })?;
    Ok(format!("{}\n{}\n\n", block_header(region), text))
}

/// Claim the first output name from `candidates` that does not exist yet.
///
/// Each name is created exclusively, so a name taken between probing and opening is skipped
/// like any other existing file.
pub fn claim_output(candidates: &[PathBuf]) -> Result<Option<(PathBuf, File)>> {
    for candidate in candidates {
        match OpenOptions::new().write(true).create_new(true).open(candidate) {
            Ok(file) => return Ok(Some((candidate.clone(), file))),
            Err(ref e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                warn!("{} already exists", candidate.display());
            }
            Err(e) => return Err(Error::from_open(e, candidate)),
        }
    }
    Ok(None)
}

/// Write a hex block for every region into a fresh numbered output file.
///
/// The dump for the region at position `i` is read from `config.dump_path(i)`; the position,
/// not the address, ties a region to its dump file.
pub fn format_dumps<'a, I>(config: &RitConfig, regions: I) -> Result<DumpOutcome>
where
    I: IntoIterator<Item = &'a RegionDescriptor>,
{
    let candidates = config.output_candidates();
    let (out_path, out_file) = match claim_output(&candidates)? {
        Some(claimed) => claimed,
        None => {
            warn!("all {} output names are taken", candidates.len());
            return Ok(DumpOutcome::NamesExhausted { tried: candidates });
        }
    };
    info!("out file={}", out_path.display());

    let mut out = BufWriter::new(out_file);
    let mut blocks = 0;
    for (i, region) in regions.into_iter().enumerate() {
        let dump_path = config.dump_path(i);
        debug!("reading {} bytes from {}", region.length, dump_path.display());
        let mut src = BufReader::new(crate::util::open_file(&dump_path)?);
        let block = format_block(region, &mut src, &dump_path)?;
        out.write_all(block.as_bytes())?;
        blocks += 1;
    }
    out.flush()?;

    Ok(DumpOutcome::Written {
        path: out_path,
        blocks,
    })
}
