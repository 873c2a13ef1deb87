//! Utilities dealing with error handling in this crate.

use failure::Fail;

/// Errors produced by this crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// Errors originating from calls to `std::io::*`.
    #[fail(display = "IO Error - {}", _0)]
    IO(#[cause] std::io::Error),
    /// Errors caused by parsing integers from strings.
    #[fail(display = "Parse Error - {}", _0)]
    ParseInt(#[cause] std::num::ParseIntError),
    /// Errors caused by lexically malformed configuration files.
    #[fail(display = "Parse Error - {}", _0)]
    ParseConfig(#[cause] pest::error::Error<crate::catalog::Rule>),
    /// A file that is required as input does not exist.
    #[fail(display = "File not found - {}", path)]
    FileNotFound {
        /// Path that was opened.
        path: String,
    },
    /// A key required to complete a region is absent from its section.
    #[fail(display = "Missing key {} in section [{}]", key, section)]
    MissingKey {
        /// Section that was searched.
        section: String,
        /// Key that was searched for.
        key: String,
    },
    /// A key is present but carries no value.
    #[fail(display = "Key {} in section [{}] has no value", key, section)]
    MissingValue {
        /// Section holding the key.
        section: String,
        /// The valueless key.
        key: String,
    },
    /// An address string could not be read as a prefixed hexadecimal number.
    #[fail(display = "Invalid start address '{}'", text)]
    InvalidAddress {
        /// The offending configuration text.
        text: String,
    },
    /// A file ended before the expected number of bytes could be read.
    #[fail(display = "Read {} of {} bytes from {}", read, expected, path)]
    TruncatedRead {
        /// File that was being read.
        path: String,
        /// Bytes requested.
        expected: u64,
        /// Bytes actually available.
        read: u64,
    },
    /// A value does not fit into the 4-byte signed record format.
    #[fail(display = "Region {} {} = {:#x} does not fit a 32-bit record", name, field, value)]
    RecordOverflow {
        /// Region the value belongs to.
        name: String,
        /// Either `address` or `length`.
        field: &'static str,
        /// The value itself.
        value: u64,
    },
    /// A configuration entry appears before any `[section]` header.
    #[fail(display = "Entry on line {} is not inside a section", line)]
    MissingSectionHeader {
        /// 1-based line number.
        line: usize,
    },
    /// A `[section]` header appears twice.
    #[fail(display = "Section [{}] already exists", section)]
    DuplicateSection {
        /// Name of the repeated section.
        section: String,
    },
    /// A key appears twice in the same section.
    #[fail(display = "Key {} already exists in section [{}]", key, section)]
    DuplicateKey {
        /// Section holding the key.
        section: String,
        /// The repeated key.
        key: String,
    },
    /// Structurally invalid configuration that the grammar alone does not reject.
    #[fail(display = "Malformed configuration - {}", _0)]
    MalformedConfig(String),
    /// A record file holds no records.
    #[fail(display = "Record file {} is empty", path)]
    EmptyRecordFile {
        /// Path of the record file.
        path: String,
    },
}

impl Error {
    /// Convert an IO error raised while opening `path`, naming the file if it does not exist.
    #[inline]
    pub fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::IO(err)
        }
    }
}

macro_rules! error_from {
    ($et: ty => $cet: expr) => {
        impl From<$et> for Error {
            #[inline]
            fn from(err: $et) -> Self {
                $cet(err)
            }
        }
    };
}

error_from!(std::io::Error => Error::IO);
error_from!(std::num::ParseIntError => Error::ParseInt);
error_from!(pest::error::Error<crate::catalog::Rule> => Error::ParseConfig);

/// Result type used in this crate.
pub type Result<T> = std::result::Result<T, Error>;
