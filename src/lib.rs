//! Offline utilities for the RIT error-dump workflow.
//!
//! A RIT configuration file lists named memory regions. From it, [`record`] produces the binary
//! record file a device model uses to know which regions to dump, [`capture`] cuts those regions
//! out of a raw memory image, and [`hexdump`] renders the resulting dump files as hex text.

#![deny(missing_docs, missing_debug_implementations)]

mod errors;
pub use errors::{Error, Result};

pub mod catalog;
pub use catalog::{RegionDescriptor, SectionCatalog};

pub mod config;
pub use config::RitConfig;

pub mod record;
pub use record::RegionRecord;

pub mod hexdump;
pub use hexdump::DumpOutcome;

pub mod capture;

pub(crate) mod util;
