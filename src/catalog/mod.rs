//! Utilities to read the memory regions described by a RIT configuration file.

use crate::config::RitConfig;
use crate::{Error, Result};
use derive_more::{Index, IntoIterator};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

mod ini;
pub use ini::{IniDocument, IniSection, Rule, DEFAULT_SECTION};

lazy_static! {
    /// Matches the numbered keys that make up a region, capturing the index.
    static ref REGION_KEY: Regex = Regex::new(r"^(?:startaddress|range|name)(\d+)$").unwrap();
}

/// A named memory region taken from one numbered group of configuration keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// Name of the region, verbatim.
    pub name: String,
    /// Start address of the region.
    pub address: u32,
    /// Size of the region in bytes.
    pub length: u32,
    /// Start address as written in the configuration, prefix included.
    pub address_text: String,
    /// Length as written in the configuration.
    pub length_text: String,
}

impl RegionDescriptor {
    /// Build a descriptor from the raw configuration strings.
    ///
    /// The first two characters of `address` are a radix marker and are dropped before the rest
    /// is read as hexadecimal. `length` is decimal.
    pub fn from_strs(name: &str, address: &str, length: &str) -> Result<Self> {
        let address_text = address.trim();
        let length_text = length.trim();
        let invalid = || Error::InvalidAddress {
            text: String::from(address_text),
        };
        let digits = address_text.get(2..).ok_or_else(invalid)?;
        if digits.is_empty() {
            return Err(invalid());
        }
        let address = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let length = length_text.parse::<u32>()?;

        Ok(RegionDescriptor {
            name: String::from(name),
            address,
            length,
            address_text: String::from(address_text),
            length_text: String::from(length_text),
        })
    }

    /// Hexadecimal digits of the start address, without the two-character prefix.
    pub fn address_digits(&self) -> &str {
        self.address_text.get(2..).unwrap_or("")
    }
}

/// Ordered set of memory regions read from the `ErrorInfo_MemDump` section.
#[derive(Default, Debug, Clone, Index, IntoIterator)]
pub struct SectionCatalog {
    /// Section the regions were read from.
    pub section: String,
    /// Regions in configuration order.
    #[index]
    #[into_iterator(owned, ref)]
    pub regions: Vec<RegionDescriptor>,
}

impl SectionCatalog {
    /// Read the catalog from the configuration file named by `config`.
    pub fn from_config(config: &RitConfig) -> Result<Self> {
        let path = config.cfg_path();
        info!("parsing {}", path.display());
        let doc = IniDocument::from_path(&path)?;
        SectionCatalog::from_document(&doc, config.section_name())
    }

    /// Collect the regions of `section` from an already parsed document.
    ///
    /// Scanning stops at the first index without a `StartAddress` key. A missing section yields
    /// an empty catalog.
    pub fn from_document(doc: &IniDocument, section: &str) -> Result<Self> {
        let mut catalog = SectionCatalog {
            section: String::from(section),
            regions: vec![],
        };

        let mut i = 0;
        while doc.has_option(section, &format!("StartAddress{}", i)) {
            let address = SectionCatalog::_require(doc, section, &format!("StartAddress{}", i))?;
            let length = SectionCatalog::_require(doc, section, &format!("Range{}", i))?;
            let name = SectionCatalog::_require(doc, section, &format!("Name{}", i))?;
            let region = RegionDescriptor::from_strs(name, address, length)?;
            debug!(
                "region {} -> {} @ {:#x} ({} bytes)",
                i, region.name, region.address, region.length
            );
            catalog.regions.push(region);
            i += 1;
        }

        if let Some(sect) = doc.section(section) {
            let stray = SectionCatalog::_stray_keys(sect, i);
            if !stray.is_empty() {
                warn!(
                    "ignoring keys past region index {} in [{}]: {}",
                    i,
                    section,
                    stray.join(", ")
                );
            }
        }

        Ok(catalog)
    }

    /// Region keys of `sect` whose index is `next` or higher, i.e. beyond the scanned regions.
    fn _stray_keys(sect: &IniSection, next: usize) -> Vec<&str> {
        sect.keys()
            .filter(|k| {
                REGION_KEY
                    .captures(k)
                    .and_then(|c| c.get(1))
                    .and_then(|n| n.as_str().parse::<usize>().ok())
                    .map_or(false, |n| n >= next)
            })
            .collect()
    }

    /// Fetch a key that must exist and carry a value.
    fn _require<'d>(doc: &'d IniDocument, section: &str, key: &str) -> Result<&'d str> {
        match doc.get(section, key) {
            Some(Some(v)) => Ok(v),
            Some(None) => Err(Error::MissingValue {
                section: String::from(section),
                key: String::from(key),
            }),
            None => Err(Error::MissingKey {
                section: String::from(section),
                key: String::from(key),
            }),
        }
    }

    /// Number of regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the catalog holds no regions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate over the regions in configuration order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegionDescriptor> {
        self.regions.iter()
    }
}
