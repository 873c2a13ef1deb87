//! Locations and names of every file the RIT utilities read or write.

use std::path::{Path, PathBuf};

/// Explicit configuration handed to each pipeline.
///
/// All paths are derived from `work_dir`, which defaults to the current directory.
#[derive(Debug, Clone)]
pub struct RitConfig {
    work_dir: PathBuf,
    cfg_name: String,
    section: String,
    record_name: String,
    dump_prefix: String,
    dump_suffix: String,
    out_base: String,
    out_ext: String,
    out_slots: usize,
}

impl Default for RitConfig {
    fn default() -> Self {
        RitConfig {
            work_dir: PathBuf::from("."),
            cfg_name: String::from("rit.cfg"),
            section: String::from("ErrorInfo_MemDump"),
            record_name: String::from("rit_cfg.bin"),
            dump_prefix: String::from("rit_err_"),
            dump_suffix: String::from(".dump"),
            out_base: String::from("rit"),
            out_ext: String::from(".out"),
            out_slots: 5,
        }
    }
}

macro_rules! builder_pattern {
    ($(#[$outer:meta])* $var_name: ident : $var_type: ty) => {
        builder_pattern!($(#[$outer])* $var_name => $var_name: $var_type);
    };
    ($(#[$outer:meta])* $name: ident => $var_name: ident : $var_type: ty) => {
        $(#[$outer])*
        pub fn $name(mut self, $var_name: impl Into<$var_type>) -> Self {
            self.$var_name = $var_name.into();
            self
        }
    };
}

impl RitConfig {
    /// Configuration rooted at `work_dir` with every other name at its default.
    pub fn in_dir<P: Into<PathBuf>>(work_dir: P) -> Self {
        RitConfig::default().work_dir(work_dir)
    }

    builder_pattern!(
        /// Directory holding the configuration, record, dump and output files.
        work_dir: PathBuf
    );

    builder_pattern!(
        /// File name of the INI configuration.
        cfg_name: String
    );

    builder_pattern!(
        /// Section of the configuration listing the memory regions.
        section: String
    );

    builder_pattern!(
        /// File name of the binary record file.
        record_name: String
    );

    builder_pattern!(
        /// Prefix of per-region dump files, followed by the region index.
        dump_prefix: String
    );

    builder_pattern!(
        /// Suffix of per-region dump files.
        dump_suffix: String
    );

    builder_pattern!(
        /// Base name of the hex dump output files.
        out_base: String
    );

    builder_pattern!(
        /// Extension of the hex dump output files.
        out_ext: String
    );

    builder_pattern!(
        /// Number of numbered output names tried before giving up.
        out_slots: usize
    );

    /// Working directory.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.work_dir
    }

    /// Name of the section listing the regions.
    #[inline]
    pub fn section_name(&self) -> &str {
        &self.section
    }

    /// Number of output name candidates.
    #[inline]
    pub fn slots(&self) -> usize {
        self.out_slots
    }

    /// Full path of the configuration file.
    pub fn cfg_path(&self) -> PathBuf {
        self.work_dir.join(&self.cfg_name)
    }

    /// Full path of the binary record file.
    pub fn record_path(&self) -> PathBuf {
        self.work_dir.join(&self.record_name)
    }

    /// Full path of the dump file for the region at position `index`.
    pub fn dump_path(&self, index: usize) -> PathBuf {
        self.work_dir
            .join(format!("{}{}{}", self.dump_prefix, index, self.dump_suffix))
    }

    /// Candidate hex dump output paths in probing order.
    pub fn output_candidates(&self) -> Vec<PathBuf> {
        (0..self.out_slots)
            .map(|n| {
                self.work_dir
                    .join(format!("{}.{}{}", self.out_base, n, self.out_ext))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let cfg = RitConfig::in_dir("/tmp/rit");
        assert_eq!(cfg.cfg_path(), PathBuf::from("/tmp/rit/rit.cfg"));
        assert_eq!(cfg.record_path(), PathBuf::from("/tmp/rit/rit_cfg.bin"));
        assert_eq!(cfg.dump_path(3), PathBuf::from("/tmp/rit/rit_err_3.dump"));
        assert_eq!(cfg.section_name(), "ErrorInfo_MemDump");

        let outs = cfg.output_candidates();
        assert_eq!(outs.len(), 5);
        assert_eq!(outs[0], PathBuf::from("/tmp/rit/rit.0.out"));
        assert_eq!(outs[4], PathBuf::from("/tmp/rit/rit.4.out"));
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = RitConfig::default()
            .dump_prefix("region_")
            .dump_suffix(".bin")
            .out_base("report")
            .out_ext(".txt")
            .out_slots(2usize);
        assert_eq!(cfg.dump_path(0), PathBuf::from("./region_0.bin"));
        assert_eq!(
            cfg.output_candidates(),
            vec![
                PathBuf::from("./report.0.txt"),
                PathBuf::from("./report.1.txt")
            ]
        );
    }
}
