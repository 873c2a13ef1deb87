#![allow(missing_docs)]

use crate::{Error, Result};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::*;

/// Helper struct to parse INI configuration files.
#[derive(Parser)]
#[grammar = "catalog/ini.pest"]
struct IniParser;

/// Name of the section whose entries every other section falls back to.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// A single `[section]` of an INI file with its entries in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IniSection {
    /// Section name as written between the brackets.
    pub name: String,
    /// Lowercased keys and their (possibly absent) values.
    entries: Vec<(String, Option<String>)>,
}

impl IniSection {
    fn new(name: String) -> Self {
        IniSection {
            name,
            entries: vec![],
        }
    }

    /// Look up `key` (case-insensitive).
    ///
    /// The outer `Option` tells whether the key exists, the inner one whether it has a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref().map(String::as_str))
    }

    /// All keys of this section, lowercased, in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed INI file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IniDocument {
    defaults: IniSection,
    sections: Vec<IniSection>,
}

impl IniDocument {
    /// Read and parse the INI file at `path`.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|e| Error::from_open(e, path))?;
        IniDocument::parse_str(&input)
    }

    /// Parse an INI document held in memory.
    pub fn parse_str(input: &str) -> Result<Self> {
        let file = IniParser::parse(Rule::file, input)?
            .next()
            .ok_or_else(|| Error::MalformedConfig(String::from("empty parse tree")))?;

        let mut doc = IniDocument {
            defaults: IniSection::new(String::from(DEFAULT_SECTION)),
            sections: vec![],
        };
        // Section currently being filled, `None` before the first header.
        let mut current: Option<usize> = None;
        // Indentation of the last key in the current section and whether it holds a value.
        let mut last_key: Option<(usize, bool)> = None;

        for pair in file.into_inner() {
            let line = pair.as_span().start_pos().line_col().0;
            match pair.as_rule() {
                Rule::section => {
                    let name = IniDocument::_section_name(pair);
                    current = Some(doc._open_section(name)?);
                    last_key = None;
                }
                Rule::entry | Rule::continuation => {
                    let idx = current.ok_or(Error::MissingSectionHeader { line })?;
                    let indent = IniDocument::_indent(&pair);
                    match last_key {
                        // Deeper than the key above it: part of that key's value.
                        Some((level, valued)) if indent > level => {
                            if !valued {
                                return Err(Error::MalformedConfig(format!(
                                    "continuation line {} does not follow a valued key",
                                    line
                                )));
                            }
                            let section = doc._section_mut(idx);
                            if let Some((_, Some(value))) = section.entries.last_mut() {
                                value.push('\n');
                                value.push_str(pair.as_str().trim());
                            }
                        }
                        _ if pair.as_rule() == Rule::entry => {
                            let (key, value) = IniDocument::_entry(pair);
                            last_key = Some((indent, value.is_some()));
                            doc._insert(idx, key, value)?;
                        }
                        _ => {
                            return Err(Error::MalformedConfig(format!(
                                "line {} is neither a key nor a continuation",
                                line
                            )))
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(doc)
    }

    /// Get a section by its exact name.
    pub fn section(&self, name: &str) -> Option<&IniSection> {
        if name == DEFAULT_SECTION {
            return Some(&self.defaults);
        }
        self.sections.iter().find(|s| s.name == name)
    }

    /// Names of all sections except `DEFAULT`, in file order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Whether `section` exists and holds `key`, either directly or through `DEFAULT`.
    pub fn has_option(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    /// Look up `key` in `section`, falling back to the `DEFAULT` section.
    ///
    /// Returns `None` when the section does not exist at all.
    pub fn get(&self, section: &str, key: &str) -> Option<Option<&str>> {
        let sect = self.section(section)?;
        sect.get(key).or_else(|| self.defaults.get(key))
    }

    fn _section_name(pair: Pair<Rule>) -> String {
        pair.into_inner()
            .next()
            .map(|p| String::from(p.as_str()))
            .unwrap_or_default()
    }

    /// Number of whitespace characters before the key or continuation text of a line.
    fn _indent(pair: &Pair<Rule>) -> usize {
        let start = match pair.as_rule() {
            Rule::entry => pair.clone().into_inner().next().map(|k| k.as_span().start_pos()),
            _ => Some(pair.as_span().start_pos()),
        };
        start.map_or(0, |p| p.line_col().1 - 1)
    }

    fn _entry(pair: Pair<Rule>) -> (String, Option<String>) {
        let mut inner = pair.into_inner();
        let key = inner
            .next()
            .map(|p| p.as_str().trim().to_lowercase())
            .unwrap_or_default();
        let value = inner.next().map(|p| String::from(p.as_str().trim()));
        (key, value)
    }

    /// Register a new section and return its index, `usize::MAX` standing for `DEFAULT`.
    fn _open_section(&mut self, name: String) -> Result<usize> {
        if name == DEFAULT_SECTION {
            return Ok(usize::MAX);
        }
        if self.sections.iter().any(|s| s.name == name) {
            return Err(Error::DuplicateSection { section: name });
        }
        self.sections.push(IniSection::new(name));
        Ok(self.sections.len() - 1)
    }

    fn _section_mut(&mut self, idx: usize) -> &mut IniSection {
        if idx == usize::MAX {
            &mut self.defaults
        } else {
            &mut self.sections[idx]
        }
    }

    fn _insert(&mut self, idx: usize, key: String, value: Option<String>) -> Result<()> {
        let section = self._section_mut(idx);
        if section.entries.iter().any(|(k, _)| *k == key) {
            return Err(Error::DuplicateKey {
                section: section.name.clone(),
                key,
            });
        }
        section.entries.push((key, value));
        Ok(())
    }
}
