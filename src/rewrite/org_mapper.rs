//! Alias to canonical organization mapping.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::MappingError;

/// Immutable mapping from public alias to upstream organization.
///
/// Built once at startup and shared read-only. Entries are kept ordered by
/// alias so reverse lookups have a stable tie-break when several aliases
/// point at the same canonical name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrgMapper {
    entries: BTreeMap<String, String>,
}

impl OrgMapper {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        let mapper = Self { entries };
        for (alias, canonical) in &mapper.entries {
            if let Some(winner) = mapper.reverse_lookup(canonical) {
                if winner != alias {
                    tracing::warn!(
                        alias = %alias,
                        canonical = %canonical,
                        reverse_alias = %winner,
                        "Canonical organization shared by several aliases; reverse rewrites use the first"
                    );
                }
            }
        }
        mapper
    }

    /// Canonical organization for `alias`, if configured.
    pub fn lookup(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    /// First alias (in lexicographic order) that maps to `canonical`.
    pub fn reverse_lookup(&self, canonical: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| c.as_str() == canonical)
            .map(|(alias, _)| alias.as_str())
    }

    /// Iterate `(alias, canonical)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a single `alias=canonical` entry.
pub fn parse_mapping_entry(entry: &str) -> Result<(String, String), MappingError> {
    let (alias, canonical) = entry
        .split_once('=')
        .ok_or_else(|| MappingError::MissingSeparator(entry.to_string()))?;
    let (alias, canonical) = (alias.trim(), canonical.trim());
    if alias.is_empty() || canonical.is_empty() {
        return Err(MappingError::Empty(entry.to_string()));
    }
    Ok((alias.to_string(), canonical.to_string()))
}

/// Parses `alias=canonical,alias=canonical,...`.
impl FromStr for OrgMapper {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|entry| !entry.trim().is_empty())
            .map(parse_mapping_entry)
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self::new)
    }
}
