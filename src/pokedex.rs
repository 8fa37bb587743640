use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::resolver::{IdentifierLookup, ResolvedName};

/// One species of the dex table: national dex number, zh-TW display name,
/// en-US source name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexEntry {
    pub no: u32,
    pub name: String,
    pub original_name: String,
}

/// Species table backing both the dex-number lookups used during record
/// assembly and the fuzzy name resolution behind placeholder markers.
#[derive(Debug)]
pub struct Pokedex {
    entries: Vec<DexEntry>,
}

impl Pokedex {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let entries: Vec<DexEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(Pokedex { entries })
    }

    pub fn new(entries: Vec<DexEntry>) -> Self {
        Pokedex { entries }
    }

    /// Look up a species by national dex number.
    pub fn by_no(&self, no: u32) -> Option<&DexEntry> {
        self.entries.iter().find(|e| e.no == no)
    }

    /// Fuzzy match a raw name against the dex, most exact tier first:
    /// normalized equality, then prefix, then substring. First hit in dex
    /// order wins within a tier.
    pub fn by_name(&self, raw: &str) -> Option<&DexEntry> {
        let needle = normalize_name(raw);
        if needle.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| normalize_name(&e.original_name) == needle)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| normalize_name(&e.original_name).starts_with(&needle))
            })
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|e| normalize_name(&e.original_name).contains(&needle))
            })
    }
}

impl IdentifierLookup for Pokedex {
    fn resolve(&self, payload: &str) -> Option<ResolvedName> {
        self.by_name(payload).map(|e| ResolvedName {
            name: e.name.clone(),
            original_name: e.original_name.clone(),
        })
    }
}

/// Collapse case, whitespace, and punctuation so "Mr. Mime", "mr mime" and
/// "MrMime" compare equal.
fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
