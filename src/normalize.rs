use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::ConfigError;

// ── Token recognizer ─────────────────────────────────────────────────────

// A candidate token is a word with or without the explicit type suffix:
// "Fire-type", "Fire type", bare "Fire". The recognizer over-matches on
// purpose; the lexicon decides which candidates are actually vocabulary.
// No \b anchors: rendered text puts tokens flush against CJK, which counts
// as a word character, so boundaries rely on maximal ASCII-letter runs.
static RECOGNIZER: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"([A-Za-zé]+)(?:[ -]type)?")
        .case_insensitive(true)
        .build()
        .unwrap()
});

// ── Lexicon ──────────────────────────────────────────────────────────────

/// One entry of the elemental-type lexicon file, e.g.
/// `{ "text": "Fire", "displayText": "火系" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexiconEntry {
    pub text: String,
    pub display_text: String,
}

/// Substitutes recognized elemental-type tokens with their canonical
/// localized form via a secondary lookup table.
#[derive(Debug)]
pub struct TypeLexicon {
    /// Lowercased type word → localized display form.
    canonical: HashMap<String, String>,
}

impl TypeLexicon {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
        Ok(Self::compile(entries))
    }

    pub fn compile(entries: Vec<LexiconEntry>) -> Self {
        let canonical = entries
            .into_iter()
            .map(|e| (e.text.to_lowercase(), e.display_text))
            .collect();
        TypeLexicon { canonical }
    }

    /// Replace recognized type tokens with their canonical localized form.
    ///
    /// For each distinct token, in discovery order, only the FIRST textual
    /// occurrence is substituted: a repeated token keeps its later
    /// occurrences verbatim. Deliberate and pinned by test. Candidate words
    /// not present in the lexicon are left unresolved.
    pub fn normalize(&self, text: &str) -> String {
        let mut seen: Vec<&str> = Vec::new();
        let mut replacements: Vec<(&str, &String)> = Vec::new();

        for caps in RECOGNIZER.captures_iter(text) {
            let token = caps.get(0).map_or("", |m| m.as_str());
            let word = caps.get(1).map_or("", |m| m.as_str());
            if seen.contains(&token) {
                continue;
            }
            seen.push(token);
            if let Some(localized) = self.canonical.get(&word.to_lowercase()) {
                replacements.push((token, localized));
            }
        }

        let mut out = text.to_string();
        for (token, localized) in replacements {
            out = out.replacen(token, localized, 1);
        }
        out
    }
}
