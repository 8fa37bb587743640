use std::fs;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::ConfigError;

// ── Table entries ────────────────────────────────────────────────────────

/// One entry of a category tag file. `text` is the match key: tried as an
/// exact label first, as a case-insensitive pattern second. Exactly one
/// entry per table carries `"fallback": true`; its `priority` may be
/// omitted, in which case it sorts after every resolved priority.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEntry {
    pub text: String,
    pub display_text: String,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub fallback: bool,
}

/// A resolved category: localized label plus sort priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTag {
    pub text: String,
    pub display_text: String,
    pub priority: i32,
    pub fallback: bool,
}

// ── Tag table ────────────────────────────────────────────────────────────

/// Ordered, immutable category tag table.
#[derive(Debug)]
pub struct TagTable {
    tags: Vec<CategoryTag>,
    /// Match keys compiled as case-insensitive patterns, parallel to `tags`.
    patterns: Vec<Regex>,
    fallback_idx: usize,
}

impl TagTable {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let entries: Vec<TagEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
        Self::compile(entries, &path.display().to_string())
    }

    pub fn compile(entries: Vec<TagEntry>, table: &str) -> Result<Self, ConfigError> {
        let mut tags = Vec::with_capacity(entries.len());
        let mut patterns = Vec::with_capacity(entries.len());
        let mut fallback_idx = None;

        for (i, entry) in entries.into_iter().enumerate() {
            if entry.fallback {
                if fallback_idx.is_some() {
                    return Err(ConfigError::DuplicateFallback {
                        table: table.to_string(),
                    });
                }
                fallback_idx = Some(i);
            }

            patterns.push(
                RegexBuilder::new(&entry.text)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::BadPattern {
                        pattern: entry.text.clone(),
                        source,
                    })?,
            );
            tags.push(CategoryTag {
                text: entry.text,
                display_text: entry.display_text,
                // An absent priority sorts last; only the fallback bucket
                // is expected to use this.
                priority: entry.priority.unwrap_or(i32::MAX),
                fallback: entry.fallback,
            });
        }

        let fallback_idx = fallback_idx.ok_or_else(|| ConfigError::MissingFallback {
            table: table.to_string(),
        })?;

        Ok(TagTable {
            tags,
            patterns,
            fallback_idx,
        })
    }

    pub fn fallback(&self) -> &CategoryTag {
        &self.tags[self.fallback_idx]
    }

    /// Classify a raw label. Total: always returns some tag.
    ///
    /// Two full passes, not interleaved: exact equality over the whole
    /// table first, pattern matching second. Source pages reuse some labels
    /// verbatim as substrings of other tags' patterns, so a later exact
    /// match must beat an earlier pattern match.
    pub fn map(&self, raw_label: &str) -> &CategoryTag {
        if let Some(tag) = self.tags.iter().find(|t| t.text == raw_label) {
            return tag;
        }
        for (i, pattern) in self.patterns.iter().enumerate() {
            if pattern.is_match(raw_label) {
                return &self.tags[i];
            }
        }
        self.fallback()
    }

    /// Sort key for a record already carrying a mapped display label.
    pub fn priority_of_display(&self, display_text: &str) -> i32 {
        self.tags
            .iter()
            .find(|t| t.display_text == display_text)
            .map_or(i32::MAX, |t| t.priority)
    }

    /// Stable ascending sort by resolved category priority. Equal
    /// priorities keep their input order; the page's own grouping order is
    /// meaningful within a category.
    pub fn sort_by_priority<T>(&self, records: &mut [T], category_of: impl Fn(&T) -> &str) {
        records.sort_by_key(|r| self.priority_of_display(category_of(r)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, display: &str, priority: Option<i32>, fallback: bool) -> TagEntry {
        TagEntry {
            text: text.into(),
            display_text: display.into(),
            priority,
            fallback,
        }
    }

    fn table() -> TagTable {
        TagTable::compile(
            vec![
                entry("Catching", "Catching", Some(1), false),
                entry("Misc.*", "Misc", Some(99), true),
            ],
            "fixture",
        )
        .unwrap()
    }

    #[test]
    fn test_exact_match() {
        let t = table();
        let tag = t.map("Catching");
        assert_eq!(tag.display_text, "Catching");
        assert_eq!(tag.priority, 1);
    }

    #[test]
    fn test_pattern_match() {
        let t = table();
        let tag = t.map("Miscellaneous Tasks");
        assert_eq!(tag.display_text, "Misc");
        assert_eq!(tag.priority, 99);
    }

    #[test]
    fn test_unmatched_label_maps_to_fallback() {
        let t = table();
        let tag = t.map("Unknown Label");
        assert!(tag.fallback);
        assert_eq!(tag.display_text, "Misc");
    }

    #[test]
    fn test_exact_match_outranks_earlier_pattern_match() {
        // "Event.*" (first in table order) pattern-matches the label, but
        // the later tag matches it exactly; the exact pass runs over the
        // whole table before any pattern is tried.
        let t = TagTable::compile(
            vec![
                entry("Event.*", "Event", Some(1), false),
                entry("Event Week", "Week", Some(2), false),
                entry("Misc", "Misc", None, true),
            ],
            "fixture",
        )
        .unwrap();
        assert_eq!(t.map("Event Week").display_text, "Week");
    }

    #[test]
    fn test_fallback_without_priority_sorts_last() {
        let t = TagTable::compile(
            vec![
                entry("Catching", "Catching", Some(1), false),
                entry("Misc", "Misc", None, true),
            ],
            "fixture",
        )
        .unwrap();
        assert!(t.fallback().priority > 1);
        assert_eq!(t.priority_of_display("Misc"), i32::MAX);
    }

    #[test]
    fn test_table_without_fallback_rejected() {
        let err = TagTable::compile(vec![entry("A", "A", Some(1), false)], "fixture").unwrap_err();
        assert!(matches!(err, ConfigError::MissingFallback { .. }));
    }

    #[test]
    fn test_table_with_two_fallbacks_rejected() {
        let err = TagTable::compile(
            vec![
                entry("A", "A", Some(1), true),
                entry("B", "B", Some(2), true),
            ],
            "fixture",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateFallback { .. }));
    }

    #[test]
    fn test_sort_is_stable_and_ascending() {
        let t = TagTable::compile(
            vec![
                entry("High", "High", Some(1), false),
                entry("Low", "Low", Some(99), false),
                entry("Misc", "Misc", None, true),
            ],
            "fixture",
        )
        .unwrap();

        // (category, marker) pairs; the two priority-1 records must keep
        // their relative order.
        let mut records = vec![("Low", "a"), ("High", "b"), ("High", "c")];
        t.sort_by_priority(&mut records, |r| r.0);
        assert_eq!(records, vec![("High", "b"), ("High", "c"), ("Low", "a")]);
    }

    #[test]
    fn test_fallback_records_sort_after_resolved_priorities() {
        let t = TagTable::compile(
            vec![
                entry("Low", "Low", Some(99), false),
                entry("Misc", "Misc", None, true),
            ],
            "fixture",
        )
        .unwrap();
        let mut records = vec![("Misc", 1), ("Low", 2)];
        t.sort_by_priority(&mut records, |r| r.0);
        assert_eq!(records, vec![("Low", 2), ("Misc", 1)]);
    }
}
