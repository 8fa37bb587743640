use crate::category::{CategoryTag, TagTable};
use crate::dictionary::RuleTable;
use crate::error::TranslateError;
use crate::normalize::TypeLexicon;
use crate::resolver::{IdentifierLookup, resolve_placeholders};

/// The translation & categorization engine for one source.
///
/// Borrows its tables: they are loaded once at startup and shared read-only,
/// so engines are cheap to construct per source and safe to use from
/// parallel callers. Every method is a pure function of its inputs.
pub struct Engine<'a> {
    rules: &'a RuleTable,
    lexicon: &'a TypeLexicon,
    tags: &'a TagTable,
    lookup: &'a dyn IdentifierLookup,
}

impl<'a> Engine<'a> {
    pub fn new(
        rules: &'a RuleTable,
        lexicon: &'a TypeLexicon,
        tags: &'a TagTable,
        lookup: &'a dyn IdentifierLookup,
    ) -> Self {
        Engine {
            rules,
            lexicon,
            tags,
            lookup,
        }
    }

    /// Raw scraped text → localized text.
    ///
    /// Pipeline: first-match rule rendering, then type-token normalization,
    /// then placeholder resolution. Text no rule matches passes through the
    /// later stages unchanged apart from token normalization.
    pub fn translate(&self, raw: &str) -> Result<String, TranslateError> {
        let rendered = self.rules.translate(raw);
        let normalized = self.lexicon.normalize(&rendered);
        resolve_placeholders(&normalized, self.lookup)
    }

    /// Raw category label → resolved tag. Total; worst case the fallback.
    pub fn categorize(&self, raw_label: &str) -> &CategoryTag {
        self.tags.map(raw_label)
    }
}
