use std::fs;
use std::path::Path;

use regex::{Captures, Regex, RegexBuilder};
use serde::Deserialize;

use crate::error::ConfigError;

// ── Table entries ────────────────────────────────────────────────────────

/// One entry of a description dictionary file.
///
/// `displayText` doubles as the render template: each `%s` slot is filled
/// with the corresponding capture group of `pattern`, left to right.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntry {
    pub pattern: String,
    pub display_text: String,
}

#[derive(Debug)]
struct Rule {
    pattern: Regex,
    template: String,
}

// ── Rule table ───────────────────────────────────────────────────────────

/// Ordered, immutable translation rule table.
///
/// First match wins. Table order is part of the contract: two rules that
/// could both match an input are disambiguated by their position in the
/// file, never by a most-specific-wins heuristic.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Load and compile a dictionary file, validating every template
    /// against its pattern's capture-group count.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let entries: Vec<RuleEntry> = serde_json::from_str(&fs::read_to_string(path)?)?;
        Self::compile(entries)
    }

    pub fn compile(entries: Vec<RuleEntry>) -> Result<Self, ConfigError> {
        let mut rules = Vec::with_capacity(entries.len());

        for entry in entries {
            let pattern = RegexBuilder::new(&entry.pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ConfigError::BadPattern {
                    pattern: entry.pattern.clone(),
                    source,
                })?;

            // A template asking for more slots than the pattern can capture
            // would render garbage at runtime; reject it here while the
            // table is being loaded.
            let slots = count_slots(&entry.display_text);
            let groups = pattern.captures_len() - 1;
            if slots > groups {
                return Err(ConfigError::MalformedTemplate {
                    pattern: entry.pattern,
                    template: entry.display_text,
                    slots,
                    groups,
                });
            }

            rules.push(Rule {
                pattern,
                template: entry.display_text,
            });
        }

        Ok(RuleTable { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Translate a raw description through the first matching rule.
    ///
    /// No matching rule is not an error: the raw text is returned unchanged
    /// so unknown descriptions pass through to the output as-is.
    pub fn translate(&self, raw: &str) -> String {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(raw) {
                return render(&rule.template, &caps);
            }
        }
        raw.to_string()
    }
}

/// Fill each `%s` slot with the next capture group, left to right.
fn render(template: &str, caps: &Captures) -> String {
    let mut groups = (1..caps.len()).map(|i| caps.get(i).map_or("", |m| m.as_str()));
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find("%s") {
        out.push_str(&rest[..idx]);
        out.push_str(groups.next().unwrap_or(""));
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

/// Count the `%s` slots a template will consume.
fn count_slots(template: &str) -> usize {
    template.matches("%s").count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> RuleTable {
        RuleTable::compile(
            entries
                .iter()
                .map(|(p, t)| RuleEntry {
                    pattern: p.to_string(),
                    display_text: t.to_string(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_matched_rule_renders_captures() {
        let t = table(&[(r"^Catch (\d+) Pokémon$", "Catch %s Pokémon")]);
        assert_eq!(t.translate("Catch 5 Pokémon"), "Catch 5 Pokémon");
    }

    #[test]
    fn test_localized_template() {
        let t = table(&[(r"^Catch (\d+) Pokémon$", "捕捉 %s 隻寶可夢")]);
        assert_eq!(t.translate("Catch 12 Pokémon"), "捕捉 12 隻寶可夢");
    }

    #[test]
    fn test_no_match_passes_through_unchanged() {
        let t = table(&[(r"^Catch (\d+) Pokémon$", "捕捉 %s 隻寶可夢")]);
        assert_eq!(t.translate("Win 5 raids"), "Win 5 raids");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let t = table(&[(r"^catch (\d+) pokémon$", "捕捉 %s 隻寶可夢")]);
        assert_eq!(t.translate("CATCH 3 POKÉMON"), "捕捉 3 隻寶可夢");
    }

    #[test]
    fn test_first_match_wins_in_table_order() {
        // Both rules match; the earlier one must be chosen even though the
        // later one is more specific.
        let t = table(&[
            (r"^Catch (\d+)", "first: %s"),
            (r"^Catch (\d+) Pokémon$", "second: %s"),
        ]);
        assert_eq!(t.translate("Catch 5 Pokémon"), "first: 5");
    }

    #[test]
    fn test_multiple_slots_fill_left_to_right() {
        let t = table(&[(
            r"^Make (\d+) (Nice|Great|Excellent) Throws$",
            "投出 %s 次%s球",
        )]);
        assert_eq!(t.translate("Make 3 Great Throws"), "投出 3 次Great球");
    }

    #[test]
    fn test_unmatched_optional_group_renders_empty() {
        let t = table(&[(r"^Spin (\d+)( new)? PokéStops$", "轉 %s 個%s補給站")]);
        assert_eq!(t.translate("Spin 2 PokéStops"), "轉 2 個補給站");
    }

    #[test]
    fn test_template_with_too_many_slots_is_rejected_at_load() {
        let err = RuleTable::compile(vec![RuleEntry {
            pattern: r"^Catch (\d+)$".to_string(),
            display_text: "%s and %s".to_string(),
        }])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedTemplate {
                slots: 2,
                groups: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_bad_pattern_is_rejected_at_load() {
        let err = RuleTable::compile(vec![RuleEntry {
            pattern: "(unclosed".to_string(),
            display_text: "x".to_string(),
        }])
        .unwrap_err();
        assert!(matches!(err, ConfigError::BadPattern { .. }));
    }
}
