use std::sync::LazyLock;

use regex::Regex;

use crate::error::TranslateError;

// Marker syntax: {{payload}}. The payload is an arbitrary raw species name
// produced by the dictionary templates.
static MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").unwrap());

/// A resolved identifier: localized display name plus the source-language
/// variant it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub name: String,
    pub original_name: String,
}

/// Capability for turning a raw name payload into a canonical identifier.
///
/// Implementations are fuzzy by contract: the payload is whatever text the
/// source page used, not a guaranteed canonical spelling.
pub trait IdentifierLookup {
    fn resolve(&self, payload: &str) -> Option<ResolvedName>;
}

/// Replace every `{{payload}}` marker with the looked-up display name.
///
/// One scan, every occurrence: the lookup's output never contains marker
/// syntax, so no fixed-point re-scan is needed. After a successful pass the
/// returned text contains zero markers. A payload the lookup cannot resolve
/// fails the whole record; partially-resolved text is never returned.
pub fn resolve_placeholders(
    text: &str,
    lookup: &dyn IdentifierLookup,
) -> Result<String, TranslateError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in MARKER.captures_iter(text) {
        let whole = caps.get(0).unwrap(); // group 0 always present
        let payload = caps.get(1).map_or("", |m| m.as_str());

        let resolved =
            lookup
                .resolve(payload)
                .ok_or_else(|| TranslateError::UnresolvedPlaceholder {
                    payload: payload.to_string(),
                })?;

        out.push_str(&text[last..whole.start()]);
        out.push_str(&resolved.name);
        last = whole.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}
