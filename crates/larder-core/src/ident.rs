//! Identifier and normalization helpers.
//!
//! [`slugify`] turns a recipe title (or section name) into a stable id.
//! [`normalize_key`] turns a raw ingredient line into the canonical key used
//! for deduplication. Both are total and pure.

/// Derive a slug identifier from free text.
///
/// Lowercases and trims, drops every character outside `[a-z0-9\s-]`,
/// and joins the remaining words with single hyphens. The result never
/// starts or ends with a hyphen and never contains `--`.
///
/// ```
/// use larder_core::slugify;
/// assert_eq!(slugify("Spring Salad!"), "spring-salad");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;

    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_sep = true;
        }
        // anything else is stripped without acting as a separator
    }

    out
}

/// Derive the canonical lookup key for an ingredient line.
///
/// Collapses whitespace, strips a leading run of bullets (`•`), dashes and
/// spaces, trims, and lowercases. Blank input yields an empty key, which
/// callers must skip.
///
/// ```
/// use larder_core::normalize_key;
/// assert_eq!(normalize_key("  - 2 cups Flour "), "2 cups flour");
/// assert_eq!(normalize_key(""), "");
/// ```
#[must_use]
pub fn normalize_key(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_start_matches(|c: char| c == '-' || c == '•' || c.is_whitespace())
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_title() {
        assert_eq!(slugify("Spring Salad!"), "spring-salad");
        assert_eq!(slugify("  Roast  Chicken "), "roast-chicken");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("Mac -- and - Cheese"), "mac-and-cheese");
        assert_eq!(slugify("a\t\n b"), "a-b");
    }

    #[test]
    fn slugify_strips_punctuation_without_splitting() {
        assert_eq!(slugify("Mom's Pie"), "moms-pie");
        assert_eq!(slugify("Café Au Lait"), "caf-au-lait");
    }

    #[test]
    fn slugify_never_has_edge_hyphens() {
        assert_eq!(slugify("- Soup -"), "soup");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn normalize_strips_bullets_and_case() {
        assert_eq!(normalize_key("  - 2 cups Flour "), "2 cups flour");
        assert_eq!(normalize_key("• 1  Egg"), "1 egg");
        assert_eq!(normalize_key("-•- salt"), "salt");
    }

    #[test]
    fn normalize_keeps_inner_dashes() {
        assert_eq!(normalize_key("extra-virgin olive oil"), "extra-virgin olive oil");
    }

    #[test]
    fn normalize_blank_is_empty() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("   \t "), "");
        assert_eq!(normalize_key(" - • "), "");
    }
}
