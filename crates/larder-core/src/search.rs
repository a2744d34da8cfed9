//! Case-insensitive text search over recipe cards.
//!
//! A card is visible when the lowercased, trimmed term is a substring of its
//! title, its joined ingredient lines, or its joined instructions. An empty
//! term shows everything. A section stays visible only while it holds at
//! least one visible card.

use crate::catalog::{Catalog, RecipeCard, Section};
use serde::Serialize;

/// Visibility flags, index-aligned with the catalog's cards and sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHits {
    term: String,
    cards: Vec<bool>,
    sections: Vec<bool>,
}

/// Serializable summary of a search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSummary<'a> {
    pub term: &'a str,
    pub recipes: Vec<&'a RecipeCard>,
    pub sections: Vec<&'a Section>,
}

/// Whether `card` matches an already-normalized (lowercase, trimmed) term.
#[must_use]
pub fn card_matches(card: &RecipeCard, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let haystacks = [
        card.title.to_lowercase(),
        join_lower(&card.ingredients),
        join_lower(&card.instructions),
    ];
    haystacks.iter().any(|h| h.contains(term))
}

fn join_lower(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| l.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a search over the whole catalog.
#[must_use]
pub fn search(catalog: &Catalog, term: &str) -> SearchHits {
    let term = term.trim().to_lowercase();
    let cards: Vec<bool> = catalog
        .cards()
        .iter()
        .map(|c| card_matches(c, &term))
        .collect();

    let sections = catalog
        .sections()
        .iter()
        .map(|section| {
            catalog
                .cards()
                .iter()
                .zip(&cards)
                .any(|(card, &visible)| visible && card.section.as_deref() == Some(&section.name))
        })
        .collect();

    SearchHits {
        term,
        cards,
        sections,
    }
}

impl SearchHits {
    /// The normalized term that produced these hits.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn is_section_visible(&self, index: usize) -> bool {
        self.sections.get(index).copied().unwrap_or(false)
    }

    /// Indices of visible cards, in catalog order.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.cards.iter().filter(|&&v| v).count()
    }

    /// Borrow the visible cards and sections out of `catalog`.
    #[must_use]
    pub fn summarize<'a>(&'a self, catalog: &'a Catalog) -> SearchSummary<'a> {
        SearchSummary {
            term: &self.term,
            recipes: self
                .visible_indices()
                .filter_map(|i| catalog.cards().get(i))
                .collect(),
            sections: catalog
                .sections()
                .iter()
                .enumerate()
                .filter_map(|(i, s)| self.is_section_visible(i).then_some(s))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_cards(vec![
            RecipeCard::new("Pea Soup", ["2 cups peas", "1 onion"])
                .with_section("Spring")
                .with_instructions(["Simmer until soft."]),
            RecipeCard::new("Beef Stew", ["1 lb beef", "2 carrots"]).with_section("Winter"),
            RecipeCard::new("Toast", ["bread"]),
        ])
    }

    #[test]
    fn empty_term_shows_everything() {
        let c = catalog();
        let hits = search(&c, "   ");
        assert_eq!(hits.visible_count(), 3);
        assert!(hits.is_section_visible(0));
        assert!(hits.is_section_visible(1));
    }

    #[test]
    fn matches_title_ingredients_and_instructions() {
        let c = catalog();
        assert_eq!(search(&c, "STEW").visible_indices().collect::<Vec<_>>(), [1]);
        assert_eq!(search(&c, "carrots").visible_indices().collect::<Vec<_>>(), [1]);
        assert_eq!(search(&c, "simmer").visible_indices().collect::<Vec<_>>(), [0]);
    }

    #[test]
    fn sections_without_hits_are_hidden() {
        let c = catalog();
        let hits = search(&c, "bread");
        assert!(!hits.is_section_visible(0));
        assert!(!hits.is_section_visible(1));
        assert_eq!(hits.summarize(&c).recipes[0].title, "Toast");
        assert!(hits.summarize(&c).sections.is_empty());
    }

    #[test]
    fn term_spanning_two_lines_matches_joined_text() {
        let c = catalog();
        // ingredient lines are joined with a single space
        assert_eq!(search(&c, "peas 1 onion").visible_count(), 1);
    }

    #[test]
    fn no_match_hides_all() {
        let hits = search(&catalog(), "lasagna");
        assert_eq!(hits.visible_count(), 0);
        assert_eq!(hits.term(), "lasagna");
    }
}
