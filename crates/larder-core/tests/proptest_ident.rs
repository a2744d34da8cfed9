use larder_core::{RecipeCard, aggregate, normalize_key, slugify};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn ingredient_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \\-•]{0,3}[0-9]{1,2} (cup|tsp|tbsp)? ?[A-Za-z]{1,8}( [a-z]{1,6})?[ ]{0,2}",
        "\\PC{0,24}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn slugify_is_idempotent(title in "\\PC{0,40}") {
        let once = slugify(&title);
        prop_assert_eq!(slugify(&once), once.clone());
    }

    #[test]
    fn slugify_has_no_stray_hyphens(title in "\\PC{0,40}") {
        let slug = slugify(&title);
        prop_assert!(!slug.starts_with('-'));
        prop_assert!(!slug.ends_with('-'));
        prop_assert!(!slug.contains("--"));
        prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn normalize_key_is_idempotent(line in ingredient_line()) {
        let key = normalize_key(&line);
        prop_assert_eq!(normalize_key(&key), key.clone());
        prop_assert!(!key.contains("  "));
        prop_assert_eq!(key.trim(), key.as_str());
    }

    #[test]
    fn case_and_spacing_variants_share_a_key(line in "[A-Za-z0-9]{1,6}( [A-Za-z0-9]{1,6}){0,3}") {
        let noisy = format!("  • {}  ", line.to_uppercase().replace(' ', "   "));
        prop_assert_eq!(normalize_key(&noisy), normalize_key(&line));
    }

    #[test]
    fn counts_add_up_to_contributing_lines(
        recipes in prop::collection::vec(prop::collection::vec(ingredient_line(), 0..6), 1..6),
        pick in prop::collection::vec(any::<bool>(), 6),
    ) {
        let cards: Vec<RecipeCard> = recipes
            .iter()
            .enumerate()
            .map(|(i, lines)| RecipeCard::new(&format!("Recipe {i}"), lines.iter().cloned()))
            .collect();
        let selection: BTreeSet<String> = cards
            .iter()
            .zip(&pick)
            .filter(|(_, picked)| **picked)
            .map(|(card, _)| card.id.clone())
            .collect();

        let agg = aggregate(&selection, &cards);
        let expected: usize = cards
            .iter()
            .filter(|c| selection.contains(&c.id))
            .flat_map(|c| &c.ingredients)
            .filter(|line| !normalize_key(line).is_empty())
            .count();
        let total: usize = agg.items().iter().map(|e| e.count).sum();
        prop_assert_eq!(total, expected);
        prop_assert_eq!(agg.titles().len(), selection.len());
        for entry in agg.items() {
            prop_assert_eq!(normalize_key(&entry.display), entry.key.clone());
        }
    }
}

#[test]
fn known_values() {
    assert_eq!(slugify("Spring Salad!"), "spring-salad");
    assert_eq!(normalize_key("  - 2 cups Flour "), "2 cups flour");
    assert_eq!(normalize_key(""), "");
}
