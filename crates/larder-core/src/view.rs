//! Presentation model for the grocery drawer.
//!
//! Everything here is derived from an [`Aggregation`] plus the purchased
//! set; front ends (CLI, TUI) only lay the result out. The mutating helpers
//! take a [`Persistence`] so the stored sets stay the single source of
//! truth between renders.

use crate::aggregate::{Aggregation, aggregate};
use crate::catalog::RecipeCard;
use crate::error::{Error, Result};
use crate::store::{KeyValueStore, Persistence};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Launcher text without a badge.
pub const LAUNCHER_LABEL: &str = "Grocery List";

/// Locale-style ordering for canonical keys.
///
/// Compares letters and digits case-insensitively first, ignoring
/// punctuation and spacing, then falls back to plain ordering so the result
/// is total.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
    }
    primary(a).cmp(primary(b)).then_with(|| a.cmp(b))
}

/// `"N recipe selected"` / `"N recipes selected"`.
#[must_use]
pub fn count_line(n: usize) -> String {
    format!("{n} recipe{} selected", if n == 1 { "" } else { "s" })
}

/// Remaining-items badge: entries not yet purchased.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub total: usize,
    pub purchased: usize,
}

impl Badge {
    #[must_use]
    pub fn compute(aggregation: &Aggregation, purchased: &BTreeSet<String>) -> Self {
        let bought = aggregation.keys().filter(|k| purchased.contains(*k)).count();
        Self {
            total: aggregation.len(),
            purchased: bought,
        }
    }

    #[must_use]
    pub const fn remaining(self) -> usize {
        self.total.saturating_sub(self.purchased)
    }

    /// The badge number, shown only when something is left to buy.
    #[must_use]
    pub const fn visible(self) -> Option<usize> {
        match self.remaining() {
            0 => None,
            n => Some(n),
        }
    }

    /// Launcher text: `"Grocery List (N)"` or `"Grocery List"`.
    #[must_use]
    pub fn launcher_label(self) -> String {
        self.visible().map_or_else(
            || LAUNCHER_LABEL.to_string(),
            |n| format!("{LAUNCHER_LABEL} ({n})"),
        )
    }
}

/// One row of the drawer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroceryRow {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub purchased: bool,
}

/// Everything the drawer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroceryView {
    /// Rows sorted by key with [`locale_cmp`].
    pub rows: Vec<GroceryRow>,
    /// Selected recipe titles, document order.
    pub tags: Vec<String>,
    pub count_line: String,
    pub remaining: usize,
}

impl GroceryView {
    #[must_use]
    pub fn build(aggregation: &Aggregation, purchased: &BTreeSet<String>) -> Self {
        let mut rows: Vec<GroceryRow> = aggregation
            .items()
            .iter()
            .map(|entry| GroceryRow {
                key: entry.key.clone(),
                label: entry.label(),
                count: entry.count,
                purchased: purchased.contains(&entry.key),
            })
            .collect();
        rows.sort_by(|a, b| locale_cmp(&a.key, &b.key));

        Self {
            rows,
            tags: aggregation.titles().to_vec(),
            count_line: count_line(aggregation.titles().len()),
            remaining: Badge::compute(aggregation, purchased).remaining(),
        }
    }

    /// Rebuild straight from persisted state.
    pub fn load<S: KeyValueStore>(
        persistence: &Persistence<S>,
        cards: &[RecipeCard],
    ) -> Result<Self> {
        let selection = persistence.selected_recipe_ids()?;
        let purchased = persistence.purchased_keys()?;
        Ok(Self::build(&aggregate(&selection, cards), &purchased))
    }

    /// Whether to show the empty-list placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Badge counts for the rows on display.
    #[must_use]
    pub fn badge(&self) -> Badge {
        let purchased = self.rows.iter().filter(|row| row.purchased).count();
        Badge {
            total: self.rows.len(),
            purchased,
        }
    }
}

/// Mark (or unmark) one canonical key as purchased, returning the new badge.
///
/// The key must be on the current list; stale keys would otherwise sit in
/// the purchased set until the next selection change.
///
/// # Errors
///
/// [`Error::IngredientNotFound`] for keys not on the list, plus any
/// storage failure.
pub fn set_purchased<S: KeyValueStore>(
    persistence: &mut Persistence<S>,
    cards: &[RecipeCard],
    key: &str,
    purchased: bool,
) -> Result<Badge> {
    set_purchased_all(persistence, cards, &[key], purchased)
}

/// Mark (or unmark) several keys in one write.
///
/// Every key is checked against the list before anything is stored, so a
/// rejected batch leaves the purchased set untouched.
///
/// # Errors
///
/// [`Error::IngredientNotFound`] for the first key not on the list, plus
/// any storage failure.
pub fn set_purchased_all<S: KeyValueStore, K: AsRef<str>>(
    persistence: &mut Persistence<S>,
    cards: &[RecipeCard],
    keys: &[K],
    purchased: bool,
) -> Result<Badge> {
    let selection = persistence.selected_recipe_ids()?;
    let aggregation = aggregate(&selection, cards);
    for key in keys {
        if !aggregation.contains_key(key.as_ref()) {
            return Err(Error::IngredientNotFound(key.as_ref().to_string()));
        }
    }

    let mut stored = persistence.purchased_keys()?;
    let mut changed = false;
    for key in keys {
        let key = key.as_ref();
        changed |= if purchased {
            stored.insert(key.to_string())
        } else {
            stored.remove(key)
        };
    }
    if changed {
        persistence.set_purchased_keys(&stored)?;
    }
    debug!(count = keys.len(), purchased, changed, "purchased state toggled");
    Ok(Badge::compute(&aggregation, &stored))
}

/// Apply a selection change: store the new set, then run the cleanup.
pub fn set_selected<S: KeyValueStore>(
    persistence: &mut Persistence<S>,
    cards: &[RecipeCard],
    id: &str,
    selected: bool,
) -> Result<Badge> {
    let mut ids = persistence.selected_recipe_ids()?;
    if selected {
        ids.insert(id.to_string());
    } else {
        ids.remove(id);
    }
    persistence.set_selected_recipe_ids(ids)?;
    refresh_after_selection_change(persistence, cards)
}

/// Prune the purchased set to keys on the current list and recompute the
/// badge. Runs after every selection change.
pub fn refresh_after_selection_change<S: KeyValueStore>(
    persistence: &mut Persistence<S>,
    cards: &[RecipeCard],
) -> Result<Badge> {
    let selection = persistence.selected_recipe_ids()?;
    let aggregation = aggregate(&selection, cards);
    let purchased = persistence.purchased_keys()?;

    let cleaned: BTreeSet<String> = purchased
        .iter()
        .filter(|k| aggregation.contains_key(k))
        .cloned()
        .collect();
    if cleaned.len() != purchased.len() {
        debug!(
            dropped = purchased.len() - cleaned.len(),
            "pruned purchased keys no longer on the list"
        );
    }
    persistence.set_purchased_keys(&cleaned)?;
    Ok(Badge::compute(&aggregation, &cleaned))
}

/// Drawer visibility. Opening rebuilds from persisted state; closing keeps
/// everything as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Drawer {
    #[default]
    Closed,
    Open(GroceryView),
}

impl Drawer {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Open (or re-render while open) from the stored sets.
    pub fn open<S: KeyValueStore>(
        &mut self,
        persistence: &Persistence<S>,
        cards: &[RecipeCard],
    ) -> Result<()> {
        *self = Self::Open(GroceryView::load(persistence, cards)?);
        Ok(())
    }

    /// Re-render only when already open.
    pub fn refresh<S: KeyValueStore>(
        &mut self,
        persistence: &Persistence<S>,
        cards: &[RecipeCard],
    ) -> Result<()> {
        if self.is_open() {
            self.open(persistence, cards)?;
        }
        Ok(())
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub const fn view(&self) -> Option<&GroceryView> {
        match self {
            Self::Open(view) => Some(view),
            Self::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cards() -> Vec<RecipeCard> {
        vec![
            RecipeCard::new("Pancakes", ["2 eggs", "1 cup milk"]),
            RecipeCard::new("Omelette", ["2 Eggs", "1 tsp salt"]),
        ]
    }

    fn planner() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new())
    }

    #[test]
    fn rows_sort_by_key_and_label_counts() {
        let cards = cards();
        let mut p = planner();
        set_selected(&mut p, &cards, "pancakes", true).expect("select");
        set_selected(&mut p, &cards, "omelette", true).expect("select");

        let view = GroceryView::load(&p, &cards).expect("view");
        let labels: Vec<_> = view.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["1 cup milk", "1 tsp salt", "2 eggs (x2)"]);
        assert_eq!(view.tags, ["Pancakes", "Omelette"]);
        assert_eq!(view.count_line, "2 recipes selected");
        assert_eq!(view.badge().visible(), Some(3));
        assert_eq!(view.badge().launcher_label(), "Grocery List (3)");
    }

    #[test]
    fn count_line_is_singular_for_one() {
        assert_eq!(count_line(1), "1 recipe selected");
        assert_eq!(count_line(0), "0 recipes selected");
    }

    #[test]
    fn purchasing_everything_hides_badge() {
        let cards = cards();
        let mut p = planner();
        set_selected(&mut p, &cards, "pancakes", true).expect("select");

        let badge = set_purchased(&mut p, &cards, "2 eggs", true).expect("buy");
        assert_eq!(badge.visible(), Some(1));
        assert_eq!(badge.launcher_label(), "Grocery List (1)");

        let badge = set_purchased(&mut p, &cards, "1 cup milk", true).expect("buy");
        assert_eq!(badge.visible(), None);
        assert_eq!(badge.launcher_label(), "Grocery List");

        let view = GroceryView::load(&p, &cards).expect("view");
        assert!(view.rows.iter().all(|r| r.purchased));
    }

    #[test]
    fn purchasing_unknown_key_is_rejected() {
        let cards = cards();
        let mut p = planner();
        let err = set_purchased(&mut p, &cards, "caviar", true).expect_err("not listed");
        assert!(matches!(err, Error::IngredientNotFound(_)));
    }

    #[test]
    fn batch_with_unknown_key_stores_nothing() {
        let cards = cards();
        let mut p = planner();
        set_selected(&mut p, &cards, "pancakes", true).expect("select");

        let err = set_purchased_all(&mut p, &cards, &["2 eggs", "caviar"], true)
            .expect_err("caviar is not listed");
        assert!(matches!(err, Error::IngredientNotFound(ref k) if k == "caviar"));
        assert!(p.purchased_keys().expect("read").is_empty());

        let badge = set_purchased_all(&mut p, &cards, &["2 eggs", "1 cup milk"], true)
            .expect("buy both");
        assert_eq!(badge.visible(), None);
    }

    #[test]
    fn deselecting_all_prunes_purchased() {
        let cards = cards();
        let mut p = planner();
        set_selected(&mut p, &cards, "pancakes", true).expect("select");
        set_selected(&mut p, &cards, "omelette", true).expect("select");
        set_purchased(&mut p, &cards, "1 tsp salt", true).expect("buy");
        set_purchased(&mut p, &cards, "2 eggs", true).expect("buy");

        set_selected(&mut p, &cards, "omelette", false).expect("deselect");
        // eggs still listed through pancakes, salt is gone
        let purchased = p.purchased_keys().expect("read");
        assert_eq!(purchased.into_iter().collect::<Vec<_>>(), ["2 eggs"]);

        set_selected(&mut p, &cards, "pancakes", false).expect("deselect");
        assert!(p.purchased_keys().expect("read").is_empty());
    }

    #[test]
    fn drawer_opens_from_persisted_state_and_close_keeps_it() {
        let cards = cards();
        let mut p = planner();
        let mut drawer = Drawer::default();
        assert!(!drawer.is_open());

        set_selected(&mut p, &cards, "pancakes", true).expect("select");
        drawer.refresh(&p, &cards).expect("refresh closed");
        assert!(!drawer.is_open());

        drawer.open(&p, &cards).expect("open");
        assert_eq!(drawer.view().map(|v| v.rows.len()), Some(2));

        drawer.close();
        assert!(drawer.view().is_none());
        assert_eq!(p.selected_recipe_ids().expect("read").len(), 1);

        drawer.open(&p, &cards).expect("reopen");
        assert_eq!(drawer.view().map(|v| v.tags.clone()), Some(vec!["Pancakes".into()]));
    }

    #[test]
    fn locale_cmp_ignores_case_and_punctuation_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a-b", "ab"), Ordering::Less);
        assert_eq!(locale_cmp("(optional) basil", "apple"), Ordering::Greater);
    }
}
