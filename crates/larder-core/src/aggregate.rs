//! Grocery aggregation engine.
//!
//! [`aggregate`] walks the card source in document order and, for every
//! card whose id is selected, folds its ingredient lines into a mapping
//! keyed by [`normalize_key`]. The first raw line seen for a key becomes its
//! display text; every later line with the same key bumps the count.
//!
//! The result is rebuilt from scratch on every call. Nothing but the
//! canonical key links entries across calls.

use crate::catalog::RecipeCard;
use crate::ident::normalize_key;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One deduplicated grocery line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedEntry {
    /// Canonical key (see [`normalize_key`]).
    pub key: String,
    /// First raw line seen for this key, trimmed.
    pub display: String,
    /// Number of contributing ingredient lines across selected cards.
    pub count: usize,
}

impl AggregatedEntry {
    /// `"{display} (x{count})"` when the line appears more than once.
    #[must_use]
    pub fn label(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.display, self.count)
        } else {
            self.display.clone()
        }
    }
}

/// Output of [`aggregate`]: entries in first-encounter order plus the
/// titles of contributing cards in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    items: Vec<AggregatedEntry>,
    titles: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Aggregation {
    /// Entries in first-encounter order.
    #[must_use]
    pub fn items(&self) -> &[AggregatedEntry] {
        &self.items
    }

    /// Titles of the selected cards, document order.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AggregatedEntry> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Canonical keys in first-encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|e| e.key.as_str())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn add_line(&mut self, raw: &str) {
        let key = normalize_key(raw);
        if key.is_empty() {
            return;
        }
        if let Some(&i) = self.index.get(&key) {
            self.items[i].count += 1;
        } else {
            self.index.insert(key.clone(), self.items.len());
            self.items.push(AggregatedEntry {
                key,
                display: raw.trim().to_string(),
                count: 1,
            });
        }
    }
}

/// Aggregate the ingredient lines of every selected card.
///
/// Selected ids with no matching card are ignored. A card that lists the
/// same ingredient twice contributes twice: deduplication happens only
/// through the mapping.
#[must_use]
pub fn aggregate(selection: &BTreeSet<String>, cards: &[RecipeCard]) -> Aggregation {
    let mut out = Aggregation::default();
    if selection.is_empty() {
        return out;
    }

    for card in cards.iter().filter(|c| selection.contains(&c.id)) {
        let title = card.title.trim();
        if !title.is_empty() {
            out.titles.push(title.to_string());
        }
        for line in &card.ingredients {
            out.add_line(line);
        }
    }

    tracing::trace!(
        selected = selection.len(),
        items = out.len(),
        titles = out.titles.len(),
        "aggregated grocery list"
    );
    out
}
