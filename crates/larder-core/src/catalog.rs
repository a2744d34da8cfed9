//! Recipe catalog: the read-only card source the planner works over.
//!
//! A catalog is an ordered list of recipe cards, optionally grouped into
//! sections (seasons, courses). Card order is document order and is the
//! order aggregation walks.
//!
//! Catalogs load from:
//!
//! - Markdown (`.md`, `.markdown`): `##` headings open sections, `###`
//!   headings open recipe cards, bullet lists are ingredient lines and
//!   numbered lists are instruction steps.
//! - JSON / TOML: a [`CatalogDocument`].

use crate::error::{Error, Result};
use crate::ident::slugify;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// One recipe card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    /// Slug of the title. Not guaranteed unique across the catalog.
    pub id: String,
    pub title: String,
    /// Name of the enclosing section, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl RecipeCard {
    /// Build a card, deriving its id from the title.
    pub fn new<I, S>(title: &str, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: slugify(title),
            title: title.trim().to_string(),
            section: None,
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            instructions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    #[must_use]
    pub fn with_instructions<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = steps.into_iter().map(Into::into).collect();
        self
    }
}

/// A named group of cards with an anchor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    /// `slugify(name)`, usable as a link anchor.
    pub anchor: String,
}

impl Section {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            anchor: slugify(name),
        }
    }
}

/// Ordered recipe cards and sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    sections: Vec<Section>,
    cards: Vec<RecipeCard>,
}

impl Catalog {
    /// Build a catalog from cards, deriving sections from their `section`
    /// fields in first-seen order.
    #[must_use]
    pub fn from_cards(cards: Vec<RecipeCard>) -> Self {
        let mut catalog = Self::default();
        for card in cards {
            catalog.push_card(card);
        }
        catalog
    }

    fn push_section(&mut self, name: &str) {
        if !self.sections.iter().any(|s| s.name == name.trim()) {
            self.sections.push(Section::new(name));
        }
    }

    fn push_card(&mut self, card: RecipeCard) {
        if card.title.is_empty() {
            debug!("skipping recipe card without a title");
            return;
        }
        if let Some(section) = card.section.clone() {
            self.push_section(&section);
        }
        self.cards.push(card);
    }

    #[must_use]
    pub fn cards(&self) -> &[RecipeCard] {
        &self.cards
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// First card carrying `id`.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&RecipeCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Resolve a user-supplied recipe reference to a card id.
    ///
    /// Accepts an id, or a title (matched through [`slugify`]).
    ///
    /// # Errors
    ///
    /// [`Error::RecipeNotFound`] when neither form matches a card.
    pub fn resolve(&self, reference: &str) -> Result<&RecipeCard> {
        if let Some(card) = self.by_id(reference.trim()) {
            return Ok(card);
        }
        let slug = slugify(reference);
        self.by_id(&slug)
            .ok_or_else(|| Error::RecipeNotFound(reference.to_string()))
    }

    /// Load a catalog, picking the parser from the file extension.
    ///
    /// # Errors
    ///
    /// Missing files, unknown extensions and malformed JSON/TOML documents.
    /// Markdown never fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CatalogNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(Error::Storage {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let parse_err = |reason: String| Error::CatalogParse {
            path: path.to_path_buf(),
            reason,
        };

        let catalog = match ext.as_str() {
            "md" | "markdown" => Self::from_markdown(&content),
            "json" => serde_json::from_str::<CatalogDocument>(&content)
                .map_err(|e| parse_err(e.to_string()))?
                .into_catalog(),
            "toml" => toml::from_str::<CatalogDocument>(&content)
                .map_err(|e| parse_err(e.to_string()))?
                .into_catalog(),
            _ => {
                return Err(Error::UnsupportedCatalogFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        debug!(
            path = %path.display(),
            cards = catalog.len(),
            sections = catalog.sections.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a Markdown recipe page.
    #[must_use]
    pub fn from_markdown(source: &str) -> Self {
        MarkdownReader::default().read(source)
    }
}

/// Serialized catalog layout for JSON and TOML sources.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub sections: Vec<SectionDocument>,
    #[serde(default)]
    pub recipes: Vec<RecipeDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SectionDocument {
    pub name: String,
    #[serde(default)]
    pub recipes: Vec<RecipeDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl CatalogDocument {
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        let mut catalog = Catalog::default();
        for section in self.sections {
            catalog.push_section(&section.name);
            for recipe in section.recipes {
                catalog.push_card(recipe.into_card(Some(&section.name)));
            }
        }
        for recipe in self.recipes {
            catalog.push_card(recipe.into_card(None));
        }
        catalog
    }
}

impl RecipeDocument {
    fn into_card(self, section: Option<&str>) -> RecipeCard {
        let mut card = RecipeCard::new(&self.title, self.ingredients)
            .with_instructions(self.instructions);
        card.section = section.map(|s| s.trim().to_string());
        card
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ingredients,
    Instructions,
}

/// Streaming state for the Markdown loader.
#[derive(Default)]
struct MarkdownReader {
    catalog: Catalog,
    section: Option<String>,
    card: Option<RecipeCard>,
    heading: Option<(HeadingLevel, String)>,
    lists: Vec<ListKind>,
    items: Vec<String>,
}

impl MarkdownReader {
    fn read(mut self, source: &str) -> Catalog {
        for event in Parser::new(source) {
            self.handle(event);
        }
        self.finish_card();
        self.catalog
    }

    fn finish_card(&mut self) {
        if let Some(card) = self.card.take() {
            self.catalog.push_card(card);
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(buf) = self.items.last_mut() {
            buf.push_str(text);
        } else if let Some((_, buf)) = self.heading.as_mut() {
            buf.push_str(text);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.heading = Some((level, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((level, text)) = self.heading.take() else {
                    return;
                };
                match level {
                    HeadingLevel::H1 => {}
                    HeadingLevel::H2 => {
                        self.finish_card();
                        let name = text.trim().to_string();
                        if !name.is_empty() {
                            self.catalog.push_section(&name);
                            self.section = Some(name);
                        }
                    }
                    HeadingLevel::H3 => {
                        self.finish_card();
                        let mut card = RecipeCard::new(&text, Vec::<String>::new());
                        card.section.clone_from(&self.section);
                        self.card = Some(card);
                    }
                    _ => {}
                }
            }
            Event::Start(Tag::List(start)) => {
                self.lists.push(if start.is_some() {
                    ListKind::Instructions
                } else {
                    ListKind::Ingredients
                });
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => self.items.push(String::new()),
            Event::End(TagEnd::Item) => {
                let Some(text) = self.items.pop() else {
                    return;
                };
                let text = text.trim().to_string();
                let (Some(card), Some(kind)) = (self.card.as_mut(), self.lists.last()) else {
                    return;
                };
                if text.is_empty() {
                    return;
                }
                match kind {
                    ListKind::Ingredients => card.ingredients.push(text),
                    ListKind::Instructions => card.instructions.push(text),
                }
            }
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::SoftBreak | Event::HardBreak => self.push_text(" "),
            _ => {}
        }
    }
}
