//! `larder recipes`: list the catalog with selection state.

use anyhow::Result;
use clap::Args;
use larder_core::RecipeCard;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use crate::context::{Overrides, Planner};
use crate::output::{pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct RecipesArgs {
    /// Only show recipes in this section (name or anchor).
    #[arg(long)]
    pub section: Option<String>,

    /// Only show recipes selected for the week.
    #[arg(long)]
    pub selected: bool,

    /// Include ingredient lines.
    #[arg(long, short = 'l')]
    pub long: bool,
}

/// A card plus whether it is selected for the week.
#[derive(Debug, Serialize)]
pub struct RecipeRow<'a> {
    #[serde(flatten)]
    pub card: &'a RecipeCard,
    pub selected: bool,
}

pub fn rows<'a>(
    cards: impl IntoIterator<Item = &'a RecipeCard>,
    selection: &BTreeSet<String>,
) -> Vec<RecipeRow<'a>> {
    cards
        .into_iter()
        .map(|card| RecipeRow {
            card,
            selected: selection.contains(&card.id),
        })
        .collect()
}

pub fn write_text_rows(rows: &[RecipeRow<'_>], w: &mut dyn Write) -> std::io::Result<()> {
    for row in rows {
        writeln!(
            w,
            "{}\t{}\t{}",
            if row.selected { "*" } else { "-" },
            row.card.id,
            row.card.title
        )?;
    }
    Ok(())
}

pub fn write_pretty_rows(
    rows: &[RecipeRow<'_>],
    long: bool,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    let mut current: Option<Option<&str>> = None;
    for row in rows {
        let section = row.card.section.as_deref();
        if current != Some(section) {
            if let Some(name) = section {
                writeln!(w)?;
                pretty_section(w, name)?;
            }
            current = Some(section);
        }
        let mark = if row.selected { "[x]" } else { "[ ]" };
        writeln!(w, "{mark} {:<28} {}", row.card.title, row.card.id)?;
        if long {
            for line in &row.card.ingredients {
                writeln!(w, "      • {line}")?;
            }
        }
    }
    Ok(())
}

pub fn run_recipes(args: &RecipesArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    let planner = Planner::open(project_root, overrides)?;
    let selection = planner.persistence.selected_recipe_ids()?;

    let wanted = args.section.as_deref().map(str::trim);
    let cards = planner.catalog.cards().iter().filter(|card| {
        let in_section = wanted.is_none_or(|want| {
            card.section.as_deref().is_some_and(|name| {
                name.eq_ignore_ascii_case(want) || larder_core::slugify(name) == want
            })
        });
        in_section && (!args.selected || selection.contains(&card.id))
    });
    let rows = rows(cards, &selection);

    render_mode(
        planner.output_mode(),
        &rows,
        |rows, w| write_text_rows(rows, w),
        |rows, w| {
            if rows.is_empty() {
                return writeln!(w, "No recipes.");
            }
            write_pretty_rows(rows, args.long, w)?;
            writeln!(w)?;
            writeln!(w, "{}", larder_core::view::count_line(selection_count(rows)))
        },
    )
}

fn selection_count(rows: &[RecipeRow<'_>]) -> usize {
    rows.iter().filter(|r| r.selected).count()
}
