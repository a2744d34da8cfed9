//! `larder search`: filter recipe cards by text.

use anyhow::Result;
use clap::Args;
use larder_core::Section;
use larder_core::search::search;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use super::recipes::{RecipeRow, rows, write_pretty_rows, write_text_rows};
use crate::context::{Overrides, Planner};
use crate::output::render_mode;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in titles, ingredients and instructions.
    #[arg(required = true, num_args = 1..)]
    pub term: Vec<String>,

    /// Include ingredient lines.
    #[arg(long, short = 'l')]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    term: &'a str,
    count: usize,
    recipes: Vec<RecipeRow<'a>>,
    sections: Vec<&'a Section>,
}

pub fn run_search(args: &SearchArgs, project_root: &Path, overrides: &Overrides) -> Result<()> {
    let planner = Planner::open(project_root, overrides)?;
    let selection = planner.persistence.selected_recipe_ids()?;
    let hits = search(&planner.catalog, &args.term.join(" "));
    let summary = hits.summarize(&planner.catalog);

    let out = SearchOutput {
        term: summary.term,
        count: summary.recipes.len(),
        recipes: rows(summary.recipes, &selection),
        sections: summary.sections,
    };

    render_mode(
        planner.output_mode(),
        &out,
        |out, w| write_text_rows(&out.recipes, w),
        |out, w| {
            if out.recipes.is_empty() {
                return writeln!(w, "No recipes match \"{}\".", out.term);
            }
            writeln!(
                w,
                "{} recipe{} match \"{}\"",
                out.count,
                if out.count == 1 { "" } else { "s" },
                out.term
            )?;
            write_pretty_rows(&out.recipes, args.long, w)
        },
    )
}
