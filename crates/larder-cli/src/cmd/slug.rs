//! `larder slug`: show the id or canonical key derived from text.

use anyhow::Result;
use clap::Args;
use larder_core::{normalize_key, slugify};
use serde::Serialize;
use std::io::Write;

use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct SlugArgs {
    /// Titles (or ingredient lines with `--key`).
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Print the ingredient dedup key instead of a recipe id.
    #[arg(long)]
    pub key: bool,
}

#[derive(Debug, Serialize)]
struct Derived<'a> {
    input: &'a str,
    output: String,
}

pub fn run_slug(args: &SlugArgs, output: OutputMode) -> Result<()> {
    let derive: fn(&str) -> String = if args.key { normalize_key } else { slugify };
    let rows: Vec<Derived<'_>> = args
        .text
        .iter()
        .map(|input| Derived {
            input,
            output: derive(input),
        })
        .collect();

    render(output, &rows, |rows, w| {
        for row in rows {
            writeln!(w, "{}", row.output)?;
        }
        Ok(())
    })
}
