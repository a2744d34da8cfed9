#![no_main]

use larder_core::{Catalog, aggregate};
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

fuzz_target!(|data: &str| {
    let catalog = Catalog::from_markdown(data);
    let every: BTreeSet<String> = catalog.cards().iter().map(|c| c.id.clone()).collect();
    let agg = aggregate(&every, catalog.cards());

    let lines: usize = catalog.cards().iter().map(|c| c.ingredients.len()).sum();
    let counted: usize = agg.items().iter().map(|e| e.count).sum();
    assert!(counted <= lines);
    assert!(agg.titles().len() <= catalog.len());
});
