#![no_main]

use larder_core::store::{PURCHASED_GROCERIES_KEY, SELECTED_RECIPES_KEY};
use larder_core::{MemoryStore, Persistence};
use libfuzzer_sys::fuzz_target;

// Stored values come from disk and may be anything; reads must never fail.
fuzz_target!(|data: &str| {
    let mut store = MemoryStore::new();
    store.insert_raw(SELECTED_RECIPES_KEY, data);
    store.insert_raw(PURCHASED_GROCERIES_KEY, data);
    let persistence = Persistence::new(store);
    assert!(persistence.selected_recipe_ids().is_ok());
    assert!(persistence.purchased_keys().is_ok());
});
