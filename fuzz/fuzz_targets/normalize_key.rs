#![no_main]

use larder_core::{normalize_key, slugify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let key = normalize_key(data);
    assert_eq!(normalize_key(&key), key);
    assert!(!key.starts_with(' ') && !key.ends_with(' '));
    assert!(!key.contains("  "));

    let slug = slugify(data);
    assert_eq!(slugify(&slug), slug);
    assert!(!slug.starts_with('-') && !slug.ends_with('-'));
});
