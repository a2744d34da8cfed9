//! Whole-flow checks against a file-backed store.

use larder_core::export::build_list_text;
use larder_core::view::{self, Drawer, GroceryView};
use larder_core::{Catalog, FileStore, Persistence, aggregate};

const PAGE: &str = "\
## Spring

### Pancakes

- 2 eggs
- 1 cup milk

1. Whisk.
2. Fry.

### Omelette

- 2 Eggs
- 1 tsp salt

## Summer

### Gazpacho

- 4 tomatoes
- 1 cucumber
";

fn setup() -> (tempfile::TempDir, Catalog, Persistence<FileStore>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = Catalog::from_markdown(PAGE);
    let persistence = Persistence::new(FileStore::new(dir.path().join("state.json")));
    (dir, catalog, persistence)
}

#[test]
fn select_buy_and_export() {
    let (_dir, catalog, mut p) = setup();
    let cards = catalog.cards();

    view::set_selected(&mut p, cards, "pancakes", true).expect("select");
    let badge = view::set_selected(&mut p, cards, "omelette", true).expect("select");
    assert_eq!(badge.remaining(), 3);

    let badge = view::set_purchased(&mut p, cards, "2 eggs", true).expect("buy");
    assert_eq!(badge.launcher_label(), "Grocery List (2)");

    let agg = aggregate(&p.selected_recipe_ids().expect("read"), cards);
    let text = build_list_text(&agg);
    assert!(text.starts_with("Groceries for 2 recipes\nRecipes: Pancakes, Omelette\n\n"));
    assert!(text.contains("• 2 eggs (x2)"));
}

#[test]
fn state_survives_reopen() {
    let (dir, catalog, mut p) = setup();
    view::set_selected(&mut p, catalog.cards(), "gazpacho", true).expect("select");
    view::set_purchased(&mut p, catalog.cards(), "1 cucumber", true).expect("buy");
    drop(p);

    let reopened = Persistence::new(FileStore::new(dir.path().join("state.json")));
    let view = GroceryView::load(&reopened, catalog.cards()).expect("load");
    assert_eq!(view.tags, ["Gazpacho"]);
    assert_eq!(view.count_line, "1 recipe selected");
    let cucumber = view.rows.iter().find(|r| r.key == "1 cucumber").expect("row");
    assert!(cucumber.purchased);
    assert_eq!(view.badge().visible(), Some(1));
}

#[test]
fn deselecting_everything_empties_purchased() {
    let (_dir, catalog, mut p) = setup();
    let cards = catalog.cards();
    view::set_selected(&mut p, cards, "pancakes", true).expect("select");
    view::set_purchased(&mut p, cards, "1 cup milk", true).expect("buy");

    let badge = view::set_selected(&mut p, cards, "pancakes", false).expect("deselect");
    assert_eq!(badge.visible(), None);
    assert!(p.purchased_keys().expect("read").is_empty());
}

#[test]
fn drawer_reflects_changes_only_while_open() {
    let (_dir, catalog, mut p) = setup();
    let cards = catalog.cards();
    let mut drawer = Drawer::default();

    view::set_selected(&mut p, cards, "pancakes", true).expect("select");
    drawer.refresh(&p, cards).expect("refresh");
    assert!(!drawer.is_open());

    drawer.open(&p, cards).expect("open");
    view::set_selected(&mut p, cards, "gazpacho", true).expect("select");
    drawer.refresh(&p, cards).expect("refresh");
    let shown = drawer.view().expect("open view");
    assert_eq!(shown.tags, ["Pancakes", "Gazpacho"]);
    assert_eq!(shown.rows.len(), 4);
}

#[test]
fn corrupt_store_reads_as_empty() {
    let (dir, catalog, _) = setup();
    let path = dir.path().join("state.json");
    std::fs::write(&path, "{ not json").expect("write");
    let p = Persistence::new(FileStore::new(&path));
    assert!(p.selected_recipe_ids().expect("read").is_empty());
    let view = GroceryView::load(&p, catalog.cards()).expect("load");
    assert!(view.is_empty());
}
