use dbpager::catalog::{DisplayCase, TableCatalog};
use dbpager::format_toon::{catalog_to_toon, grid_to_toon};

use crate::common::{navigator, text_grid, users_source};

/// Decode TOON back to serde_json::Value (no type coercion).
fn decode(toon: &str) -> serde_json::Value {
    toon_format::decode_no_coerce(toon).unwrap()
}

#[test]
fn grid_rows_become_objects_keyed_by_header() {
    let mut nav = navigator(users_source(), 100);
    nav.on_table_selected(&"USERS".into()).unwrap();
    let toon = grid_to_toon(nav.sink()).unwrap();

    let decoded = decode(&toon);
    let rows = decoded.as_array().expect("output should be a root array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ID"], "1");
    assert_eq!(rows[0]["NAME"], "ann");
    assert_eq!(rows[0]["CREATED"], "2020-01-01");
    // The NULL marker is written as shown on screen.
    assert_eq!(rows[1]["NAME"], "NULL");
}

#[test]
fn keys_keep_header_order() {
    let grid = text_grid(&["zeta", "alpha"], &[&["z", "a"]]);
    let toon = grid_to_toon(&grid).unwrap();
    let zeta = toon.find("zeta").unwrap();
    let alpha = toon.find("alpha").unwrap();
    assert!(zeta < alpha, "Got: {}", toon);
}

#[test]
fn empty_table_keeps_its_header() {
    let grid = text_grid(&["a", "b"], &[]);
    assert_eq!(grid_to_toon(&grid).unwrap(), "[0]{a,b}:\n");
}

#[test]
fn catalog_lists_name_and_display() {
    let catalog = TableCatalog::from_names(
        vec!["tracks".to_string(), "Albums".to_string()],
        DisplayCase::Upper,
    );
    let decoded = decode(&catalog_to_toon(&catalog).unwrap());
    let tables = decoded.as_array().unwrap();
    assert_eq!(tables[0]["name"], "Albums");
    assert_eq!(tables[0]["display"], "ALBUMS");
    assert_eq!(tables[1]["name"], "tracks");
    assert_eq!(tables[1]["display"], "TRACKS");
}

#[test]
fn empty_catalog() {
    let catalog = TableCatalog::from_names(vec![], DisplayCase::Upper);
    assert_eq!(catalog_to_toon(&catalog).unwrap(), "[0]{name,display}:\n");
}
