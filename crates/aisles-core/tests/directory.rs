//! End-to-end behaviour of the directory pipeline against the seed catalog.

use aisles_core::{
    Catalog, Cuisine, CuisineFilter, Event, ProjectionSettings, Query, Selection, SortKey,
    ViewController, ViewState, Viewport,
};

fn names(query: &Query) -> Vec<String> {
    let catalog = Catalog::seed().expect("seed catalog loads");
    query
        .run(&catalog)
        .stores()
        .iter()
        .map(|s| s.name.clone())
        .collect()
}

fn search(term: &str) -> Query {
    Query {
        search: term.to_string(),
        ..Query::default()
    }
}

#[test]
fn search_is_case_insensitive() {
    assert_eq!(names(&search("tokyo")), names(&search("TOKYO")));
    assert_eq!(names(&search("tokyo")), vec!["Tokyo Mart"]);
}

#[test]
fn all_with_empty_search_returns_whole_catalog() {
    assert_eq!(names(&Query::default()).len(), 6);
}

#[test]
fn rating_sort_is_descending_and_stable() {
    let query = Query {
        sort: SortKey::Rating,
        ..Query::default()
    };
    assert_eq!(
        names(&query),
        vec![
            "Spice Bazaar",
            "Tokyo Mart",
            "Dragon Market",
            "Saigon Market",
            "Seoul Foods",
            "Thai Treasure",
        ]
    );
}

#[test]
fn name_sort_is_ascending() {
    assert_eq!(
        names(&Query::default()),
        vec![
            "Dragon Market",
            "Saigon Market",
            "Seoul Foods",
            "Spice Bazaar",
            "Thai Treasure",
            "Tokyo Mart",
        ]
    );
}

#[test]
fn korean_filter_returns_seoul_foods() {
    let query = Query {
        cuisine: CuisineFilter::Only(Cuisine::Korean),
        ..Query::default()
    };
    assert_eq!(names(&query), vec!["Seoul Foods"]);
}

#[test]
fn zip_code_search_matches_every_store() {
    assert_eq!(names(&search("49401")).len(), 6);
}

#[test]
fn unmatched_search_yields_empty_state() {
    let catalog = Catalog::seed().expect("seed catalog loads");
    let listing = search("durian emporium").run(&catalog);
    assert!(listing.is_empty());
    assert_eq!(listing.summary(), "Found 0 stores");
}

#[test]
fn select_then_reselect_returns_to_no_selection() {
    let mut controller = ViewController::new(
        Catalog::seed().expect("seed catalog loads"),
        ViewState::default(),
        &ProjectionSettings::Fit { padding: 40.0 },
        Viewport {
            width: 800.0,
            height: 600.0,
        },
        "https://www.google.com/maps",
    );
    controller.apply(Event::Activate(6));
    assert_eq!(controller.state().selection, Selection::Selected(6));
    controller.apply(Event::Activate(6));
    assert_eq!(controller.state().selection, Selection::None);
}
