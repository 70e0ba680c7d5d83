//! Non-interactive commands: `list` and `directions`.

use aisles_core::{directions_url, AppConfig, Catalog, Listing, Query, StoreId};

const NAME_WIDTH: usize = 16;
const CUISINE_WIDTH: usize = 12;

/// Print the listing for `query` as a table, or as JSON when `json` is set.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn run_list(catalog: &Catalog, query: &Query, json: bool) -> anyhow::Result<()> {
    let listing = query.run(catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(listing.stores())?);
        return Ok(());
    }

    print!("{}", render_table(&listing));
    Ok(())
}

/// Render the fixed-width listing table, or the empty-state message.
pub(crate) fn render_table(listing: &Listing<'_>) -> String {
    if listing.is_empty() {
        return "No Stores Found\nTry adjusting your filters or search term\n".to_string();
    }

    let header = format!(
        "{:<4}{:<NAME_WIDTH$}{:<CUISINE_WIDTH$}{:<8}ADDRESS",
        "ID", "NAME", "CUISINE", "RATING"
    );
    let rows = listing.stores().iter().map(|store| {
        format!(
            "{:<4}{:<NAME_WIDTH$}{:<CUISINE_WIDTH$}{:<8.1}{}",
            store.id,
            store.name,
            store.cuisine.as_str(),
            store.rating,
            store.address
        )
    });

    let mut out = String::new();
    for line in [listing.summary(), header].into_iter().chain(rows) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Open (or print) the directions URL for store `id`.
///
/// A browser that fails to launch is reported, not treated as a failure;
/// the URL is printed so it can be opened by hand.
///
/// # Errors
///
/// Returns an error if `id` is not in the catalog.
pub(crate) fn run_directions(
    catalog: &Catalog,
    config: &AppConfig,
    id: StoreId,
    print_only: bool,
) -> anyhow::Result<()> {
    let store = catalog.require(id)?;
    let url = directions_url(&config.maps_base_url, &store.address);

    if print_only {
        println!("{url}");
        return Ok(());
    }

    match open::that_detached(&url) {
        Ok(()) => {
            tracing::info!(store = %store.name, %url, "opened directions");
            println!("Opening directions to {}", store.name);
        }
        Err(e) => {
            tracing::warn!(store = %store.name, error = %e, "failed to launch browser");
            println!("could not open a browser ({e}); directions: {url}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use aisles_core::{Cuisine, CuisineFilter, SortKey};

    use super::*;

    #[test]
    fn table_lists_rows_in_listing_order() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            sort: SortKey::Rating,
            ..Query::default()
        };
        let table = render_table(&query.run(&catalog));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Found 6 stores");
        assert!(lines[1].starts_with("ID  NAME"));
        assert!(lines[2].starts_with("2   Spice Bazaar    Indian      4.9"));
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn single_row_table_is_exact() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            search: "tokyo".to_string(),
            ..Query::default()
        };
        assert_eq!(
            render_table(&query.run(&catalog)),
            "Found 1 store\n\
             ID  NAME            CUISINE     RATING  ADDRESS\n\
             1   Tokyo Mart      Japanese    4.8     4855 Lake Michigan Dr, Allendale, MI 49401\n"
        );
    }

    #[test]
    fn table_shows_empty_state() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            cuisine: CuisineFilter::Only(Cuisine::Thai),
            search: "seoul".to_string(),
            sort: SortKey::Name,
        };
        let table = render_table(&query.run(&catalog));
        assert!(table.starts_with("No Stores Found"));
    }

    #[test]
    fn directions_for_unknown_store_fails() {
        let catalog = Catalog::seed().unwrap();
        let config = AppConfig {
            env: aisles_core::Environment::Test,
            log_level: "info".to_string(),
            log_path: None,
            maps_base_url: "https://maps.example".to_string(),
            map_viewport: aisles_core::Viewport {
                width: 800.0,
                height: 600.0,
            },
            projection: aisles_core::ProjectionSettings::Fit { padding: 40.0 },
        };
        let err = run_directions(&catalog, &config, 99, true).unwrap_err();
        assert_eq!(err.to_string(), "no store with id 99");
    }
}
