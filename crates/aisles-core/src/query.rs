//! Filter-sort pipeline over the catalog.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::catalog::{Catalog, CuisineFilter, StoreRecord};
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by store name.
    #[default]
    Name,
    /// Highest rated first.
    Rating,
    /// Ascending by cuisine name.
    Type,
}

impl SortKey {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Rating => "Rating",
            SortKey::Type => "Cuisine Type",
        }
    }

    #[must_use]
    pub fn next(self) -> SortKey {
        match self {
            SortKey::Name => SortKey::Rating,
            SortKey::Rating => SortKey::Type,
            SortKey::Type => SortKey::Name,
        }
    }

    fn compare(self, a: &StoreRecord, b: &StoreRecord) -> Ordering {
        match self {
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Type => a.cuisine.as_str().cmp(b.cuisine.as_str()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Rating => write!(f, "rating"),
            SortKey::Type => write!(f, "type"),
        }
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "rating" => Ok(SortKey::Rating),
            "type" | "cuisine" => Ok(SortKey::Type),
            _ => Err(CoreError::UnknownSortKey(s.to_string())),
        }
    }
}

/// The filter and sort inputs of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub cuisine: CuisineFilter,
    /// Matched case-insensitively against name, cuisine and address.
    pub search: String,
    pub sort: SortKey,
}

impl Query {
    #[must_use]
    pub fn matches(&self, store: &StoreRecord) -> bool {
        if !self.cuisine.admits(store.cuisine) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        [store.name.as_str(), store.cuisine.as_str(), store.address.as_str()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Filter the catalog and sort the survivors.
    ///
    /// The sort is stable, so records that compare equal keep catalog order.
    #[must_use]
    pub fn run<'a>(&self, catalog: &'a Catalog) -> Listing<'a> {
        let mut stores: Vec<&StoreRecord> =
            catalog.stores().iter().filter(|s| self.matches(s)).collect();
        stores.sort_by(|a, b| self.sort.compare(a, b));

        tracing::debug!(
            cuisine = %self.cuisine,
            search = %self.search,
            sort = %self.sort,
            results = stores.len(),
            "listing recomputed"
        );

        Listing { stores }
    }
}

/// Ordered result of running a [`Query`].
#[derive(Debug, Clone, Default)]
pub struct Listing<'a> {
    stores: Vec<&'a StoreRecord>,
}

impl<'a> Listing<'a> {
    #[must_use]
    pub fn stores(&self) -> &[&'a StoreRecord] {
        &self.stores
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// `true` when nothing matched; the UI must show its empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    #[must_use]
    pub fn position_of(&self, id: crate::StoreId) -> Option<usize> {
        self.stores.iter().position(|s| s.id == id)
    }

    /// "Found N store(s)" line shown above the results.
    #[must_use]
    pub fn summary(&self) -> String {
        let n = self.stores.len();
        format!("Found {n} store{}", if n == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cuisine;

    #[test]
    fn sort_key_parses_aliases() {
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert_eq!("cuisine".parse::<SortKey>().unwrap(), SortKey::Type);
        assert_eq!(
            "price".parse::<SortKey>().unwrap_err(),
            CoreError::UnknownSortKey("price".to_string())
        );
    }

    #[test]
    fn sort_key_cycles_through_all() {
        let mut key = SortKey::Name;
        for expected in [SortKey::Rating, SortKey::Type, SortKey::Name] {
            key = key.next();
            assert_eq!(key, expected);
        }
    }

    #[test]
    fn search_matches_cuisine_name() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            search: "viet".to_string(),
            ..Query::default()
        };
        let names: Vec<&str> = query.run(&catalog).stores().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Saigon Market"]);
    }

    #[test]
    fn search_does_not_look_at_description() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            search: "kimchi".to_string(),
            ..Query::default()
        };
        assert!(query.run(&catalog).is_empty());
    }

    #[test]
    fn cuisine_and_search_combine() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            cuisine: CuisineFilter::Only(Cuisine::Thai),
            search: "lake michigan".to_string(),
            sort: SortKey::Name,
        };
        let listing = query.run(&catalog);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.stores()[0].name, "Thai Treasure");
    }

    #[test]
    fn sort_by_type_is_alphabetical_on_cuisine_name() {
        let catalog = Catalog::seed().unwrap();
        let query = Query {
            sort: SortKey::Type,
            ..Query::default()
        };
        let cuisines: Vec<&str> = query
            .run(&catalog)
            .stores()
            .iter()
            .map(|s| s.cuisine.as_str())
            .collect();
        assert_eq!(
            cuisines,
            vec!["Chinese", "Indian", "Japanese", "Korean", "Thai", "Vietnamese"]
        );
    }

    #[test]
    fn summary_pluralises() {
        let catalog = Catalog::seed().unwrap();
        let all = Query::default().run(&catalog);
        assert_eq!(all.summary(), "Found 6 stores");

        let one = Query {
            search: "tokyo".to_string(),
            ..Query::default()
        }
        .run(&catalog);
        assert_eq!(one.summary(), "Found 1 store");

        let none = Query {
            search: "zzz".to_string(),
            ..Query::default()
        }
        .run(&catalog);
        assert_eq!(none.summary(), "Found 0 stores");
    }

    #[test]
    fn position_of_reflects_sort_order() {
        let catalog = Catalog::seed().unwrap();
        let listing = Query::default().run(&catalog);
        // Dragon Market (id 3) sorts first by name.
        assert_eq!(listing.position_of(3), Some(0));
        assert_eq!(listing.position_of(1), Some(5));
        assert_eq!(listing.position_of(99), None);
    }
}
