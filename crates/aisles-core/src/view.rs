//! View controller: the single owner of UI state.
//!
//! Every input becomes an [`Event`]; [`ViewController::apply`] updates the
//! [`ViewState`] and may hand back an [`Effect`] for the UI layer to carry
//! out. Listings and map markers are derived from the state on demand and
//! never cached.

use std::str::FromStr;

use crate::app_config::{AppConfig, ProjectionSettings};
use crate::catalog::{Catalog, CuisineFilter, StoreId, StoreRecord};
use crate::directions::directions_url;
use crate::projection::{Pixel, Projection, Viewport};
use crate::query::{Listing, Query, SortKey};
use crate::selection::Selection;
use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    Map,
}

impl ViewMode {
    #[must_use]
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Grid => ViewMode::Map,
            ViewMode::Map => ViewMode::Grid,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewMode::Grid => write!(f, "grid"),
            ViewMode::Map => write!(f, "map"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" | "list" => Ok(ViewMode::Grid),
            "map" => Ok(ViewMode::Map),
            _ => Err(CoreError::UnknownViewMode(s.to_string())),
        }
    }
}

/// Transient UI state for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub query: Query,
    pub selection: Selection,
    pub mode: ViewMode,
}

/// A discrete user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SetCuisine(CuisineFilter),
    NextCuisine,
    PrevCuisine,
    SetSearch(String),
    AppendSearch(char),
    PopSearch,
    ClearSearch,
    SetSort(SortKey),
    NextSort,
    SetViewMode(ViewMode),
    ToggleViewMode,
    /// A card or marker was clicked.
    Activate(StoreId),
    ClearSelection,
    /// Switch to the map, keeping the current selection.
    ViewOnMap,
    /// Open directions to the selected store.
    Directions,
}

/// Side effects the UI layer performs after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Bring the store's card into view. Best effort: ignored when the card
    /// is not part of the current listing.
    ScrollTo(StoreId),
    /// Open `url` in an external browser without waiting for it.
    OpenUrl { store: StoreId, url: String },
}

/// A store placed on the map.
#[derive(Debug, Clone, Copy)]
pub struct Marker<'a> {
    pub store: &'a StoreRecord,
    pub pixel: Pixel,
    /// Selected markers are drawn enlarged and on top.
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    catalog: Catalog,
    state: ViewState,
    projection: Projection,
    viewport: Viewport,
    maps_base_url: String,
}

impl ViewController {
    /// Build a controller; the projection is resolved once against the whole
    /// catalog so markers keep their place as filters change.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        state: ViewState,
        projection: &ProjectionSettings,
        viewport: Viewport,
        maps_base_url: impl Into<String>,
    ) -> Self {
        let points: Vec<_> = catalog.stores().iter().map(StoreRecord::position).collect();
        let projection = projection.resolve(&points, viewport);
        tracing::debug!(
            origin_lat = projection.origin.lat,
            origin_lng = projection.origin.lng,
            scale = projection.scale,
            "map projection resolved"
        );
        Self {
            catalog,
            state,
            projection,
            viewport,
            maps_base_url: maps_base_url.into(),
        }
    }

    #[must_use]
    pub fn from_config(catalog: Catalog, state: ViewState, config: &AppConfig) -> Self {
        Self::new(
            catalog,
            state,
            &config.projection,
            config.map_viewport,
            config.maps_base_url.clone(),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The filtered, sorted stores for the current state.
    #[must_use]
    pub fn listing(&self) -> Listing<'_> {
        self.state.query.run(&self.catalog)
    }

    /// The selected record, even when the current filter hides it.
    #[must_use]
    pub fn selected_store(&self) -> Option<&StoreRecord> {
        self.state
            .selection
            .id()
            .and_then(|id| self.catalog.get(id))
    }

    /// Markers for the current listing, selected marker last.
    #[must_use]
    pub fn markers(&self) -> Vec<Marker<'_>> {
        let listing = self.listing();
        let mut markers: Vec<Marker<'_>> = listing
            .stores()
            .iter()
            .map(|&store| Marker {
                store,
                pixel: self.projection.project(store.position()),
                selected: self.state.selection.is(store.id),
            })
            .collect();
        markers.sort_by_key(|m| m.selected);
        markers
    }

    #[must_use]
    pub fn directions_for(&self, store: &StoreRecord) -> String {
        directions_url(&self.maps_base_url, &store.address)
    }

    /// Apply one input event.
    pub fn apply(&mut self, event: Event) -> Option<Effect> {
        tracing::trace!(?event, "applying event");
        let query = &mut self.state.query;

        match event {
            Event::SetCuisine(cuisine) => query.cuisine = cuisine,
            Event::NextCuisine => query.cuisine = query.cuisine.next(),
            Event::PrevCuisine => query.cuisine = query.cuisine.prev(),
            Event::SetSearch(term) => query.search = term,
            Event::AppendSearch(c) => query.search.push(c),
            Event::PopSearch => {
                query.search.pop();
            }
            Event::ClearSearch => query.search.clear(),
            Event::SetSort(sort) => query.sort = sort,
            Event::NextSort => query.sort = query.sort.next(),
            Event::SetViewMode(mode) => return self.switch_mode(mode),
            Event::ToggleViewMode => return self.switch_mode(self.state.mode.toggled()),
            Event::Activate(id) => return self.activate(id),
            Event::ClearSelection => self.state.selection = Selection::None,
            Event::ViewOnMap => {
                if self.state.selection.id().is_some() {
                    self.state.mode = ViewMode::Map;
                }
            }
            Event::Directions => {
                let store = self.selected_store()?;
                let url = self.directions_for(store);
                tracing::info!(store = %store.name, %url, "directions requested");
                return Some(Effect::OpenUrl {
                    store: store.id,
                    url,
                });
            }
        }

        None
    }

    /// Returning to the grid with a store selected brings its card back
    /// into view.
    fn switch_mode(&mut self, mode: ViewMode) -> Option<Effect> {
        let previous = std::mem::replace(&mut self.state.mode, mode);
        match (previous, mode, self.state.selection) {
            (ViewMode::Map, ViewMode::Grid, Selection::Selected(id)) => Some(Effect::ScrollTo(id)),
            _ => None,
        }
    }

    fn activate(&mut self, id: StoreId) -> Option<Effect> {
        if self.catalog.get(id).is_none() {
            tracing::debug!(id, "ignoring activation of unknown store");
            return None;
        }

        self.state.selection = self.state.selection.toggle(id);
        tracing::debug!(selection = ?self.state.selection, "selection changed");

        match (self.state.selection, self.state.mode) {
            (Selection::Selected(id), ViewMode::Grid) => Some(Effect::ScrollTo(id)),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
