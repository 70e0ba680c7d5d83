pub mod app_config;
pub mod catalog;
pub mod config;
pub mod directions;
pub mod error;
pub mod projection;
pub mod query;
pub mod selection;
pub mod view;

pub use app_config::{AppConfig, Environment, ProjectionSettings};
pub use catalog::{Catalog, Cuisine, CuisineFilter, StoreId, StoreRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use directions::directions_url;
pub use error::{ConfigError, CoreError};
pub use projection::{GeoPoint, Pixel, Projection, Viewport};
pub use query::{Listing, Query, SortKey};
pub use selection::Selection;
pub use view::{Effect, Event, Marker, ViewController, ViewMode, ViewState};
