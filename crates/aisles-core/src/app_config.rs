use std::path::PathBuf;

use crate::projection::{GeoPoint, Projection, Viewport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the map view turns coordinates into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionSettings {
    /// Fit the catalog's coordinate range into the viewport.
    Fit { padding: f64 },
    /// Use a configured reference point and scale.
    Fixed { origin: GeoPoint, scale: f64 },
}

impl ProjectionSettings {
    /// Resolve to a concrete projection for `points` drawn in `viewport`.
    #[must_use]
    pub fn resolve(&self, points: &[GeoPoint], viewport: Viewport) -> Projection {
        match *self {
            ProjectionSettings::Fit { padding } => Projection::fit(points, viewport, padding),
            ProjectionSettings::Fixed { origin, scale } => Projection::new(origin, scale),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Log file for interactive sessions; logs are discarded when unset.
    pub log_path: Option<PathBuf>,
    pub maps_base_url: String,
    pub map_viewport: Viewport,
    pub projection: ProjectionSettings,
}
