//! Linear coordinate-to-pixel projection for the map view.
//!
//! This is a flat affine transform, not a geographic projection:
//! `x = (lng - origin.lng) * scale` and `y = (origin.lat - lat) * scale`.
//! Pixel `y` grows downwards.

use serde::{Deserialize, Serialize};

/// Pixels per degree used when the catalog's coordinate span is degenerate.
pub const DEFAULT_SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn contains(&self, p: Pixel) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Geographic point that lands on pixel `(0, 0)`.
    pub origin: GeoPoint,
    /// Pixels per degree, applied to both axes.
    pub scale: f64,
}

impl Projection {
    #[must_use]
    pub fn new(origin: GeoPoint, scale: f64) -> Self {
        Self { origin, scale }
    }

    /// Derive a projection that places every point inside `viewport`,
    /// centred, leaving `padding` pixels on each side.
    ///
    /// A zero span on both axes (one point, or none) falls back to
    /// [`DEFAULT_SCALE`] centred on the points.
    #[must_use]
    pub fn fit(points: &[GeoPoint], viewport: Viewport, padding: f64) -> Self {
        let Some(first) = points.first() else {
            let centre = GeoPoint { lat: 0.0, lng: 0.0 };
            return Self::centred_on(centre, centre, viewport, DEFAULT_SCALE);
        };

        let (mut min, mut max) = (*first, *first);
        for p in &points[1..] {
            min.lat = min.lat.min(p.lat);
            min.lng = min.lng.min(p.lng);
            max.lat = max.lat.max(p.lat);
            max.lng = max.lng.max(p.lng);
        }

        let usable_w = (viewport.width - 2.0 * padding).max(1.0);
        let usable_h = (viewport.height - 2.0 * padding).max(1.0);
        let span_lng = max.lng - min.lng;
        let span_lat = max.lat - min.lat;

        let scale_x = if span_lng > 0.0 { usable_w / span_lng } else { f64::INFINITY };
        let scale_y = if span_lat > 0.0 { usable_h / span_lat } else { f64::INFINITY };
        let scale = match scale_x.min(scale_y) {
            s if s.is_finite() => s,
            _ => DEFAULT_SCALE,
        };

        Self::centred_on(min, max, viewport, scale)
    }

    /// Place the bounding box `min..max` in the middle of `viewport`.
    fn centred_on(min: GeoPoint, max: GeoPoint, viewport: Viewport, scale: f64) -> Self {
        let slack_x = (viewport.width - (max.lng - min.lng) * scale) / 2.0;
        let slack_y = (viewport.height - (max.lat - min.lat) * scale) / 2.0;
        Self {
            origin: GeoPoint {
                lat: max.lat + slack_y / scale,
                lng: min.lng - slack_x / scale,
            },
            scale,
        }
    }

    #[must_use]
    pub fn project(&self, point: GeoPoint) -> Pixel {
        Pixel {
            x: (point.lng - self.origin.lng) * self.scale,
            y: (self.origin.lat - point.lat) * self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn seed_points() -> Vec<GeoPoint> {
        [
            (42.9734, -85.8681),
            (42.9634, -85.8781),
            (42.9834, -85.8581),
            (42.9534, -85.8881),
            (42.9434, -85.8481),
            (42.9334, -85.8381),
        ]
        .into_iter()
        .map(|(lat, lng)| GeoPoint { lat, lng })
        .collect()
    }

    #[test]
    fn fixed_projection_anchors_origin_at_zero() {
        let tokyo = GeoPoint { lat: 42.9734, lng: -85.8681 };
        let projection = Projection::new(tokyo, DEFAULT_SCALE);
        let p = projection.project(tokyo);
        assert!(approx(p.x, 0.0) && approx(p.y, 0.0), "got {p:?}");
    }

    #[test]
    fn fixed_projection_is_linear() {
        let tokyo = GeoPoint { lat: 42.9734, lng: -85.8681 };
        let saigon = GeoPoint { lat: 42.9334, lng: -85.8381 };
        let p = Projection::new(tokyo, DEFAULT_SCALE).project(saigon);
        assert!((p.x - 300.0).abs() < 1e-3, "x = {}", p.x);
        assert!((p.y - 400.0).abs() < 1e-3, "y = {}", p.y);
    }

    #[test]
    fn north_is_up() {
        let projection = Projection::new(GeoPoint { lat: 43.0, lng: -86.0 }, 100.0);
        let north = projection.project(GeoPoint { lat: 42.9, lng: -85.9 });
        let south = projection.project(GeoPoint { lat: 42.8, lng: -85.9 });
        assert!(north.y < south.y);
    }

    #[test]
    fn fit_keeps_every_point_inside_padded_viewport() {
        let viewport = Viewport { width: 800.0, height: 600.0 };
        let padding = 40.0;
        let projection = Projection::fit(&seed_points(), viewport, padding);
        for point in seed_points() {
            let p = projection.project(point);
            assert!(p.x >= padding - EPS && p.x <= viewport.width - padding + EPS, "{p:?}");
            assert!(p.y >= padding - EPS && p.y <= viewport.height - padding + EPS, "{p:?}");
        }
    }

    #[test]
    fn fit_uses_the_tighter_axis() {
        let viewport = Viewport { width: 800.0, height: 600.0 };
        let projection = Projection::fit(&seed_points(), viewport, 40.0);
        // Seed spans 0.05 deg on both axes; height is the limiting side.
        assert!((projection.scale - 520.0 / 0.05).abs() < 1e-3);
    }

    #[test]
    fn fit_centres_a_single_point() {
        let viewport = Viewport { width: 400.0, height: 300.0 };
        let only = GeoPoint { lat: 42.9, lng: -85.8 };
        let projection = Projection::fit(&[only], viewport, 10.0);
        let p = projection.project(only);
        assert!(approx(projection.scale, DEFAULT_SCALE));
        assert!(approx(p.x, 200.0) && approx(p.y, 150.0), "got {p:?}");
    }

    #[test]
    fn fit_handles_no_points() {
        let viewport = Viewport { width: 400.0, height: 300.0 };
        let projection = Projection::fit(&[], viewport, 10.0);
        assert!(projection.scale.is_finite());
    }

    #[test]
    fn viewport_contains_edges() {
        let viewport = Viewport { width: 10.0, height: 5.0 };
        assert!(viewport.contains(Pixel { x: 0.0, y: 0.0 }));
        assert!(viewport.contains(Pixel { x: 10.0, y: 5.0 }));
        assert!(!viewport.contains(Pixel { x: -0.1, y: 2.0 }));
        assert!(!viewport.contains(Pixel { x: 3.0, y: 5.1 }));
    }
}
