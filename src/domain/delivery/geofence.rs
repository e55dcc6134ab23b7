//! Geofence containment against delivery zone polygons.
//!
//! Zones are stored as GeoJSON feature collections. Only the first ring of the
//! first feature takes part in containment, with vertices in `[lon, lat]`
//! order.
//!
//! ## Boundary convention
//!
//! A point lying on an edge or vertex of a ring (within [`EDGE_EPSILON`]) is
//! **inside**. Customers standing on the border of the delivery area get
//! delivery rather than a refusal. Away from the boundary the even-odd ray
//! casting rule decides.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::ZoneId;

/// Tolerance used when deciding whether a point sits on an edge.
pub const EDGE_EPSILON: f64 = 1e-9;

/// A point in `(lon, lat)` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

/// A single closed ring of vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    ring: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(ring: Vec<GeoPoint>) -> Self {
        Self { ring }
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Even-odd containment with boundary-inclusive edges.
    ///
    /// Rings with fewer than three vertices contain nothing.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let n = self.ring.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.ring[i];
            let b = self.ring[j];
            if on_segment(a, b, point) {
                return true;
            }
            if (a.lat > point.lat) != (b.lat > point.lat) {
                let crossing_lon = (b.lon - a.lon) * (point.lat - a.lat) / (b.lat - a.lat) + a.lon;
                if point.lon < crossing_lon {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

fn on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> bool {
    let cross = (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    let within_lon = p.lon >= a.lon.min(b.lon) - EDGE_EPSILON && p.lon <= a.lon.max(b.lon) + EDGE_EPSILON;
    let within_lat = p.lat >= a.lat.min(b.lat) - EDGE_EPSILON && p.lat <= a.lat.max(b.lat) + EDGE_EPSILON;
    within_lon && within_lat
}

/// A delivery zone as stored: an active flag and raw GeoJSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryZone {
    pub id: ZoneId,
    pub is_active: bool,
    pub geometry: Option<Value>,
}

impl DeliveryZone {
    pub fn new(is_active: bool, geometry: Option<Value>) -> Self {
        Self {
            id: ZoneId::new(),
            is_active,
            geometry,
        }
    }

    /// Extracts `features[0].geometry.coordinates[0]` as a polygon.
    ///
    /// Returns `None` when the geometry is absent or malformed.
    pub fn outer_ring(&self) -> Option<Polygon> {
        let ring = self
            .geometry
            .as_ref()?
            .get("features")?
            .get(0)?
            .get("geometry")?
            .get("coordinates")?
            .get(0)?
            .as_array()?;

        let vertices = ring
            .iter()
            .map(|vertex| {
                let pair = vertex.as_array()?;
                Some(GeoPoint::new(pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Polygon::new(vertices))
    }
}

/// True if `point` lies in at least one of `zones`.
pub fn contains(zones: &[Polygon], point: GeoPoint) -> bool {
    zones.iter().any(|zone| zone.contains(point))
}

/// Compiled set of active delivery polygons.
#[derive(Debug, Clone, Default)]
pub struct Geofence {
    polygons: Vec<Polygon>,
}

impl Geofence {
    /// Keeps active zones with a usable ring; others never match.
    pub fn from_zones(zones: &[DeliveryZone]) -> Self {
        let polygons = zones
            .iter()
            .filter(|zone| zone.is_active)
            .filter_map(|zone| {
                let ring = zone.outer_ring();
                if ring.is_none() {
                    tracing::warn!(zone_id = %zone.id, "Skipping delivery zone without usable geometry");
                }
                ring
            })
            .collect();
        Self { polygons }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        contains(&self.polygons, point)
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}
