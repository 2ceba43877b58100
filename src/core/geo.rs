use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, rejecting NaN and infinite components
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(MapError::InvalidCoordinate(format!(
                "location values must be finite, got [{lat}, {lng}]"
            )));
        }
        Ok(Self::new(lat, lng))
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// The coordinate as a `[lat, lng]` pair
    pub fn to_array(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Conversion of sequence-like inputs into a validated [`LatLng`].
///
/// Fails with [`MapError::InvalidCoordinate`] unless the input holds exactly
/// two finite numbers.
pub trait IntoLatLng {
    fn into_lat_lng(self) -> Result<LatLng>;
}

impl IntoLatLng for LatLng {
    fn into_lat_lng(self) -> Result<LatLng> {
        LatLng::try_new(self.lat, self.lng)
    }
}

impl<T: Into<f64>> IntoLatLng for (T, T) {
    fn into_lat_lng(self) -> Result<LatLng> {
        LatLng::try_new(self.0.into(), self.1.into())
    }
}

impl<T: Into<f64>> IntoLatLng for [T; 2] {
    fn into_lat_lng(self) -> Result<LatLng> {
        let [lat, lng] = self;
        LatLng::try_new(lat.into(), lng.into())
    }
}

impl<T: Into<f64> + Copy> IntoLatLng for &[T] {
    fn into_lat_lng(self) -> Result<LatLng> {
        match self {
            [lat, lng] => LatLng::try_new((*lat).into(), (*lng).into()),
            other => Err(MapError::InvalidCoordinate(format!(
                "expected two values (latitude, longitude), got {}",
                other.len()
            ))),
        }
    }
}

impl<T: Into<f64> + Copy> IntoLatLng for Vec<T> {
    fn into_lat_lng(self) -> Result<LatLng> {
        self.as_slice().into_lat_lng()
    }
}

impl IntoLatLng for &serde_json::Value {
    fn into_lat_lng(self) -> Result<LatLng> {
        let values = self.as_array().ok_or_else(|| {
            MapError::InvalidCoordinate(format!("expected a [lat, lng] array, got {self}"))
        })?;

        let numbers = values
            .iter()
            .map(|value| {
                value.as_f64().ok_or_else(|| {
                    MapError::InvalidCoordinate(format!("location value {value} is not a number"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        numbers.as_slice().into_lat_lng()
    }
}

impl IntoLatLng for serde_json::Value {
    fn into_lat_lng(self) -> Result<LatLng> {
        (&self).into_lat_lng()
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Degenerate bounds covering a single point
    pub fn from_point(point: LatLng) -> Self {
        Self::new(point, point)
    }

    /// Smallest bounds covering every point, `None` for an empty input
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(&point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// `[[south, west], [north, east]]`, the layout Leaflet expects
    pub fn to_array(&self) -> [[f64; 2]; 2] {
        [self.south_west.to_array(), self.north_east.to_array()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
        assert!(coord.is_valid());
    }

    #[test]
    fn test_sequence_inputs() {
        assert_eq!((45.5, -122.3).into_lat_lng().unwrap(), LatLng::new(45.5, -122.3));
        assert_eq!([10, 20].into_lat_lng().unwrap(), LatLng::new(10.0, 20.0));
        assert_eq!(vec![1.5f32, 2.5].into_lat_lng().unwrap(), LatLng::new(1.5, 2.5));
        assert_eq!(json!([3, 4.5]).into_lat_lng().unwrap(), LatLng::new(3.0, 4.5));
    }

    #[test]
    fn test_malformed_inputs() {
        let too_short: &[f64] = &[1.0];
        let too_long: &[f64] = &[1.0, 2.0, 3.0];
        assert!(matches!(too_short.into_lat_lng(), Err(MapError::InvalidCoordinate(_))));
        assert!(matches!(too_long.into_lat_lng(), Err(MapError::InvalidCoordinate(_))));
        assert!(matches!(
            (f64::NAN, 0.0).into_lat_lng(),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            (0.0, f64::INFINITY).into_lat_lng(),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            json!(["north", 2]).into_lat_lng(),
            Err(MapError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            json!({"lat": 1, "lng": 2}).into_lat_lng(),
            Err(MapError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0);
        let point_inside = LatLng::new(40.5, -74.0);
        let point_outside = LatLng::new(42.0, -74.0);

        assert!(bounds.contains(&point_inside));
        assert!(!bounds.contains(&point_outside));
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = LatLngBounds::from_points([
            LatLng::new(45.5, -122.3),
            LatLng::new(47.6, -122.1),
            LatLng::new(44.0, -123.0),
        ])
        .unwrap();

        assert_eq!(bounds.to_array(), [[44.0, -123.0], [47.6, -122.1]]);
        assert!(LatLngBounds::from_points(Vec::new()).is_none());
    }
}
