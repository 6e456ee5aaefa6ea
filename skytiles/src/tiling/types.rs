//! Tile and request types for sky tiling.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Start of the longitude range in degrees (inclusive).
pub const MIN_LON_DEG: f64 = -180.0;
/// End of the longitude range in degrees (exclusive).
pub const MAX_LON_DEG: f64 = 180.0;
/// Start of the latitude range in degrees (inclusive).
pub const MIN_LAT_DEG: f64 = -90.0;
/// End of the latitude range in degrees (exclusive).
pub const MAX_LAT_DEG: f64 = 90.0;
/// Latitude limit of the grid in radians.
pub const MAX_LAT_RAD: f64 = FRAC_PI_2;

/// Errors that can occur while building a tiling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TilingError {
    /// Shape name is not one of the supported tile shapes.
    #[error("Invalid tile shape '{0}': expected 'circle' or 'square'")]
    InvalidShapeKind(String),

    /// Tile size is zero, negative or not a finite number.
    #[error("Invalid tile size {0}: must be a positive, finite number of degrees")]
    InvalidTileSize(f64),

    /// The grid would contain more tiles than the caller allows.
    #[error("Tiling would produce {requested} tiles, exceeding the limit of {limit}")]
    TooManyTiles { requested: u64, limit: u64 },
}

/// Shape of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileShape {
    /// Circular tile; size is the radius.
    Circle,
    /// Axis-aligned square tile; size is the side length.
    Square,
}

impl TileShape {
    /// Lowercase identifier, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            TileShape::Circle => "circle",
            TileShape::Square => "square",
        }
    }

    /// Capitalized name used in titles.
    pub fn capitalized(&self) -> &'static str {
        match self {
            TileShape::Circle => "Circle",
            TileShape::Square => "Square",
        }
    }

    /// Grid step in radians for a tile of `size_rad`.
    ///
    /// Squares are stepped by `size / √2` so the diagonals do not leave
    /// large holes. This is an approximation, not an exact tessellation.
    pub fn step_radians(&self, size_rad: f64) -> f64 {
        match self {
            TileShape::Circle => size_rad,
            TileShape::Square => size_rad / SQRT_2,
        }
    }
}

impl fmt::Display for TileShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TileShape {
    type Err = TilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Ok(TileShape::Circle),
            "square" => Ok(TileShape::Square),
            _ => Err(TilingError::InvalidShapeKind(s.to_string())),
        }
    }
}

/// A position on the sky in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPoint {
    /// Longitude in radians.
    pub lon: f64,
    /// Latitude in radians.
    pub lat: f64,
}

impl SkyPoint {
    /// Create a point from radians.
    #[inline]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a point from degrees.
    #[inline]
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }

    /// Returns `(lon, lat)` in degrees.
    #[inline]
    pub fn to_degrees(&self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }
}

/// A single tile of the sky grid.
///
/// All lengths are in radians of longitude/latitude on the flat grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tile {
    /// Circle centred on `center`.
    Circle { center: SkyPoint, radius: f64 },
    /// Square with its lower-left (south-west) corner at `lower_left`.
    Square { lower_left: SkyPoint, side: f64 },
}

impl Tile {
    /// Build the tile of `shape` centred on `center` with size `size_rad`.
    pub fn new(shape: TileShape, center: SkyPoint, size_rad: f64) -> Self {
        match shape {
            TileShape::Circle => Tile::Circle {
                center,
                radius: size_rad,
            },
            TileShape::Square => Tile::Square {
                lower_left: SkyPoint::new(center.lon - size_rad / 2.0, center.lat - size_rad / 2.0),
                side: size_rad,
            },
        }
    }

    pub fn shape(&self) -> TileShape {
        match self {
            Tile::Circle { .. } => TileShape::Circle,
            Tile::Square { .. } => TileShape::Square,
        }
    }

    /// Centre of the tile.
    pub fn center(&self) -> SkyPoint {
        match *self {
            Tile::Circle { center, .. } => center,
            Tile::Square { lower_left, side } => {
                SkyPoint::new(lower_left.lon + side / 2.0, lower_left.lat + side / 2.0)
            }
        }
    }

    /// Radius for circles, side length for squares.
    pub fn size(&self) -> f64 {
        match *self {
            Tile::Circle { radius, .. } => radius,
            Tile::Square { side, .. } => side,
        }
    }

    /// Bounding box as `(lon_min, lat_min, lon_max, lat_max)` in radians.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Tile::Circle { center, radius } => (
                center.lon - radius,
                center.lat - radius,
                center.lon + radius,
                center.lat + radius,
            ),
            Tile::Square { lower_left, side } => (
                lower_left.lon,
                lower_left.lat,
                lower_left.lon + side,
                lower_left.lat + side,
            ),
        }
    }

    /// Closed outline of the tile in lon/lat space.
    ///
    /// Circles are sampled with `segments` vertices (at least 8). Square
    /// edges are each split into `segments / 4` pieces (at least 1) so they
    /// bend with the projection. The first vertex is repeated at the end.
    pub fn outline(&self, segments: usize) -> Vec<SkyPoint> {
        match *self {
            Tile::Circle { center, radius } => {
                let n = segments.max(8);
                let mut ring = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let t = 2.0 * PI * i as f64 / n as f64;
                    ring.push(SkyPoint::new(
                        center.lon + radius * t.cos(),
                        center.lat + radius * t.sin(),
                    ));
                }
                ring.push(ring[0]);
                ring
            }
            Tile::Square { lower_left, side } => {
                let per_edge = (segments / 4).max(1);
                let corners = [
                    (lower_left.lon, lower_left.lat),
                    (lower_left.lon + side, lower_left.lat),
                    (lower_left.lon + side, lower_left.lat + side),
                    (lower_left.lon, lower_left.lat + side),
                ];
                let mut ring = Vec::with_capacity(4 * per_edge + 1);
                for edge in 0..4 {
                    let (x0, y0) = corners[edge];
                    let (x1, y1) = corners[(edge + 1) % 4];
                    for step in 0..per_edge {
                        let f = step as f64 / per_edge as f64;
                        ring.push(SkyPoint::new(x0 + (x1 - x0) * f, y0 + (y1 - y0) * f));
                    }
                }
                ring.push(ring[0]);
                ring
            }
        }
    }
}

/// Input parameters for a tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingRequest {
    shape: TileShape,
    tile_size_degrees: f64,
    projection: String,
}

impl TilingRequest {
    /// Create a request, validating the tile size.
    ///
    /// # Errors
    ///
    /// Returns [`TilingError::InvalidTileSize`] if `tile_size_degrees` is
    /// not a positive finite number.
    pub fn new(
        shape: TileShape,
        tile_size_degrees: f64,
        projection: impl Into<String>,
    ) -> Result<Self, TilingError> {
        if !tile_size_degrees.is_finite() || tile_size_degrees <= 0.0 {
            return Err(TilingError::InvalidTileSize(tile_size_degrees));
        }
        Ok(Self {
            shape,
            tile_size_degrees,
            projection: projection.into(),
        })
    }

    /// Create a request with the tile size given in arcminutes.
    pub fn from_arcminutes(
        shape: TileShape,
        tile_size_arcmin: f64,
        projection: impl Into<String>,
    ) -> Result<Self, TilingError> {
        Self::new(shape, tile_size_arcmin / 60.0, projection)
    }

    pub fn shape(&self) -> TileShape {
        self.shape
    }

    pub fn tile_size_degrees(&self) -> f64 {
        self.tile_size_degrees
    }

    /// Projection identifier, passed through untouched to the renderer.
    pub fn projection(&self) -> &str {
        &self.projection
    }

    pub fn size_radians(&self) -> f64 {
        self.tile_size_degrees.to_radians()
    }

    pub fn step_radians(&self) -> f64 {
        self.shape.step_radians(self.size_radians())
    }

    /// Grid step in degrees, after the radian round-trip.
    pub fn step_degrees(&self) -> f64 {
        self.step_radians().to_degrees()
    }

    /// Number of longitude columns in the grid.
    pub fn lon_count(&self) -> u64 {
        arange_len(MIN_LON_DEG, MAX_LON_DEG, self.step_degrees())
    }

    /// Number of latitude rows in the grid.
    pub fn lat_count(&self) -> u64 {
        arange_len(MIN_LAT_DEG, MAX_LAT_DEG, self.step_degrees())
    }

    /// Number of tiles `generate` will produce for this request.
    ///
    /// Saturates at `u64::MAX`; see [`Self::checked_tile_count`].
    pub fn expected_tile_count(&self) -> u64 {
        self.lon_count().saturating_mul(self.lat_count())
    }

    /// Number of tiles, or `None` if it does not fit in a `u64`.
    pub fn checked_tile_count(&self) -> Option<u64> {
        self.lon_count().checked_mul(self.lat_count())
    }

    /// Plot title, e.g. `Circle Tiles with 0.08333333333333333' Size`.
    pub fn title(&self) -> String {
        format!(
            "{} Tiles with {}' Size",
            self.shape.capitalized(),
            format_size(self.tile_size_degrees)
        )
    }

    /// Lazily iterate over the tiles of this request.
    pub fn tiles(&self) -> super::TileGridIter {
        super::TileGridIter::new(self)
    }
}

/// Length of a half-open range `[start, stop)` stepped by `step`.
///
/// Matches the element count of `numpy.arange`: `ceil((stop - start) / step)`.
pub(crate) fn arange_len(start: f64, stop: f64, step: f64) -> u64 {
    if step.is_nan() || step <= 0.0 || stop <= start {
        return 0;
    }
    ((stop - start) / step).ceil() as u64
}

/// Shortest decimal rendering of a size, trimmed of trailing zeros.
/// Shortest round-trip form, keeping `.0` on whole numbers (`10.0`).
fn format_size(value: f64) -> String {
    format!("{:?}", value)
}
