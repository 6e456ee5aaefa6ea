//! Sky tiling generation
//!
//! Lays a regular longitude/latitude grid over the full sky and places one
//! tile on every grid point. The grid is flat: tile density grows towards
//! the poles and no attempt is made at a spherically uniform tiling.
//!
//! Generation is pure. Rendering lives in [`crate::render`].

mod types;

pub use types::{
    SkyPoint, Tile, TileShape, TilingError, TilingRequest, MAX_LAT_DEG, MAX_LAT_RAD, MAX_LON_DEG,
    MIN_LAT_DEG, MIN_LON_DEG,
};

use tracing::{debug, info};

/// An ordered collection of tiles covering the sky.
///
/// Tiles are stored longitude-major, then latitude, both ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct Tiling {
    request: TilingRequest,
    step_degrees: f64,
    tiles: Vec<Tile>,
}

impl Tiling {
    pub fn request(&self) -> &TilingRequest {
        &self.request
    }

    /// Grid step in degrees.
    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Distinct longitudes of tile centres in radians, ascending.
    pub fn longitude_centers(&self) -> Vec<f64> {
        let rows = self.request.lat_count() as usize;
        if rows == 0 {
            return Vec::new();
        }
        self.tiles
            .iter()
            .step_by(rows)
            .map(|tile| tile.center().lon)
            .collect()
    }
}

impl<'a> IntoIterator for &'a Tiling {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

/// Iterator over the tiles of a request, in grid order.
///
/// Grid values are computed as `start + i * step` rather than by repeated
/// addition, so the number of points never drifts. Not `ExactSizeIterator`:
/// grids of tiny tiles hold more tiles than `usize` can count.
#[derive(Debug, Clone)]
pub struct TileGridIter {
    shape: TileShape,
    size_rad: f64,
    step_deg: f64,
    lon_count: u64,
    lat_count: u64,
    lon_index: u64,
    lat_index: u64,
}

impl TileGridIter {
    fn new(request: &TilingRequest) -> Self {
        Self {
            shape: request.shape(),
            size_rad: request.size_radians(),
            step_deg: request.step_degrees(),
            lon_count: request.lon_count(),
            lat_count: request.lat_count(),
            lon_index: 0,
            lat_index: 0,
        }
    }

    /// Tiles left to yield. `u128` because the full grid of a tiny tile
    /// size overflows `u64`.
    fn remaining(&self) -> u128 {
        if self.lat_count == 0 || self.lon_index >= self.lon_count {
            return 0;
        }
        let columns = u128::from(self.lon_count - self.lon_index);
        columns * u128::from(self.lat_count) - u128::from(self.lat_index)
    }
}

impl Iterator for TileGridIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.lat_count == 0 || self.lon_index >= self.lon_count {
            return None;
        }

        let lon = MIN_LON_DEG + self.lon_index as f64 * self.step_deg;
        let lat = MIN_LAT_DEG + self.lat_index as f64 * self.step_deg;
        let tile = Tile::new(self.shape, SkyPoint::from_degrees(lon, lat), self.size_rad);

        self.lat_index += 1;
        if self.lat_index >= self.lat_count {
            self.lat_index = 0;
            self.lon_index += 1;
        }

        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }

    /// Jumps straight to the target grid index.
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.skip_tiles(n as u128);
        self.next()
    }

    fn last(mut self) -> Option<Self::Item> {
        match self.remaining() {
            0 => None,
            r => {
                self.skip_tiles(r - 1);
                self.next()
            }
        }
    }
}

impl TileGridIter {
    /// Advance by `count` tiles without building them.
    fn skip_tiles(&mut self, count: u128) {
        if count >= self.remaining() {
            self.lon_index = self.lon_count;
            self.lat_index = 0;
            return;
        }
        let rows = u128::from(self.lat_count);
        let pos = u128::from(self.lon_index) * rows + u128::from(self.lat_index) + count;
        // Both quotient and remainder are below the u64 grid counts
        self.lon_index = (pos / rows) as u64;
        self.lat_index = (pos % rows) as u64;
    }
}

/// Generate the full tiling for a request.
///
/// # Example
///
/// ```
/// use skytiles::tiling::{generate, TileShape, TilingRequest};
///
/// let request = TilingRequest::new(TileShape::Circle, 10.0, "mollweide").unwrap();
/// let tiling = generate(&request).unwrap();
/// assert_eq!(tiling.len(), 36 * 18);
/// ```
pub fn generate(request: &TilingRequest) -> Result<Tiling, TilingError> {
    generate_with_limit(request, None)
}

/// Generate the full tiling, refusing grids larger than `limit` tiles.
///
/// # Errors
///
/// Returns [`TilingError::TooManyTiles`] when the grid exceeds `limit`.
pub fn generate_with_limit(
    request: &TilingRequest,
    limit: Option<u64>,
) -> Result<Tiling, TilingError> {
    let expected = request.expected_tile_count();
    let addressable = request
        .checked_tile_count()
        .is_some_and(|count| usize::try_from(count).is_ok());
    if !addressable {
        return Err(TilingError::TooManyTiles {
            requested: expected,
            limit: usize::MAX as u64,
        });
    }
    if let Some(limit) = limit {
        if expected > limit {
            return Err(TilingError::TooManyTiles {
                requested: expected,
                limit,
            });
        }
    }

    debug!(
        shape = %request.shape(),
        size_deg = request.tile_size_degrees(),
        step_deg = request.step_degrees(),
        lon_count = request.lon_count(),
        lat_count = request.lat_count(),
        "Generating tile grid"
    );

    let tiles: Vec<Tile> = request.tiles().collect();

    info!(
        shape = %request.shape(),
        size_deg = request.tile_size_degrees(),
        tiles = tiles.len(),
        "Generated tiling"
    );

    Ok(Tiling {
        step_degrees: request.step_degrees(),
        request: request.clone(),
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn request(shape: TileShape, size: f64) -> TilingRequest {
        TilingRequest::new(shape, size, "mollweide").unwrap()
    }

    #[test]
    fn test_circle_one_degree_count_and_radius() {
        let req = request(TileShape::Circle, 1.0);
        let tiling = generate(&req).unwrap();

        let step = req.step_degrees();
        let expected = (360.0 / step).ceil() as usize * (180.0 / step).ceil() as usize;
        assert_eq!(tiling.len(), expected);

        for tile in &tiling {
            match tile {
                Tile::Circle { radius, .. } => assert_eq!(*radius, 1.0_f64.to_radians()),
                other => panic!("expected circle, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_square_one_degree_side_and_offset() {
        let req = request(TileShape::Square, 1.0);
        let tiling = generate(&req).unwrap();
        let side = 1.0_f64.to_radians();

        assert_eq!(
            tiling.step_degrees(),
            (side / std::f64::consts::SQRT_2).to_degrees()
        );

        for (i, tile) in req.tiles().enumerate().take(500) {
            let lon_idx = i as u64 / req.lat_count();
            let lat_idx = i as u64 % req.lat_count();
            let lon = (MIN_LON_DEG + lon_idx as f64 * req.step_degrees()).to_radians();
            let lat = (MIN_LAT_DEG + lat_idx as f64 * req.step_degrees()).to_radians();
            match tile {
                Tile::Square { lower_left, side: s } => {
                    assert_eq!(s, side);
                    assert!((lower_left.lon - (lon - side / 2.0)).abs() < 1e-12);
                    assert!((lower_left.lat - (lat - side / 2.0)).abs() < 1e-12);
                }
                other => panic!("expected square, got {:?}", other),
            }
        }
        assert_eq!(tiling.len() as u64, req.expected_tile_count());
    }

    #[test]
    fn test_order_is_longitude_major() {
        let tiling = generate(&request(TileShape::Circle, 45.0)).unwrap();
        assert_eq!(tiling.len(), 8 * 4);

        let first = tiling.tiles()[0].center();
        assert!((first.lon + PI).abs() < 1e-12);
        assert!((first.lat + FRAC_PI_2).abs() < 1e-12);

        // Second tile moves in latitude only
        let second = tiling.tiles()[1].center();
        assert!((second.lon - first.lon).abs() < 1e-12);
        assert!(second.lat > first.lat);

        // Fifth tile starts the next longitude column
        let fifth = tiling.tiles()[4].center();
        assert!((fifth.lon - (first.lon + PI / 4.0)).abs() < 1e-12);
        assert!((fifth.lat - first.lat).abs() < 1e-12);
    }

    #[test]
    fn test_centers_within_half_open_bounds() {
        for size in [0.7, 3.0, 7.5, 45.0] {
            for shape in [TileShape::Circle, TileShape::Square] {
                let tiling = generate(&request(shape, size)).unwrap();
                for tile in &tiling {
                    let c = tile.center();
                    assert!(c.lon >= -PI - 1e-12 && c.lon < PI, "lon {}", c.lon);
                    assert!(
                        c.lat >= -FRAC_PI_2 - 1e-12 && c.lat < FRAC_PI_2,
                        "lat {}",
                        c.lat
                    );
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let req = request(TileShape::Square, 4.0);
        assert_eq!(generate(&req).unwrap(), generate(&req).unwrap());
    }

    #[test]
    fn test_iterator_reports_exact_length() {
        let req = request(TileShape::Circle, 20.0);
        let mut iter = req.tiles();
        assert_eq!(iter.size_hint(), (18 * 9, Some(18 * 9)));
        iter.next();
        assert_eq!(iter.size_hint(), (18 * 9 - 1, Some(18 * 9 - 1)));
        assert_eq!(iter.count(), 18 * 9 - 1);
    }

    #[test]
    fn test_nth_and_last_match_collected_tiles() {
        let req = request(TileShape::Square, 20.0);
        let all: Vec<Tile> = req.tiles().collect();

        assert_eq!(req.tiles().nth(0), all.first().copied());
        assert_eq!(req.tiles().nth(37), Some(all[37]));
        assert_eq!(req.tiles().last(), all.last().copied());
        assert_eq!(req.tiles().nth(all.len()), None);

        let mut iter = req.tiles();
        assert_eq!(iter.nth(5), Some(all[5]));
        assert_eq!(iter.next(), Some(all[6]));
        assert_eq!(iter.size_hint().1, Some(all.len() - 7));
    }

    #[test]
    fn test_tiny_tile_size_does_not_overflow_grid_index() {
        // 1e-8° gives 3.6e10 × 1.8e10 tiles, more than u64 can count
        let req = request(TileShape::Circle, 1e-8);
        assert_eq!(req.checked_tile_count(), None);
        assert_eq!(req.expected_tile_count(), u64::MAX);

        let iter = req.tiles();
        assert_eq!(iter.size_hint(), (usize::MAX, None));

        let (first_lon, first_lat) = req.tiles().next().unwrap().center().to_degrees();
        assert!((first_lon + 180.0).abs() < 1e-9);
        assert!((first_lat + 90.0).abs() < 1e-9);

        let (lon, lat) = req.tiles().last().unwrap().center().to_degrees();
        assert!((lon - 180.0).abs() < 1e-6, "last lon {}", lon);
        assert!((lat - 90.0).abs() < 1e-6, "last lat {}", lat);

        let mut iter = req.tiles();
        let skipped = iter.nth(req.lat_count() as usize).unwrap();
        let (lon, lat) = skipped.center().to_degrees();
        assert!((lon - (-180.0 + req.step_degrees())).abs() < 1e-9);
        assert!((lat + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_unaddressable_tiling_is_rejected() {
        let err = generate(&request(TileShape::Square, 1e-8)).unwrap_err();
        assert!(matches!(
            err,
            TilingError::TooManyTiles {
                requested: u64::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_size_larger_than_sky_yields_single_tile() {
        let tiling = generate(&request(TileShape::Circle, 400.0)).unwrap();
        assert_eq!(tiling.len(), 1);
    }

    #[test]
    fn test_limit_is_enforced() {
        let req = request(TileShape::Circle, 1.0);
        let err = generate_with_limit(&req, Some(1000)).unwrap_err();
        assert_eq!(
            err,
            TilingError::TooManyTiles {
                requested: 360 * 180,
                limit: 1000
            }
        );
        assert!(generate_with_limit(&req, Some(360 * 180)).is_ok());
    }

    #[test]
    fn test_longitude_centers() {
        let tiling = generate(&request(TileShape::Circle, 90.0)).unwrap();
        let lons: Vec<f64> = tiling
            .longitude_centers()
            .into_iter()
            .map(f64::to_degrees)
            .collect();
        assert_eq!(lons.len(), 4);
        for (got, want) in lons.iter().zip([-180.0, -90.0, 0.0, 90.0]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_size_never_reaches_the_grid() {
        let err = TilingRequest::new(TileShape::Circle, 0.0, "mollweide").unwrap_err();
        assert_eq!(err, TilingError::InvalidTileSize(0.0));
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn test_centers_in_bounds_property(
                size in 2.0..60.0_f64,
                square in any::<bool>()
            ) {
                let shape = if square { TileShape::Square } else { TileShape::Circle };
                let req = TilingRequest::new(shape, size, "mollweide").unwrap();
                for tile in req.tiles() {
                    let c = tile.center();
                    // Rounding through radians can land within an ulp of the edge
                    prop_assert!(c.lon >= -PI - 1e-12 && c.lon < PI + 1e-12);
                    prop_assert!(c.lat >= -FRAC_PI_2 - 1e-12 && c.lat < FRAC_PI_2 + 1e-12);
                    prop_assert!((tile.size() - size.to_radians()).abs() < 1e-15);
                }
            }

            #[test]
            fn test_count_matches_expected_property(
                size in 1.0..90.0_f64,
                square in any::<bool>()
            ) {
                let shape = if square { TileShape::Square } else { TileShape::Circle };
                let req = TilingRequest::new(shape, size, "mollweide").unwrap();
                let step = req.step_degrees();
                let expected = (360.0 / step).ceil() as u64 * (180.0 / step).ceil() as u64;
                prop_assert_eq!(req.tiles().count() as u64, expected);
            }
        }
    }
}
