//! Mapping from projected plane coordinates to pixels, and path helpers.

use std::f64::consts::PI;

use tiny_skia::{Color, Paint, Path, PathBuilder, Shader};

use super::config::Rgba;
use crate::projection::Projection;
use crate::tiling::{SkyPoint, Tile};

/// Spacing of graticule meridians in degrees.
pub const MERIDIAN_SPACING_DEG: i32 = 30;
/// Spacing of graticule parallels in degrees.
pub const PARALLEL_SPACING_DEG: i32 = 15;

/// Vertices along each graticule line.
const GRATICULE_SAMPLES: usize = 90;

/// Fits a projection's extent into a pixel canvas, keeping aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    projection: Projection,
    center_x: f64,
    center_y: f64,
    scale: f64,
}

impl Viewport {
    /// Centre the projected sphere in a `width × height` canvas.
    pub fn fit(projection: Projection, width: u32, height: u32, margin: u32) -> Self {
        let (half_x, half_y) = projection.bounds();
        let usable_w = (width as f64 - 2.0 * margin as f64).max(1.0);
        let usable_h = (height as f64 - 2.0 * margin as f64).max(1.0);
        let scale = (usable_w / (2.0 * half_x)).min(usable_h / (2.0 * half_y));

        Self {
            projection,
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            scale,
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Pixels per projected unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Plane coordinates to pixel coordinates. Pixel y grows downwards.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        (
            (self.center_x + x * self.scale) as f32,
            (self.center_y - y * self.scale) as f32,
        )
    }

    /// Project a sky point straight to pixels.
    #[inline]
    pub fn sky_to_pixel(&self, point: SkyPoint) -> Option<(f32, f32)> {
        self.projection
            .project(point)
            .map(|(x, y)| self.to_pixel(x, y))
    }

    /// Closed path of the projected sphere outline.
    pub fn boundary_path(&self) -> Option<Path> {
        let ring: Vec<(f32, f32)> = self
            .projection
            .boundary(180)
            .into_iter()
            .map(|(x, y)| self.to_pixel(x, y))
            .collect();
        polygon_path(&ring)
    }

    /// Filled path for one tile, or `None` if any vertex hits a singularity.
    ///
    /// On projections that wrap longitude, tiles crossing the ±180° meridian
    /// are skipped too: their outline would jump across the whole map.
    pub fn tile_path(&self, tile: &Tile, segments: usize) -> Option<Path> {
        if self.projection.wraps_longitude() {
            let (lon_min, _, lon_max, _) = tile.bounds();
            if lon_min < -PI || lon_max > PI {
                return None;
            }
        }
        let ring = tile
            .outline(segments)
            .into_iter()
            .map(|p| self.sky_to_pixel(p))
            .collect::<Option<Vec<_>>>()?;
        polygon_path(&ring)
    }

    /// Open paths for every meridian and parallel of the graticule.
    pub fn graticule_paths(&self) -> Vec<Path> {
        let mut paths = Vec::new();

        let mut lon = -180;
        while lon <= 180 {
            let points: Vec<SkyPoint> = (0..=GRATICULE_SAMPLES)
                .map(|i| {
                    let lat = -90.0 + 180.0 * i as f64 / GRATICULE_SAMPLES as f64;
                    SkyPoint::from_degrees(lon as f64, lat)
                })
                .collect();
            if let Some(path) = self.polyline(&points) {
                paths.push(path);
            }
            lon += MERIDIAN_SPACING_DEG;
        }

        let mut lat = -90 + PARALLEL_SPACING_DEG;
        while lat < 90 {
            let points: Vec<SkyPoint> = (0..=GRATICULE_SAMPLES * 2)
                .map(|i| {
                    let lon = -180.0 + 360.0 * i as f64 / (GRATICULE_SAMPLES * 2) as f64;
                    SkyPoint::from_degrees(lon, lat as f64)
                })
                .collect();
            if let Some(path) = self.polyline(&points) {
                paths.push(path);
            }
            lat += PARALLEL_SPACING_DEG;
        }

        paths
    }

    /// Polyline through the projectable points, broken at singular ones.
    fn polyline(&self, points: &[SkyPoint]) -> Option<Path> {
        let mut builder = PathBuilder::new();
        let mut pen_down = false;
        for point in points {
            match self.sky_to_pixel(*point) {
                Some((x, y)) if pen_down => builder.line_to(x, y),
                Some((x, y)) => {
                    builder.move_to(x, y);
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
        builder.finish()
    }
}

/// Build a closed polygon path from pixel coordinates.
pub fn polygon_path(ring: &[(f32, f32)]) -> Option<Path> {
    let (first, rest) = ring.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.0, first.1);
    for &(x, y) in rest {
        builder.line_to(x, y);
    }
    builder.close();
    builder.finish()
}

/// Anti-aliased solid paint.
pub fn solid_paint(color: Rgba) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(Color::from_rgba8(color.0, color.1, color.2, color.3)),
        anti_alias: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiling::TileShape;
    use std::f64::consts::FRAC_PI_2;

    fn assert_pixel(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-3 && (actual.1 - expected.1).abs() < 1e-3,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_fit_rectilinear_fills_canvas() {
        let viewport = Viewport::fit(Projection::Rectilinear, 360, 180, 0);
        assert!((viewport.scale() - 180.0 / PI).abs() < 1e-9);
        assert_pixel(viewport.to_pixel(-PI, FRAC_PI_2), (0.0, 0.0));
        assert_pixel(viewport.to_pixel(PI, -FRAC_PI_2), (360.0, 180.0));
        assert_pixel(viewport.to_pixel(0.0, 0.0), (180.0, 90.0));
    }

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        // Tall canvas: width is the limiting dimension
        let viewport = Viewport::fit(Projection::Mollweide, 200, 1000, 0);
        let (left, _) = viewport.to_pixel(-2.0 * std::f64::consts::SQRT_2, 0.0);
        let (right, _) = viewport.to_pixel(2.0 * std::f64::consts::SQRT_2, 0.0);
        assert!((left - 0.0).abs() < 1e-3);
        assert!((right - 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_margin_shrinks_scale() {
        let full = Viewport::fit(Projection::Hammer, 400, 200, 0);
        let padded = Viewport::fit(Projection::Hammer, 400, 200, 20);
        assert!(padded.scale() < full.scale());
    }

    #[test]
    fn test_tile_path_bounds() {
        let viewport = Viewport::fit(Projection::Rectilinear, 360, 180, 0);
        let tile = Tile::new(TileShape::Square, SkyPoint::new(0.0, 0.0), 10.0_f64.to_radians());
        let path = viewport.tile_path(&tile, 4).unwrap();
        let bounds = path.bounds();
        assert!((bounds.left() - 175.0).abs() < 1e-3);
        assert!((bounds.right() - 185.0).abs() < 1e-3);
        assert!((bounds.top() - 85.0).abs() < 1e-3);
        assert!((bounds.bottom() - 95.0).abs() < 1e-3);
    }

    #[test]
    fn test_tile_path_skips_singular_tiles() {
        let viewport = Viewport::fit(Projection::Lambert, 200, 200, 0);
        // First outline vertex sits on the antipode of the Lambert centre
        let tile = Tile::Square {
            lower_left: SkyPoint::new(PI, 0.0),
            side: 0.1,
        };
        assert!(viewport.tile_path(&tile, 4).is_none());

        let near_center = Tile::new(TileShape::Circle, SkyPoint::new(0.1, 0.1), 0.05);
        assert!(viewport.tile_path(&near_center, 16).is_some());
    }

    #[test]
    fn test_lambert_skips_tiles_across_the_antimeridian() {
        let lambert = Viewport::fit(Projection::Lambert, 200, 200, 0);
        let edge_tile = Tile::new(TileShape::Circle, SkyPoint::new(-PI, 0.0), 0.1);
        assert!(lambert.tile_path(&edge_tile, 16).is_none());

        let inside = Tile::new(TileShape::Circle, SkyPoint::new(-PI + 0.2, 0.0), 0.1);
        let path = lambert.tile_path(&inside, 16).unwrap();
        // Stays near the west rim instead of spanning the disk
        assert!(path.bounds().width() < 50.0);

        let mollweide = Viewport::fit(Projection::Mollweide, 400, 200, 0);
        assert!(mollweide.tile_path(&edge_tile, 16).is_some());
    }

    #[test]
    fn test_graticule_line_count() {
        let viewport = Viewport::fit(Projection::Mollweide, 400, 200, 0);
        let paths = viewport.graticule_paths();
        // 13 meridians (-180..=180 by 30) and 11 parallels (-75..=75 by 15)
        assert_eq!(paths.len(), 13 + 11);
    }

    #[test]
    fn test_polygon_path_empty() {
        assert!(polygon_path(&[]).is_none());
    }
}
