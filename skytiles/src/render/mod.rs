//! Tile map rendering.
//!
//! Draws a [`Tiling`] onto a projected all-sky map and writes it as PNG.
//! The surface is a `tiny-skia` pixmap: a white canvas, an optional
//! graticule, the tiles filled and outlined with a fixed style, and the
//! projection outline as a frame. Everything is clipped to the projected
//! sphere.
//!
//! # Example
//!
//! ```ignore
//! use skytiles::render::{RenderConfig, TileRenderer};
//!
//! let renderer = TileRenderer::new(RenderConfig::default());
//! renderer.render_to_file(&tiling, "/tmp/tiles.png".as_ref())?;
//! ```

mod canvas;
mod config;

pub use canvas::{Viewport, MERIDIAN_SPACING_DEG, PARALLEL_SPACING_DEG};
pub use config::{
    alpha_from_opacity, format_color, parse_color, InvalidColor, RenderConfig, Rgba,
    DEFAULT_BACKGROUND_COLOR, DEFAULT_EDGE_COLOR, DEFAULT_FILL_COLOR, DEFAULT_GRID_COLOR,
};

use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tiny_skia::{Color, FillRule, Mask, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use crate::projection::{Projection, UnknownProjection};
use crate::tiling::Tiling;

use canvas::solid_paint;

/// Width of the graticule lines in pixels.
const GRID_LINE_WIDTH: f32 = 0.5;
/// Width of the projection frame in pixels.
const FRAME_LINE_WIDTH: f32 = 1.0;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering a tile map.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request names a projection we cannot draw.
    #[error(transparent)]
    UnknownProjection(#[from] UnknownProjection),

    /// Canvas dimensions cannot hold a pixmap.
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    /// Failed to write the image file.
    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },
}

/// A rendered map ready to be saved.
pub struct RenderedMap {
    pixmap: Pixmap,
    title: String,
    projection: Projection,
    tiles_drawn: usize,
}

impl RenderedMap {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Title describing the tiling, e.g. `Circle Tiles with 0.08333333333333333' Size`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Number of tiles that produced a drawable outline.
    pub fn tiles_drawn(&self) -> usize {
        self.tiles_drawn
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encode the map as PNG bytes.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    /// Write the map as a PNG file.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|source| RenderError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl std::fmt::Debug for RenderedMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedMap")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("title", &self.title)
            .field("projection", &self.projection)
            .field("tiles_drawn", &self.tiles_drawn)
            .finish()
    }
}

/// Renders tilings onto a projected map.
#[derive(Debug, Clone, Default)]
pub struct TileRenderer {
    config: RenderConfig,
}

impl TileRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a tiling using the projection named in its request.
    pub fn render(&self, tiling: &Tiling) -> RenderResult<RenderedMap> {
        self.render_with_progress(tiling, |_, _| {})
    }

    /// Render a tiling, reporting `(tiles_done, tiles_total)` after each batch.
    pub fn render_with_progress<F>(
        &self,
        tiling: &Tiling,
        mut progress: F,
    ) -> RenderResult<RenderedMap>
    where
        F: FnMut(usize, usize),
    {
        let projection: Projection = tiling.request().projection().parse()?;
        let (width, height) = (self.config.width, self.config.height);
        let invalid_canvas = || RenderError::InvalidCanvas { width, height };

        let mut pixmap = Pixmap::new(width, height).ok_or_else(invalid_canvas)?;
        let bg = self.config.background;
        pixmap.fill(Color::from_rgba8(bg.0, bg.1, bg.2, bg.3));

        let viewport = Viewport::fit(projection, width, height, self.config.margin);
        let boundary = viewport.boundary_path();

        let mut clip = Mask::new(width, height).ok_or_else(invalid_canvas)?;
        if let Some(boundary) = &boundary {
            clip.fill_path(boundary, FillRule::Winding, true, Transform::identity());
        }

        debug!(
            projection = %projection,
            width,
            height,
            scale = viewport.scale(),
            "Prepared map canvas"
        );

        if self.config.grid {
            let grid_paint = solid_paint(self.config.grid_color);
            let grid_stroke = Stroke {
                width: GRID_LINE_WIDTH,
                ..Default::default()
            };
            for line in viewport.graticule_paths() {
                pixmap.stroke_path(
                    &line,
                    &grid_paint,
                    &grid_stroke,
                    Transform::identity(),
                    Some(&clip),
                );
            }
        }

        let fill_paint = solid_paint(self.config.fill_color);
        let edge_paint = solid_paint(self.config.edge_color);
        let edge_stroke = Stroke {
            width: self.config.edge_width,
            ..Default::default()
        };
        let segments = self.config.outline_segments;
        let total = tiling.len();
        let mut done = 0;
        let mut drawn = 0;

        for batch in tiling.tiles().chunks(self.config.batch_size.max(1)) {
            // Projection runs in parallel; drawing keeps tiling order.
            let paths: Vec<_> = batch
                .par_iter()
                .map(|tile| viewport.tile_path(tile, segments))
                .collect();

            for path in paths.iter().flatten() {
                pixmap.fill_path(
                    path,
                    &fill_paint,
                    FillRule::Winding,
                    Transform::identity(),
                    Some(&clip),
                );
                if self.config.edge_width > 0.0 {
                    pixmap.stroke_path(
                        path,
                        &edge_paint,
                        &edge_stroke,
                        Transform::identity(),
                        Some(&clip),
                    );
                }
                drawn += 1;
            }

            done += batch.len();
            progress(done, total);
        }

        if let Some(boundary) = &boundary {
            let frame_paint = solid_paint(DEFAULT_EDGE_COLOR);
            let frame_stroke = Stroke {
                width: FRAME_LINE_WIDTH,
                ..Default::default()
            };
            pixmap.stroke_path(
                boundary,
                &frame_paint,
                &frame_stroke,
                Transform::identity(),
                None,
            );
        }

        let title = tiling.request().title();
        info!(
            title = %title,
            projection = %projection,
            tiles = total,
            drawn,
            "Rendered tile map"
        );

        Ok(RenderedMap {
            pixmap,
            title,
            projection,
            tiles_drawn: drawn,
        })
    }

    /// Render a tiling and write it as a PNG file.
    pub fn render_to_file(
        &self,
        tiling: &Tiling,
        output_path: &Path,
    ) -> RenderResult<RenderedMap> {
        let map = self.render(tiling)?;
        map.save_png(output_path)?;
        info!(path = %output_path.display(), "Saved tile map");
        Ok(map)
    }
}
