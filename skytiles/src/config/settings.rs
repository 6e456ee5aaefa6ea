//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use std::path::PathBuf;

use crate::render::{alpha_from_opacity, RenderConfig, Rgba};
use crate::tiling::{TileShape, TilingError, TilingRequest};

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Tiling defaults
    pub tiling: TilingSettings,
    /// Renderer style and canvas
    pub render: RenderSettings,
    /// Output location and limits
    pub output: OutputSettings,
    /// Log file location
    pub logging: LoggingSettings,
}

/// `[tiling]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TilingSettings {
    pub shape: TileShape,
    /// Tile size in arcminutes (radius for circles, side for squares).
    pub size_arcmin: f64,
    /// Projection name passed to the renderer.
    pub projection: String,
}

/// `[render]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    /// Fill colour, alpha taken from `fill_opacity`.
    pub fill: Rgba,
    pub fill_opacity: f32,
    pub edge: Rgba,
    pub edge_width: f32,
    pub outline_segments: usize,
    pub grid: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    /// Directory for rendered images when no explicit path is given.
    pub directory: PathBuf,
    /// Refuse to generate tilings larger than this.
    pub max_tiles: u64,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl ConfigFile {
    /// Build a [`RenderConfig`] from the `[render]` section.
    pub fn render_config(&self) -> RenderConfig {
        let r = &self.render;
        let fill = (r.fill.0, r.fill.1, r.fill.2, alpha_from_opacity(r.fill_opacity));
        RenderConfig::default()
            .with_size(r.width, r.height)
            .with_margin(r.margin)
            .with_grid(r.grid)
            .with_fill_color(fill)
            .with_edge(r.edge, r.edge_width)
            .with_outline_segments(r.outline_segments)
    }

    /// Build a [`TilingRequest`] from the `[tiling]` section.
    pub fn tiling_request(&self) -> Result<TilingRequest, TilingError> {
        TilingRequest::from_arcminutes(
            self.tiling.shape,
            self.tiling.size_arcmin,
            self.tiling.projection.clone(),
        )
    }
}
