//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::render::{DEFAULT_EDGE_COLOR, DEFAULT_FILL_COLOR};
use crate::tiling::TileShape;

// =============================================================================
// Tiling
// =============================================================================

pub const DEFAULT_SHAPE: TileShape = TileShape::Circle;
/// Five arcminutes.
pub const DEFAULT_SIZE_ARCMIN: f64 = 5.0;
pub const DEFAULT_PROJECTION: &str = "mollweide";

// =============================================================================
// Render
// =============================================================================

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_MARGIN: u32 = 20;
pub const DEFAULT_FILL_OPACITY: f32 = 0.4;
pub const DEFAULT_EDGE_WIDTH: f32 = 0.5;
pub const DEFAULT_OUTLINE_SEGMENTS: usize = 24;

// =============================================================================
// Output
// =============================================================================

/// Large enough for both 5-arcminute tilings (~18.7M squares).
pub const DEFAULT_MAX_TILES: u64 = 50_000_000;

pub const DEFAULT_LOG_FILE: &str = "skytiles.log";

/// Default log directory (~/.skytiles/logs).
pub fn default_log_dir() -> PathBuf {
    config_directory().join("logs")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tiling: TilingSettings {
                shape: DEFAULT_SHAPE,
                size_arcmin: DEFAULT_SIZE_ARCMIN,
                projection: DEFAULT_PROJECTION.to_string(),
            },
            render: RenderSettings {
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
                margin: DEFAULT_MARGIN,
                fill: (DEFAULT_FILL_COLOR.0, DEFAULT_FILL_COLOR.1, DEFAULT_FILL_COLOR.2, 255),
                fill_opacity: DEFAULT_FILL_OPACITY,
                edge: DEFAULT_EDGE_COLOR,
                edge_width: DEFAULT_EDGE_WIDTH,
                outline_segments: DEFAULT_OUTLINE_SEGMENTS,
                grid: true,
            },
            output: OutputSettings {
                directory: PathBuf::from("."),
                max_tiles: DEFAULT_MAX_TILES,
            },
            logging: LoggingSettings {
                directory: default_log_dir(),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
