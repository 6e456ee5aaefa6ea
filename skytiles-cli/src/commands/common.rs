//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use skytiles::config::ConfigFile;
use skytiles::tiling::{generate_with_limit, TileShape, Tiling, TilingRequest};

use crate::error::CliError;

/// Tile shape selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ShapeArg {
    /// Circular tiles, size is the radius
    Circle,
    /// Square tiles, size is the side length
    Square,
}

impl From<ShapeArg> for TileShape {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Circle => TileShape::Circle,
            ShapeArg::Square => TileShape::Square,
        }
    }
}

/// Arguments describing a tiling, shared by render, stats and export.
#[derive(Debug, Clone, Default, Args)]
pub struct TilingArgs {
    /// Tile shape (default from config)
    #[arg(long, value_enum)]
    pub shape: Option<ShapeArg>,

    /// Tile size in arcminutes
    #[arg(long, conflicts_with = "size_deg")]
    pub size_arcmin: Option<f64>,

    /// Tile size in degrees
    #[arg(long)]
    pub size_deg: Option<f64>,

    /// Map projection: mollweide, hammer, aitoff, lambert or rectilinear
    #[arg(long)]
    pub projection: Option<String>,
}

/// Resolve a tiling request from CLI args and config.
///
/// CLI values take precedence, then the `[tiling]` section.
pub fn resolve_request(args: &TilingArgs, config: &ConfigFile) -> Result<TilingRequest, CliError> {
    let shape = args
        .shape
        .map(TileShape::from)
        .unwrap_or(config.tiling.shape);
    let projection = args
        .projection
        .clone()
        .unwrap_or_else(|| config.tiling.projection.clone());

    let request = match (args.size_deg, args.size_arcmin) {
        (Some(deg), _) => TilingRequest::new(shape, deg, projection)?,
        (None, Some(arcmin)) => TilingRequest::from_arcminutes(shape, arcmin, projection)?,
        (None, None) => {
            TilingRequest::from_arcminutes(shape, config.tiling.size_arcmin, projection)?
        }
    };
    Ok(request)
}

/// Generate a tiling, honouring `max_tiles` from config.
pub fn build_tiling(request: &TilingRequest, config: &ConfigFile) -> Result<Tiling, CliError> {
    Ok(generate_with_limit(request, Some(config.output.max_tiles))?)
}

/// Resolve an output file: explicit path, or `default_name` in the
/// configured output directory.
pub fn resolve_output(explicit: Option<PathBuf>, default_name: &str, config: &ConfigFile) -> PathBuf {
    explicit.unwrap_or_else(|| config.output.directory.join(default_name))
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|error| CliError::OutputDir {
                path: parent.display().to_string(),
                error,
            })
        }
        _ => Ok(()),
    }
}

/// Default file name for a rendered tiling, e.g. `circle_tiles.png`.
pub fn default_file_name(shape: TileShape, extension: &str) -> String {
    format!("{}_tiles.{}", shape, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skytiles::tiling::TilingError;

    #[test]
    fn test_config_values_used_by_default() {
        let config = ConfigFile::default();
        let request = resolve_request(&TilingArgs::default(), &config).unwrap();

        assert_eq!(request.shape(), TileShape::Circle);
        assert!((request.tile_size_degrees() - 5.0 / 60.0).abs() < 1e-12);
        assert_eq!(request.projection(), "mollweide");
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = ConfigFile::default();
        let args = TilingArgs {
            shape: Some(ShapeArg::Square),
            size_arcmin: None,
            size_deg: Some(10.0),
            projection: Some("aitoff".to_string()),
        };
        let request = resolve_request(&args, &config).unwrap();

        assert_eq!(request.shape(), TileShape::Square);
        assert_eq!(request.tile_size_degrees(), 10.0);
        assert_eq!(request.projection(), "aitoff");
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let args = TilingArgs {
            size_arcmin: Some(0.0),
            ..Default::default()
        };
        let err = resolve_request(&args, &ConfigFile::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Tiling(TilingError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_max_tiles_is_enforced() {
        let mut config = ConfigFile::default();
        config.output.max_tiles = 10;
        let request = TilingRequest::new(TileShape::Circle, 45.0, "mollweide").unwrap();

        let err = build_tiling(&request, &config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Tiling(TilingError::TooManyTiles {
                requested: 32,
                limit: 10
            })
        ));
    }

    #[test]
    fn test_output_resolution() {
        let mut config = ConfigFile::default();
        config.output.directory = PathBuf::from("/tmp/maps");

        assert_eq!(
            resolve_output(None, "circle_tiles.png", &config),
            PathBuf::from("/tmp/maps/circle_tiles.png")
        );
        assert_eq!(
            resolve_output(Some(PathBuf::from("x.png")), "circle_tiles.png", &config),
            PathBuf::from("x.png")
        );
        assert_eq!(default_file_name(TileShape::Square, "geojson"), "square_tiles.geojson");
    }
}
