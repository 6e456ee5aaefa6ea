//! GeoJSON export of tilings.
//!
//! Each tile becomes a Polygon feature in degrees, `[lon, lat]` order, with
//! simplestyle properties (`fill`, `fill-opacity`, `stroke`) so that
//! GitHub's GeoJSON viewer and most mapping tools pick up the colours.
//! The colours come from the same [`RenderConfig`] used for PNG output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::render::{format_color, RenderConfig};
use crate::tiling::{Tile, Tiling};

/// Vertices used for circular tile outlines in exported polygons.
pub const GEOJSON_CIRCLE_SEGMENTS: usize = 32;

/// Errors that can occur while exporting a tiling.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create or write the output file.
    #[error("Failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The tiling could not be serialized.
    #[error("Failed to serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// GeoJSON FeatureCollection.
#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    /// Collection title.
    pub name: String,
    pub features: Vec<Feature>,
}

/// One tile as a GeoJSON Feature.
#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub shape: &'static str,
    /// Tile centre `[lon, lat]` in degrees.
    pub center: [f64; 2],
    /// Radius (circles) or side (squares) in degrees.
    pub size_deg: f64,
    pub fill: String,
    #[serde(rename = "fill-opacity")]
    pub fill_opacity: f64,
    pub stroke: String,
    #[serde(rename = "stroke-width")]
    pub stroke_width: f64,
}

/// Polygon geometry, a single closed ring.
#[derive(Debug, Serialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    kind: &'static str,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// simplestyle values shared by every feature of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStyle {
    pub fill: String,
    pub fill_opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

impl From<&RenderConfig> for FeatureStyle {
    fn from(config: &RenderConfig) -> Self {
        Self {
            fill: format_color(config.fill_color),
            fill_opacity: f64::from(config.fill_color.3) / 255.0,
            stroke: format_color(config.edge_color),
            stroke_width: f64::from(config.edge_width),
        }
    }
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl Feature {
    /// Build the feature for one tile.
    pub fn from_tile(tile: &Tile, style: &FeatureStyle) -> Self {
        let ring = tile
            .outline(GEOJSON_CIRCLE_SEGMENTS)
            .into_iter()
            .map(|p| {
                let (lon, lat) = p.to_degrees();
                [lon, lat]
            })
            .collect();
        let (lon, lat) = tile.center().to_degrees();

        Self {
            kind: "Feature",
            properties: FeatureProperties {
                shape: tile.shape().as_str(),
                center: [lon, lat],
                size_deg: tile.size().to_degrees(),
                fill: style.fill.clone(),
                fill_opacity: style.fill_opacity,
                stroke: style.stroke.clone(),
                stroke_width: style.stroke_width,
            },
            geometry: Geometry {
                kind: "Polygon",
                coordinates: vec![ring],
            },
        }
    }
}

/// Convert a tiling to a GeoJSON FeatureCollection styled like `config`.
pub fn to_feature_collection(tiling: &Tiling, config: &RenderConfig) -> FeatureCollection {
    let style = FeatureStyle::from(config);
    FeatureCollection {
        kind: "FeatureCollection",
        name: tiling.request().title(),
        features: tiling
            .iter()
            .map(|tile| Feature::from_tile(tile, &style))
            .collect(),
    }
}

/// Write a tiling as a GeoJSON file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be written.
pub fn write_geojson(
    tiling: &Tiling,
    config: &RenderConfig,
    output_path: &Path,
) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: output_path.to_path_buf(),
        source,
    };

    let file = File::create(output_path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &to_feature_collection(tiling, config))?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    info!(
        path = %output_path.display(),
        features = tiling.len(),
        "Wrote GeoJSON"
    );
    Ok(())
}
