//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::projection::Projection;
use crate::render::parse_color;
use crate::tiling::TileShape;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tiling] section
    if let Some(section) = ini.section(Some("tiling")) {
        if let Some(v) = section.get("shape") {
            config.tiling.shape = TileShape::from_str(v).map_err(|_| {
                invalid("tiling", "shape", v, "must be one of: circle, square")
            })?;
        }
        if let Some(size) = parse_number::<f64>(section, "tiling", "size_arcmin")? {
            if !size.is_finite() || size <= 0.0 {
                return Err(invalid(
                    "tiling",
                    "size_arcmin",
                    &size.to_string(),
                    "must be greater than 0",
                ));
            }
            config.tiling.size_arcmin = size;
        }
        if let Some(v) = section.get("projection") {
            let projection = Projection::from_str(v).map_err(|_| {
                invalid(
                    "tiling",
                    "projection",
                    v,
                    "must be one of: mollweide, hammer, aitoff, lambert, rectilinear",
                )
            })?;
            config.tiling.projection = projection.name().to_string();
        }
    }

    // [render] section
    if let Some(section) = ini.section(Some("render")) {
        if let Some(v) = parse_number(section, "render", "width")? {
            config.render.width = v;
        }
        if let Some(v) = parse_number(section, "render", "height")? {
            config.render.height = v;
        }
        if let Some(v) = parse_number(section, "render", "margin")? {
            config.render.margin = v;
        }
        if let Some(v) = section.get("fill") {
            config.render.fill =
                parse_color(v).map_err(|e| invalid("render", "fill", v, &e.to_string()))?;
        }
        if let Some(v) = parse_number::<f32>(section, "render", "fill_opacity")? {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(
                    "render",
                    "fill_opacity",
                    &v.to_string(),
                    "must be between 0 and 1",
                ));
            }
            config.render.fill_opacity = v;
        }
        if let Some(v) = section.get("edge") {
            config.render.edge =
                parse_color(v).map_err(|e| invalid("render", "edge", v, &e.to_string()))?;
        }
        if let Some(v) = parse_number::<f32>(section, "render", "edge_width")? {
            if !v.is_finite() || v < 0.0 {
                return Err(invalid(
                    "render",
                    "edge_width",
                    &v.to_string(),
                    "must be 0 or greater",
                ));
            }
            config.render.edge_width = v;
        }
        if let Some(v) = parse_number(section, "render", "outline_segments")? {
            config.render.outline_segments = v;
        }
        if let Some(v) = section.get("grid") {
            config.render.grid = parse_bool(v).ok_or_else(|| {
                invalid("render", "grid", v, "must be true or false")
            })?;
        }
    }

    // [output] section
    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.output.directory = expand_tilde(v);
            }
        }
        if let Some(v) = parse_number(section, "output", "max_tiles")? {
            config.output.max_tiles = v;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse an optional numeric key, reporting the section and key on failure.
fn parse_number<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
) -> Result<Option<T>, ConfigFileError> {
    match section.get(key) {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section_name, key, v, "must be a number")),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
