//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let grid = if config.render.grid { "true" } else { "false" };

    format!(
        r#"[tiling]
; Tile shape: circle or square
shape = {}
; Tile size in arcminutes (radius for circles, side length for squares)
size_arcmin = {}
; Projection: mollweide, hammer, aitoff, lambert or rectilinear
projection = {}

[render]
; Image size in pixels
width = {}
height = {}
; Blank border around the map in pixels
margin = {}
; Tile fill colour as rrggbb hex, and its opacity from 0 to 1
fill = {}
fill_opacity = {}
; Tile edge colour as rrggbb hex, and its width in pixels (0 disables edges)
edge = {}
edge_width = {}
; Vertices used to draw each circular tile
outline_segments = {}
; Draw meridians and parallels
grid = {}

[output]
; Directory for rendered maps when no output path is given
directory = {}
; Refuse to generate tilings with more tiles than this
max_tiles = {}

[logging]
directory = {}
file = {}
"#,
        config.tiling.shape,
        config.tiling.size_arcmin,
        config.tiling.projection,
        config.render.width,
        config.render.height,
        config.render.margin,
        hex(config.render.fill),
        config.render.fill_opacity,
        hex(config.render.edge),
        config.render.edge_width,
        config.render.outline_segments,
        grid,
        path_to_string(&config.output.directory),
        config.output.max_tiles,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

/// Colour as bare `rrggbb`. A leading `#` would start an INI comment.
fn hex(color: (u8, u8, u8, u8)) -> String {
    format!("{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_all_sections() {
        let content = to_config_string(&ConfigFile::default());
        for section in ["[tiling]", "[render]", "[output]", "[logging]"] {
            assert!(content.contains(section), "missing {}", section);
        }
        assert!(content.contains("shape = circle"));
        assert!(content.contains("size_arcmin = 5"));
        assert!(content.contains("fill = 0000ff"));
        assert!(content.contains("fill_opacity = 0.4"));
    }
}
