//! Rendering configuration.

/// An RGBA colour as `(r, g, b, a)`.
pub type Rgba = (u8, u8, u8, u8);

/// Default fill: blue at 40% opacity.
pub const DEFAULT_FILL_COLOR: Rgba = (0, 0, 255, 102);
/// Default tile edge: opaque black.
pub const DEFAULT_EDGE_COLOR: Rgba = (0, 0, 0, 255);
pub const DEFAULT_GRID_COLOR: Rgba = (176, 176, 176, 255);
pub const DEFAULT_BACKGROUND_COLOR: Rgba = (255, 255, 255, 255);

/// Error for a colour string that is not `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid colour '{0}': expected #rrggbb or #rrggbbaa")]
pub struct InvalidColor(pub String);

/// Parse a `#rrggbb` or `#rrggbbaa` colour.
pub fn parse_color(s: &str) -> Result<Rgba, InvalidColor> {
    let hex = s.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(InvalidColor(s.to_string()));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| InvalidColor(s.to_string()))
    };
    let alpha = if hex.len() == 8 { byte(6)? } else { 255 };
    Ok((byte(0)?, byte(2)?, byte(4)?, alpha))
}

/// Format a colour as `#rrggbb`, dropping the alpha channel.
pub fn format_color(color: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

/// Convert an opacity in `[0, 1]` to an alpha byte.
pub fn alpha_from_opacity(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Configuration for tile map rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Width of the output image in pixels.
    pub width: u32,
    /// Height of the output image in pixels.
    pub height: u32,
    /// Blank border around the projected sphere in pixels.
    pub margin: u32,
    /// Tile fill colour.
    pub fill_color: Rgba,
    /// Tile edge colour.
    pub edge_color: Rgba,
    /// Tile edge width in pixels. Zero disables edges.
    pub edge_width: f32,
    /// Draw the meridian/parallel graticule.
    pub grid: bool,
    pub grid_color: Rgba,
    pub background: Rgba,
    /// Vertices used to approximate each circular tile.
    pub outline_segments: usize,
    /// Tiles projected per parallel batch.
    pub batch_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            margin: 20,
            fill_color: DEFAULT_FILL_COLOR,
            edge_color: DEFAULT_EDGE_COLOR,
            edge_width: 0.5,
            grid: true,
            grid_color: DEFAULT_GRID_COLOR,
            background: DEFAULT_BACKGROUND_COLOR,
            outline_segments: 24,
            batch_size: 65_536,
        }
    }
}

impl RenderConfig {
    /// Set the output image size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable the graticule.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_fill_color(mut self, color: Rgba) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_edge(mut self, color: Rgba, width: f32) -> Self {
        self.edge_color = color;
        self.edge_width = width;
        self
    }

    pub fn with_outline_segments(mut self, segments: usize) -> Self {
        self.outline_segments = segments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let config = RenderConfig::default();
        assert_eq!(config.fill_color, (0, 0, 255, 102));
        assert_eq!(config.edge_color, (0, 0, 0, 255));
        assert!(config.grid);
    }

    #[test]
    fn test_builder() {
        let config = RenderConfig::default()
            .with_size(400, 200)
            .with_margin(0)
            .with_grid(false)
            .with_edge((255, 0, 0, 255), 2.0);
        assert_eq!((config.width, config.height), (400, 200));
        assert_eq!(config.margin, 0);
        assert!(!config.grid);
        assert_eq!(config.edge_color, (255, 0, 0, 255));
        assert_eq!(config.edge_width, 2.0);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#0000ff"), Ok((0, 0, 255, 255)));
        assert_eq!(parse_color("0000FF66"), Ok((0, 0, 255, 102)));
        assert!(parse_color("#00f").is_err());
        assert!(parse_color("#gg0000").is_err());
    }

    #[test]
    fn test_format_color() {
        assert_eq!(format_color((0, 0, 255, 102)), "#0000ff");
        assert_eq!(format_color((18, 52, 86, 255)), "#123456");
    }

    #[test]
    fn test_alpha_from_opacity() {
        assert_eq!(alpha_from_opacity(0.4), 102);
        assert_eq!(alpha_from_opacity(1.5), 255);
        assert_eq!(alpha_from_opacity(-1.0), 0);
    }
}
