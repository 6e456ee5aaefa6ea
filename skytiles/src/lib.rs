//! skytiles - sky tiling diagrams
//!
//! This library lays a regular grid of circular or square tiles over the
//! full sky (as a flat longitude/latitude grid), projects them with one of
//! the classic all-sky projections and renders the result to PNG or
//! exports it as GeoJSON.
//!
//! # Example
//!
//! ```no_run
//! use skytiles::render::{RenderConfig, TileRenderer};
//! use skytiles::tiling::{generate, TileShape, TilingRequest};
//!
//! let request = TilingRequest::from_arcminutes(TileShape::Circle, 300.0, "mollweide")?;
//! let tiling = generate(&request)?;
//!
//! let renderer = TileRenderer::new(RenderConfig::default());
//! renderer.render_to_file(&tiling, "circle_tiles.png".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod export;
pub mod logging;
pub mod projection;
pub mod render;
pub mod tiling;
