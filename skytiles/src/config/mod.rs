//! Configuration for skytiles.
//!
//! The user configuration lives in `~/.skytiles/config.ini` and supplies
//! defaults for the tiling request, the renderer and the output location.
//! Command-line arguments take precedence over anything set here.
//!
//! # Example
//!
//! ```
//! use skytiles::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! let render = config.render_config();
//! assert_eq!(render.width, 1000);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, OutputSettings, RenderSettings, TilingSettings};
