//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use skytiles::config::ConfigFileError;
use skytiles::export::ExportError;
use skytiles::render::RenderError;
use skytiles::tiling::TilingError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid combination of arguments or settings
    Config(String),
    /// Config file could not be read or written
    ConfigFile(ConfigFileError),
    /// Tiling request rejected
    Tiling(TilingError),
    /// Rendering or writing the image failed
    Render(RenderError),
    /// GeoJSON export failed
    Export(ExportError),
    /// Failed to create an output directory
    OutputDir { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Tiling(TilingError::TooManyTiles { .. }) => {
                eprintln!();
                eprintln!("The tile count grows with the inverse square of the tile size.");
                eprintln!("  1. Use a larger --size-arcmin or --size-deg");
                eprintln!("  2. Or raise max_tiles in the [output] section of config.ini");
            }
            CliError::Render(RenderError::UnknownProjection(_)) => {
                eprintln!();
                eprintln!("Supported projections: mollweide, hammer, aitoff, lambert, rectilinear");
            }
            CliError::ConfigFile(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!(
                    "Fix the value in {} or run 'skytiles config init --force'",
                    skytiles::config::config_file_path().display()
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Tiling(e) => write!(f, "Invalid tiling: {}", e),
            CliError::Render(e) => write!(f, "Rendering failed: {}", e),
            CliError::Export(e) => write!(f, "Export failed: {}", e),
            CliError::OutputDir { path, error } => {
                write!(f, "Failed to create output directory '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ConfigFile(e) => Some(e),
            CliError::Tiling(e) => Some(e),
            CliError::Render(e) => Some(e),
            CliError::Export(e) => Some(e),
            CliError::OutputDir { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<TilingError> for CliError {
    fn from(e: TilingError) -> Self {
        CliError::Tiling(e)
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        CliError::Render(e)
    }
}

impl From<ExportError> for CliError {
    fn from(e: ExportError) -> Self {
        CliError::Export(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_render_error_keeps_source() {
        let err: CliError = RenderError::InvalidCanvas {
            width: 0,
            height: 10,
        }
        .into();
        assert!(matches!(err, CliError::Render(_)));
        assert_eq!(err.to_string(), "Rendering failed: Invalid canvas size 0x10");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_and_source() {
        let err: CliError = TilingError::InvalidShapeKind("hexagon".to_string()).into();
        assert!(err.to_string().starts_with("Invalid tiling:"));
        assert!(err.to_string().contains("hexagon"));
        assert!(err.source().is_some());

        let err = CliError::Config("both sizes given".to_string());
        assert_eq!(err.to_string(), "Configuration error: both sizes given");
        assert!(err.source().is_none());
    }
}
