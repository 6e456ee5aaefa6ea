//! skytiles CLI - Command-line interface
//!
//! Renders flat-grid sky tilings on all-sky projections, prints grid
//! statistics and exports tilings as GeoJSON.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use skytiles::config::ConfigFile;
use skytiles::logging::{init_logging, LoggingGuard};

use commands::config::ConfigCommands;
use commands::demo::DemoArgs;
use commands::export::ExportArgs;
use commands::render::RenderArgs;
use commands::stats::StatsArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "skytiles")]
#[command(version, about = "Sky tiling diagrams on all-sky projections", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the circle and square 5' tilings on a Mollweide map
    Demo(DemoArgs),

    /// Render one tiling to a PNG file
    Render(RenderArgs),

    /// Print grid statistics without rendering
    Stats(StatsArgs),

    /// Export a tiling as GeoJSON
    Export(ExportArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands must work even when the file is broken
    let command = match cli.command {
        Commands::Config(command) => return commands::config::run(command),
        other => other,
    };

    let config = ConfigFile::load()?;
    let _guard = start_logging(&config, cli.verbose)?;

    match command {
        Commands::Demo(args) => commands::demo::run(args, &config),
        Commands::Render(args) => commands::render::run(args, &config),
        Commands::Stats(args) => commands::stats::run(args, &config),
        Commands::Export(args) => commands::export::run(args, &config),
        Commands::Config(_) => Ok(()),
    }
}

fn start_logging(config: &ConfigFile, verbose: bool) -> Result<LoggingGuard, CliError> {
    init_logging(&config.logging.directory, &config.logging.file, verbose)
        .map_err(|e| CliError::LoggingInit(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_size_flags_conflict() {
        let result = Cli::try_parse_from([
            "skytiles",
            "render",
            "--size-arcmin",
            "5",
            "--size-deg",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "skytiles",
            "-v",
            "render",
            "--shape",
            "square",
            "--size-deg",
            "2.5",
            "--projection",
            "hammer",
            "--no-grid",
            "-o",
            "out.png",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.tiling.size_deg, Some(2.5));
                assert_eq!(args.tiling.projection.as_deref(), Some("hammer"));
                assert!(args.no_grid);
                assert_eq!(args.output, Some(std::path::PathBuf::from("out.png")));
            }
            _ => panic!("expected render command"),
        }
    }
}
