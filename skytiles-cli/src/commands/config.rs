//! Configuration management CLI commands.
//!
//! Provides `config path`, `config show` and `config init`.

use std::path::Path;

use clap::Subcommand;
use console::style;
use skytiles::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init { force } => run_init(force),
    }
}

/// Show the configuration file path.
fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Print every setting, marking whether the file exists.
fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;

    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!();

    println!("{}", style("[tiling]").bold());
    println!("  shape = {}", config.tiling.shape);
    println!("  size_arcmin = {}", config.tiling.size_arcmin);
    println!("  projection = {}", config.tiling.projection);
    println!();

    let r = &config.render;
    println!("{}", style("[render]").bold());
    println!("  width = {}", r.width);
    println!("  height = {}", r.height);
    println!("  margin = {}", r.margin);
    println!("  fill = {}", skytiles::render::format_color(r.fill));
    println!("  fill_opacity = {}", r.fill_opacity);
    println!("  edge = {}", skytiles::render::format_color(r.edge));
    println!("  edge_width = {}", r.edge_width);
    println!("  outline_segments = {}", r.outline_segments);
    println!("  grid = {}", r.grid);
    println!();

    println!("{}", style("[output]").bold());
    println!("  directory = {}", config.output.directory.display());
    println!("  max_tiles = {}", config.output.max_tiles);
    println!();

    println!("{}", style("[logging]").bold());
    println!("  directory = {}", config.logging.directory.display());
    println!("  file = {}", config.logging.file);

    Ok(())
}

/// Write the default configuration.
fn run_init(force: bool) -> Result<(), CliError> {
    if force {
        ConfigFile::default().save()?;
        report_written(&config_file_path());
        return Ok(());
    }

    let (path, created) = ConfigFile::ensure_exists()?;
    if created {
        report_written(&path);
    } else {
        println!(
            "Configuration already exists at {} (use --force to overwrite)",
            style(path.display()).cyan()
        );
    }
    Ok(())
}

fn report_written(path: &Path) {
    println!(
        "{} {}",
        style("Wrote").green(),
        style(path.display()).cyan()
    );
}
