//! `skytiles export`: write a tiling as GeoJSON.

use std::path::PathBuf;

use clap::Args;
use console::style;
use skytiles::config::ConfigFile;
use skytiles::export::write_geojson;

use super::common::{
    build_tiling, default_file_name, ensure_parent_dir, resolve_output, resolve_request,
    TilingArgs,
};
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub tiling: TilingArgs,

    /// Output GeoJSON path (default: <output.directory>/<shape>_tiles.geojson)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Run the export command.
pub fn run(args: ExportArgs, config: &ConfigFile) -> Result<(), CliError> {
    let request = resolve_request(&args.tiling, config)?;
    let output = resolve_output(
        args.output,
        &default_file_name(request.shape(), "geojson"),
        config,
    );

    let tiling = build_tiling(&request, config)?;
    ensure_parent_dir(&output)?;
    write_geojson(&tiling, &config.render_config(), &output)?;

    println!(
        "{} {} ({} features)",
        style("Exported").green(),
        style(output.display()).cyan(),
        tiling.len()
    );
    Ok(())
}
