//! `skytiles demo`: the two standard diagrams.
//!
//! Renders circle and square tilings at 5 arcminutes on a Mollweide map,
//! written as `circle_tiles.png` and `square_tiles.png`.

use std::path::PathBuf;

use clap::Args;
use console::style;
use skytiles::config::ConfigFile;
use skytiles::tiling::{TileShape, TilingRequest};
use tracing::info;

use super::common::{build_tiling, default_file_name};
use super::render::{print_saved, render_with_bar};
use crate::error::CliError;

const DEMO_SIZE_ARCMIN: f64 = 5.0;
const DEMO_PROJECTION: &str = "mollweide";

/// Arguments for the demo command.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Directory for the two PNG files (default: output.directory from config)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Run the demo command.
pub fn run(args: DemoArgs, config: &ConfigFile) -> Result<(), CliError> {
    let dir = args
        .output_dir
        .unwrap_or_else(|| config.output.directory.clone());
    info!(directory = %dir.display(), "Rendering demo tilings");

    for shape in [TileShape::Circle, TileShape::Square] {
        let request = TilingRequest::from_arcminutes(shape, DEMO_SIZE_ARCMIN, DEMO_PROJECTION)?;
        println!("{}", style(request.title()).bold());

        let tiling = build_tiling(&request, config)?;
        let output = dir.join(default_file_name(shape, "png"));
        let map = render_with_bar(&tiling, config.render_config(), &output)?;
        print_saved(&map, &output);
    }

    Ok(())
}
