//! `skytiles render`: draw one tiling to a PNG file.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use skytiles::config::ConfigFile;
use skytiles::render::{RenderConfig, RenderedMap, TileRenderer};
use skytiles::tiling::Tiling;
use tracing::debug;

use super::common::{
    build_tiling, default_file_name, ensure_parent_dir, resolve_output, resolve_request,
    TilingArgs,
};
use crate::error::CliError;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub tiling: TilingArgs,

    /// Output PNG path (default: <output.directory>/<shape>_tiles.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Do not draw meridians and parallels
    #[arg(long)]
    pub no_grid: bool,
}

/// Run the render command.
pub fn run(args: RenderArgs, config: &ConfigFile) -> Result<(), CliError> {
    let request = resolve_request(&args.tiling, config)?;
    let output = resolve_output(
        args.output,
        &default_file_name(request.shape(), "png"),
        config,
    );

    let mut render_config = config.render_config();
    if let Some(width) = args.width {
        render_config.width = width;
    }
    if let Some(height) = args.height {
        render_config.height = height;
    }
    if args.no_grid {
        render_config.grid = false;
    }
    if render_config.width == 0 || render_config.height == 0 {
        return Err(CliError::Config(format!(
            "image size {}x{} must be at least 1x1",
            render_config.width, render_config.height
        )));
    }

    debug!(
        width = render_config.width,
        height = render_config.height,
        grid = render_config.grid,
        output = %output.display(),
        "Resolved render settings"
    );

    let tiling = build_tiling(&request, config)?;

    println!("{}", style(request.title()).bold());
    println!(
        "  Step: {:.6}°, grid {} × {} = {} tiles",
        request.step_degrees(),
        request.lon_count(),
        request.lat_count(),
        tiling.len()
    );

    let map = render_with_bar(&tiling, render_config, &output)?;
    print_saved(&map, &output);
    Ok(())
}

/// Render a tiling to `output`, showing a progress bar while tiles are drawn.
pub fn render_with_bar(
    tiling: &Tiling,
    render_config: RenderConfig,
    output: &Path,
) -> Result<RenderedMap, CliError> {
    ensure_parent_dir(output)?;

    let bar = ProgressBar::new(tiling.len() as u64);
    bar.set_style(progress_style());
    bar.set_message(tiling.request().shape().capitalized());

    let renderer = TileRenderer::new(render_config);
    let result = renderer.render_with_progress(tiling, |done, _total| {
        bar.set_position(done as u64);
    });
    bar.finish_and_clear();

    let map = result?;
    map.save_png(output)?;
    Ok(map)
}

/// Print a one-line summary of a saved map.
pub fn print_saved(map: &RenderedMap, output: &Path) {
    println!(
        "  {} {} ({}x{}, {}, {} tiles drawn)",
        style("Saved").green(),
        style(output.display()).cyan(),
        map.width(),
        map.height(),
        map.projection(),
        map.tiles_drawn()
    );
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:>8} [{bar:40.cyan/blue}] {human_pos}/{human_len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
