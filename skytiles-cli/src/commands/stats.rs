//! `skytiles stats`: describe a tiling without rendering it.

use clap::Args;
use console::style;
use skytiles::config::ConfigFile;
use skytiles::tiling::TilingRequest;

use super::common::{resolve_request, TilingArgs};
use crate::error::CliError;

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub tiling: TilingArgs,
}

/// Run the stats command.
pub fn run(args: StatsArgs, config: &ConfigFile) -> Result<(), CliError> {
    let request = resolve_request(&args.tiling, config)?;
    for line in describe(&request) {
        println!("{}", line);
    }
    Ok(())
}

/// Lines describing the grid. Only the first and last tiles are built.
fn describe(request: &TilingRequest) -> Vec<String> {
    let mut tiles = request.tiles();
    let first = tiles.next();
    let last = tiles.last().or(first);

    let mut lines = vec![
        style(request.title()).bold().to_string(),
        format!("  Shape:       {}", request.shape()),
        format!("  Size:        {}°", request.tile_size_degrees()),
        format!("  Step:        {:.6}°", request.step_degrees()),
        format!("  Longitudes:  {}", request.lon_count()),
        format!("  Latitudes:   {}", request.lat_count()),
        match request.checked_tile_count() {
            Some(count) => format!("  Tiles:       {}", count),
            None => format!("  Tiles:       more than {} (overflows u64)", u64::MAX),
        },
        format!("  Projection:  {}", request.projection()),
    ];

    for (label, tile) in [("First", first), ("Last", last)] {
        if let Some(tile) = tile {
            let (lon, lat) = tile.center().to_degrees();
            lines.push(format!("  {:<5} centre: ({:.4}°, {:.4}°)", label, lon, lat));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use skytiles::tiling::TileShape;

    #[test]
    fn test_describe_reports_grid() {
        let request = TilingRequest::new(TileShape::Circle, 45.0, "hammer").unwrap();
        let lines = describe(&request);

        assert!(lines.iter().any(|l| l.contains("Tiles:       32")));
        assert!(lines.iter().any(|l| l.contains("Projection:  hammer")));
        assert!(lines
            .iter()
            .any(|l| l.contains("First centre: (-180.0000°, -90.0000°)")));
        assert!(lines
            .iter()
            .any(|l| l.contains("Last  centre: (135.0000°, 45.0000°)")));
    }

    #[test]
    fn test_describe_reports_overflowing_grid() {
        let request = TilingRequest::new(TileShape::Circle, 1e-8, "mollweide").unwrap();
        let lines = describe(&request);

        assert!(lines.iter().any(|l| l.contains("overflows u64")));
        assert!(lines.iter().any(|l| l.contains("Longitudes:  36000000")));
        assert!(lines
            .iter()
            .any(|l| l.contains("First centre: (-180.0000°, -90.0000°)")));
        assert!(lines.iter().any(|l| l.starts_with("  Last  centre:")));
    }
}
