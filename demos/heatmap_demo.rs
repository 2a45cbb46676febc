// Example: heatmap_demo.rs
// Loads a heatmap config, prints the input and value tables, and writes the
// call/put price heatmaps and call/put difference maps as SVG plus CSV.
//
// Usage:
//     cargo run --example heatmap_demo -- [config.toml] [output_dir]
//
// Defaults to demos/heatmap.toml and the current directory.

use std::env;
use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bs_heatmap_lib::report::{inputs_table, summary_table, write_csv, write_svg, HeatmapStyle};
use bs_heatmap_lib::{build_heatmaps, HeatmapConfig, MatrixKind};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("demos/heatmap.toml");
    let out_dir = PathBuf::from(args.get(2).map(String::as_str).unwrap_or("."));

    let config = HeatmapConfig::from_file(config_path)?;

    println!("Black-Scholes Pricing Model");
    println!("===========================");
    println!("{}", inputs_table(&config.option));

    let set = build_heatmaps(&config).context("Failed to build heatmaps")?;
    println!("{}", summary_table(&set.pricing));

    let spot = config.effective_spot_bounds();
    let vol = config.effective_vol_bounds();
    println!(
        "Grid: {} x {} | spot {:.2}..{:.2} | volatility {:.2}..{:.2}",
        config.grid.count, config.grid.count, spot.min, spot.max, vol.min, vol.max
    );

    for matrix in set.matrices() {
        let suffix = match matrix.kind() {
            MatrixKind::Price => "price",
            MatrixKind::Difference => "difference",
        };
        let stem = format!("{}_{}", matrix.option_type(), suffix);

        let svg_path = out_dir.join(format!("{}.svg", stem));
        write_svg(matrix, &HeatmapStyle::for_matrix(matrix), &svg_path)?;

        let csv_path = out_dir.join(format!("{}.csv", stem));
        let file = File::create(&csv_path)
            .with_context(|| format!("Failed to create {}", csv_path.display()))?;
        write_csv(matrix, file)?;

        println!(
            "  {:<16} min {:>8.2}  max {:>8.2}  -> {}",
            stem,
            matrix.min(),
            matrix.max(),
            svg_path.display()
        );
    }

    Ok(())
}
