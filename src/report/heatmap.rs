//! SVG heatmaps of a [`PriceMatrix`].
//!
//! Rows are drawn top to bottom in volatility order and columns left to right
//! in spot order, each cell annotated with its value to two decimals.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::grid::{MatrixKind, PriceMatrix};

/// Viridis anchor colours, dark to light
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

const LOSS: (u8, u8, u8) = (215, 48, 39);
const NEUTRAL: (u8, u8, u8) = (247, 247, 247);
const GAIN: (u8, u8, u8) = (26, 152, 80);

/// Cell colouring scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Sequential dark-to-light scale between the matrix min and max
    Viridis,
    /// Red below zero, green above, white at zero
    Diverging,
}

/// Rendering options for one heatmap
#[derive(Debug, Clone)]
pub struct HeatmapStyle {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub font_size: f64,
}

impl HeatmapStyle {
    /// Default title and palette for the kind of matrix, e.g.
    /// "CALL Price Heatmap" or "PUT Price Difference".
    pub fn for_matrix(matrix: &PriceMatrix) -> Self {
        let side = matrix.option_type().as_str().to_uppercase();
        let (title, palette) = match matrix.kind() {
            MatrixKind::Price => (format!("{} Price Heatmap", side), Palette::Viridis),
            MatrixKind::Difference => (format!("{} Price Difference", side), Palette::Diverging),
        };
        Self {
            title,
            width: 1000,
            height: 800,
            palette,
            font_size: 14.0,
        }
    }
}

fn lerp(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> RGBColor {
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn viridis(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    lerp(VIRIDIS[lower], VIRIDIS[lower + 1], scaled - lower as f64)
}

fn diverging(value: f64, max_abs: f64) -> RGBColor {
    if !value.is_finite() || max_abs <= 0.0 {
        return RGBColor(NEUTRAL.0, NEUTRAL.1, NEUTRAL.2);
    }
    let t = (value / max_abs).clamp(-1.0, 1.0);
    if t < 0.0 {
        lerp(NEUTRAL, LOSS, -t)
    } else {
        lerp(NEUTRAL, GAIN, t)
    }
}

/// Label for an integer tick on an axis whose cells are centred on integers.
fn tick_label(values: &[f64], position: f64) -> String {
    let index = position.round();
    if (position - index).abs() > 1e-6 || index < 0.0 || index as usize >= values.len() {
        return String::new();
    }
    format!("{:.2}", values[index as usize])
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("Failed to draw heatmap: {}", e)
}

/// Render `matrix` as an SVG document.
pub fn render_svg(matrix: &PriceMatrix, style: &HeatmapStyle) -> Result<String> {
    let (rows, cols) = matrix.shape();
    let spots = matrix.spots();
    let vols = matrix.volatilities();
    // Row 0 is drawn at the top.
    let y_of = |row: usize| (rows - 1 - row) as f64;
    let reversed_vols: Vec<f64> = vols.iter().rev().copied().collect();

    let (min, max) = (matrix.min(), matrix.max());
    let max_abs = min.abs().max(max.abs());
    let colour = |value: f64| match style.palette {
        Palette::Viridis if max > min => viridis((value - min) / (max - min)),
        Palette::Viridis => viridis(0.5),
        Palette::Diverging => diverging(value, max_abs),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (style.width, style.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(&style.title, ("sans-serif", 28))
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..cols as f64 - 0.5, -0.5f64..rows as f64 - 0.5)
            .map_err(draw_err)?;

        let x_formatter = |x: &f64| tick_label(spots, *x);
        let y_formatter = |y: &f64| tick_label(&reversed_vols, *y);
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(cols)
            .y_labels(rows)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .x_desc("Spot Price")
            .y_desc("Volatility")
            .draw()
            .map_err(draw_err)?;

        let cells: Vec<(usize, usize, f64)> = matrix
            .rows()
            .enumerate()
            .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
            .collect();

        chart
            .draw_series(cells.iter().map(|&(i, j, value)| {
                let (x, y) = (j as f64, y_of(i));
                Rectangle::new(
                    [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                    colour(value).filled(),
                )
            }))
            .map_err(draw_err)?;

        let label_style = ("sans-serif", style.font_size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series(cells.iter().map(|&(i, j, value)| {
                Text::new(format!("{:.2}", value), (j as f64, y_of(i)), label_style.clone())
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

/// Render `matrix` and write the SVG to `path`.
pub fn write_svg(matrix: &PriceMatrix, style: &HeatmapStyle, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let svg = render_svg(matrix, style)?;
    std::fs::write(path, svg).map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))
}
