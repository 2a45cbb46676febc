//! Presentation adapters around the core: text tables, SVG heatmaps and CSV
//! export. Nothing here feeds back into pricing.

pub mod export;
pub mod heatmap;
pub mod table;

pub use export::{to_csv_string, write_csv};
pub use heatmap::{render_svg, write_svg, HeatmapStyle, Palette};
pub use table::{inputs_table, summary_table};
