//! Summary image generation
//!
//! - [`layout`] - Text placement for the summary
//! - [`raster`] - Layout to PNG bytes
//! - [`renderer`] - Reads the store, rasterizes, writes the artifact

pub mod layout;
pub mod raster;
pub mod renderer;

pub use layout::{format_amount, format_gdp, SummaryLayout, TextLine};
pub use raster::{PngRasterizer, Rasterizer};
pub use renderer::SummaryRenderer;
