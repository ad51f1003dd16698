//! Rasterization of a summary layout into PNG bytes

use super::layout::SummaryLayout;
use crate::domain::RenderError;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::io::Cursor;
use std::path::{Path, PathBuf};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Points to pixels at 96 DPI
const PT_TO_PX: f32 = 96.0 / 72.0;

/// Turns a layout into encoded image bytes
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, layout: &SummaryLayout) -> Result<Vec<u8>, RenderError>;
}

/// PNG rasterizer drawing every line with one TrueType font
#[derive(Debug, Clone)]
pub struct PngRasterizer {
    font_path: PathBuf,
}

impl PngRasterizer {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
        }
    }

    fn load_font(&self) -> Result<FontVec, RenderError> {
        let bytes = std::fs::read(&self.font_path)
            .map_err(|_| RenderError::FontMissing(display(&self.font_path)))?;

        FontVec::try_from_vec(bytes).map_err(|e| {
            RenderError::Backend(format!(
                "Invalid font {}: {e}",
                display(&self.font_path)
            ))
        })
    }
}

impl Rasterizer for PngRasterizer {
    fn rasterize(&self, layout: &SummaryLayout) -> Result<Vec<u8>, RenderError> {
        let font = self.load_font()?;
        let mut canvas = RgbImage::from_pixel(layout.width, layout.height, BACKGROUND);

        for line in &layout.lines {
            let scale = PxScale::from(line.size * PT_TO_PX);
            let ascent = font.as_scaled(scale).ascent();
            let top = line.y - ascent.round() as i32;
            draw_text_mut(&mut canvas, FOREGROUND, line.x, top, scale, &font, &line.text);
        }

        let mut bytes = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Backend(format!("PNG encoding failed: {e}")))?;

        tracing::debug!(
            width = layout.width,
            height = layout.height,
            bytes = bytes.len(),
            "Summary rasterized"
        );
        Ok(bytes)
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}
