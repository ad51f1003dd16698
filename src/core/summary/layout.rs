//! Summary image layout
//!
//! Pure text placement; no pixels are touched here. Coordinates are in pixels
//! from the top-left corner and `y` is the text baseline. Sizes are in points.

use crate::domain::Country;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

pub const TITLE: &str = "Country Currency API Summary";

const TITLE_SIZE: f32 = 22.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 14.0;
const MARGIN_X: i32 = 20;
const RANK_INDENT_X: i32 = 40;
const RANK_START_Y: i32 = 160;
const RANK_STEP_Y: i32 = 30;

/// One line of text to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: f32,
}

/// Everything a rasterizer needs to draw the summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLayout {
    pub width: u32,
    pub height: u32,
    pub lines: Vec<TextLine>,
}

impl SummaryLayout {
    /// Lay out the summary
    ///
    /// `top` is expected in ranking order and is drawn as given.
    pub fn build(
        total_countries: u64,
        top: &[Country],
        top_n: usize,
        as_of: DateTime<Utc>,
        width: u32,
        height: u32,
    ) -> Self {
        let mut lines = Vec::with_capacity(top.len() + 4);

        lines.push(TextLine {
            text: TITLE.to_string(),
            x: (width as i32 - 300).max(MARGIN_X) / 2,
            y: 30,
            size: TITLE_SIZE,
        });
        lines.push(TextLine {
            text: format!("Total countries: {total_countries}"),
            x: MARGIN_X,
            y: 80,
            size: HEADING_SIZE,
        });
        lines.push(TextLine {
            text: format!("Top {top_n} Countries by Estimated GDP:"),
            x: MARGIN_X,
            y: 120,
            size: HEADING_SIZE,
        });

        for (rank, country) in top.iter().take(top_n).enumerate() {
            lines.push(TextLine {
                text: format!("{}: {}", country.name, format_gdp(country.estimated_gdp)),
                x: RANK_INDENT_X,
                y: RANK_START_Y + RANK_STEP_Y * rank as i32,
                size: BODY_SIZE,
            });
        }

        lines.push(TextLine {
            text: format!("Last refreshed at: {}", as_of.format("%Y-%m-%d %H:%M:%S")),
            x: MARGIN_X,
            y: height as i32 - 50,
            size: BODY_SIZE,
        });

        Self {
            width,
            height,
            lines,
        }
    }

    /// Text of every line, top to bottom
    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }
}

/// GDP as shown in the ranking; absent values read `unknown`
pub fn format_gdp(gdp: Option<Decimal>) -> String {
    match gdp {
        Some(value) => format_amount(value),
        None => "unknown".to_string(),
    }
}

/// Two decimals, half away from zero, with `,` thousands separators
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}
