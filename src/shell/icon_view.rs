//! Draws a bitmap with half-block characters
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background. Cells are about
//! twice as tall as they are wide, so this keeps square icons square.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use super::draw::{NAVY, ORANGE};

const UPPER_HALF: &str = "▀";

pub struct IconView<'a> {
    bitmap: &'a RgbaImage,
    label: Option<&'a str>,
}

impl<'a> IconView<'a> {
    pub fn new(bitmap: &'a RgbaImage) -> Self {
        Self {
            bitmap,
            label: None,
        }
    }

    /// Text centered on the icon
    #[must_use]
    pub fn label(mut self, label: Option<&'a str>) -> Self {
        self.label = label;
        self
    }

    fn sample(&self, x: u32, y: u32, side: u32) -> Color {
        let (width, height) = self.bitmap.dimensions();
        let pixel = self.bitmap.get_pixel(x * width / side, y * height / side);
        match pixel.0 {
            [_, _, _, alpha] if alpha < 0x80 => Color::Reset,
            [r, g, b, _] => Color::Rgb(r, g, b),
        }
    }
}

impl Widget for IconView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let side = area.width.min(area.height.saturating_mul(2));
        if side == 0 || self.bitmap.width() == 0 || self.bitmap.height() == 0 {
            return;
        }
        let rows = side.div_ceil(2);
        let left = area.x + (area.width - side) / 2;
        let top = area.y + (area.height - rows) / 2;
        let pixels = u32::from(side);

        for row in 0..rows {
            for col in 0..side {
                let upper = u32::from(row) * 2;
                let lower = upper + 1;
                let fg = self.sample(u32::from(col), upper, pixels);
                let bg = if lower < pixels {
                    self.sample(u32::from(col), lower, pixels)
                } else {
                    Color::Reset
                };
                buf[(left + col, top + row)]
                    .set_symbol(UPPER_HALF)
                    .set_fg(fg)
                    .set_bg(bg);
            }
        }

        if let Some(label) = self.label {
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX).min(side);
            buf.set_stringn(
                left + (side - width) / 2,
                top + rows / 2,
                label,
                usize::from(width),
                Style::new()
                    .fg(NAVY)
                    .bg(ORANGE)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
