//! Label text: measurement, greedy wrapping and glyph drawing.

use crate::font_manager;
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{Color, Pixmap, PremultipliedColorU8};

/// Advance used per character when no font is available, as a fraction of
/// the font size.
const FALLBACK_ADVANCE: f32 = 0.6;

/// Size, weight and color of a run of label text
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
}

/// Measures and draws label text
///
/// Without a font, widths use a fixed per-character advance and drawing is
/// skipped, which keeps layout deterministic on font-less systems.
#[derive(Clone, Copy)]
pub struct Typesetter {
    regular: Option<&'static Font<'static>>,
    bold: Option<&'static Font<'static>>,
}

impl std::fmt::Debug for Typesetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typesetter")
            .field("regular", &self.regular.is_some())
            .field("bold", &self.bold.is_some())
            .finish()
    }
}

impl Typesetter {
    /// Uses a system font family ("Sans", "Serif", "Monospace" or a name).
    pub fn for_family(family: &str) -> Self {
        let regular = font_manager::get_font_for(family, false);
        let bold = font_manager::get_font_for(family, true).or(regular);
        Self { regular, bold }
    }

    /// Fixed-advance metrics and no glyph output.
    pub fn fallback() -> Self {
        Self {
            regular: None,
            bold: None,
        }
    }

    pub fn has_font(&self) -> bool {
        self.regular.is_some()
    }

    fn font(&self, bold: bool) -> Option<&'static Font<'static>> {
        if bold {
            self.bold
        } else {
            self.regular
        }
    }

    /// Rendered width of `text` in pixels.
    pub fn text_width(&self, text: &str, size: f32, bold: bool) -> f32 {
        let Some(font) = self.font(bold) else {
            return text.chars().count() as f32 * size * FALLBACK_ADVANCE;
        };
        let scale = Scale::uniform(size);
        font.layout(text, scale, rt_point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Greedily packs `parts` into lines joined by `separator`, starting a
    /// new line whenever the next part would push the width past `max_width`.
    ///
    /// A part wider than `max_width` on its own occupies a line by itself.
    pub fn wrap(&self, parts: &[String], separator: &str, max_width: f32, size: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        for part in parts {
            if current.is_empty() {
                current = part.clone();
                continue;
            }
            let candidate = format!("{current}{separator}{part}");
            if self.text_width(&candidate, size, false) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, part.clone()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    /// Draws `text` with its baseline at `baseline_y`.
    pub fn draw_text(&self, pixmap: &mut Pixmap, text: &str, x: f32, baseline_y: f32, style: TextStyle) {
        let Some(font) = self.font(style.bold) else {
            return;
        };
        let width = pixmap.width() as i32;
        let height = pixmap.height() as i32;
        let scale = Scale::uniform(style.size);
        let color = style.color;

        for glyph in font.layout(text, scale, rt_point(x, baseline_y)) {
            let Some(bounding_box) = glyph.pixel_bounding_box() else {
                continue;
            };
            let pixels = pixmap.pixels_mut();
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bounding_box.min.x;
                let py = gy as i32 + bounding_box.min.y;
                if px < 0 || py < 0 || px >= width || py >= height || coverage <= 0.0 {
                    return;
                }
                let idx = (py * width + px) as usize;
                pixels[idx] = blend(pixels[idx], color, coverage.min(1.0));
            });
        }
    }
}

/// Source-over blend of an opaque color with partial coverage.
fn blend(dst: PremultipliedColorU8, color: Color, coverage: f32) -> PremultipliedColorU8 {
    let inv = 1.0 - coverage;
    let channel = |src: f32, dst: u8| (src * 255.0 * coverage + dst as f32 * inv).round();
    let a = channel(1.0, dst.alpha()).min(255.0);
    let r = channel(color.red(), dst.red()).min(a);
    let g = channel(color.green(), dst.green()).min(a);
    let b = channel(color.blue(), dst.blue()).min(a);
    PremultipliedColorU8::from_rgba(r as u8, g as u8, b as u8, a as u8).unwrap_or(dst)
}
