//! Building export
//!
//! Composites every floor of the building into one labeled PNG: a header
//! with the student and project, then one panel per floor with its name,
//! wrapped block statistics, tiles, accessories and grid lines.
//!
//! The compositor only reads the editor state, so a failed export never
//! affects the design being edited.

mod layout;

pub use layout::ExportLayout;

use layout::{STATS_FIRST_BASELINE, STATS_LINE_HEIGHT};

use crate::counts::BlockCounts;
use crate::editor_state::EditorState;
use crate::floor::Floor;
use crate::grid::GridSize;
use crate::renderer::{draw_floor_tiles, draw_grid_lines, pixmap_to_rgb};
use crate::sprites::SpriteSheet;
use crate::text::{TextStyle, Typesetter};
use blockplan_core::TileCatalog;
use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

const HEADER_FONT_SIZE: f32 = 20.0;
const NAME_FONT_SIZE: f32 = 16.0;
const STATS_FONT_SIZE: f32 = 14.0;
const STATS_SEPARATOR: &str = " | ";

fn page_color() -> Color {
    Color::WHITE
}
fn panel_color() -> Color {
    Color::from_rgba8(0xf7, 0xf7, 0xf7, 255)
}
fn panel_border_color() -> Color {
    Color::from_rgba8(0xbb, 0xbb, 0xbb, 255)
}
fn grid_line_color() -> Color {
    Color::from_rgba8(0xcc, 0xcc, 0xcc, 255)
}

/// Errors raised while producing an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// The composite is too large (or empty) to allocate
    #[error("Cannot allocate a {width}x{height} export image")]
    Canvas { width: u32, height: u32 },

    /// The page size does not fit in 32-bit pixel coordinates
    #[error("Export of {floors} {grid_width}x{grid_height} floors at {tile_size}px per tile is too large")]
    TooLarge {
        floors: usize,
        grid_width: u32,
        grid_height: u32,
        tile_size: u32,
    },

    /// PNG encoding failed
    #[error("Failed to encode export image: {0}")]
    Encode(#[from] image::ImageError),

    /// Writing the artifact failed
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Student and project identification printed in the header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportHeader {
    pub student: String,
    pub project: String,
}

impl ExportHeader {
    /// Blank fields fall back to `"Student"` and `"Project"`.
    pub fn new(student: &str, project: &str) -> Self {
        let or_default = |value: &str, default: &str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        };
        Self {
            student: or_default(student, "Student"),
            project: or_default(project, "Project"),
        }
    }

    /// `"{student}_{project}.png"` with spaces and path separators replaced
    /// by underscores. Leading dots are stripped so the name can never be
    /// hidden or climb out of the output directory.
    pub fn file_name(&self) -> String {
        let stem: String = format!("{}_{}", self.student, self.project)
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' | ':' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim_start_matches('.');
        if stem.is_empty() {
            "export.png".to_string()
        } else {
            format!("{stem}.png")
        }
    }
}

impl Default for ExportHeader {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// An encoded export ready to be saved
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the PNG into `dir` under its file name.
    ///
    /// The file name must be a single plain path component.
    pub fn write_to_dir(&self, dir: &Path) -> ExportResult<PathBuf> {
        let mut components = Path::new(&self.file_name).components();
        let plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !plain {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("export file name {:?} is not a plain file name", self.file_name),
            )));
        }
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.png)?;
        tracing::info!("Wrote export to {}", path.display());
        Ok(path)
    }
}

/// Renders the whole building into one image
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    layout: ExportLayout,
    catalog: &'a TileCatalog,
    sprites: &'a SpriteSheet,
    typesetter: Typesetter,
}

impl<'a> Compositor<'a> {
    pub fn new(
        layout: ExportLayout,
        catalog: &'a TileCatalog,
        sprites: &'a SpriteSheet,
        typesetter: Typesetter,
    ) -> Self {
        Self {
            layout,
            catalog,
            sprites,
            typesetter,
        }
    }

    pub fn layout(&self) -> &ExportLayout {
        &self.layout
    }

    /// Layout for exporting `state`: the label band grows so that every
    /// floor's wrapped statistics fit.
    pub fn page_layout(&self, state: &EditorState) -> ExportLayout {
        let size = state.size();
        let tallest = state
            .floors()
            .iter()
            .map(|floor| self.stats_lines(floor, size).len())
            .max()
            .unwrap_or(0);
        self.layout.fit_label_band(tallest)
    }

    /// Draws all floors, hidden ones included.
    pub fn compose(&self, state: &EditorState, header: &ExportHeader) -> ExportResult<RgbImage> {
        let size = state.size();
        let layout = self.page_layout(state);
        let (width, height) =
            layout
                .image_size(size, state.floor_count())
                .ok_or(ExportError::TooLarge {
                    floors: state.floor_count(),
                    grid_width: size.width(),
                    grid_height: size.height(),
                    tile_size: layout.tile_size,
                })?;
        let mut pixmap =
            Pixmap::new(width, height).ok_or(ExportError::Canvas { width, height })?;
        pixmap.fill(page_color());

        let header_style = TextStyle {
            size: HEADER_FONT_SIZE,
            bold: false,
            color: Color::BLACK,
        };
        let inset = layout.text_inset as f32;
        self.typesetter.draw_text(
            &mut pixmap,
            &format!("Student: {}", header.student),
            inset,
            30.0,
            header_style,
        );
        self.typesetter.draw_text(
            &mut pixmap,
            &format!("Project: {}", header.project),
            inset,
            55.0,
            header_style,
        );

        for (index, floor) in state.floors().iter().enumerate() {
            self.draw_panel(&mut pixmap, &layout, size, index, floor);
        }

        Ok(pixmap_to_rgb(&pixmap))
    }

    fn draw_panel(
        &self,
        pixmap: &mut Pixmap,
        layout: &ExportLayout,
        size: GridSize,
        index: usize,
        floor: &Floor,
    ) {
        let (px, py) = layout.panel_origin(size, index);
        let (px, py) = (px as f32, py as f32);
        let (fw, fh) = layout.floor_pixels(size);
        let label_height = layout.label_height as f32;
        let panel_height = label_height + fh as f32;

        if let Some(rect) = Rect::from_xywh(px, py, fw as f32, panel_height) {
            let mut paint = Paint::default();
            paint.set_color(panel_color());
            pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        }

        let inset = layout.text_inset as f32;
        self.typesetter.draw_text(
            pixmap,
            &floor.display_name(index),
            px + inset,
            py + 18.0,
            TextStyle {
                size: NAME_FONT_SIZE,
                bold: true,
                color: Color::BLACK,
            },
        );

        let stats_style = TextStyle {
            size: STATS_FONT_SIZE,
            bold: false,
            color: Color::BLACK,
        };
        let mut baseline = py + STATS_FIRST_BASELINE as f32;
        for line in self.stats_lines(floor, size) {
            self.typesetter.draw_text(pixmap, &line, px + inset, baseline, stats_style);
            baseline += STATS_LINE_HEIGHT as f32;
        }

        let origin = (px, py + label_height);
        let tile = layout.tile_size as f32;
        draw_floor_tiles(pixmap, floor, origin, tile, self.sprites, 1.0);
        draw_grid_lines(pixmap, origin, size, tile, grid_line_color());

        if let Some(rect) = Rect::from_xywh(px + 0.5, py + 0.5, fw as f32 - 1.0, panel_height - 1.0) {
            let mut paint = Paint::default();
            paint.set_color(panel_border_color());
            paint.anti_alias = false;
            let stroke = Stroke {
                width: 1.0,
                ..Default::default()
            };
            pixmap.stroke_path(
                &PathBuilder::from_rect(rect),
                &paint,
                &stroke,
                Transform::identity(),
                None,
            );
        }
    }

    /// The floor's `"Name: count"` statistics wrapped to the panel width.
    pub fn stats_lines(&self, floor: &Floor, size: GridSize) -> Vec<String> {
        let labels = BlockCounts::for_floor(floor).labels(self.catalog);
        let max_width = self.layout.interior_width(size) as f32;
        self.typesetter
            .wrap(&labels, STATS_SEPARATOR, max_width, STATS_FONT_SIZE)
    }

    /// Composes and encodes the building as a PNG artifact.
    pub fn export(&self, state: &EditorState, header: &ExportHeader) -> ExportResult<ExportArtifact> {
        let result = self.compose(state, header).and_then(|image| {
            let mut png = Vec::new();
            image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
            Ok(ExportArtifact {
                file_name: header.file_name(),
                width: image.width(),
                height: image.height(),
                png,
            })
        });
        match &result {
            Ok(artifact) => tracing::info!(
                "Exported {} floors as {} ({}x{})",
                state.floor_count(),
                artifact.file_name,
                artifact.width,
                artifact.height
            ),
            Err(err) => tracing::error!("Export failed: {}", err),
        }
        result
    }
}
