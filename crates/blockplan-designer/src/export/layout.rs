//! Page geometry of the export image.

use crate::grid::GridSize;
use blockplan_settings::ExportSettings;

/// Baseline of the first statistics line below the panel top
pub(crate) const STATS_FIRST_BASELINE: u32 = 40;
/// Distance between statistics baselines
pub(crate) const STATS_LINE_HEIGHT: u32 = 16;
/// Room left under the last baseline for descenders
const LABEL_BOTTOM_MARGIN: u32 = 4;

/// Pixel layout of the composite export
///
/// Floors are laid out row-major in panels of `columns` per row. With
/// `fw`/`fh` the floor's pixel size and `cols = min(columns, floors)`:
///
/// ```text
/// width  = padding + cols * (fw + padding)
/// height = header_height + rows * (label_height + fh + padding)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportLayout {
    pub tile_size: u32,
    pub columns: u32,
    pub padding: u32,
    pub header_height: u32,
    pub label_height: u32,
    pub text_inset: u32,
}

impl Default for ExportLayout {
    fn default() -> Self {
        Self::from_settings(32, &ExportSettings::default())
    }
}

impl ExportLayout {
    pub fn from_settings(tile_size: u32, settings: &ExportSettings) -> Self {
        Self {
            tile_size: tile_size.max(1),
            columns: settings.columns.max(1),
            padding: settings.padding,
            header_height: settings.header_height,
            label_height: settings.label_height,
            text_inset: settings.text_inset,
        }
    }

    /// Pixel size of one floor's tile area, saturating on overflow.
    pub fn floor_pixels(&self, size: GridSize) -> (u32, u32) {
        (
            size.width().saturating_mul(self.tile_size),
            size.height().saturating_mul(self.tile_size),
        )
    }

    pub fn columns_for(&self, floor_count: usize) -> u32 {
        (floor_count.max(1) as u32).min(self.columns)
    }

    pub fn rows_for(&self, floor_count: usize) -> u32 {
        (floor_count.max(1) as u32).div_ceil(self.columns)
    }

    /// Panel height: label band plus tile area.
    pub fn panel_height(&self, size: GridSize) -> u32 {
        self.label_height.saturating_add(self.floor_pixels(size).1)
    }

    /// Total image size for `floor_count` floors of `size`, or `None` when
    /// it does not fit in `u32`.
    pub fn image_size(&self, size: GridSize, floor_count: usize) -> Option<(u32, u32)> {
        let fw = size.width().checked_mul(self.tile_size)?;
        let fh = size.height().checked_mul(self.tile_size)?;
        let cols = self.columns_for(floor_count);
        let rows = self.rows_for(floor_count);
        let width = cols
            .checked_mul(fw.checked_add(self.padding)?)?
            .checked_add(self.padding)?;
        let row_height = self
            .label_height
            .checked_add(fh)?
            .checked_add(self.padding)?;
        let height = rows.checked_mul(row_height)?.checked_add(self.header_height)?;
        Some((width, height))
    }

    /// Top-left corner of the panel for floor `index`.
    ///
    /// Only meaningful once [`image_size`](Self::image_size) has succeeded.
    pub fn panel_origin(&self, size: GridSize, index: usize) -> (u32, u32) {
        let (fw, _) = self.floor_pixels(size);
        let col = index as u32 % self.columns;
        let row = index as u32 / self.columns;
        (
            self.padding + col * (fw + self.padding),
            self.header_height + row * (self.panel_height(size) + self.padding),
        )
    }

    /// Label band tall enough for the floor name and `stats_lines` lines of
    /// statistics, never smaller than the configured band.
    pub fn fit_label_band(&self, stats_lines: usize) -> Self {
        let extra = (stats_lines.saturating_sub(1) as u32).saturating_mul(STATS_LINE_HEIGHT);
        let needed = STATS_FIRST_BASELINE
            .saturating_add(extra)
            .saturating_add(LABEL_BOTTOM_MARGIN);
        Self {
            label_height: self.label_height.max(needed),
            ..*self
        }
    }

    /// Width available to label text inside a panel.
    pub fn interior_width(&self, size: GridSize) -> u32 {
        self.floor_pixels(size)
            .0
            .saturating_sub(2 * self.text_inset)
    }
}
