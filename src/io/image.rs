//! PNG export of a layout rendered from tile images

use crate::io::configuration::{
    DEFAULT_ASSET_DIR, EXPORT_PIXEL_RATIO, GRID_COLUMNS, GRID_ROWS, MAX_EXPORT_PIXEL_RATIO,
    TILE_CSS_GAP, TILE_CSS_SIZE,
};
use crate::io::error::{Result, TileError, file_system, invalid_parameter};
use crate::layout::{CellIndex, Grid, Rotation, TileEntry};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Rendering parameters for an export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory containing `tiles/<id>.jpg`
    pub asset_dir: PathBuf,
    /// Device pixels per CSS pixel
    pub pixel_ratio: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            pixel_ratio: EXPORT_PIXEL_RATIO,
        }
    }
}

impl ExportOptions {
    /// Options reading tiles from `asset_dir` at the default pixel ratio
    pub fn with_asset_dir(asset_dir: impl Into<PathBuf>) -> Self {
        Self {
            asset_dir: asset_dir.into(),
            ..Self::default()
        }
    }

    const fn cell_pixels(&self) -> u32 {
        TILE_CSS_SIZE.saturating_mul(self.pixel_ratio)
    }

    const fn gap_pixels(&self) -> u32 {
        TILE_CSS_GAP.saturating_mul(self.pixel_ratio)
    }

    /// Output dimensions `(width, height)` in device pixels
    ///
    /// Saturates at `u32::MAX` for ratios far beyond what `render_grid` accepts.
    pub const fn canvas_size(&self) -> (u32, u32) {
        const fn span(count: u32, cell: u32, gap: u32) -> u32 {
            count
                .saturating_mul(cell)
                .saturating_add((count - 1).saturating_mul(gap))
        }

        let cell = self.cell_pixels();
        let gap = self.gap_pixels();
        (
            span(GRID_COLUMNS as u32, cell, gap),
            span(GRID_ROWS as u32, cell, gap),
        )
    }
}

// Tiles shared by several cells are decoded once
struct TileCache<'a> {
    asset_dir: &'a Path,
    loaded: HashMap<&'static str, DynamicImage>,
}

impl<'a> TileCache<'a> {
    fn new(asset_dir: &'a Path) -> Self {
        Self {
            asset_dir,
            loaded: HashMap::new(),
        }
    }

    fn get(&mut self, entry: &'static TileEntry) -> Result<&DynamicImage> {
        if !self.loaded.contains_key(entry.id) {
            let path = self.asset_dir.join(entry.relative_asset_path());
            let tile = image::open(&path).map_err(|source| TileError::ImageLoad { path, source })?;
            self.loaded.insert(entry.id, tile);
        }
        self.loaded
            .get(entry.id)
            .ok_or_else(|| invalid_parameter("tile", &entry.id, &"tile image missing from cache"))
    }
}

/// Render a grid onto a transparent canvas
///
/// Unknown tile ids are drawn with the catalog fallback tile.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel ratio is outside `1..=MAX_EXPORT_PIXEL_RATIO`
/// - The asset directory does not exist
/// - A tile image cannot be opened or decoded
pub fn render_grid(grid: &Grid, options: &ExportOptions) -> Result<RgbaImage> {
    if !(1..=MAX_EXPORT_PIXEL_RATIO).contains(&options.pixel_ratio) {
        return Err(invalid_parameter(
            "pixel_ratio",
            &options.pixel_ratio,
            &format!("must be between 1 and {MAX_EXPORT_PIXEL_RATIO}"),
        ));
    }
    if !options.asset_dir.is_dir() {
        return Err(TileError::FileSystem {
            path: options.asset_dir.clone(),
            operation: "open asset directory",
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }

    let (width, height) = options.canvas_size();
    let cell_pixels = options.cell_pixels();
    let stride = cell_pixels + options.gap_pixels();
    let mut canvas = RgbaImage::new(width, height);
    let mut tiles = TileCache::new(&options.asset_dir);

    for index in CellIndex::all() {
        let cell = grid.cell(index);
        let tile = tiles.get(cell.tile_id.resolve())?;
        let scaled = tile.resize_exact(cell_pixels, cell_pixels, FilterType::Lanczos3);
        let turned = match cell.rotation {
            Rotation::Deg0 => scaled,
            Rotation::Deg90 => scaled.rotate90(),
            Rotation::Deg180 => scaled.rotate180(),
            Rotation::Deg270 => scaled.rotate270(),
        };

        let (row, column) = index.row_col();
        image::imageops::overlay(
            &mut canvas,
            &turned.to_rgba8(),
            i64::from(column as u32 * stride),
            i64::from(row as u32 * stride),
        );
    }

    Ok(canvas)
}

/// Encode a rendered canvas as PNG with maximum compression
///
/// # Errors
///
/// Returns an error if the PNG encoder rejects the image
pub fn encode_png(canvas: &RgbaImage, destination: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilter::Adaptive)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|source| TileError::ImageExport {
            path: destination.to_path_buf(),
            source,
        })?;
    Ok(bytes)
}

/// Render a grid and write it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_grid`])
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn export_grid_as_png(grid: &Grid, options: &ExportOptions, output_path: &Path) -> Result<()> {
    let canvas = render_grid(grid, options)?;
    let bytes = encode_png(&canvas, output_path)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }
    std::fs::write(output_path, bytes).map_err(file_system(output_path, "write export"))?;

    tracing::info!(path = %output_path.display(), "exported layout image");
    Ok(())
}
