//! Editor constants for grid geometry, share links, export and serving

/// Number of cells in every layout
pub const GRID_CELL_COUNT: usize = 21;

// Row/column placement only matters when rendering
/// Columns in the rendered layout
pub const GRID_COLUMNS: usize = 3;
/// Rows in the rendered layout
pub const GRID_ROWS: usize = GRID_CELL_COUNT / GRID_COLUMNS;

/// Tile id every fresh or cleared cell holds
pub const BLANK_TILE_ID: &str = "blank";

// Layout token text format
/// Separator between cells in a layout token
pub const CELL_SEPARATOR: char = ',';
/// Separator between tile id and rotation within a cell
pub const FIELD_SEPARATOR: char = ':';

// Share link settings
/// Query parameter carrying the layout token
pub const LAYOUT_QUERY_PARAM: &str = "layout";
/// Quiet period after the last grid change before the page URL is rewritten
pub const URL_UPDATE_DEBOUNCE_MS: u64 = 1000;

// Export settings
/// Edge length of a rendered cell in CSS pixels
pub const TILE_CSS_SIZE: u32 = 64;
/// Gap between rendered cells in CSS pixels
pub const TILE_CSS_GAP: u32 = 4;
/// Device pixel ratio requested from the rasterizer
pub const EXPORT_PIXEL_RATIO: u32 = 2;
/// Largest device pixel ratio accepted for an export
pub const MAX_EXPORT_PIXEL_RATIO: u32 = 8;
/// Filename used for downloaded exports
pub const EXPORT_FILENAME: &str = "chassis-layout.png";

// Asset layout
/// Default directory holding static assets
pub const DEFAULT_ASSET_DIR: &str = "assets";
/// Subdirectory of the asset directory holding tile images
pub const TILE_ASSET_SUBDIR: &str = "tiles";
/// File extension of tile images
pub const TILE_ASSET_EXTENSION: &str = "jpg";

// Server defaults
/// Default bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port
pub const DEFAULT_PORT: u16 = 3000;
/// Default application shell served for unmatched paths
pub const DEFAULT_SHELL_PATH: &str = "public/index.html";
/// Page URL assumed when the editor runs outside a browser
pub const DEFAULT_PAGE_URL: &str = "http://localhost:3000/";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
