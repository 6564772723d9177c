//! Static tile catalog
//!
//! The catalog is the single source of valid tile ids. Lookups never fail:
//! an id the catalog does not know resolves to the first entry.

use crate::io::configuration::{TILE_ASSET_EXTENSION, TILE_ASSET_SUBDIR};
use std::path::{Path, PathBuf};

/// A selectable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEntry {
    /// Identifier stored in layouts and used for asset lookup
    pub id: &'static str,
    /// Human readable name
    pub display_name: &'static str,
}

impl TileEntry {
    const fn new(id: &'static str, display_name: &'static str) -> Self {
        Self { id, display_name }
    }

    /// Image path of this tile relative to the asset directory
    pub fn relative_asset_path(&self) -> PathBuf {
        Path::new(TILE_ASSET_SUBDIR).join(format!("{}.{TILE_ASSET_EXTENSION}", self.id))
    }
}

const FALLBACK_ENTRY: TileEntry = TileEntry::new("black-vert", "Black (vertical grain)");

// The fallback must stay first
static TILE_CATALOG: &[TileEntry] = &[
    FALLBACK_ENTRY,
    TileEntry::new("black-horiz", "Black (horizontal grain)"),
    TileEntry::new("blank", "Blank"),
    TileEntry::new("silver", "Silver"),
    TileEntry::new("amd", "AMD Ryzen"),
    TileEntry::new("intel", "Intel Core"),
    TileEntry::new("nvidia", "NVIDIA GeForce"),
    TileEntry::new("linux", "Tux"),
    TileEntry::new("gear", "Gear"),
    TileEntry::new("rainbow", "Rainbow stripe"),
    TileEntry::new("carbon", "Carbon weave"),
    TileEntry::new("walnut", "Walnut veneer"),
    TileEntry::new("translucent", "Translucent smoke"),
    TileEntry::new("grid", "Grid pattern"),
];

/// All catalog entries in display order
pub fn entries() -> &'static [TileEntry] {
    TILE_CATALOG
}

/// The entry substituted for unknown ids, always `entries()[0]`
pub fn fallback() -> &'static TileEntry {
    TILE_CATALOG.first().unwrap_or(&FALLBACK_ENTRY)
}

/// Look up an entry by id
pub fn get(id: &str) -> Option<&'static TileEntry> {
    TILE_CATALOG.iter().find(|entry| entry.id == id)
}

/// Check whether an id belongs to the catalog
pub fn contains(id: &str) -> bool {
    get(id).is_some()
}

/// Resolve an id for rendering, substituting the fallback for unknown ids
pub fn resolve(id: &str) -> &'static TileEntry {
    get(id).unwrap_or_else(fallback)
}

/// Image path of a tile under `asset_dir`, after fallback resolution
pub fn asset_path(asset_dir: &Path, id: &str) -> PathBuf {
    asset_dir.join(resolve(id).relative_asset_path())
}
