//! Asset manifest and load-result table
//!
//! The scene needs a fixed set of images. Each one resolves independently to
//! `Loaded` (with natural dimensions) or `Failed`; the scene only leaves the
//! loading state once every asset has loaded.

use crate::error::AssetError;

/// Number of distinct near-layer (tree) images
pub const NEAR_IMAGE_COUNT: usize = 8;

/// Identifies one image in the manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Sky,
    Middle,
    Field,
    /// Near-layer image, 0-based
    Near(u8),
}

impl AssetId {
    /// Every asset, in load order
    pub fn all() -> impl Iterator<Item = AssetId> {
        [AssetId::Sky, AssetId::Middle, AssetId::Field]
            .into_iter()
            .chain((0..NEAR_IMAGE_COUNT as u8).map(AssetId::Near))
    }

    /// File name relative to the page
    pub fn file_name(&self) -> String {
        match self {
            AssetId::Sky => "sky-background.png".to_string(),
            AssetId::Middle => "middle-layer.png".to_string(),
            AssetId::Field => "field-layer.png".to_string(),
            AssetId::Near(i) => format!("near-layer-{}.png", i + 1),
        }
    }

    /// Whether the request should carry a cache-busting query
    pub fn cache_busted(&self) -> bool {
        !matches!(self, AssetId::Sky)
    }

    /// Request URL; `stamp` is appended as `?v=` for cache-busted assets
    pub fn url(&self, stamp: u64) -> String {
        if self.cache_busted() {
            format!("{}?v={}", self.file_name(), stamp)
        } else {
            self.file_name()
        }
    }
}

/// Load state of a single asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetStatus {
    #[default]
    Pending,
    Loaded { width: u32, height: u32 },
    Failed,
}

/// Load results for the whole manifest
#[derive(Debug, Clone)]
pub struct AssetTable {
    entries: Vec<(AssetId, AssetStatus)>,
}

impl Default for AssetTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetTable {
    /// All assets pending
    pub fn new() -> Self {
        Self {
            entries: AssetId::all().map(|id| (id, AssetStatus::Pending)).collect(),
        }
    }

    /// Record the outcome of one load
    pub fn record(&mut self, id: AssetId, result: Result<(u32, u32), AssetError>) {
        let status = match result {
            Ok((width, height)) => {
                log::info!("{} loaded ({}x{})", id.file_name(), width, height);
                AssetStatus::Loaded { width, height }
            }
            Err(e) => {
                log::error!("{}", e);
                AssetStatus::Failed
            }
        };
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == id) {
            entry.1 = status;
        }
    }

    pub fn status(&self, id: AssetId) -> AssetStatus {
        self.entries
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }

    /// Natural dimensions, if loaded
    pub fn dimensions(&self, id: AssetId) -> Option<(u32, u32)> {
        match self.status(id) {
            AssetStatus::Loaded { width, height } if width > 0 && height > 0 => {
                Some((width, height))
            }
            _ => None,
        }
    }

    /// Width / height, if loaded
    pub fn aspect(&self, id: AssetId) -> Option<f32> {
        self.dimensions(id).map(|(w, h)| w as f32 / h as f32)
    }

    pub fn loaded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, AssetStatus::Loaded { .. }))
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// The "all loaded" gate. A failed asset keeps the scene loading.
    pub fn is_ready(&self) -> bool {
        self.loaded_count() == self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_has_eleven_images() {
        let table = AssetTable::new();
        assert_eq!(table.total(), 11);
        assert_eq!(table.loaded_count(), 0);
        assert!(!table.is_ready());
    }

    #[test]
    fn test_near_file_names_are_one_based() {
        assert_eq!(AssetId::Near(0).file_name(), "near-layer-1.png");
        assert_eq!(AssetId::Near(7).file_name(), "near-layer-8.png");
    }

    #[test]
    fn test_sky_is_not_cache_busted() {
        assert_eq!(AssetId::Sky.url(42), "sky-background.png");
        assert_eq!(AssetId::Field.url(42), "field-layer.png?v=42");
    }

    #[test]
    fn test_gate_opens_when_all_loaded() {
        let mut table = AssetTable::new();
        for id in AssetId::all() {
            table.record(id, Ok((640, 480)));
        }
        assert!(table.is_ready());
        assert_eq!(table.aspect(AssetId::Sky), Some(640.0 / 480.0));
    }

    #[test]
    fn test_failure_holds_gate_and_hides_dimensions() {
        let mut table = AssetTable::new();
        for id in AssetId::all() {
            table.record(id, Ok((100, 100)));
        }
        table.record(AssetId::Near(3), Err(AssetError::load("near-layer-4.png")));
        assert_eq!(table.status(AssetId::Near(3)), AssetStatus::Failed);
        assert_eq!(table.dimensions(AssetId::Near(3)), None);
        assert_eq!(table.loaded_count(), 10);
        assert!(!table.is_ready());
    }
}
