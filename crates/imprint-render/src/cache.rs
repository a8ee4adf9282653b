//! Base-layer scene cache.
//!
//! Building the background, artboard chrome and every object is the
//! expensive part of a frame; the result only changes when the viewport or
//! the background configuration changes (or when content changes, which the
//! caller signals by bumping a revision counter). The cache stores the
//! built base scene together with the key it was built for, and the scene
//! builder appends it wholesale on a hit.

use imprint_core::state::BackgroundConfig;
use imprint_core::viewport::Viewport;
use kurbo::Size;

/// Everything the cached base layer depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameKey {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub background: BackgroundConfig,
    /// Caller-owned content revision; any object or document edit bumps it.
    pub revision: u64,
}

impl FrameKey {
    pub fn new(
        viewport: &Viewport,
        canvas_size: Size,
        background: &BackgroundConfig,
        revision: u64,
    ) -> Self {
        Self {
            zoom: viewport.zoom,
            pan_x: viewport.pan_x,
            pan_y: viewport.pan_y,
            canvas_width: canvas_size.width,
            canvas_height: canvas_size.height,
            background: background.clone(),
            revision,
        }
    }
}

/// Cached base layer plus the key it was built under.
#[cfg(feature = "vello-renderer")]
pub struct BaseLayerCache {
    entry: Option<(FrameKey, vello::Scene)>,
}

#[cfg(feature = "vello-renderer")]
impl BaseLayerCache {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// The cached scene if it was built for exactly this key.
    pub fn get(&self, key: &FrameKey) -> Option<&vello::Scene> {
        match &self.entry {
            Some((cached_key, scene)) if cached_key == key => Some(scene),
            _ => None,
        }
    }

    /// Store a freshly built base layer.
    pub fn store(&mut self, key: FrameKey, scene: vello::Scene) {
        self.entry = Some((key, scene));
    }

    /// Drop the cached layer.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(feature = "vello-renderer")]
impl Default for BaseLayerCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imprint_core::state::BackgroundKind;

    fn key(zoom: f64, pan_x: f64, revision: u64) -> FrameKey {
        FrameKey::new(
            &Viewport::new(zoom, pan_x, 0.0),
            Size::new(1600.0, 900.0),
            &BackgroundConfig::default(),
            revision,
        )
    }

    #[test]
    fn test_key_equality_over_viewport() {
        assert_eq!(key(1.0, 0.0, 0), key(1.0, 0.0, 0));
        assert_ne!(key(1.0, 0.0, 0), key(2.0, 0.0, 0));
        assert_ne!(key(1.0, 0.0, 0), key(1.0, 10.0, 0));
        assert_ne!(key(1.0, 0.0, 0), key(1.0, 0.0, 1));
    }

    #[test]
    fn test_key_tracks_background_changes() {
        let base = key(1.0, 0.0, 0);
        let mut changed = base.clone();
        changed.background.kind = BackgroundKind::Dots;
        assert_ne!(base, changed);

        let mut recolored = base.clone();
        recolored.background.color = "#ff0000".to_string();
        assert_ne!(base, recolored);

        let mut respaced = base.clone();
        respaced.background.grid_size = 40.0;
        assert_ne!(base, respaced);
    }

    #[cfg(feature = "vello-renderer")]
    #[test]
    fn test_cache_hit_requires_exact_key() {
        let mut cache = BaseLayerCache::new();
        assert!(cache.get(&key(1.0, 0.0, 0)).is_none());

        cache.store(key(1.0, 0.0, 0), vello::Scene::new());
        assert!(cache.get(&key(1.0, 0.0, 0)).is_some());
        assert!(cache.get(&key(1.0, 5.0, 0)).is_none());

        cache.invalidate();
        assert!(cache.get(&key(1.0, 0.0, 0)).is_none());
    }
}
