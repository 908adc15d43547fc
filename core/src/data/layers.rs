use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Points,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerEntry {
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
}

/// Loaded layers in draw order, each with a visibility toggle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerList {
    entries: Vec<LayerEntry>,
}

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly loaded layer. A layer of the same kind is replaced,
    /// since only one point layer and one image are open at a time.
    pub fn upsert(&mut self, name: impl Into<String>, kind: LayerKind) {
        let entry = LayerEntry {
            name: name.into(),
            kind,
            visible: true,
        };
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => *existing = entry,
            None => {
                self.entries.push(entry);
                // images draw underneath points
                self.entries.sort_by_key(|e| match e.kind {
                    LayerKind::Image => 0,
                    LayerKind::Points => 1,
                });
            }
        }
    }

    /// Set visibility by name; returns the new state, or `None` for an unknown layer.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|e| e.name == name)?;
        entry.visible = visible;
        Some(entry.visible)
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind && e.visible)
    }

    pub fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_are_listed_below_points() {
        let mut layers = LayerList::new();
        layers.upsert("points.shp", LayerKind::Points);
        layers.upsert("ortho.jpg", LayerKind::Image);
        let names: Vec<_> = layers.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["ortho.jpg", "points.shp"]);
    }

    #[test]
    fn reloading_replaces_same_kind() {
        let mut layers = LayerList::new();
        layers.upsert("a.shp", LayerKind::Points);
        layers.set_visible("a.shp", false);
        layers.upsert("b.shp", LayerKind::Points);
        assert_eq!(layers.entries().len(), 1);
        assert_eq!(layers.entries()[0].name, "b.shp");
        assert!(layers.is_visible(LayerKind::Points));
    }

    #[test]
    fn toggling_unknown_layer_is_ignored() {
        let mut layers = LayerList::new();
        layers.upsert("img.tif", LayerKind::Image);
        assert_eq!(layers.set_visible("img.tif", false), Some(false));
        assert!(!layers.is_visible(LayerKind::Image));
        assert_eq!(layers.set_visible("other", true), None);
    }
}
