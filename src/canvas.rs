use crate::buffer::PixelBuffer;
use crate::error::EditorError;
use crate::layer::{Layer, LayerId, LayerMeta};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The supported square canvas dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasSize {
    /// 16 x 16
    Small,
    /// 32 x 32
    #[default]
    Medium,
    /// 64 x 64
    Large,
}

impl CanvasSize {
    /// Pixels per side.
    pub const fn pixels(self) -> u32 {
        match self {
            CanvasSize::Small => 16,
            CanvasSize::Medium => 32,
            CanvasSize::Large => 64,
        }
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0} x {0}", self.pixels())
    }
}

/// The ordered layer store: owns every layer buffer, keyed by stable ids.
///
/// Index 0 composites first (bottom). Invariant: every layer buffer is
/// exactly `size × size`; resizing the canvas recreates all buffers.
#[derive(Debug, Clone)]
pub struct Canvas {
    size: CanvasSize,
    layers: Vec<Layer>,
    active: Option<LayerId>,
    next_id: u32,
}

impl Canvas {
    /// Creates a canvas with a single default layer, which starts active.
    pub fn new(size: CanvasSize) -> Self {
        let mut canvas = Self {
            size,
            layers: Vec::new(),
            active: None,
            next_id: 1,
        };
        canvas.add_layer(None);
        canvas
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Appends a new blank layer on top and makes it the active layer.
    ///
    /// Without an explicit name the layer is called `Layer N` after its id.
    pub fn add_layer(&mut self, name: Option<&str>) -> LayerId {
        let id = LayerId::new(self.next_id);
        self.next_id += 1;
        let name = name.map_or_else(|| format!("Layer {id}"), str::to_string);
        self.layers.push(Layer::new(id, &name, self.size));
        self.active = Some(id);
        debug!("added layer {id} ({name}), {} total", self.layers.len());
        id
    }

    /// Sets a layer's visibility flag. Unknown ids are silent no-ops;
    /// returns whether anything changed.
    pub fn set_visibility(&mut self, id: LayerId, visible: bool) -> bool {
        match self.layer_mut(id) {
            Some(layer) if layer.visible != visible => {
                layer.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Flips a layer's visibility flag. Unknown ids are silent no-ops;
    /// returns whether anything changed.
    pub fn toggle_visibility(&mut self, id: LayerId) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    /// Selects the layer that drawing operations target. Unknown ids are
    /// silent no-ops.
    pub fn select(&mut self, id: LayerId) {
        if self.layer(id).is_some() {
            self.active = Some(id);
        }
    }

    pub fn active_id(&self) -> Option<LayerId> {
        self.active
    }

    pub fn active_layer(&self) -> Result<&Layer, EditorError> {
        self.active
            .and_then(|id| self.layer(id))
            .ok_or_else(|| EditorError::InvalidState("no active layer selected".to_string()))
    }

    pub fn active_layer_mut(&mut self) -> Result<&mut Layer, EditorError> {
        let id = self
            .active
            .ok_or_else(|| EditorError::InvalidState("no active layer selected".to_string()))?;
        self.layer_mut(id)
            .ok_or_else(|| EditorError::InvalidState("no active layer selected".to_string()))
    }

    /// Changes the canvas size, recreating every layer buffer blank.
    /// Prior pixel content is discarded.
    pub fn resize(&mut self, size: CanvasSize) {
        self.size = size;
        for layer in &mut self.layers {
            layer.reset_buffer(size);
        }
        debug!("canvas resized to {size}, {} layers reset", self.layers.len());
    }

    /// Replaces the whole layer store from a history snapshot: order, names,
    /// visibility, and every buffer. All buffers must already be decoded so
    /// the swap is all-or-nothing.
    pub(crate) fn restore(
        &mut self,
        metas: Vec<LayerMeta>,
        mut buffers: HashMap<LayerId, PixelBuffer>,
    ) -> Result<(), EditorError> {
        let side = self.size.pixels();
        let mut layers = Vec::with_capacity(metas.len());
        for meta in metas {
            let buffer = buffers
                .remove(&meta.id)
                .ok_or(EditorError::UnknownLayer(meta.id))?;
            if buffer.width() != side || buffer.height() != side {
                return Err(EditorError::InvalidState(format!(
                    "snapshot buffer for layer {} is {}x{}, canvas is {side}x{side}",
                    meta.id,
                    buffer.width(),
                    buffer.height(),
                )));
            }
            layers.push(Layer::from_parts(meta, buffer));
        }
        self.layers = layers;
        // The selection is not part of the snapshot; fall back to the top
        // layer when the selected one no longer exists.
        if self.active.map_or(true, |id| self.layer(id).is_none()) {
            self.active = self.layers.last().map(|layer| layer.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn layer_ids_are_sequential_and_stable() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        assert_eq!(canvas.layers()[0].id.raw(), 1);
        let second = canvas.add_layer(None);
        let third = canvas.add_layer(Some("Outline"));
        assert_eq!(second.raw(), 2);
        assert_eq!(third.raw(), 3);
        assert_eq!(canvas.layer(third).unwrap().name, "Outline");
    }

    #[test]
    fn new_layer_becomes_active() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let id = canvas.add_layer(None);
        assert_eq!(canvas.active_id(), Some(id));
    }

    #[test]
    fn visibility_ops_ignore_unknown_ids() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        assert!(!canvas.toggle_visibility(LayerId::new(99)));
        assert!(!canvas.set_visibility(LayerId::new(99), false));
        assert!(canvas.layers()[0].visible);
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let original = canvas.active_id();
        canvas.select(LayerId::new(42));
        assert_eq!(canvas.active_id(), original);
    }

    #[test]
    fn resize_discards_pixel_content() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        canvas
            .active_layer_mut()
            .unwrap()
            .buffer_mut()
            .set(0, 0, Color::BLACK);
        canvas.resize(CanvasSize::Large);
        let buffer = canvas.active_layer().unwrap().buffer();
        assert_eq!(buffer.width(), 64);
        assert_eq!(buffer.get(0, 0), Some(Color::WHITE));
    }
}
