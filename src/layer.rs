use crate::buffer::PixelBuffer;
use crate::canvas::CanvasSize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a layer
///
/// Ids are sequential integers assigned by the canvas and stay stable for
/// the layer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(u32);

impl LayerId {
    /// Creates a LayerId from its raw integer value
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layer metadata without pixel content. History snapshots store these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMeta {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
}

/// A single layer: metadata plus its owned pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Unique identifier for the layer
    pub id: LayerId,
    /// Display name of the layer
    pub name: String,
    /// Whether the layer participates in compositing
    pub visible: bool,
    buffer: PixelBuffer,
}

impl Layer {
    /// Creates a visible layer with a blank buffer at the given canvas size.
    pub fn new(id: LayerId, name: &str, size: CanvasSize) -> Self {
        Self {
            id,
            name: name.to_string(),
            visible: true,
            buffer: PixelBuffer::blank(size.pixels(), size.pixels()),
        }
    }

    pub(crate) fn from_parts(meta: LayerMeta, buffer: PixelBuffer) -> Self {
        Self {
            id: meta.id,
            name: meta.name,
            visible: meta.visible,
            buffer,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Discards pixel content and recreates the buffer at a new canvas size.
    pub(crate) fn reset_buffer(&mut self, size: CanvasSize) {
        self.buffer = PixelBuffer::blank(size.pixels(), size.pixels());
    }

    pub fn meta(&self) -> LayerMeta {
        LayerMeta {
            id: self.id,
            name: self.name.clone(),
            visible: self.visible,
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
