#![warn(clippy::all, rust_2018_idioms)]

pub mod buffer;
pub mod canvas;
pub mod color;
pub mod compositor;
pub mod editor;
pub mod engine;
pub mod error;
pub mod history;
pub mod layer;
pub mod tools;

pub use buffer::PixelBuffer;
pub use canvas::{Canvas, CanvasSize};
pub use color::Color;
pub use editor::PixelEditor;
pub use engine::DrawingEngine;
pub use error::EditorError;
pub use history::History;
pub use layer::{Layer, LayerId, LayerMeta};
pub use tools::{Tool, ToolState};
