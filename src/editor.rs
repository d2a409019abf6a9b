use crate::buffer::PixelBuffer;
use crate::canvas::{Canvas, CanvasSize};
use crate::color::Color;
use crate::compositor;
use crate::engine::{self, DrawingEngine};
use crate::error::EditorError;
use crate::history::History;
use crate::layer::LayerId;
use crate::tools::{Tool, ToolState};
use log::{debug, info};

/// A complete editor session: layer store, tool state, undo history, and
/// the derived display buffer the host shows on screen.
///
/// The host feeds pointer events in screen coordinates; they map to grid
/// cells through the pixel scale (screen pixels per canvas pixel). All
/// operations are synchronous and single-threaded.
pub struct PixelEditor {
    canvas: Canvas,
    tools: ToolState,
    engine: DrawingEngine,
    history: History,
    display: PixelBuffer,
    pixel_scale: f32,
}

impl PixelEditor {
    /// Creates a session with a single default layer and empty history.
    /// The first committed edit becomes the undo floor.
    pub fn new(size: CanvasSize) -> Self {
        let canvas = Canvas::new(size);
        let display = compositor::composite(canvas.size(), canvas.layers());
        info!("editor session started at {size}");
        Self {
            canvas,
            tools: ToolState::default(),
            engine: DrawingEngine::new(),
            history: History::new(),
            display,
            pixel_scale: 1.0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    /// The composited display buffer, re-rendered after every mutation.
    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tools.tool != tool {
            debug!("tool selected: {}", tool.name());
            self.tools.tool = tool;
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.tools.color = color;
    }

    /// Sets how many screen pixels one canvas pixel spans. Non-positive
    /// scales are ignored.
    pub fn set_pixel_scale(&mut self, scale: f32) {
        if scale > 0.0 {
            self.pixel_scale = scale;
        }
    }

    fn to_cell(&self, screen_x: f32, screen_y: f32) -> (i32, i32) {
        (
            (screen_x / self.pixel_scale).floor() as i32,
            (screen_y / self.pixel_scale).floor() as i32,
        )
    }

    /// Reads the composited color at a grid cell (what the eyedropper sees).
    pub fn color_at(&self, x: i32, y: i32) -> Result<Color, EditorError> {
        u32::try_from(x)
            .ok()
            .zip(u32::try_from(y).ok())
            .and_then(|(x, y)| self.display.get(x, y))
            .ok_or(EditorError::InvalidCoordinate { x, y })
    }

    /// Pointer-down at screen coordinates.
    ///
    /// Fill runs a flood fill and commits immediately (one discrete action);
    /// the eyedropper samples the display buffer into the tool color;
    /// pencil and eraser start a stroke and paint the first cell.
    pub fn pointer_down(&mut self, screen_x: f32, screen_y: f32) -> Result<(), EditorError> {
        let (x, y) = self.to_cell(screen_x, screen_y);
        match self.tools.tool {
            Tool::Fill => {
                let fill = self.tools.color;
                let buffer = self.canvas.active_layer_mut()?.buffer_mut();
                if engine::flood_fill(buffer, x, y, fill) {
                    self.refresh_display();
                    self.history.commit(&self.canvas)?;
                }
            }
            Tool::Eyedropper => {
                if let Ok(picked) = self.color_at(x, y) {
                    debug!("eyedropper picked {picked} at ({x}, {y})");
                    self.tools.color = picked;
                }
            }
            Tool::Pencil | Tool::Eraser => {
                let tools = self.tools;
                engine::paint_pixel(self.canvas.active_layer_mut()?.buffer_mut(), x, y, &tools);
                self.engine.begin_stroke();
                self.refresh_display();
            }
        }
        Ok(())
    }

    /// Pointer-move at screen coordinates. Paints only while a pencil or
    /// eraser stroke is in progress, which turns a drag into a continuous
    /// line of cells.
    pub fn pointer_move(&mut self, screen_x: f32, screen_y: f32) -> Result<(), EditorError> {
        if !self.engine.is_drawing() || !matches!(self.tools.tool, Tool::Pencil | Tool::Eraser) {
            return Ok(());
        }
        let (x, y) = self.to_cell(screen_x, screen_y);
        let tools = self.tools;
        engine::paint_pixel(self.canvas.active_layer_mut()?.buffer_mut(), x, y, &tools);
        self.refresh_display();
        Ok(())
    }

    /// Pointer-up: finishes the stroke and commits it as one history entry.
    pub fn pointer_up(&mut self) -> Result<(), EditorError> {
        if self.engine.end_stroke() {
            self.history.commit(&self.canvas)?;
        }
        Ok(())
    }

    /// The pointer leaving the canvas ends the stroke exactly like
    /// releasing the button.
    pub fn pointer_leave(&mut self) -> Result<(), EditorError> {
        self.pointer_up()
    }

    /// Adds a blank layer on top, selects it, and commits.
    pub fn add_layer(&mut self, name: Option<&str>) -> Result<LayerId, EditorError> {
        let id = self.canvas.add_layer(name);
        self.refresh_display();
        self.history.commit(&self.canvas)?;
        Ok(id)
    }

    /// Flips a layer's visibility and commits. Unknown ids change nothing
    /// and record nothing.
    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> Result<(), EditorError> {
        if self.canvas.toggle_visibility(id) {
            self.refresh_display();
            self.history.commit(&self.canvas)?;
        }
        Ok(())
    }

    pub fn select_layer(&mut self, id: LayerId) {
        self.canvas.select(id);
    }

    /// Resizes the canvas, discarding all pixel content and history
    /// (snapshots at the old dimensions cannot be restored).
    pub fn resize_canvas(&mut self, size: CanvasSize) {
        self.canvas.resize(size);
        self.history.clear();
        self.refresh_display();
    }

    /// Steps the canvas back one history entry. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let applied = self.history.undo(&mut self.canvas)?;
        if applied {
            self.refresh_display();
        }
        Ok(applied)
    }

    /// Steps the canvas forward one history entry. Returns false when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let applied = self.history.redo(&mut self.canvas)?;
        if applied {
            self.refresh_display();
        }
        Ok(applied)
    }

    /// Resets the active layer to background white and commits.
    pub fn clear(&mut self) -> Result<(), EditorError> {
        self.canvas.active_layer_mut()?.buffer_mut().fill(Color::WHITE);
        self.refresh_display();
        self.history.commit(&self.canvas)
    }

    /// Encodes the composited display buffer as PNG for the host to save.
    pub fn export_image(&self) -> Result<Vec<u8>, EditorError> {
        let png = self.display.to_png()?;
        info!("exported {} image ({} bytes)", self.canvas.size(), png.len());
        Ok(png)
    }

    fn refresh_display(&mut self) {
        self.display = compositor::composite(self.canvas.size(), self.canvas.layers());
    }
}
