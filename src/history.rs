use crate::buffer::PixelBuffer;
use crate::canvas::Canvas;
use crate::error::EditorError;
use crate::layer::{LayerId, LayerMeta};
use log::{debug, warn};
use std::collections::HashMap;

/// One immutable full-state snapshot: a deep copy of the layer metadata
/// sequence plus each layer's buffer encoded as PNG.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    layers: Vec<LayerMeta>,
    states: HashMap<LayerId, Vec<u8>>,
}

/// Linear undo/redo over whole-canvas snapshots.
///
/// The cursor always points at the entry matching the current canvas state
/// once at least one commit exists. Committing after an undo truncates the
/// redone-away future; restoring replaces the entire layer store, not a diff.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if there are entries that can be undone
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    /// Returns true if there are entries that can be redone
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Snapshots the canvas and appends the entry, discarding anything past
    /// the cursor (an edit after an undo makes the old future unreachable).
    pub fn commit(&mut self, canvas: &Canvas) -> Result<(), EditorError> {
        let mut states = HashMap::new();
        for layer in canvas.layers() {
            states.insert(layer.id, layer.buffer().to_png()?);
        }
        let entry = HistoryEntry {
            layers: canvas.layers().iter().map(|layer| layer.meta()).collect(),
            states,
        };

        self.entries.truncate(self.cursor.map_or(0, |cursor| cursor + 1));
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
        debug!(
            "history commit: {} entries, cursor at {}",
            self.entries.len(),
            self.entries.len() - 1
        );
        Ok(())
    }

    /// Steps back one entry and restores it into the canvas. Returns false
    /// when there is nothing to undo. A decode failure leaves both the
    /// cursor and the canvas untouched.
    pub fn undo(&mut self, canvas: &mut Canvas) -> Result<bool, EditorError> {
        let Some(cursor) = self.cursor.filter(|&cursor| cursor > 0) else {
            return Ok(false);
        };
        self.restore(cursor - 1, canvas)?;
        self.cursor = Some(cursor - 1);
        Ok(true)
    }

    /// Steps forward one entry and restores it into the canvas. Returns
    /// false when there is nothing to redo.
    pub fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, EditorError> {
        let Some(cursor) = self.cursor.filter(|&cursor| cursor + 1 < self.entries.len()) else {
            return Ok(false);
        };
        self.restore(cursor + 1, canvas)?;
        self.cursor = Some(cursor + 1);
        Ok(true)
    }

    /// Drops all entries. Used when the canvas is resized, since snapshots
    /// taken at the old dimensions can no longer be restored.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    fn restore(&self, index: usize, canvas: &mut Canvas) -> Result<(), EditorError> {
        let entry = &self.entries[index];
        // Decode every buffer before touching the canvas, so a corrupt
        // snapshot aborts the whole restore instead of applying partially.
        let mut buffers = HashMap::with_capacity(entry.states.len());
        for (&id, bytes) in &entry.states {
            let buffer = PixelBuffer::from_png(bytes).inspect_err(|err| {
                warn!("history restore aborted at entry {index}: {err}");
            })?;
            buffers.insert(id, buffer);
        }
        canvas.restore(entry.layers.clone(), buffers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasSize;
    use crate::color::Color;

    fn paint_and_commit(canvas: &mut Canvas, history: &mut History, x: u32, color: Color) {
        canvas
            .active_layer_mut()
            .unwrap()
            .buffer_mut()
            .set(x, 0, color);
        history.commit(canvas).unwrap();
    }

    #[test]
    fn undo_is_a_no_op_on_the_first_entry() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let mut history = History::new();
        assert!(!history.undo(&mut canvas).unwrap());

        history.commit(&canvas).unwrap();
        assert!(!history.can_undo());
        assert!(!history.undo(&mut canvas).unwrap());
    }

    #[test]
    fn undo_then_redo_restores_each_state() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let mut history = History::new();
        paint_and_commit(&mut canvas, &mut history, 0, Color::BLACK);
        paint_and_commit(&mut canvas, &mut history, 1, Color::rgb(255, 0, 0));

        assert!(history.undo(&mut canvas).unwrap());
        let buffer = canvas.active_layer().unwrap().buffer();
        assert_eq!(buffer.get(0, 0), Some(Color::BLACK));
        assert_eq!(buffer.get(1, 0), Some(Color::WHITE));

        assert!(history.redo(&mut canvas).unwrap());
        let buffer = canvas.active_layer().unwrap().buffer();
        assert_eq!(buffer.get(1, 0), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn commit_after_undo_discards_the_future() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let mut history = History::new();
        paint_and_commit(&mut canvas, &mut history, 0, Color::BLACK);
        paint_and_commit(&mut canvas, &mut history, 1, Color::BLACK);

        history.undo(&mut canvas).unwrap();
        paint_and_commit(&mut canvas, &mut history, 2, Color::BLACK);

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut canvas).unwrap());
    }

    #[test]
    fn restore_brings_back_layer_metadata() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let mut history = History::new();
        history.commit(&canvas).unwrap();

        let top = canvas.add_layer(Some("Highlights"));
        history.commit(&canvas).unwrap();
        canvas.toggle_visibility(top);
        history.commit(&canvas).unwrap();

        history.undo(&mut canvas).unwrap();
        assert!(canvas.layer(top).unwrap().visible);

        history.undo(&mut canvas).unwrap();
        assert_eq!(canvas.layers().len(), 1);
        // Selection falls back to the remaining top layer.
        assert_eq!(canvas.active_id(), Some(canvas.layers()[0].id));
    }
}
