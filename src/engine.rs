use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::tools::{Tool, ToolState};
use log::trace;

/// Tracks the pointer gesture in progress.
///
/// `drawing` is true between pointer-down and pointer-up/leave for the
/// pencil and eraser; the whole drag becomes a single history entry when
/// the stroke ends.
#[derive(Debug, Default)]
pub struct DrawingEngine {
    drawing: bool,
}

impl DrawingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_stroke(&mut self) {
        self.drawing = true;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Ends the stroke; returns whether one was in progress.
    pub fn end_stroke(&mut self) -> bool {
        std::mem::take(&mut self.drawing)
    }
}

fn cell_color(buffer: &PixelBuffer, x: i32, y: i32) -> Option<Color> {
    let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
    buffer.get(x, y)
}

/// Writes one pixel for the current tool: the eraser paints background
/// white, everything else paints the selected color. Out-of-range
/// coordinates are silent no-ops.
pub fn paint_pixel(buffer: &mut PixelBuffer, x: i32, y: i32, tools: &ToolState) {
    let color = match tools.tool {
        Tool::Eraser => Color::WHITE,
        _ => tools.color,
    };
    if x >= 0 && y >= 0 {
        buffer.set(x as u32, y as u32, color);
    }
}

/// Classic 4-connected stack-based flood fill.
///
/// The color at the start cell is the match target; only exactly-equal
/// pixels are recolored, so a fill never crosses a differently-colored
/// boundary. Filling a region that already has the fill color returns
/// early without touching anything, which keeps null edits out of the
/// history. Worst case visits every pixel once.
///
/// Returns whether any pixel changed.
pub fn flood_fill(buffer: &mut PixelBuffer, start_x: i32, start_y: i32, fill: Color) -> bool {
    let Some(target) = cell_color(buffer, start_x, start_y) else {
        return false;
    };
    if target == fill {
        return false;
    }

    let mut stack = vec![(start_x, start_y)];
    let mut visited = 0u32;
    while let Some((x, y)) = stack.pop() {
        if cell_color(buffer, x, y) != Some(target) {
            continue;
        }
        buffer.set(x as u32, y as u32, fill);
        visited += 1;
        stack.push((x + 1, y));
        stack.push((x - 1, y));
        stack.push((x, y + 1));
        stack.push((x, y - 1));
    }
    trace!("flood fill from ({start_x}, {start_y}) recolored {visited} pixels");
    true
}
