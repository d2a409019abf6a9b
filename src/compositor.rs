use crate::buffer::PixelBuffer;
use crate::canvas::CanvasSize;
use crate::layer::Layer;

/// Renders visible layers, bottom to top, into a single display buffer.
///
/// Starts from an opaque white accumulator and overwrites it with each
/// visible layer in ascending order. No alpha blending: every pixel is
/// fully opaque, so a visible layer fully occludes everything below it.
/// The output is recomputed from scratch on every call, which is fine at
/// the supported canvas sizes (at most 64 pixels per side).
pub fn composite(size: CanvasSize, layers: &[Layer]) -> PixelBuffer {
    let side = size.pixels();
    let mut display = PixelBuffer::blank(side, side);
    for layer in layers {
        if layer.visible {
            display.overwrite(layer.buffer());
        }
    }
    display
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Color;

    #[test]
    fn hidden_layers_are_skipped() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        let top = canvas.add_layer(None);
        canvas
            .active_layer_mut()
            .unwrap()
            .buffer_mut()
            .set(2, 2, Color::BLACK);
        canvas.set_visibility(top, false);

        let display = composite(canvas.size(), canvas.layers());
        assert_eq!(display.get(2, 2), Some(Color::WHITE));
    }

    #[test]
    fn later_layers_overwrite_earlier_ones() {
        let mut canvas = Canvas::new(CanvasSize::Small);
        canvas
            .active_layer_mut()
            .unwrap()
            .buffer_mut()
            .set(3, 3, Color::rgb(255, 0, 0));
        canvas.add_layer(None);

        // The all-white top layer fully occludes the red pixel below.
        let display = composite(canvas.size(), canvas.layers());
        assert_eq!(display.get(3, 3), Some(Color::WHITE));
    }
}
