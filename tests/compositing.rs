use pixel_paint::{CanvasSize, Color, PixelBuffer, PixelEditor};

const RED: Color = Color::rgb(255, 0, 0);

fn editor() -> PixelEditor {
    let _ = env_logger::builder().is_test(true).try_init();
    PixelEditor::new(CanvasSize::Small)
}

#[test]
fn upper_layer_fully_occludes_lower_layer() {
    let mut editor = editor();

    // Red pixel on the base layer, then an all-white visible layer on top.
    editor.set_color(RED);
    editor.pointer_down(3.0, 3.0).unwrap();
    editor.pointer_up().unwrap();
    let top = editor.add_layer(None).unwrap();

    // No blending: the opaque white top layer wins everywhere.
    assert_eq!(editor.display().get(3, 3), Some(Color::WHITE));

    // Hiding the top layer reveals the base layer again.
    editor.toggle_layer_visibility(top).unwrap();
    assert_eq!(editor.display().get(3, 3), Some(RED));
}

#[test]
fn rendering_is_deterministic() {
    let mut a = PixelEditor::new(CanvasSize::Small);
    let mut b = PixelEditor::new(CanvasSize::Small);

    for editor in [&mut a, &mut b] {
        editor.set_color(RED);
        editor.pointer_down(0.0, 0.0).unwrap();
        editor.pointer_move(1.0, 1.0).unwrap();
        editor.pointer_up().unwrap();
        editor.add_layer(Some("Top")).unwrap();
    }

    assert_eq!(a.display(), b.display());
    assert_eq!(a.export_image().unwrap(), b.export_image().unwrap());
}

#[test]
fn drawing_targets_the_active_layer() {
    let mut editor = editor();
    let base = editor.canvas().layers()[0].id;
    let top = editor.add_layer(None).unwrap();

    // The new layer is active; paint lands there, not on the base layer.
    editor.set_color(RED);
    editor.pointer_down(6.0, 6.0).unwrap();
    editor.pointer_up().unwrap();

    assert_eq!(editor.canvas().layer(top).unwrap().buffer().get(6, 6), Some(RED));
    assert_eq!(
        editor.canvas().layer(base).unwrap().buffer().get(6, 6),
        Some(Color::WHITE)
    );

    // Re-selecting the base layer redirects painting.
    editor.select_layer(base);
    editor.pointer_down(7.0, 7.0).unwrap();
    editor.pointer_up().unwrap();
    assert_eq!(editor.canvas().layer(base).unwrap().buffer().get(7, 7), Some(RED));
}

#[test]
fn exported_png_matches_the_display_buffer() {
    let mut editor = editor();
    editor.set_color(RED);
    editor.pointer_down(2.0, 9.0).unwrap();
    editor.pointer_up().unwrap();

    let png = editor.export_image().unwrap();
    let decoded = PixelBuffer::from_png(&png).unwrap();
    assert_eq!(&decoded, editor.display());
}
