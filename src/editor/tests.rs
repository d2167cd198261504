// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::error::HistoryDirection;
use crate::infrastructure::memory::MemoryExporter;
use image_rs::{Rgba, RgbaImage};

/// Pixel at (x, y) encodes its own coordinates (mod 256).
fn coordinate_source(width: u32, height: u32) -> SourceImage {
    SourceImage::new(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([x as u8, y as u8, 40, 255])
    }))
    .expect("source")
}

fn editor(width: u32, height: u32) -> EditorController {
    EditorController::new(
        coordinate_source(width, height),
        "patients/7/bitewing.png",
        &EditorConfig::default(),
    )
}

fn drag_crop(editor: &mut EditorController, from: (f32, f32), to: (f32, f32)) -> ReleaseOutcome {
    editor
        .start_crop(Point::new(from.0, from.1))
        .expect("start crop");
    editor.update_crop(Point::new(to.0, to.1));
    editor.release_crop()
}

#[test]
fn new_editor_has_no_changes() {
    let editor = editor(4, 3);
    assert!(!editor.has_unsaved_changes());
    assert!(!editor.can_undo());
    assert!(!editor.can_redo());
    assert!(editor.transform().is_geometric_identity());
    assert!(editor.filters().is_identity());
    assert!(editor.crop_session().is_idle());
}

#[test]
fn identity_preview_reproduces_source() {
    let editor = editor(12, 7);
    let preview = editor.preview().expect("preview");
    assert_eq!(&preview.raster, editor.source().pixels());
    assert_eq!(preview.natural, Size::new(12, 7));
}

#[test]
fn rotate_then_crop_bakes_the_rotated_region() {
    let mut editor = editor(1000, 800);

    let preview = editor
        .rotate90(RotateDirection::Clockwise)
        .expect("rotate");
    assert_eq!(preview.natural, Size::new(800, 1000));

    // Host lays the rotated preview out at half size
    editor.set_preview_layout(Rect::new(0.0, 0.0, 400.0, 500.0));
    let outcome = drag_crop(&mut editor, (100.0, 100.0), (300.0, 250.0));
    assert_eq!(
        outcome,
        ReleaseOutcome::Pending(Rect::new(100.0, 100.0, 200.0, 150.0))
    );

    let preview = editor.confirm_crop().expect("confirm crop");
    assert_eq!(editor.source().size(), Size::new(400, 300));
    assert_eq!(preview.natural, Size::new(400, 300));
    assert_eq!(*editor.transform(), TransformState::identity());
    assert!(editor.crop_session().is_idle());

    // Baked (0,0) is rotated (200,200), which came from source (200, 800 - 1 - 200)
    assert_eq!(
        editor.source().pixels().get_pixel(0, 0).0,
        [200, (599 % 256) as u8, 40, 255]
    );
}

#[test]
fn undo_with_empty_history_reports_and_keeps_state() {
    let mut editor = editor(6, 4);
    let before = editor.session().current().clone();
    assert_eq!(
        editor.undo(),
        Err(Error::HistoryEmpty(HistoryDirection::Undo))
    );
    assert_eq!(
        editor.redo(),
        Err(Error::HistoryEmpty(HistoryDirection::Redo))
    );
    assert_eq!(*editor.session().current(), before);
}

#[test]
fn undoing_a_crop_restores_the_previous_source() {
    let mut editor = editor(100, 80);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 100.0, 80.0));
    drag_crop(&mut editor, (10.0, 10.0), (60.0, 40.0));
    editor.confirm_crop().expect("confirm");
    assert_eq!(editor.source().size(), Size::new(50, 30));

    let preview = editor.undo().expect("undo");
    assert!(editor.source().ptr_eq(editor.session().original()));
    assert_eq!(preview.natural, Size::new(100, 80));

    editor.redo().expect("redo");
    assert_eq!(editor.source().size(), Size::new(50, 30));
}

#[test]
fn n_undos_then_n_redos_return_to_the_final_state() {
    let mut editor = editor(20, 10);
    editor.rotate90(RotateDirection::Clockwise).expect("edit");
    editor.toggle_flip(FlipAxis::Horizontal).expect("edit");
    editor.set_filter(FilterKey::Contrast, 140.0).expect("edit");
    editor.set_zoom(2.5).expect("edit");
    editor.rotate_by(-12.5).expect("edit");
    editor.set_filter(FilterKey::Blur, 1.5).expect("edit");
    let final_transform = *editor.transform();
    let final_filters = *editor.filters();

    for _ in 0..6 {
        editor.undo().expect("undo");
    }
    assert!(!editor.can_undo());
    assert_eq!(*editor.transform(), TransformState::identity());
    assert_eq!(*editor.filters(), FilterState::identity());

    for _ in 0..6 {
        editor.redo().expect("redo");
    }
    assert!(!editor.can_redo());
    assert_eq!(*editor.transform(), final_transform);
    assert_eq!(*editor.filters(), final_filters);
}

#[test]
fn four_quarter_turns_close_the_rotation() {
    let mut editor = editor(30, 20);
    for _ in 0..4 {
        editor
            .rotate90(RotateDirection::CounterClockwise)
            .expect("rotate");
    }
    let preview = editor.preview().expect("preview");
    assert_eq!(editor.transform().rotation().value(), 0.0);
    assert_eq!(preview.natural, Size::new(30, 20));
    assert_eq!(preview.raster.dimensions(), (30, 20));
}

#[test]
fn filter_values_are_clamped() {
    let mut editor = editor(4, 4);
    editor.set_filter(FilterKey::Contrast, 500.0).expect("edit");
    assert_eq!(editor.filters().contrast(), 200.0);
    editor.set_filter(FilterKey::Blur, -3.0).expect("edit");
    assert_eq!(editor.filters().blur(), 0.0);
}

#[test]
fn zoom_is_recorded_but_does_not_change_pixels() {
    let mut editor = editor(8, 8);
    let preview = editor.set_zoom(3.0).expect("zoom");
    assert!(editor.can_undo());
    assert_eq!(editor.transform().zoom().value(), 3.0);
    assert_eq!(&preview.raster, editor.source().pixels());

    editor.set_zoom(40.0).expect("zoom");
    assert_eq!(editor.transform().zoom().value(), 5.0);
}

#[test]
fn repeating_the_same_edit_is_not_recorded() {
    let mut editor = editor(4, 4);
    editor.set_filter(FilterKey::Sepia, 0.0).expect("edit");
    assert!(!editor.can_undo());
    editor.set_filter(FilterKey::Sepia, 30.0).expect("edit");
    editor.set_filter(FilterKey::Sepia, 30.0).expect("edit");
    assert_eq!(editor.session().history().undo_len(), 1);
}

#[test]
fn crop_before_layout_is_not_ready() {
    let mut editor = editor(10, 10);
    assert_eq!(
        editor.start_crop(Point::new(1.0, 1.0)),
        Err(Error::LayoutNotReady)
    );
    assert_eq!(
        editor.suggest_crop(CropRatio::Square),
        Err(Error::LayoutNotReady)
    );
}

#[test]
fn rotation_that_changes_dimensions_invalidates_layout() {
    let mut editor = editor(40, 20);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 20.0));
    editor.rotate90(RotateDirection::Clockwise).expect("rotate");
    assert_eq!(
        editor.start_crop(Point::new(1.0, 1.0)),
        Err(Error::LayoutNotReady)
    );
}

#[test]
fn geometry_edit_aborts_pending_crop() {
    let mut editor = editor(40, 40);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    drag_crop(&mut editor, (0.0, 0.0), (20.0, 20.0));
    editor.toggle_flip(FlipAxis::Vertical).expect("flip");
    assert!(editor.crop_session().is_idle());
}

#[test]
fn filter_edit_keeps_pending_crop() {
    let mut editor = editor(40, 40);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    drag_crop(&mut editor, (0.0, 0.0), (20.0, 20.0));
    editor.set_filter(FilterKey::Grayscale, 50.0).expect("edit");
    assert!(matches!(
        editor.crop_session().phase(),
        CropPhase::PendingConfirm { .. }
    ));
}

#[test]
fn zero_area_drag_and_bare_confirm_are_no_ops() {
    let mut editor = editor(40, 40);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    assert_eq!(
        drag_crop(&mut editor, (5.0, 5.0), (5.0, 30.0)),
        ReleaseOutcome::Discarded
    );
    editor.confirm_crop().expect("confirm without rect");
    assert!(!editor.can_undo());
    assert_eq!(editor.source().size(), Size::new(40, 40));
}

#[test]
fn cancelled_crop_leaves_state_unchanged() {
    let mut editor = editor(40, 40);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    drag_crop(&mut editor, (0.0, 0.0), (20.0, 20.0));
    assert_eq!(editor.cancel_crop(), CropOutcome::Cancelled);
    assert!(!editor.can_undo());
    assert_eq!(editor.source().size(), Size::new(40, 40));
}

#[test]
fn crop_bake_keeps_filters_and_resets_zoom() {
    let mut editor = editor(40, 40);
    editor.set_filter(FilterKey::Sepia, 60.0).expect("edit");
    editor.set_zoom(2.0).expect("zoom");
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    drag_crop(&mut editor, (0.0, 0.0), (10.0, 20.0));
    editor.confirm_crop().expect("confirm");

    assert_eq!(editor.filters().sepia(), 60.0);
    assert_eq!(editor.transform().zoom().value(), 1.0);
    assert_eq!(editor.source().size(), Size::new(10, 20));
}

#[test]
fn committed_crop_stays_inside_the_rotated_canvas() {
    let mut editor = editor(90, 60);
    editor.set_rotation(30.0).expect("rotate");
    let canvas = editor.output_dimensions();
    editor.set_preview_layout(Rect::new(0.0, 0.0, canvas.width as f32, canvas.height as f32));
    drag_crop(
        &mut editor,
        (-50.0, -50.0),
        (canvas.width as f32 + 50.0, canvas.height as f32 + 50.0),
    );
    editor.confirm_crop().expect("confirm");
    assert_eq!(editor.source().size(), canvas);
}

#[test]
fn downscaled_preview_maps_crop_to_natural_resolution() {
    let config = EditorConfig {
        preview_max_dimension: 256,
        ..EditorConfig::default()
    };
    let mut editor = EditorController::new(coordinate_source(1000, 800), "scan.png", &config);

    let preview = editor.preview().expect("preview");
    assert_eq!(preview.raster.dimensions(), (256, 205));
    assert_eq!(preview.natural, Size::new(1000, 800));

    editor.set_preview_layout(Rect::new(0.0, 0.0, 500.0, 400.0));
    drag_crop(&mut editor, (50.0, 50.0), (250.0, 150.0));
    editor.confirm_crop().expect("confirm");
    assert_eq!(editor.source().size(), Size::new(400, 200));

    let exported = editor.export_final().expect("export");
    assert_eq!(exported.dimensions(), (400, 200));
    assert_eq!(exported.get_pixel(0, 0).0, [100, 100, 40, 255]);
}

#[test]
fn export_final_is_always_natural_resolution() {
    let config = EditorConfig {
        preview_max_dimension: 256,
        ..EditorConfig::default()
    };
    let mut editor = EditorController::new(coordinate_source(600, 300), "scan.png", &config);
    editor.rotate90(RotateDirection::Clockwise).expect("rotate");
    let exported = editor.export_final().expect("export");
    assert_eq!(exported.dimensions(), (300, 600));
}

#[test]
fn reset_restores_original_and_is_undoable() {
    let mut editor = editor(50, 50);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 50.0, 50.0));
    drag_crop(&mut editor, (0.0, 0.0), (25.0, 25.0));
    editor.confirm_crop().expect("confirm");
    editor.set_filter(FilterKey::Brightness, 150.0).expect("edit");

    editor.reset().expect("reset");
    assert!(editor.source().ptr_eq(editor.session().original()));
    assert!(editor.filters().is_identity());

    editor.undo().expect("undo");
    assert_eq!(editor.source().size(), Size::new(25, 25));
    assert_eq!(editor.filters().brightness(), 150.0);
}

#[test]
fn reset_filters_returns_all_values_to_identity() {
    let mut editor = editor(4, 4);
    editor.set_filter(FilterKey::Saturate, 20.0).expect("edit");
    editor.set_filter(FilterKey::Blur, 4.0).expect("edit");
    editor.rotate90(RotateDirection::Clockwise).expect("edit");
    editor.reset_filters().expect("reset filters");
    assert!(editor.filters().is_identity());
    assert_eq!(editor.transform().rotation().value(), 90.0);
}

#[test]
fn save_hands_natural_raster_to_exporter_and_clears_unsaved_flag() {
    let mut editor = editor(30, 20);
    editor.toggle_flip(FlipAxis::Horizontal).expect("flip");
    editor.set_filter(FilterKey::Contrast, 120.0).expect("edit");
    assert!(editor.has_unsaved_changes());

    let exporter = MemoryExporter::new();
    let ack = editor.save(&exporter).expect("save");
    assert!(!editor.has_unsaved_changes());
    assert!(ack.bytes_written > 0);

    let saves = exporter.saved();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].dimensions, (30, 20));
    assert_eq!(saves[0].metadata.identifier, "patients/7/bitewing.png");
    assert_eq!(
        saves[0].metadata.operations,
        vec!["flip-horizontal".to_string(), "contrast(120%)".to_string()]
    );

    editor.undo().expect("undo");
    assert!(editor.has_unsaved_changes());
}

#[test]
fn failed_save_keeps_unsaved_flag() {
    let mut editor = editor(10, 10);
    editor.rotate90(RotateDirection::Clockwise).expect("rotate");
    let exporter = MemoryExporter::failing("disk full");
    let err = editor.save(&exporter).unwrap_err();
    assert!(matches!(err, Error::Save(_)));
    assert!(err.is_user_visible());
    assert!(editor.has_unsaved_changes());
}

#[test]
fn operations_describe_crop_and_rotation() {
    let mut editor = editor(40, 40);
    editor.set_preview_layout(Rect::new(0.0, 0.0, 40.0, 40.0));
    drag_crop(&mut editor, (0.0, 0.0), (20.0, 20.0));
    editor.confirm_crop().expect("confirm");
    editor.set_rotation(45.0).expect("rotate");
    editor.set_filter(FilterKey::Blur, 2.0).expect("edit");
    assert_eq!(
        editor.operations(),
        vec![
            "crop".to_string(),
            "rotate(45deg)".to_string(),
            "blur(2px)".to_string()
        ]
    );
}

#[test]
fn intents_route_to_operations() {
    let mut editor = editor(20, 10);
    let event = editor
        .update(Intent::Rotate90(RotateDirection::Clockwise))
        .expect("rotate");
    let Event::Rendered(preview) = event else {
        panic!("expected a rendered preview");
    };
    assert_eq!(preview.natural, Size::new(10, 20));

    assert_eq!(
        editor
            .update(Intent::PreviewLayout(Rect::new(0.0, 0.0, 10.0, 20.0)))
            .expect("layout"),
        Event::None
    );
    editor
        .update(Intent::StartCrop(Point::new(0.0, 0.0)))
        .expect("start");
    editor
        .update(Intent::UpdateCrop(Point::new(5.0, 5.0)))
        .expect("update");
    assert_eq!(
        editor.update(Intent::ReleaseCrop).expect("release"),
        Event::CropReleased(ReleaseOutcome::Pending(Rect::new(0.0, 0.0, 5.0, 5.0)))
    );
    editor.update(Intent::ConfirmCrop).expect("confirm");
    assert_eq!(editor.source().size(), Size::new(5, 5));

    editor.update(Intent::Undo).expect("undo");
    assert_eq!(editor.source().size(), Size::new(20, 10));
    assert_eq!(
        editor.update(Intent::Redo).map(|_| ()),
        Ok(())
    );
}

#[test]
fn rotation_ruler_intent_sets_absolute_angle() {
    let mut editor = editor(20, 20);
    editor
        .update(Intent::RotationRuler {
            start_degrees: 10.0,
            delta_x: 100.0,
            ruler_width: 200.0,
        })
        .expect("ruler");
    assert_eq!(editor.transform().rotation().value(), 40.0);
}

#[test]
fn history_depth_comes_from_config() {
    let config = EditorConfig {
        history_depth: Some(2),
        ..EditorConfig::default()
    };
    let mut editor = EditorController::new(coordinate_source(8, 8), "scan.png", &config);
    for step in 1..=5 {
        editor
            .set_filter(FilterKey::Brightness, 100.0 + step as f32)
            .expect("edit");
    }
    editor.undo().expect("undo");
    editor.undo().expect("undo");
    assert_eq!(
        editor.undo(),
        Err(Error::HistoryEmpty(HistoryDirection::Undo))
    );
    assert_eq!(editor.filters().brightness(), 103.0);
}
