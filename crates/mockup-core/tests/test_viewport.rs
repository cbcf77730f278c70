use approx::assert_relative_eq;

use mockup_core::consts::{
    BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, MAX_SCALE, MIN_SCALE, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT,
};
use mockup_core::session::ResultId;
use mockup_core::viewport::{fit, pan, zoom, Size, Transform, Vec2, ViewerState, WheelDirection};

// ---------------------------------------------------------------------------
// fit
// ---------------------------------------------------------------------------

#[test]
fn test_fit_wide_image() {
    let t = fit(Size::new(800.0, 600.0), Size::new(1600.0, 900.0));
    assert_relative_eq!(t.scale, 0.5);
    assert_eq!((t.offset_x, t.offset_y), (0.0, 0.0));
}

#[test]
fn test_fit_tall_image() {
    let t = fit(Size::new(800.0, 600.0), Size::new(1000.0, 2000.0));
    assert_relative_eq!(t.scale, 0.3);
}

#[test]
fn test_fit_never_upscales() {
    let t = fit(Size::new(1920.0, 1080.0), Size::new(100.0, 100.0));
    assert_relative_eq!(t.scale, 1.0);
}

#[test]
fn test_fit_exact_size() {
    let t = fit(Size::new(512.0, 512.0), Size::new(512.0, 512.0));
    assert_relative_eq!(t.scale, 1.0);
}

#[test]
fn test_fit_shows_whole_image() {
    let container = Size::new(1280.0, 720.0);
    for image in [
        Size::new(4000.0, 3000.0),
        Size::new(300.0, 5000.0),
        Size::new(1281.0, 10.0),
    ] {
        let t = fit(container, image);
        assert!(image.width * t.scale <= container.width + 1e-3);
        assert!(image.height * t.scale <= container.height + 1e-3);
    }
}

#[test]
fn test_fit_empty_container_falls_back_to_min_scale() {
    let t = fit(Size::new(0.0, 0.0), Size::new(100.0, 100.0));
    assert_relative_eq!(t.scale, MIN_SCALE);
}

#[test]
fn test_fit_degenerate_sizes_stay_positive() {
    for (container, image) in [
        (Size::new(100.0, 100.0), Size::new(0.0, 0.0)),
        (Size::new(0.0, 100.0), Size::new(0.0, 100.0)),
        (Size::new(-5.0, 100.0), Size::new(10.0, 10.0)),
    ] {
        let t = fit(container, image);
        assert!(t.scale.is_finite() && t.scale > 0.0, "{container:?} {image:?}");
        assert!(t.scale <= 1.0);
    }
}

// ---------------------------------------------------------------------------
// zoom / pan
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_multiplies_scale() {
    let t = zoom(Transform::default(), 1.2);
    assert_relative_eq!(t.scale, 1.2);
}

#[test]
fn test_zoom_keeps_offsets() {
    let start = Transform {
        scale: 1.0,
        offset_x: 12.0,
        offset_y: -4.0,
    };
    let t = zoom(start, 2.0);
    assert_eq!((t.offset_x, t.offset_y), (12.0, -4.0));
}

#[test]
fn test_zoom_clamps_extremes() {
    assert_relative_eq!(zoom(Transform::default(), 1e9).scale, MAX_SCALE);
    assert_relative_eq!(zoom(Transform::default(), 1e-9).scale, MIN_SCALE);
}

#[test]
fn test_zoom_repeated_stays_in_range() {
    let mut t = Transform::default();
    for _ in 0..200 {
        t = zoom(t, WHEEL_ZOOM_IN);
        assert!(t.scale <= MAX_SCALE);
    }
    assert_relative_eq!(t.scale, MAX_SCALE);
    for _ in 0..200 {
        t = zoom(t, BUTTON_ZOOM_OUT);
        assert!(t.scale >= MIN_SCALE);
    }
    assert_relative_eq!(t.scale, MIN_SCALE);
}

#[test]
fn test_zoom_inverse_factors_compose_to_identity() {
    let start = Transform {
        scale: 0.75,
        ..Transform::default()
    };
    let t = zoom(zoom(start, 2.0), 0.5);
    assert_relative_eq!(t.scale, 0.75, epsilon = 1e-6);
}

#[test]
fn test_zoom_ignores_invalid_factor() {
    let start = Transform::default();
    for factor in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert_eq!(zoom(start, factor), start);
    }
}

#[test]
fn test_pan_adds_delta() {
    let t = pan(Transform::default(), Vec2::new(10.0, -5.0));
    let t = pan(t, Vec2::new(2.5, 1.0));
    assert_relative_eq!(t.offset_x, 12.5);
    assert_relative_eq!(t.offset_y, -4.0);
    assert_relative_eq!(t.scale, 1.0);
}

#[test]
fn test_pan_offsets_are_unbounded() {
    let t = pan(Transform::default(), Vec2::new(1e6, -1e6));
    assert_relative_eq!(t.offset_x, 1e6);
    assert_relative_eq!(t.offset_y, -1e6);
}

// ---------------------------------------------------------------------------
// ViewerState
// ---------------------------------------------------------------------------

fn viewer() -> ViewerState {
    ViewerState::open(
        ResultId::next(),
        Size::new(800.0, 600.0),
        Size::new(1600.0, 1200.0),
    )
}

#[test]
fn test_viewer_opens_fitted() {
    let v = viewer();
    assert_relative_eq!(v.transform().scale, 0.5);
    assert!(!v.is_dragging());
}

#[test]
fn test_viewer_buttons_and_wheel_steps() {
    let mut v = viewer();
    v.zoom_in();
    assert_relative_eq!(v.transform().scale, 0.5 * BUTTON_ZOOM_IN);
    v.zoom_out();
    assert_relative_eq!(v.transform().scale, 0.5 * BUTTON_ZOOM_IN * BUTTON_ZOOM_OUT);

    let mut v = viewer();
    v.wheel(WheelDirection::Up);
    assert_relative_eq!(v.transform().scale, 0.5 * WHEEL_ZOOM_IN);
    v.wheel(WheelDirection::Down);
    assert_relative_eq!(v.transform().scale, 0.5 * WHEEL_ZOOM_IN * WHEEL_ZOOM_OUT);
}

#[test]
fn test_viewer_drag_pans_by_pointer_delta() {
    let mut v = viewer();
    v.press(Vec2::new(100.0, 100.0));
    assert!(v.is_dragging());
    v.pointer_moved(Vec2::new(110.0, 95.0));
    v.pointer_moved(Vec2::new(130.0, 95.0));
    let t = v.transform();
    assert_relative_eq!(t.offset_x, 30.0);
    assert_relative_eq!(t.offset_y, -5.0);
}

#[test]
fn test_viewer_move_without_press_does_nothing() {
    let mut v = viewer();
    let before = v.transform();
    v.pointer_moved(Vec2::new(50.0, 50.0));
    assert_eq!(v.transform(), before);
}

#[test]
fn test_viewer_release_ends_drag() {
    let mut v = viewer();
    v.press(Vec2::ZERO);
    v.pointer_moved(Vec2::new(5.0, 5.0));
    v.release();
    assert!(!v.is_dragging());
    v.pointer_moved(Vec2::new(100.0, 100.0));
    assert_relative_eq!(v.transform().offset_x, 5.0);
}

#[test]
fn test_viewer_leaving_surface_ends_drag() {
    let mut v = viewer();
    v.press(Vec2::ZERO);
    v.pointer_left();
    assert!(!v.is_dragging());
    v.pointer_moved(Vec2::new(40.0, 40.0));
    assert_relative_eq!(v.transform().offset_x, 0.0);
}

#[test]
fn test_viewer_same_result_keeps_transform() {
    let mut v = viewer();
    let id = v.result_id();
    v.zoom_in();
    v.press(Vec2::ZERO);
    v.pointer_moved(Vec2::new(20.0, 0.0));
    let before = v.transform();

    // An in-place regeneration hands back the same id.
    v.show(id, Size::new(1600.0, 1200.0));
    assert_eq!(v.transform(), before);
    assert!(v.is_dragging());
}

#[test]
fn test_viewer_other_result_refits() {
    let mut v = viewer();
    v.zoom_in();
    v.press(Vec2::ZERO);
    v.pointer_moved(Vec2::new(20.0, 0.0));

    let other = ResultId::next();
    v.show(other, Size::new(400.0, 300.0));
    assert_eq!(v.result_id(), other);
    assert_eq!(v.transform(), fit(Size::new(800.0, 600.0), Size::new(400.0, 300.0)));
    assert!(!v.is_dragging());
}

#[test]
fn test_viewer_resize_refits() {
    let mut v = viewer();
    v.zoom_in();
    v.resize(Size::new(400.0, 300.0));
    assert_eq!(v.container(), Size::new(400.0, 300.0));
    assert_relative_eq!(v.transform().scale, 0.25);
}

#[test]
fn test_viewer_fit_to_screen_resets_pan_and_zoom() {
    let mut v = viewer();
    v.zoom_in();
    v.press(Vec2::ZERO);
    v.pointer_moved(Vec2::new(7.0, 7.0));
    v.release();
    v.fit_to_screen();
    assert_eq!(v.transform(), fit(v.container(), v.image_size()));
}
