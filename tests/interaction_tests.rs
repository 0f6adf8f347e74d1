use approx::assert_abs_diff_eq;
use plotview_rs::core::{AxisLock, DevicePoint, DeviceSize, ScenePoint, SceneRect};
use plotview_rs::interaction::{
    InteractionMode, Key, KeyEvent, Modifiers, PointerButton, PointerButtons, PointerEvent,
    WheelEvent,
};
use plotview_rs::render::NullRenderer;
use plotview_rs::{PlotConfig, PlotError, PlotViewport};

fn build_plot() -> PlotViewport<NullRenderer> {
    let config = PlotConfig::new(DeviceSize::new(800, 400))
        .with_bounds((0.0, 100.0), (0.0, 100.0))
        .with_auto_fit(false);
    PlotViewport::new(NullRenderer::default(), config).expect("plot init")
}

fn drag_select(plot: &mut PlotViewport<NullRenderer>, from: (f64, f64), to: (f64, f64)) {
    plot.handle_pointer_press(PointerEvent::press(from.0, from.1, PointerButton::Primary))
        .expect("press");
    plot.handle_pointer_move(PointerEvent::moved(
        to.0,
        to.1,
        PointerButtons::from_button(PointerButton::Primary),
    ))
    .expect("move");
}

#[test]
fn select_drag_to_the_right_commits_rectangle_zoom() {
    let mut plot = build_plot();
    drag_select(&mut plot, (200.0, 100.0), (600.0, 300.0));
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectZoom);

    let selection = plot
        .interaction_state()
        .selection()
        .expect("selection shown");
    assert_eq!(selection.begin, ScenePoint::new(25.0, 75.0));
    assert_eq!(selection.end, ScenePoint::new(75.0, 25.0));

    let response = plot
        .handle_pointer_release(PointerEvent::release(600.0, 300.0, PointerButton::Primary))
        .expect("release");
    let outcome = response.rect_zoom.expect("rect zoom committed");
    assert!(outcome.x_applied && outcome.y_applied);
    assert_eq!(plot.interaction_mode(), InteractionMode::Idle);
    assert!(plot.interaction_state().selection().is_none());

    assert_eq!(plot.viewport().zoom(), (2.0, 2.0));
    let visible = plot.viewport().visible_rect();
    assert_abs_diff_eq!(visible.min_x, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.max_x, 75.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.min_y, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.max_y, 75.0, epsilon = 1e-9);
}

#[test]
fn select_drag_to_the_left_resets_scene_on_release() {
    let mut plot = build_plot();
    plot.add_series("ramp", vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(
        plot.viewport().bounds(),
        SceneRect::new(0.0, 100.0, 0.0, 100.0)
    );

    drag_select(&mut plot, (400.0, 200.0), (100.0, 200.0));
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectReset);
    let selection = plot.interaction_state().selection().expect("reset line");
    assert_eq!(selection.begin, ScenePoint::new(50.0, 50.0));
    assert_eq!(selection.end, ScenePoint::new(12.5, 50.0));

    let response = plot
        .handle_pointer_release(PointerEvent::release(100.0, 200.0, PointerButton::Primary))
        .expect("release");
    assert!(response.reset_scene);
    assert_eq!(plot.interaction_mode(), InteractionMode::Idle);
    assert_eq!(plot.viewport().bounds(), SceneRect::new(0.0, 3.0, 0.0, 3.0));
    assert_eq!(plot.viewport().zoom(), (1.0, 1.0));
}

#[test]
fn press_without_drag_commits_nothing() {
    let mut plot = build_plot();
    plot.handle_pointer_press(PointerEvent::press(200.0, 100.0, PointerButton::Primary))
        .expect("press");
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectStart);
    assert!(plot.interaction_state().selection().is_none());

    let response = plot
        .handle_pointer_release(PointerEvent::release(200.0, 100.0, PointerButton::Primary))
        .expect("release");
    assert!(response.rect_zoom.is_none());
    assert!(!response.reset_scene);
    assert_eq!(plot.viewport().zoom(), (1.0, 1.0));
}

#[test]
fn lock_key_during_selection_reshapes_it_immediately() {
    let mut plot = build_plot();
    drag_select(&mut plot, (200.0, 100.0), (600.0, 300.0));

    plot.handle_key_press(KeyEvent::new(Key::Control, Modifiers::CONTROL));
    assert_eq!(plot.axis_lock(), AxisLock::HorizontalOnly);
    let selection = plot.interaction_state().selection().expect("selection");
    assert_eq!(selection.begin, ScenePoint::new(25.0, 0.0));
    assert_eq!(selection.end, ScenePoint::new(75.0, 100.0));

    plot.handle_key_release(KeyEvent::new(Key::Control, Modifiers::NONE));
    assert_eq!(plot.axis_lock(), AxisLock::Free);
    let selection = plot.interaction_state().selection().expect("selection");
    assert_eq!(selection.begin, ScenePoint::new(25.0, 75.0));
    assert_eq!(selection.end, ScenePoint::new(75.0, 25.0));
}

#[test]
fn horizontal_lock_commits_only_x_zoom() {
    let mut plot = build_plot();
    drag_select(&mut plot, (200.0, 100.0), (600.0, 300.0));
    plot.handle_key_press(KeyEvent::new(Key::Control, Modifiers::CONTROL));

    let response = plot
        .handle_pointer_release(PointerEvent::release(600.0, 300.0, PointerButton::Primary))
        .expect("release");
    let outcome = response.rect_zoom.expect("rect zoom committed");
    assert!(outcome.x_applied);
    assert!(!outcome.y_applied);
    assert_eq!(plot.viewport().zoom(), (2.0, 1.0));
}

#[test]
fn both_lock_keys_held_unlock_both_axes() {
    let mut plot = build_plot();
    plot.handle_key_press(KeyEvent::new(Key::Control, Modifiers::CONTROL));
    assert_eq!(plot.axis_lock(), AxisLock::HorizontalOnly);

    plot.handle_key_press(KeyEvent::new(
        Key::Shift,
        Modifiers::SHIFT.union(Modifiers::CONTROL),
    ));
    assert_eq!(plot.axis_lock(), AxisLock::Free);

    plot.handle_key_release(KeyEvent::new(Key::Control, Modifiers::SHIFT));
    assert_eq!(plot.axis_lock(), AxisLock::VerticalOnly);

    plot.handle_key_release(KeyEvent::new(Key::Shift, Modifiers::NONE));
    assert_eq!(plot.axis_lock(), AxisLock::Free);
}

#[test]
fn pan_drag_moves_visible_window() {
    let mut plot = build_plot();
    plot.handle_pointer_press(PointerEvent::press(400.0, 200.0, PointerButton::Secondary))
        .expect("press");
    assert_eq!(plot.interaction_mode(), InteractionMode::Panning);

    plot.handle_pointer_move(PointerEvent::moved(
        300.0,
        200.0,
        PointerButtons::from_button(PointerButton::Secondary),
    ))
    .expect("move");
    assert_eq!(plot.viewport().offset(), (-100.0, 0.0));
    let visible = plot.viewport().visible_rect();
    assert_abs_diff_eq!(visible.min_x, 12.5, epsilon = 1e-9);
    assert_abs_diff_eq!(visible.max_x, 112.5, epsilon = 1e-9);

    plot.handle_pointer_release(PointerEvent::release(300.0, 200.0, PointerButton::Secondary))
        .expect("release");
    assert_eq!(plot.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn held_pan_button_wins_over_selection_drag() {
    let mut plot = build_plot();
    plot.handle_pointer_press(PointerEvent::press(200.0, 100.0, PointerButton::Primary))
        .expect("press");
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectStart);

    let both = PointerButtons::from_button(PointerButton::Primary).with(PointerButton::Secondary);
    assert!(both.contains(PointerButton::Primary) && both.contains(PointerButton::Secondary));
    plot.handle_pointer_move(PointerEvent::moved(300.0, 150.0, both))
        .expect("move");
    assert_eq!(plot.viewport().offset(), (100.0, 50.0));
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectStart);
}

#[test]
fn pan_stops_at_the_border() {
    let mut plot = build_plot();
    plot.handle_pointer_press(PointerEvent::press(400.0, 200.0, PointerButton::Secondary))
        .expect("press");
    plot.handle_pointer_move(PointerEvent::moved(
        5_000.0,
        200.0,
        PointerButtons::from_button(PointerButton::Secondary),
    ))
    .expect("move");
    assert_eq!(plot.viewport().offset(), (400.0, 0.0));
    let visible = plot.viewport().visible_rect();
    assert_abs_diff_eq!(visible.min_x, -50.0, epsilon = 1e-9);
}

#[test]
fn vertical_scene_mode_restricts_zoom_and_pan_to_y() {
    let mut plot = build_plot();
    plot.set_scene_mode(AxisLock::VerticalOnly);
    assert_eq!(plot.scene_mode(), AxisLock::VerticalOnly);
    assert_eq!(plot.axis_lock(), AxisLock::VerticalOnly);

    plot.handle_wheel(WheelEvent::new(400.0, 200.0, 120.0))
        .expect("wheel");
    assert_eq!(plot.viewport().zoom(), (1.0, 1.05));

    plot.handle_pointer_press(PointerEvent::press(400.0, 200.0, PointerButton::Secondary))
        .expect("press");
    plot.handle_pointer_move(PointerEvent::moved(
        300.0,
        210.0,
        PointerButtons::from_button(PointerButton::Secondary),
    ))
    .expect("move");
    assert_eq!(plot.viewport().offset().0, 0.0);

    plot.handle_key_press(KeyEvent::new(Key::Control, Modifiers::CONTROL));
    plot.handle_key_release(KeyEvent::new(Key::Control, Modifiers::NONE));
    assert_eq!(plot.axis_lock(), AxisLock::VerticalOnly);
}

#[test]
fn wheel_zooms_around_cursor_and_ignores_zero_delta() {
    let mut plot = build_plot();
    let response = plot
        .handle_wheel(WheelEvent::new(400.0, 200.0, 0.0))
        .expect("wheel");
    assert!(response.is_noop());
    assert_eq!(plot.viewport().zoom(), (1.0, 1.0));

    let anchor = plot
        .viewport()
        .device_to_scene(DevicePoint::new(400.0, 200.0));
    plot.handle_wheel(WheelEvent::new(400.0, 200.0, 1.0))
        .expect("wheel up");
    assert_eq!(plot.viewport().zoom(), (1.05, 1.05));
    let after = plot
        .viewport()
        .device_to_scene(DevicePoint::new(400.0, 200.0));
    assert_abs_diff_eq!(after.x, anchor.x, epsilon = 1e-9);
    assert_abs_diff_eq!(after.y, anchor.y, epsilon = 1e-9);

    plot.handle_wheel(WheelEvent::new(400.0, 200.0, -1.0))
        .expect("wheel down");
    let (zoom_x, zoom_y) = plot.viewport().zoom();
    assert_abs_diff_eq!(zoom_x, 1.05 * 0.95, epsilon = 1e-12);
    assert_abs_diff_eq!(zoom_y, 1.05 * 0.95, epsilon = 1e-12);
}

#[test]
fn swapped_buttons_pan_with_primary() {
    let mut plot = build_plot();
    plot.swap_pointer_buttons();
    assert_eq!(plot.bindings().pan_button, PointerButton::Primary);

    plot.handle_pointer_press(PointerEvent::press(400.0, 200.0, PointerButton::Primary))
        .expect("press");
    assert_eq!(plot.interaction_mode(), InteractionMode::Panning);
    plot.handle_pointer_release(PointerEvent::release(400.0, 200.0, PointerButton::Primary))
        .expect("release");

    plot.handle_pointer_press(PointerEvent::press(200.0, 100.0, PointerButton::Secondary))
        .expect("press");
    assert_eq!(plot.interaction_mode(), InteractionMode::SelectStart);
}

#[test]
fn reset_key_restores_default_view() {
    let mut plot = build_plot();
    plot.handle_wheel(WheelEvent::new(100.0, 100.0, 1.0))
        .expect("wheel");
    assert_ne!(plot.viewport().zoom(), (1.0, 1.0));

    let response = plot.handle_key_press(KeyEvent::new(Key::Space, Modifiers::NONE));
    assert!(response.reset_scene);
    assert_eq!(plot.viewport().zoom(), (1.0, 1.0));
    assert_eq!(plot.viewport().offset(), (0.0, 0.0));
    assert_eq!(
        plot.viewport().bounds(),
        SceneRect::new(0.0, 100.0, 0.0, 100.0)
    );
}

#[test]
fn cancel_key_aborts_selection_without_zoom() {
    let mut plot = build_plot();
    drag_select(&mut plot, (200.0, 100.0), (600.0, 300.0));

    plot.handle_key_press(KeyEvent::new(Key::Escape, Modifiers::NONE));
    assert_eq!(plot.interaction_mode(), InteractionMode::Idle);

    let response = plot
        .handle_pointer_release(PointerEvent::release(600.0, 300.0, PointerButton::Primary))
        .expect("release");
    assert!(response.rect_zoom.is_none());
    assert_eq!(plot.viewport().zoom(), (1.0, 1.0));
}

#[test]
fn rebinding_rejects_conflicts() {
    let mut plot = build_plot();
    assert!(plot.set_pan_button(PointerButton::Primary).is_err());
    assert!(plot.set_cancel_key(Key::Space).is_err());
    assert_eq!(plot.bindings().pan_button, PointerButton::Secondary);

    plot.set_reset_key(Key::Character('r')).expect("rebind reset");
    let response = plot.handle_key_press(KeyEvent::new(Key::Character('r'), Modifiers::NONE));
    assert!(response.reset_scene);
    let response = plot.handle_key_press(KeyEvent::new(Key::Space, Modifiers::NONE));
    assert!(response.is_noop());
}

#[test]
fn non_finite_pointer_positions_are_rejected() {
    let mut plot = build_plot();
    let result = plot.handle_pointer_press(PointerEvent::press(
        f64::NAN,
        10.0,
        PointerButton::Primary,
    ));
    assert!(matches!(result, Err(PlotError::InvalidData(_))));
    assert_eq!(plot.interaction_mode(), InteractionMode::Idle);

    let result = plot.handle_wheel(WheelEvent::new(10.0, 10.0, f64::INFINITY));
    assert!(result.is_err());
    assert!(plot.set_wheel_zoom_coefficient(1.5).is_err());
}
