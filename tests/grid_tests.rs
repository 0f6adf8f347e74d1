use approx::assert_abs_diff_eq;
use plotview_rs::core::{Axis, DeviceSize};
use plotview_rs::interaction::{PointerButton, PointerButtons, PointerEvent, WheelEvent};
use plotview_rs::render::NullRenderer;
use plotview_rs::{PlotConfig, PlotViewport};

fn build_plot(config: PlotConfig) -> PlotViewport<NullRenderer> {
    PlotViewport::new(NullRenderer::default(), config).expect("plot init")
}

fn base_config() -> PlotConfig {
    PlotConfig::new(DeviceSize::new(800, 400))
        .with_bounds((0.0, 100.0), (0.0, 100.0))
        .with_auto_fit(false)
}

#[test]
fn initial_grid_covers_border_and_ticks_end_with_cursor() {
    let mut plot = build_plot(base_config());
    assert_eq!(plot.grid().vertical().lines().len(), 19);
    assert_eq!(plot.grid().vertical().step(), 10.0);

    plot.handle_pointer_move(PointerEvent::moved(120.0, 80.0, PointerButtons::none()))
        .expect("move");

    let vertical = plot.vertical_ticks();
    assert_eq!(vertical.len(), 10);
    let values: Vec<f64> = vertical[..9].iter().map(|tick| tick.value).collect();
    assert_eq!(
        values,
        vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]
    );
    assert_eq!(vertical[0].position_px, 80.0);
    let cursor = vertical[9];
    assert_eq!((cursor.position_px, cursor.value), (120.0, 15.0));

    let horizontal = plot.horizontal_ticks();
    assert_eq!(horizontal.len(), 10);
    assert_eq!(horizontal[0].value, 90.0);
    assert_eq!(horizontal[0].position_px, 40.0);
    assert_eq!(horizontal[8].value, 10.0);
    let cursor = horizontal[9];
    assert_eq!((cursor.position_px, cursor.value), (80.0, 80.0));
}

#[test]
fn fixed_step_overrides_tick_divisions() {
    let mut plot = build_plot(base_config().with_fixed_grid_steps(Some(25.0), None));
    assert_eq!(plot.grid().vertical().step(), 25.0);
    assert_eq!(plot.grid().horizontal().step(), 10.0);
    assert_eq!(plot.vertical_ticks().len(), 4);

    plot.set_grid_step(Axis::X, 0.0);
    assert_eq!(plot.grid().vertical().step(), 10.0);
    assert_eq!(plot.config().fixed_grid_step_x, None);

    plot.set_grid_step(Axis::Y, 50.0);
    assert_eq!(plot.config().fixed_grid_step_y, Some(50.0));
    assert_eq!(plot.horizontal_ticks().len(), 2);
}

#[test]
fn wheel_zoom_doubles_density_and_zoom_out_restores_it() {
    let mut plot = build_plot(base_config());
    let base = plot.grid().vertical().lines().len();

    for _ in 0..15 {
        plot.handle_wheel(WheelEvent::new(400.0, 200.0, 1.0))
            .expect("wheel up");
    }
    assert!(plot.viewport().zoom().0 > 2.0);
    assert_eq!(plot.grid().vertical().density_level(), 1);
    assert_eq!(plot.grid().vertical().lines().len(), base * 2);

    plot.reset_scene();
    assert_eq!(plot.grid().vertical().density_level(), 0);
    assert_eq!(plot.grid().vertical().lines().len(), base);
}

#[test]
fn repeated_rect_zoom_keeps_grid_lines_on_screen() {
    let config = PlotConfig::new(DeviceSize::new(1000, 1000))
        .with_bounds((0.0, 100.0), (0.0, 100.0))
        .with_auto_fit(false);
    let mut plot = build_plot(config);
    let held = PointerButtons::from_button(PointerButton::Primary);

    let mut expected_zoom = 1.0;
    for _ in 0..5 {
        plot.handle_pointer_press(PointerEvent::press(437.5, 437.5, PointerButton::Primary))
            .expect("press");
        plot.handle_pointer_move(PointerEvent::moved(562.5, 562.5, held))
            .expect("move");
        plot.handle_pointer_release(PointerEvent::release(562.5, 562.5, PointerButton::Primary))
            .expect("release");
        expected_zoom *= 8.0;

        let (zoom_x, zoom_y) = plot.viewport().zoom();
        assert_abs_diff_eq!(zoom_x, expected_zoom, epsilon = expected_zoom * 1e-9);
        assert_abs_diff_eq!(zoom_y, expected_zoom, epsilon = expected_zoom * 1e-9);

        let vertical = plot.vertical_ticks().len() - 1;
        let horizontal = plot.horizontal_ticks().len() - 1;
        assert!(vertical >= 2, "zoom {expected_zoom}: {vertical} vertical ticks");
        assert!(horizontal >= 2, "zoom {expected_zoom}: {horizontal} horizontal ticks");
    }
    assert!(plot.grid().vertical().window().is_some());

    plot.reset_scene();
    assert_eq!(plot.grid().vertical().density_level(), 0);
    assert!(plot.grid().vertical().window().is_none());
    assert_eq!(plot.grid().vertical().lines().len(), 19);
}

#[test]
fn bounds_change_rebuilds_grid() {
    let mut plot = build_plot(base_config());
    assert!(plot.set_x_bounds(-1.0, 1.0));
    assert_eq!(plot.grid().vertical().step(), 0.2);
    assert!(!plot.set_x_bounds(3.0, 3.0));
    assert!(!plot.set_y_bounds(f64::NAN, 1.0));
    assert_eq!(plot.viewport().bounds().min_x, -1.0);
}
