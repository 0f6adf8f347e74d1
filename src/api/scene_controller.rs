use tracing::{debug, trace};

use crate::core::{Axis, AxisLock, DeviceSize, Sample, SceneRect, ZoomLimits};
use crate::error::PlotResult;
use crate::extensions::PlotEvent;
use crate::render::{Color, LineStyle, PlotStyle, Renderer};

use super::PlotViewport;
use super::validation::validate_zoom_limits;

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    /// Sets X bounds, resetting X zoom and offset. Returns `false` (and changes
    /// nothing) when `min >= max` or either is not finite.
    pub fn set_x_bounds(&mut self, min: f64, max: f64) -> bool {
        self.set_bounds(Axis::X, min, max)
    }

    /// Y counterpart of [`PlotViewport::set_x_bounds`].
    pub fn set_y_bounds(&mut self, min: f64, max: f64) -> bool {
        self.set_bounds(Axis::Y, min, max)
    }

    fn set_bounds(&mut self, axis: Axis, min: f64, max: f64) -> bool {
        if !self.viewport.set_bounds(axis, min, max) {
            return false;
        }
        self.refresh_grid(true);
        true
    }

    /// Fixes the grid step of one axis; `step <= 0` restores the derived step.
    pub fn set_grid_step(&mut self, axis: Axis, step: f64) {
        self.viewport.set_grid_step(axis, step);
        self.refresh_grid(true);
    }

    /// Fits the scene to the visible series and rebuilds the grid.
    pub fn reset_scene(&mut self) -> SceneRect {
        let bounds = self.viewport.reset_to_data(&self.series);
        self.refresh_grid(true);
        self.emit_plot_event(PlotEvent::SceneReset { bounds });
        bounds
    }

    /// Changes the device size; the grid is rebuilt for the new border.
    pub fn resize(&mut self, size: DeviceSize) -> PlotResult<()> {
        self.viewport.resize(size)?;
        debug!(width = size.width, height = size.height, "resize viewport");
        self.refresh_grid(true);
        Ok(())
    }

    #[must_use]
    pub fn scene_mode(&self) -> AxisLock {
        self.input.default_lock()
    }

    /// Sets the axis lock used while no lock key is held and applies it now.
    pub fn set_scene_mode(&mut self, lock: AxisLock) {
        let response = self.input.set_default_lock(lock, &mut self.viewport);
        self.apply_input_response(response);
    }

    #[must_use]
    pub fn axis_lock(&self) -> AxisLock {
        self.viewport.axis_lock()
    }

    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) -> PlotResult<()> {
        validate_zoom_limits(limits)?;
        self.viewport.set_limits(limits);
        self.refresh_grid(false);
        Ok(())
    }

    #[must_use]
    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    /// Enables or disables fitting the scene after series changes.
    pub fn set_auto_fit(&mut self, auto_fit: bool) {
        self.auto_fit = auto_fit;
    }

    #[must_use]
    pub fn style(&self) -> PlotStyle {
        self.style
    }

    pub fn set_style(&mut self, style: PlotStyle) -> PlotResult<()> {
        style.validate()?;
        self.style = style;
        self.redraw_pending = true;
        Ok(())
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.style.show_grid = visible;
        self.redraw_pending = true;
    }

    pub fn set_cursor_grid_visible(&mut self, visible: bool) {
        self.style.show_cursor_grid = visible;
        self.redraw_pending = true;
    }

    pub fn set_background_color(&mut self, color: Color) -> PlotResult<()> {
        self.update_style(|style| style.background = color)
    }

    pub fn set_grid_style(&mut self, line: LineStyle) -> PlotResult<()> {
        self.update_style(|style| style.grid = line)
    }

    pub fn set_cursor_grid_style(&mut self, line: LineStyle) -> PlotResult<()> {
        self.update_style(|style| style.cursor_grid = line)
    }

    pub fn set_axes_style(&mut self, line: LineStyle) -> PlotResult<()> {
        self.update_style(|style| style.axes = line)
    }

    pub fn set_series_width(&mut self, width: f64) -> PlotResult<()> {
        self.update_style(|style| style.series_width = width)
    }

    fn update_style(&mut self, update: impl FnOnce(&mut PlotStyle)) -> PlotResult<()> {
        let mut style = self.style;
        update(&mut style);
        self.set_style(style)
    }

    /// Recomputes grid density and ticks, optionally regenerating every line,
    /// then tells observers to re-pull the ticks.
    pub(super) fn refresh_grid(&mut self, full_rebuild: bool) {
        self.grid
            .refresh(&self.viewport, self.input.state().cursor(), full_rebuild);
        trace!(
            full_rebuild,
            vertical = self.grid.vertical_ticks().len(),
            horizontal = self.grid.horizontal_ticks().len(),
            "grid refreshed"
        );
        self.redraw_pending = true;
        self.emit_plot_event(PlotEvent::GridTicksChanged {
            viewport_id: self.id,
        });
    }
}
