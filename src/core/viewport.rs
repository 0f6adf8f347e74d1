use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::sample::Sample;
use crate::core::series::SeriesStore;
use crate::core::types::{Axis, AxisLock, DevicePoint, DeviceSize, SceneRect, ScenePoint};
use crate::error::{PlotError, PlotResult};

/// How far the pan border reaches past each device edge, as a fraction of the
/// device size. The border spans device `[-0.5 W, 1.5 W] x [-0.5 H, 1.5 H]`
/// at zoom 1 and zero offset.
pub const BORDER_MARGIN_RATIO: f64 = 0.5;

/// Zoom clamping applied by every zoom operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    /// Floor for both zoom factors.
    pub min_zoom: f64,
    /// A rectangle zoom may multiply the current zoom by at most this factor.
    pub max_zoom_multiplier: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom_multiplier: 100.0,
        }
    }
}

/// Which axes a rectangle zoom actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RectZoomOutcome {
    pub x_applied: bool,
    pub y_applied: bool,
}

impl RectZoomOutcome {
    #[must_use]
    pub fn any(self) -> bool {
        self.x_applied || self.y_applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisState {
    min: f64,
    max: f64,
    zoom: f64,
    offset: f64,
    grid_step: f64,
    fixed_grid_step: Option<f64>,
}

impl AxisState {
    fn new(min: f64, max: f64, tick_divisions: u32) -> Self {
        let mut axis = Self {
            min,
            max,
            zoom: 1.0,
            offset: 0.0,
            grid_step: 1.0,
            fixed_grid_step: None,
        };
        axis.refresh_grid_step(tick_divisions);
        axis
    }

    fn span(self) -> f64 {
        self.max - self.min
    }

    fn set_bounds(&mut self, min: f64, max: f64, tick_divisions: u32) {
        self.min = min;
        self.max = max;
        self.zoom = 1.0;
        self.offset = 0.0;
        self.refresh_grid_step(tick_divisions);
    }

    fn refresh_grid_step(&mut self, tick_divisions: u32) {
        self.grid_step = self
            .fixed_grid_step
            .unwrap_or_else(|| self.span() / f64::from(tick_divisions.max(1)));
    }
}

/// Scene window, zoom and pan state of one plot, plus every device<->scene
/// conversion.
///
/// Offsets are device pixels; zoom factors multiply the base density
/// (`device size / scene span`). The device origin (top-left) maps to
/// `(min_x, max_y)` at zoom 1 with zero offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    device: DeviceSize,
    x: AxisState,
    y: AxisState,
    axis_lock: AxisLock,
    limits: ZoomLimits,
    tick_divisions: u32,
}

impl Viewport {
    pub fn new(device: DeviceSize, limits: ZoomLimits, tick_divisions: u32) -> PlotResult<Self> {
        if !device.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: device.width,
                height: device.height,
            });
        }
        if tick_divisions == 0 {
            return Err(PlotError::InvalidConfig(
                "tick divisions must be > 0".to_owned(),
            ));
        }

        Ok(Self {
            device,
            x: AxisState::new(0.0, 1.0, tick_divisions),
            y: AxisState::new(0.0, 1.0, tick_divisions),
            axis_lock: AxisLock::Free,
            limits,
            tick_divisions,
        })
    }

    #[must_use]
    pub fn device_size(&self) -> DeviceSize {
        self.device
    }

    /// Changes the device size. Zoom and offsets are kept.
    pub fn resize(&mut self, device: DeviceSize) -> PlotResult<()> {
        if !device.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: device.width,
                height: device.height,
            });
        }
        self.device = device;
        self.clamp_offsets();
        Ok(())
    }

    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Replaces the zoom limits, raising current zoom factors to the new
    /// floor.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        self.x.zoom = self.x.zoom.max(limits.min_zoom);
        self.y.zoom = self.y.zoom.max(limits.min_zoom);
        self.clamp_offsets();
    }

    #[must_use]
    pub fn tick_divisions(&self) -> u32 {
        self.tick_divisions
    }

    #[must_use]
    pub fn axis_lock(&self) -> AxisLock {
        self.axis_lock
    }

    pub fn set_axis_lock(&mut self, lock: AxisLock) {
        self.axis_lock = lock;
    }

    /// Scene bounds at zoom 1 with zero offset.
    #[must_use]
    pub fn bounds(&self) -> SceneRect {
        SceneRect::new(self.x.min, self.x.max, self.y.min, self.y.max)
    }

    #[must_use]
    pub fn zoom(&self) -> (f64, f64) {
        (self.x.zoom, self.y.zoom)
    }

    #[must_use]
    pub fn offset(&self) -> (f64, f64) {
        (self.x.offset, self.y.offset)
    }

    #[must_use]
    pub fn scene_span(&self) -> (f64, f64) {
        (self.x.span(), self.y.span())
    }

    /// Device pixels per scene unit at zoom 1.
    #[must_use]
    pub fn pixel_density(&self) -> (f64, f64) {
        (
            self.device.width_f64() / self.x.span(),
            self.device.height_f64() / self.y.span(),
        )
    }

    #[must_use]
    pub fn grid_step(&self, axis: Axis) -> f64 {
        self.axis(axis).grid_step
    }

    #[must_use]
    pub fn fixed_grid_step(&self, axis: Axis) -> Option<f64> {
        self.axis(axis).fixed_grid_step
    }

    /// Fixes the grid step of one axis. A non-positive or non-finite step
    /// clears the fixed step and restores `span / tick_divisions`.
    pub fn set_grid_step(&mut self, axis: Axis, step: f64) {
        let tick_divisions = self.tick_divisions;
        let state = self.axis_mut(axis);
        state.fixed_grid_step = (step.is_finite() && step > 0.0).then_some(step);
        state.refresh_grid_step(tick_divisions);
        debug!(?axis, grid_step = state.grid_step, "set grid step");
    }

    /// Converts a device pixel position into scene coordinates.
    #[must_use]
    pub fn device_to_scene(&self, point: DevicePoint) -> ScenePoint {
        let (scale_x, scale_y) = self.scale();
        ScenePoint::new(
            self.x.min + (point.x - self.x.offset) / scale_x,
            self.y.max - (point.y - self.y.offset) / scale_y,
        )
    }

    /// Exact inverse of [`Viewport::device_to_scene`].
    #[must_use]
    pub fn scene_to_device(&self, point: ScenePoint) -> DevicePoint {
        let (scale_x, scale_y) = self.scale();
        DevicePoint::new(
            (point.x - self.x.min) * scale_x + self.x.offset,
            (self.y.max - point.y) * scale_y + self.y.offset,
        )
    }

    /// Scene rectangle currently covered by the device surface.
    #[must_use]
    pub fn visible_rect(&self) -> SceneRect {
        let top_left = self.device_to_scene(DevicePoint::new(0.0, 0.0));
        let bottom_right = self.device_to_scene(DevicePoint::new(
            self.device.width_f64(),
            self.device.height_f64(),
        ));
        SceneRect::new(top_left.x, bottom_right.x, bottom_right.y, top_left.y)
    }

    /// Outer rectangle the visible window is kept inside.
    #[must_use]
    pub fn border(&self) -> SceneRect {
        let margin_x = self.x.span() * BORDER_MARGIN_RATIO;
        let margin_y = self.y.span() * BORDER_MARGIN_RATIO;
        SceneRect::new(
            self.x.min - margin_x,
            self.x.max + margin_x,
            self.y.min - margin_y,
            self.y.max + margin_y,
        )
    }

    /// Sets the X bounds, resetting X zoom and offset. Returns `false` and
    /// leaves the viewport untouched when `min >= max` or either is not finite.
    pub fn set_x_bounds(&mut self, min: f64, max: f64) -> bool {
        self.set_bounds(Axis::X, min, max)
    }

    /// Y counterpart of [`Viewport::set_x_bounds`].
    pub fn set_y_bounds(&mut self, min: f64, max: f64) -> bool {
        self.set_bounds(Axis::Y, min, max)
    }

    pub fn set_bounds(&mut self, axis: Axis, min: f64, max: f64) -> bool {
        if !usable_bounds(min, max) {
            warn!(?axis, min, max, "ignoring invalid scene bounds");
            return false;
        }
        let tick_divisions = self.tick_divisions;
        self.axis_mut(axis).set_bounds(min, max, tick_divisions);
        debug!(?axis, min, max, "set scene bounds");
        true
    }

    /// Pans by a device-pixel delta on the unlocked axes, then keeps the
    /// visible window inside the border.
    pub fn pan(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(PlotError::InvalidData("pan delta must be finite".to_owned()));
        }
        if self.axis_lock.moves_x() {
            self.x.offset += dx;
        }
        if self.axis_lock.moves_y() {
            self.y.offset += dy;
        }
        self.clamp_offsets();
        trace!(offset_x = self.x.offset, offset_y = self.y.offset, "pan");
        Ok(())
    }

    /// Multiplies the unlocked zoom factors by `factor`, keeping the scene
    /// point under `cursor` fixed.
    pub fn zoom_at(&mut self, cursor: DevicePoint, factor: f64) -> PlotResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PlotError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !cursor.is_finite() {
            return Err(PlotError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let anchor = self.device_to_scene(cursor);
        let (density_x, density_y) = self.pixel_density();
        let min_zoom = self.limits.min_zoom;
        if self.axis_lock.moves_x() {
            self.x.zoom = (self.x.zoom * factor).max(min_zoom);
            self.x.offset = cursor.x - (anchor.x - self.x.min) * self.x.zoom * density_x;
        }
        if self.axis_lock.moves_y() {
            self.y.zoom = (self.y.zoom * factor).max(min_zoom);
            self.y.offset = cursor.y - (self.y.max - anchor.y) * self.y.zoom * density_y;
        }
        self.clamp_offsets();
        trace!(zoom_x = self.x.zoom, zoom_y = self.y.zoom, "zoom at cursor");
        Ok(())
    }

    /// Makes the scene rectangle spanned by `begin`/`end` fill the device on
    /// each unlocked axis.
    ///
    /// An axis is left alone when the selection is empty on it or when the
    /// resulting zoom would exceed `zoom * max_zoom_multiplier`; the other axis
    /// still commits.
    pub fn commit_rect_zoom(&mut self, begin: ScenePoint, end: ScenePoint) -> RectZoomOutcome {
        let (density_x, density_y) = self.pixel_density();
        let mut outcome = RectZoomOutcome::default();

        let zoom_x = self
            .axis_lock
            .moves(Axis::X)
            .then(|| self.rect_zoom_factor(Axis::X, begin.x, end.x))
            .flatten();
        if let Some(zoom) = zoom_x {
            self.x.zoom = zoom;
            self.x.offset = -(begin.x.min(end.x) - self.x.min) * zoom * density_x;
            outcome.x_applied = true;
        }
        let zoom_y = self
            .axis_lock
            .moves(Axis::Y)
            .then(|| self.rect_zoom_factor(Axis::Y, begin.y, end.y))
            .flatten();
        if let Some(zoom) = zoom_y {
            self.y.zoom = zoom;
            self.y.offset = -(self.y.max - begin.y.max(end.y)) * zoom * density_y;
            outcome.y_applied = true;
        }

        self.clamp_offsets();
        debug!(
            x_applied = outcome.x_applied,
            y_applied = outcome.y_applied,
            zoom_x = self.x.zoom,
            zoom_y = self.y.zoom,
            "commit rectangle zoom"
        );
        outcome
    }

    /// Fits the scene to the union of all visible series and resets zoom and
    /// offset. Bounds are kept when no visible series has data.
    pub fn reset_to_data<S: Sample>(&mut self, series: &SeriesStore<S>) -> SceneRect {
        if let Some(extent) = series.data_extent() {
            self.fit_axis(Axis::X, extent.min_x, extent.max_x);
            self.fit_axis(Axis::Y, extent.min_y, extent.max_y);
        } else {
            self.x.zoom = 1.0;
            self.y.zoom = 1.0;
            self.x.offset = 0.0;
            self.y.offset = 0.0;
        }
        let bounds = self.bounds();
        debug!(?bounds, "reset scene to data");
        bounds
    }

    /// Fits one axis to a data range. A range whose span or border is not
    /// representable keeps the previous bounds; zoom and offset reset either
    /// way.
    fn fit_axis(&mut self, axis: Axis, min: f64, max: f64) {
        let (min, max) = non_degenerate(min, max);
        let tick_divisions = self.tick_divisions;
        let state = self.axis_mut(axis);
        if usable_bounds(min, max) {
            state.set_bounds(min, max, tick_divisions);
        } else {
            warn!(?axis, min, max, "data extent cannot be mapped, keeping bounds");
            let (previous_min, previous_max) = (state.min, state.max);
            state.set_bounds(previous_min, previous_max, tick_divisions);
        }
    }

    fn rect_zoom_factor(&self, axis: Axis, begin: f64, end: f64) -> Option<f64> {
        let state = self.axis(axis);
        let selected = (end - begin).abs();
        if !selected.is_finite() || selected <= 0.0 {
            return None;
        }
        let zoom = state.span() / selected;
        if !zoom.is_finite() || zoom > state.zoom * self.limits.max_zoom_multiplier {
            warn!(?axis, zoom, current = state.zoom, "rejecting rectangle zoom past limit");
            return None;
        }
        Some(zoom.max(self.limits.min_zoom))
    }

    fn scale(&self) -> (f64, f64) {
        let (density_x, density_y) = self.pixel_density();
        (self.x.zoom * density_x, self.y.zoom * density_y)
    }

    fn clamp_offsets(&mut self) {
        let border = self.border();
        let (scale_x, scale_y) = self.scale();
        let width = self.device.width_f64();
        let height = self.device.height_f64();

        self.x.offset = clamp_or_center(
            self.x.offset,
            width - (border.max_x - self.x.min) * scale_x,
            (self.x.min - border.min_x) * scale_x,
        );
        self.y.offset = clamp_or_center(
            self.y.offset,
            height - (self.y.max - border.min_y) * scale_y,
            (border.max_y - self.y.max) * scale_y,
        );
    }

    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// Finite, ordered bounds whose span, pan border and pixel density are finite
/// too.
fn usable_bounds(min: f64, max: f64) -> bool {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return false;
    }
    let span = max - min;
    let margin = span * BORDER_MARGIN_RATIO;
    (f64::from(u32::MAX) / span).is_finite()
        && (min - margin).is_finite()
        && (max + margin).is_finite()
}

/// Widens an empty range to span 1 around its value.
fn non_degenerate(min: f64, max: f64) -> (f64, f64) {
    if max - min > 0.0 {
        (min, max)
    } else {
        (min - 0.5, min + 0.5)
    }
}

fn clamp_or_center(value: f64, low: f64, high: f64) -> f64 {
    if low > high {
        (low + high) / 2.0
    } else {
        value.clamp(low, high)
    }
}
