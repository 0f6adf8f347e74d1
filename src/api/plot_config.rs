use serde::{Deserialize, Serialize};

use crate::core::{AxisLock, DeviceSize, RenderMode, ZoomLimits};
use crate::interaction::InputBindings;
use crate::render::PlotStyle;

/// Public viewport bootstrap configuration.
///
/// This type is serializable so host applications can persist/load plot setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub device_size: DeviceSize,
    /// Carried in `GridTicksChanged` so one listener can serve many viewports.
    #[serde(default)]
    pub viewport_id: u32,
    /// Fit the scene to the data whenever series are added, replaced or
    /// removed.
    #[serde(default = "default_auto_fit")]
    pub auto_fit: bool,
    #[serde(default = "default_x_bounds")]
    pub x_bounds: (f64, f64),
    #[serde(default = "default_y_bounds")]
    pub y_bounds: (f64, f64),
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    /// Integer factor between consecutive grid density levels.
    #[serde(default = "default_grid_density_ratio")]
    pub grid_density_ratio: f64,
    /// Grid step is `span / default_tick_divisions` unless fixed.
    #[serde(default = "default_tick_divisions")]
    pub default_tick_divisions: u32,
    #[serde(default = "default_wheel_zoom_coefficient")]
    pub wheel_zoom_coefficient: f64,
    #[serde(default = "default_step")]
    pub default_step: f64,
    #[serde(default)]
    pub default_render_mode: RenderMode,
    /// Lock restored when no lock key is held.
    #[serde(default)]
    pub default_axis_lock: AxisLock,
    #[serde(default)]
    pub fixed_grid_step_x: Option<f64>,
    #[serde(default)]
    pub fixed_grid_step_y: Option<f64>,
    #[serde(default)]
    pub bindings: InputBindings,
    #[serde(default)]
    pub style: PlotStyle,
}

impl PlotConfig {
    /// Creates a config with default behavior for a device surface.
    #[must_use]
    pub fn new(device_size: DeviceSize) -> Self {
        Self {
            device_size,
            viewport_id: 0,
            auto_fit: default_auto_fit(),
            x_bounds: default_x_bounds(),
            y_bounds: default_y_bounds(),
            zoom_limits: ZoomLimits::default(),
            grid_density_ratio: default_grid_density_ratio(),
            default_tick_divisions: default_tick_divisions(),
            wheel_zoom_coefficient: default_wheel_zoom_coefficient(),
            default_step: default_step(),
            default_render_mode: RenderMode::default(),
            default_axis_lock: AxisLock::default(),
            fixed_grid_step_x: None,
            fixed_grid_step_y: None,
            bindings: InputBindings::default(),
            style: PlotStyle::default(),
        }
    }

    #[must_use]
    pub fn with_viewport_id(mut self, viewport_id: u32) -> Self {
        self.viewport_id = viewport_id;
        self
    }

    #[must_use]
    pub fn with_auto_fit(mut self, auto_fit: bool) -> Self {
        self.auto_fit = auto_fit;
        self
    }

    /// Sets the initial scene bounds.
    #[must_use]
    pub fn with_bounds(mut self, x_bounds: (f64, f64), y_bounds: (f64, f64)) -> Self {
        self.x_bounds = x_bounds;
        self.y_bounds = y_bounds;
        self
    }

    #[must_use]
    pub fn with_zoom_limits(mut self, zoom_limits: ZoomLimits) -> Self {
        self.zoom_limits = zoom_limits;
        self
    }

    #[must_use]
    pub fn with_grid_density_ratio(mut self, ratio: f64) -> Self {
        self.grid_density_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_default_tick_divisions(mut self, divisions: u32) -> Self {
        self.default_tick_divisions = divisions;
        self
    }

    #[must_use]
    pub fn with_wheel_zoom_coefficient(mut self, coefficient: f64) -> Self {
        self.wheel_zoom_coefficient = coefficient;
        self
    }

    #[must_use]
    pub fn with_default_step(mut self, step: f64) -> Self {
        self.default_step = step;
        self
    }

    #[must_use]
    pub fn with_default_render_mode(mut self, mode: RenderMode) -> Self {
        self.default_render_mode = mode;
        self
    }

    #[must_use]
    pub fn with_default_axis_lock(mut self, lock: AxisLock) -> Self {
        self.default_axis_lock = lock;
        self
    }

    /// Fixes grid steps; `None` keeps the derived step for that axis.
    #[must_use]
    pub fn with_fixed_grid_steps(mut self, x: Option<f64>, y: Option<f64>) -> Self {
        self.fixed_grid_step_x = x;
        self.fixed_grid_step_y = y;
        self
    }

    #[must_use]
    pub fn with_bindings(mut self, bindings: InputBindings) -> Self {
        self.bindings = bindings;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }
}

fn default_auto_fit() -> bool {
    true
}

fn default_x_bounds() -> (f64, f64) {
    (0.0, 1.0)
}

fn default_y_bounds() -> (f64, f64) {
    (0.0, 1.0)
}

fn default_grid_density_ratio() -> f64 {
    2.0
}

fn default_tick_divisions() -> u32 {
    10
}

fn default_wheel_zoom_coefficient() -> f64 {
    0.05
}

fn default_step() -> f64 {
    1.0
}
