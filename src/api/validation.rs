use crate::core::{ZoomLimits, validate_density_ratio};
use crate::error::{PlotError, PlotResult};
use crate::interaction::validate_wheel_zoom_coefficient;

use super::PlotConfig;

pub(super) fn validate_plot_config(config: &PlotConfig) -> PlotResult<()> {
    if !config.device_size.is_valid() {
        return Err(PlotError::InvalidViewport {
            width: config.device_size.width,
            height: config.device_size.height,
        });
    }
    validate_bounds("x", config.x_bounds)?;
    validate_bounds("y", config.y_bounds)?;
    validate_zoom_limits(config.zoom_limits)?;
    validate_density_ratio(config.grid_density_ratio)?;
    if config.default_tick_divisions == 0 {
        return Err(PlotError::InvalidConfig(
            "default tick divisions must be > 0".to_owned(),
        ));
    }
    validate_wheel_zoom_coefficient(config.wheel_zoom_coefficient)?;
    if !config.default_step.is_finite() || config.default_step <= 0.0 {
        return Err(PlotError::InvalidConfig(
            "default step must be finite and > 0".to_owned(),
        ));
    }
    for (axis, step) in [
        ("x", config.fixed_grid_step_x),
        ("y", config.fixed_grid_step_y),
    ] {
        if let Some(step) = step {
            if !step.is_finite() || step <= 0.0 {
                return Err(PlotError::InvalidConfig(format!(
                    "fixed {axis} grid step must be finite and > 0"
                )));
            }
        }
    }
    config.bindings.validate()?;
    config.style.validate()
}

pub(super) fn validate_zoom_limits(limits: ZoomLimits) -> PlotResult<()> {
    if !limits.min_zoom.is_finite() || limits.min_zoom <= 0.0 {
        return Err(PlotError::InvalidConfig(
            "min zoom must be finite and > 0".to_owned(),
        ));
    }
    if !limits.max_zoom_multiplier.is_finite() || limits.max_zoom_multiplier < 1.0 {
        return Err(PlotError::InvalidConfig(
            "max zoom multiplier must be finite and >= 1".to_owned(),
        ));
    }
    Ok(())
}

fn validate_bounds(axis: &str, (min, max): (f64, f64)) -> PlotResult<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(PlotError::InvalidConfig(format!(
            "{axis} bounds must be finite with min < max"
        )));
    }
    Ok(())
}
