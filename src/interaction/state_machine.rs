use tracing::{debug, trace};

use crate::core::{AxisLock, DevicePoint, RectZoomOutcome, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::interaction::{
    InputBindings, InteractionMode, InteractionState, KeyEvent, PointerEvent, WheelEvent,
};

/// What the owner of the viewport must do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputResponse {
    /// Zoom or offset changed: adjust grid density and re-extract ticks.
    pub refresh_grid: bool,
    /// Bounds changed: regenerate every grid line.
    pub rebuild_grid: bool,
    /// Fit the scene to the visible series.
    pub reset_scene: bool,
    pub redraw: bool,
    /// Set when a rectangle zoom was committed.
    pub rect_zoom: Option<RectZoomOutcome>,
}

impl InputResponse {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            refresh_grid: false,
            rebuild_grid: false,
            reset_scene: false,
            redraw: false,
            rect_zoom: None,
        }
    }

    #[must_use]
    pub const fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn refresh() -> Self {
        Self {
            refresh_grid: true,
            redraw: true,
            ..Self::none()
        }
    }

    #[must_use]
    pub const fn reset() -> Self {
        Self {
            reset_scene: true,
            rebuild_grid: true,
            refresh_grid: true,
            redraw: true,
            rect_zoom: None,
        }
    }

    #[must_use]
    pub fn is_noop(self) -> bool {
        self == Self::none()
    }
}

/// Pointer, keyboard and wheel handling for one viewport.
///
/// Handlers mutate the [`Viewport`] directly and report follow-up work via
/// [`InputResponse`]; series data is never touched here.
#[derive(Debug, Clone, PartialEq)]
pub struct InputStateMachine {
    state: InteractionState,
    bindings: InputBindings,
    default_lock: AxisLock,
    wheel_zoom_coefficient: f64,
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self {
            state: InteractionState::default(),
            bindings: InputBindings::default(),
            default_lock: AxisLock::Free,
            wheel_zoom_coefficient: 0.05,
        }
    }
}

impl InputStateMachine {
    pub fn new(
        bindings: InputBindings,
        default_lock: AxisLock,
        wheel_zoom_coefficient: f64,
    ) -> PlotResult<Self> {
        bindings.validate()?;
        validate_wheel_zoom_coefficient(wheel_zoom_coefficient)?;
        Ok(Self {
            state: InteractionState::default(),
            bindings,
            default_lock,
            wheel_zoom_coefficient,
        })
    }

    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    #[must_use]
    pub fn bindings(&self) -> InputBindings {
        self.bindings
    }

    pub fn set_bindings(&mut self, bindings: InputBindings) -> PlotResult<()> {
        bindings.validate()?;
        self.bindings = bindings;
        Ok(())
    }

    pub fn swap_pointer_buttons(&mut self) {
        self.bindings.swap_pointer_buttons();
    }

    pub fn swap_axis_lock_keys(&mut self) {
        self.bindings.swap_axis_lock_keys();
    }

    #[must_use]
    pub fn default_lock(&self) -> AxisLock {
        self.default_lock
    }

    /// Sets the lock restored when no lock key is held and applies it now.
    pub fn set_default_lock(&mut self, lock: AxisLock, viewport: &mut Viewport) -> InputResponse {
        self.default_lock = lock;
        self.apply_lock(lock, viewport)
    }

    #[must_use]
    pub fn wheel_zoom_coefficient(&self) -> f64 {
        self.wheel_zoom_coefficient
    }

    pub fn set_wheel_zoom_coefficient(&mut self, coefficient: f64) -> PlotResult<()> {
        validate_wheel_zoom_coefficient(coefficient)?;
        self.wheel_zoom_coefficient = coefficient;
        Ok(())
    }

    pub fn pointer_press(
        &mut self,
        event: PointerEvent,
        viewport: &Viewport,
    ) -> PlotResult<InputResponse> {
        let position = validate_position(event.position)?;
        let Some(button) = event.button else {
            return Ok(InputResponse::none());
        };
        self.state.cursor = position;
        self.state.previous_cursor = position;

        if button == self.bindings.pan_button {
            if self.state.mode == InteractionMode::Idle {
                self.state.mode = InteractionMode::Panning;
            }
            trace!(x = position.x, y = position.y, "pan start");
            return Ok(InputResponse::redraw());
        }
        if button == self.bindings.select_button {
            let origin = viewport.device_to_scene(position);
            self.state.origin = origin;
            self.state.selection.begin = origin;
            self.state.selection.end = origin;
            self.state.mode = InteractionMode::SelectStart;
            trace!(x = origin.x, y = origin.y, "selection start");
            return Ok(InputResponse::redraw());
        }
        Ok(InputResponse::none())
    }

    pub fn pointer_release(
        &mut self,
        event: PointerEvent,
        viewport: &mut Viewport,
    ) -> PlotResult<InputResponse> {
        let position = validate_position(event.position)?;
        let Some(button) = event.button else {
            return Ok(InputResponse::none());
        };
        self.state.previous_cursor = self.state.cursor;
        self.state.cursor = position;

        if button == self.bindings.pan_button {
            if self.state.mode == InteractionMode::Panning {
                self.state.mode = InteractionMode::Idle;
            }
            return Ok(InputResponse::redraw());
        }
        if button != self.bindings.select_button {
            return Ok(InputResponse::none());
        }

        let mode = self.state.mode;
        if mode.is_selecting() {
            self.state.mode = InteractionMode::Idle;
        }
        match mode {
            InteractionMode::SelectReset => {
                debug!("reset gesture released");
                Ok(InputResponse::reset())
            }
            InteractionMode::SelectZoom => {
                let selection = self.state.selection;
                let outcome = viewport.commit_rect_zoom(selection.begin, selection.end);
                let follow_up = if outcome.any() {
                    InputResponse::refresh()
                } else {
                    InputResponse::redraw()
                };
                Ok(InputResponse {
                    rect_zoom: Some(outcome),
                    ..follow_up
                })
            }
            InteractionMode::SelectStart => Ok(InputResponse::redraw()),
            InteractionMode::Idle | InteractionMode::Panning => Ok(InputResponse::none()),
        }
    }

    pub fn pointer_move(
        &mut self,
        event: PointerEvent,
        viewport: &mut Viewport,
    ) -> PlotResult<InputResponse> {
        let position = validate_position(event.position)?;
        self.state.previous_cursor = self.state.cursor;
        self.state.cursor = position;

        if event.buttons.contains(self.bindings.pan_button) {
            let dx = position.x - self.state.previous_cursor.x;
            let dy = position.y - self.state.previous_cursor.y;
            viewport.pan(dx, dy)?;
        } else if event.buttons.contains(self.bindings.select_button)
            && self.state.mode.is_selecting()
        {
            self.update_selection(viewport);
        }
        Ok(InputResponse::refresh())
    }

    pub fn key_press(&mut self, event: KeyEvent, viewport: &mut Viewport) -> InputResponse {
        let bindings = self.bindings;
        if event.key == bindings.vertical_lock.key {
            let lock = if event.modifiers.contains(bindings.horizontal_lock.modifier) {
                AxisLock::Free
            } else {
                AxisLock::VerticalOnly
            };
            return self.apply_lock(lock, viewport);
        }
        if event.key == bindings.horizontal_lock.key {
            let lock = if event.modifiers.contains(bindings.vertical_lock.modifier) {
                AxisLock::Free
            } else {
                AxisLock::HorizontalOnly
            };
            return self.apply_lock(lock, viewport);
        }
        if event.key == bindings.reset_key {
            self.state.mode = InteractionMode::Idle;
            debug!("reset key pressed");
            return InputResponse::reset();
        }
        if event.key == bindings.cancel_key {
            return self.cancel();
        }
        InputResponse::none()
    }

    pub fn key_release(&mut self, event: KeyEvent, viewport: &mut Viewport) -> InputResponse {
        let bindings = self.bindings;
        if event.key != bindings.vertical_lock.key && event.key != bindings.horizontal_lock.key {
            return InputResponse::none();
        }
        let lock = if event.modifiers.contains(bindings.vertical_lock.modifier) {
            AxisLock::VerticalOnly
        } else if event.modifiers.contains(bindings.horizontal_lock.modifier) {
            AxisLock::HorizontalOnly
        } else {
            self.default_lock
        };
        self.apply_lock(lock, viewport)
    }

    /// Zooms around the wheel position by `1 +/- coefficient`.
    pub fn wheel(&mut self, event: WheelEvent, viewport: &mut Viewport) -> PlotResult<InputResponse> {
        let position = validate_position(event.position)?;
        if !event.delta_y.is_finite() {
            return Err(PlotError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        self.state.cursor = position;
        if event.delta_y == 0.0 {
            return Ok(InputResponse::none());
        }

        let factor = if event.delta_y > 0.0 {
            1.0 + self.wheel_zoom_coefficient
        } else {
            1.0 - self.wheel_zoom_coefficient
        };
        viewport.zoom_at(position, factor)?;
        Ok(InputResponse::refresh())
    }

    /// Aborts an in-progress gesture without committing it.
    pub fn cancel(&mut self) -> InputResponse {
        if self.state.mode == InteractionMode::Idle {
            return InputResponse::none();
        }
        debug!(mode = ?self.state.mode, "gesture cancelled");
        self.state.mode = InteractionMode::Idle;
        InputResponse::redraw()
    }

    fn apply_lock(&mut self, lock: AxisLock, viewport: &mut Viewport) -> InputResponse {
        viewport.set_axis_lock(lock);
        trace!(?lock, "axis lock");
        if matches!(
            self.state.mode,
            InteractionMode::SelectZoom | InteractionMode::SelectReset
        ) {
            self.update_selection(viewport);
        }
        InputResponse::redraw()
    }

    fn update_selection(&mut self, viewport: &Viewport) {
        let cursor = self.state.cursor;
        let origin = self.state.origin;
        let end = viewport.device_to_scene(cursor);

        if end.x <= origin.x {
            self.state.mode = InteractionMode::SelectReset;
            self.state.selection.begin = origin;
            self.state.selection.end = end;
            return;
        }

        self.state.mode = InteractionMode::SelectZoom;
        let size = viewport.device_size();
        let width = size.width_f64();
        let height = size.height_f64();
        let clamped = DevicePoint::new(cursor.x.clamp(0.0, width), cursor.y.clamp(0.0, height));

        let mut begin = origin;
        let mut end = viewport.device_to_scene(clamped);
        match viewport.axis_lock() {
            AxisLock::HorizontalOnly => {
                begin.y = viewport.device_to_scene(DevicePoint::new(0.0, height)).y;
                end.y = viewport.device_to_scene(DevicePoint::new(0.0, 0.0)).y;
            }
            AxisLock::VerticalOnly => {
                begin.x = viewport.device_to_scene(DevicePoint::new(0.0, 0.0)).x;
                end.x = viewport.device_to_scene(DevicePoint::new(width, 0.0)).x;
            }
            AxisLock::Free => {}
        }
        self.state.selection.begin = begin;
        self.state.selection.end = end;
    }
}

fn validate_position(position: DevicePoint) -> PlotResult<DevicePoint> {
    if !position.is_finite() {
        return Err(PlotError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(position)
}

pub(crate) fn validate_wheel_zoom_coefficient(coefficient: f64) -> PlotResult<()> {
    if !coefficient.is_finite() || coefficient <= 0.0 || coefficient >= 1.0 {
        return Err(PlotError::InvalidConfig(
            "wheel zoom coefficient must be in (0, 1)".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeviceSize, ZoomLimits};
    use crate::interaction::{Key, Modifiers, PointerButton, PointerButtons};

    fn viewport() -> Viewport {
        let mut viewport =
            Viewport::new(DeviceSize::new(100, 100), ZoomLimits::default(), 10).expect("viewport");
        viewport.set_x_bounds(0.0, 10.0);
        viewport.set_y_bounds(0.0, 10.0);
        viewport
    }

    #[test]
    fn dragging_left_of_origin_becomes_reset_gesture() {
        let mut viewport = viewport();
        let mut input = InputStateMachine::default();
        input
            .pointer_press(PointerEvent::press(50.0, 50.0, PointerButton::Primary), &viewport)
            .expect("press");
        assert_eq!(input.mode(), InteractionMode::SelectStart);

        let held = PointerButtons::from_button(PointerButton::Primary);
        input
            .pointer_move(PointerEvent::moved(20.0, 40.0, held), &mut viewport)
            .expect("move");
        assert_eq!(input.mode(), InteractionMode::SelectReset);

        let response = input
            .pointer_release(PointerEvent::release(20.0, 40.0, PointerButton::Primary), &mut viewport)
            .expect("release");
        assert!(response.reset_scene);
        assert_eq!(input.mode(), InteractionMode::Idle);
    }

    #[test]
    fn rejected_rect_zoom_only_clears_the_overlay() {
        let mut viewport = viewport();
        let mut input = InputStateMachine::default();
        input
            .pointer_press(PointerEvent::press(50.0, 50.0, PointerButton::Primary), &viewport)
            .expect("press");
        let held = PointerButtons::from_button(PointerButton::Primary);
        input
            .pointer_move(PointerEvent::moved(50.5, 50.5, held), &mut viewport)
            .expect("move");
        assert_eq!(input.mode(), InteractionMode::SelectZoom);

        let response = input
            .pointer_release(PointerEvent::release(50.5, 50.5, PointerButton::Primary), &mut viewport)
            .expect("release");
        assert_eq!(response.rect_zoom, Some(RectZoomOutcome::default()));
        assert!(!response.refresh_grid);
        assert!(response.redraw);
        assert_eq!(viewport.zoom(), (1.0, 1.0));
    }

    #[test]
    fn cancel_key_aborts_selection() {
        let mut viewport = viewport();
        let mut input = InputStateMachine::default();
        input
            .pointer_press(PointerEvent::press(10.0, 10.0, PointerButton::Primary), &viewport)
            .expect("press");
        let response = input.key_press(KeyEvent::new(Key::Escape, Modifiers::NONE), &mut viewport);
        assert!(response.redraw);
        assert_eq!(input.mode(), InteractionMode::Idle);

        let response = input
            .pointer_release(PointerEvent::release(60.0, 60.0, PointerButton::Primary), &mut viewport)
            .expect("release");
        assert!(response.rect_zoom.is_none());
        assert_eq!(viewport.zoom(), (1.0, 1.0));
    }

    #[test]
    fn wheel_coefficient_must_be_fractional() {
        assert!(InputStateMachine::new(InputBindings::default(), AxisLock::Free, 0.0).is_err());
        assert!(InputStateMachine::new(InputBindings::default(), AxisLock::Free, 1.0).is_err());
        assert!(InputStateMachine::new(InputBindings::default(), AxisLock::Free, 0.1).is_ok());
    }
}
