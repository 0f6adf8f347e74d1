use crate::core::Sample;
use crate::error::PlotResult;
use crate::extensions::PlotEvent;
use crate::interaction::{
    InputBindings, InputResponse, InteractionMode, Key, KeyEvent, PointerButton, PointerEvent,
    WheelEvent,
};
use crate::render::Renderer;

use super::PlotViewport;

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.input.mode()
    }

    pub fn handle_pointer_press(&mut self, event: PointerEvent) -> PlotResult<InputResponse> {
        let response = self.input.pointer_press(event, &self.viewport)?;
        self.apply_input_response(response);
        Ok(response)
    }

    pub fn handle_pointer_release(&mut self, event: PointerEvent) -> PlotResult<InputResponse> {
        let response = self.input.pointer_release(event, &mut self.viewport)?;
        self.apply_input_response(response);
        Ok(response)
    }

    pub fn handle_pointer_move(&mut self, event: PointerEvent) -> PlotResult<InputResponse> {
        let response = self.input.pointer_move(event, &mut self.viewport)?;
        self.apply_input_response(response);
        Ok(response)
    }

    pub fn handle_key_press(&mut self, event: KeyEvent) -> InputResponse {
        let response = self.input.key_press(event, &mut self.viewport);
        self.apply_input_response(response);
        response
    }

    pub fn handle_key_release(&mut self, event: KeyEvent) -> InputResponse {
        let response = self.input.key_release(event, &mut self.viewport);
        self.apply_input_response(response);
        response
    }

    pub fn handle_wheel(&mut self, event: WheelEvent) -> PlotResult<InputResponse> {
        let response = self.input.wheel(event, &mut self.viewport)?;
        self.apply_input_response(response);
        Ok(response)
    }

    /// Aborts any in-progress gesture.
    pub fn cancel_interaction(&mut self) -> InputResponse {
        let response = self.input.cancel();
        self.apply_input_response(response);
        response
    }

    #[must_use]
    pub fn bindings(&self) -> InputBindings {
        self.input.bindings()
    }

    pub fn set_bindings(&mut self, bindings: InputBindings) -> PlotResult<()> {
        self.input.set_bindings(bindings)
    }

    pub fn set_pan_button(&mut self, button: PointerButton) -> PlotResult<()> {
        self.update_bindings(|bindings| bindings.pan_button = button)
    }

    pub fn set_select_button(&mut self, button: PointerButton) -> PlotResult<()> {
        self.update_bindings(|bindings| bindings.select_button = button)
    }

    pub fn set_reset_key(&mut self, key: Key) -> PlotResult<()> {
        self.update_bindings(|bindings| bindings.reset_key = key)
    }

    pub fn set_cancel_key(&mut self, key: Key) -> PlotResult<()> {
        self.update_bindings(|bindings| bindings.cancel_key = key)
    }

    /// Exchanges the pan and select buttons.
    pub fn swap_pointer_buttons(&mut self) {
        self.input.swap_pointer_buttons();
    }

    /// Exchanges the vertical and horizontal lock keys.
    pub fn swap_axis_lock_keys(&mut self) {
        self.input.swap_axis_lock_keys();
    }

    pub fn set_wheel_zoom_coefficient(&mut self, coefficient: f64) -> PlotResult<()> {
        self.input.set_wheel_zoom_coefficient(coefficient)
    }

    fn update_bindings(&mut self, update: impl FnOnce(&mut InputBindings)) -> PlotResult<()> {
        let mut bindings = self.input.bindings();
        update(&mut bindings);
        self.input.set_bindings(bindings)
    }

    pub(super) fn apply_input_response(&mut self, response: InputResponse) {
        if response.reset_scene {
            self.reset_scene();
        } else if response.refresh_grid || response.rebuild_grid {
            self.refresh_grid(response.rebuild_grid);
        }
        if let Some(outcome) = response.rect_zoom {
            self.emit_plot_event(PlotEvent::RectZoomCommitted {
                x_applied: outcome.x_applied,
                y_applied: outcome.y_applied,
            });
        }
        if response.redraw {
            self.redraw_pending = true;
        }
    }
}
