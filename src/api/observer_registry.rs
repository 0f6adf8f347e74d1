use crate::core::Sample;
use crate::error::{PlotError, PlotResult};
use crate::extensions::{PlotContext, PlotEvent, PlotObserver};
use crate::render::Renderer;

use super::PlotViewport;

impl<R: Renderer, S: Sample> PlotViewport<R, S> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn PlotObserver>) -> PlotResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(PlotError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(PlotError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    pub(super) fn plot_context(&self) -> PlotContext {
        PlotContext {
            viewport_id: self.id,
            bounds: self.viewport.bounds(),
            visible: self.viewport.visible_rect(),
            zoom: self.viewport.zoom(),
            series_count: self.series.len(),
            interaction_mode: self.input.mode(),
        }
    }

    pub(super) fn emit_plot_event(&mut self, event: PlotEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.plot_context();
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }
}
