use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{SceneRect, SeriesId};
use crate::interaction::InteractionMode;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotContext {
    pub viewport_id: u32,
    pub bounds: SceneRect,
    pub visible: SceneRect,
    pub zoom: (f64, f64),
    pub series_count: usize,
    pub interaction_mode: InteractionMode,
}

/// Notifications emitted by a plot viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlotEvent {
    /// Grid recomputed; pull `vertical_ticks()` / `horizontal_ticks()` again.
    GridTicksChanged { viewport_id: u32 },
    SceneReset { bounds: SceneRect },
    RectZoomCommitted { x_applied: bool, y_applied: bool },
    SeriesChanged { series_id: SeriesId },
}

/// Observer interface for plot notifications.
///
/// Observers see events and a context snapshot; they cannot mutate the
/// viewport.
pub trait PlotObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PlotEvent, context: PlotContext);
}

/// Forwards every event into an `mpsc` channel.
///
/// A dropped receiver is not an error; events are discarded from then on.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    id: String,
    sender: Sender<PlotEvent>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(id: impl Into<String>, sender: Sender<PlotEvent>) -> Self {
        Self {
            id: id.into(),
            sender,
        }
    }
}

impl PlotObserver for ChannelObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: PlotEvent, _context: PlotContext) {
        if self.sender.send(event).is_err() {
            trace!(observer = %self.id, "receiver dropped, discarding plot event");
        }
    }
}
