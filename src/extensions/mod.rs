//! Hooks for code that reacts to viewport changes without owning the
//! viewport.

mod observers;

pub use observers::{ChannelObserver, PlotContext, PlotEvent, PlotObserver};
