mod input_controller;
mod json_contract;
mod observer_registry;
mod plot_config;
mod plot_viewport;
mod scene_controller;
mod series_controller;
mod validation;

pub use json_contract::{PLOT_CONFIG_JSON_SCHEMA_V1, PlotConfigJsonContractV1};
pub use plot_config::PlotConfig;
pub use plot_viewport::PlotViewport;

pub use crate::extensions::{ChannelObserver, PlotContext, PlotEvent, PlotObserver};
pub use crate::render::{LineStyle, PlotStyle};
