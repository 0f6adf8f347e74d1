//! plotview-rs: interactive 2D plotting viewport engine.
//!
//! The crate renders numeric series against a pannable, zoomable scene with an
//! adaptive coordinate grid, rectangle-select zoom and axis-locked drag. Domain
//! state (`core`), pointer/keyboard handling (`interaction`) and drawing
//! (`render`) stay separated; `api::PlotViewport` wires them together.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{PlotConfig, PlotViewport};
pub use error::{PlotError, PlotResult};
