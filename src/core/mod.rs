pub mod grid;
pub mod sample;
pub mod series;
pub mod types;
pub mod viewport;

pub(crate) use grid::validate_density_ratio;
pub use grid::{AxisGrid, GridState, GridTick, MAX_GRID_LINES_PER_AXIS};
pub use sample::{Sample, sample_range};
pub use series::{DEFAULT_SERIES_PALETTE, RenderMode, Series, SeriesId, SeriesStore};
pub use types::{Axis, AxisLock, DevicePoint, DeviceSize, ScenePoint, SceneRect};
pub use viewport::{BORDER_MARGIN_RATIO, RectZoomOutcome, Viewport, ZoomLimits};
