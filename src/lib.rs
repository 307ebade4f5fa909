//! episcene turns per-country epidemiological time series into drawable scenes.
//!
//! The crate is renderer-agnostic: it loads the case tables and migration flows once,
//! then answers "what should be on the map for date `d`" as a [`SceneDescription`] of
//! projected circle markers, flow edges and legend rows.
//!
//! # Pipeline overview
//!
//! 1. **Load**: category tables, centroid table and flow files -> [`Dataset`] +
//!    [`FlowGraph`] (see [`load`]; unusable rows are counted in a [`LoadReport`])
//! 2. **Aggregate**: [`Dataset`] + [`DateIndex`] -> global maximum ([`max_at`])
//! 3. **Encode**: counts -> log-scaled radii ([`RadiusScale`]), projected [`Marker`]s and
//!    [`LegendEntry`] rows
//! 4. **Scene**: [`SceneState`] keeps the selected date and category visibility and
//!    emits immutable [`SceneDescription`] snapshots
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO after loading**: datasets and flow graphs are immutable and shared via `Arc`.
//! - **Dates are never clamped**: out-of-range dates are rejected with
//!   [`SceneError::DateOutOfRange`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod config;
pub(crate) mod data;
pub(crate) mod encode;
pub(crate) mod eval;
pub(crate) mod flow;
pub(crate) mod foundation;
pub(crate) mod geo;
pub(crate) mod scene;

pub use crate::config::{CategoryStyle, CategoryStyles, SceneConfig};
pub use crate::data::dataset::{Category, CategorySeries, Dataset, DatasetBuilder};
pub use crate::data::loader::{
    LoadReport, LoadedSources, SourcePaths, TableReport, load, read_category_table,
    read_centroid_table, read_flow_dir, read_flow_file,
};
pub use crate::encode::legend::{DEFAULT_LEGEND_STEPS, LegendEntry, LegendMode, legend};
pub use crate::encode::marker::{
    DEFAULT_MAX_RADIUS, DEFAULT_POLYGON_SIDES, LogBase, Marker, MarkerCtx, MarkerStyle,
    RadiusScale, build_markers, encode, regular_polygon,
};
pub use crate::eval::aggregate::{category_max_at, max_at};
pub use crate::flow::graph::{
    CentroidTable, DEFAULT_FLOW_THRESHOLD, FlowBuildReport, FlowEdgeView, FlowGraph,
    FlowGraphBuilder, FlowOpacity, FlowStyle, MigrationEdge,
};
pub use crate::foundation::calendar::{Epoch, date_label};
pub use crate::foundation::core::{DateIndex, Location, Point, Raster, Rgb};
pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::geo::projection::{project, project_location};
pub use crate::scene::description::{MarkerLayer, SceneDescription};
pub use crate::scene::state::{DateChange, FullRebuild, MarkerRebuild, SceneState};
