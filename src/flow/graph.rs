use std::collections::HashMap;

use crate::foundation::core::{Location, Point, Raster, Rgb};
use crate::foundation::error::{SceneError, SceneResult};
use crate::geo::projection::project_location;

/// Fraction of the maximum weight below which an edge is never drawn.
pub const DEFAULT_FLOW_THRESHOLD: f64 = 0.05;

/// Directed migration flow between two centroids.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MigrationEdge {
    /// Origin centroid.
    pub src: Location,
    /// Destination centroid.
    pub dst: Location,
    /// Raw flow count.
    pub weight: u64,
}

/// Edge weight to opacity mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOpacity {
    /// `0.2 + 0.79 * w / max`: every visible edge keeps a visible floor.
    Linear,
    /// `sqrt(0.99 * w / max)`: lifts mid-weight edges.
    #[default]
    Perceptual,
}

impl FlowOpacity {
    /// Opacity for `ratio = weight / max_weight` in `[0, 1]`.
    pub fn apply(self, ratio: f64) -> f64 {
        let ratio = ratio.clamp(0.0, 1.0);
        match self {
            Self::Linear => 0.2 + 0.79 * ratio,
            Self::Perceptual => (0.99 * ratio).sqrt(),
        }
    }
}

/// Rendering knobs for flow edges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlowStyle {
    /// Edges with `weight < threshold_fraction * max_weight` are dropped.
    pub threshold_fraction: f64,
    /// Weight to opacity mapping.
    pub opacity: FlowOpacity,
    /// Line color.
    pub color: Rgb,
}

impl Default for FlowStyle {
    fn default() -> Self {
        Self {
            threshold_fraction: DEFAULT_FLOW_THRESHOLD,
            opacity: FlowOpacity::default(),
            color: Rgb::WHITE,
        }
    }
}

impl FlowStyle {
    /// Validate ranges.
    pub fn validate(&self) -> SceneResult<()> {
        if !(0.0..=1.0).contains(&self.threshold_fraction) {
            return Err(SceneError::validation(
                "flow threshold_fraction must be within [0, 1]",
            ));
        }
        if !self.color.is_normalized() {
            return Err(SceneError::validation("flow color channels must be in [0, 1]"));
        }
        Ok(())
    }
}

/// A visible edge projected onto the raster, ready to draw as a line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FlowEdgeView {
    /// Origin name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_id: Option<String>,
    /// Destination name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst_id: Option<String>,
    /// Projected origin.
    pub src: Point,
    /// Projected destination.
    pub dst: Point,
    /// Raw flow count.
    pub weight: u64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Line color.
    pub color: Rgb,
}

/// Weighted migration edges; not indexed by date.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowGraph {
    edges: Vec<MigrationEdge>,
    max_weight: u64,
}

impl FlowGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge, raising the maximum weight if needed.
    pub fn push(&mut self, edge: MigrationEdge) {
        self.max_weight = self.max_weight.max(edge.weight);
        self.edges.push(edge);
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[MigrationEdge] {
        &self.edges
    }

    /// Largest weight seen (0 for an empty graph).
    pub fn max_weight(&self) -> u64 {
        self.max_weight
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Return `true` when there are no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges at or above 5% of the maximum weight.
    pub fn visible_edges(&self) -> impl Iterator<Item = &MigrationEdge> {
        self.visible_edges_with(DEFAULT_FLOW_THRESHOLD)
    }

    /// Edges with `weight >= threshold_fraction * max_weight`.
    ///
    /// A graph whose maximum weight is 0 has nothing to show.
    pub fn visible_edges_with(
        &self,
        threshold_fraction: f64,
    ) -> impl Iterator<Item = &MigrationEdge> {
        let max = self.max_weight;
        let cutoff = threshold_fraction * max as f64;
        self.edges
            .iter()
            .filter(move |e| max > 0 && e.weight as f64 >= cutoff)
    }

    /// Opacity of an edge of `weight` under `mode`.
    pub fn opacity(&self, weight: u64, mode: FlowOpacity) -> f64 {
        if self.max_weight == 0 {
            return 0.0;
        }
        mode.apply(weight as f64 / self.max_weight as f64)
    }

    /// Project the visible edges onto `raster`.
    pub fn project(&self, raster: Raster, style: &FlowStyle) -> Vec<FlowEdgeView> {
        self.visible_edges_with(style.threshold_fraction)
            .map(|e| FlowEdgeView {
                src_id: e.src.id.clone(),
                dst_id: e.dst.id.clone(),
                src: project_location(&e.src, raster),
                dst: project_location(&e.dst, raster),
                weight: e.weight,
                opacity: self.opacity(e.weight, style.opacity),
                color: style.color,
            })
            .collect()
    }
}

/// Country centroids keyed by name.
#[derive(Clone, Debug, Default)]
pub struct CentroidTable {
    by_name: HashMap<String, Location>,
}

impl CentroidTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the centroid for `name`.
    pub fn insert(&mut self, name: impl Into<String>, lat: f64, lon: f64) {
        let name = name.into();
        self.by_name
            .insert(name.clone(), Location::named(name, lat, lon));
    }

    /// Centroid for `name`.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.by_name.get(name)
    }

    /// Number of centroids.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Return `true` when the table is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    fn resolve(&self, name: &str) -> SceneResult<&Location> {
        self.get(name)
            .ok_or_else(|| SceneError::unknown_location(name))
    }
}

/// Row accounting for a flow-graph build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FlowBuildReport {
    /// Rows that became edges.
    pub edges_added: usize,
    /// Destinations skipped because their centroid is unknown.
    pub unknown_destinations: usize,
    /// Rows skipped because their source centroid is unknown.
    pub unknown_sources: usize,
    /// Rows skipped because the weight is not a non-negative integer.
    pub bad_weights: usize,
}

impl FlowBuildReport {
    /// Rows dropped for any reason (destination skips count once per destination).
    pub fn skipped(&self) -> usize {
        self.unknown_destinations + self.unknown_sources + self.bad_weights
    }
}

/// Builds a [`FlowGraph`] from per-destination inbound rows.
#[derive(Debug)]
pub struct FlowGraphBuilder<'a> {
    centroids: &'a CentroidTable,
    graph: FlowGraph,
    report: FlowBuildReport,
}

impl<'a> FlowGraphBuilder<'a> {
    /// Resolve names against `centroids`.
    pub fn new(centroids: &'a CentroidTable) -> Self {
        Self {
            centroids,
            graph: FlowGraph::new(),
            report: FlowBuildReport::default(),
        }
    }

    /// Return `true` when `destination` has a centroid.
    pub fn knows(&self, destination: &str) -> bool {
        self.centroids.get(destination).is_some()
    }

    /// Add inbound `(source_name, raw_weight)` rows for `destination`.
    ///
    /// Unknown names and unparsable weights drop the row and are only counted.
    /// Returns the number of edges added.
    pub fn add_inbound<I, S, W>(&mut self, destination: &str, rows: I) -> usize
    where
        I: IntoIterator<Item = (S, W)>,
        S: AsRef<str>,
        W: AsRef<str>,
    {
        let centroids = self.centroids;
        let dst = match centroids.resolve(destination) {
            Ok(dst) => dst,
            Err(err) => {
                tracing::debug!(%err, "skipping flows into unknown destination");
                self.report.unknown_destinations += 1;
                return 0;
            }
        };

        let mut added = 0;
        for (source, raw_weight) in rows {
            let src = match centroids.resolve(source.as_ref()) {
                Ok(src) => src,
                Err(_) => {
                    self.report.unknown_sources += 1;
                    continue;
                }
            };
            let Ok(weight) = raw_weight.as_ref().trim().parse::<u64>() else {
                self.report.bad_weights += 1;
                continue;
            };
            self.graph.push(MigrationEdge {
                src: src.clone(),
                dst: dst.clone(),
                weight,
            });
            added += 1;
        }
        self.report.edges_added += added;
        added
    }

    /// Accounting so far.
    pub fn report(&self) -> FlowBuildReport {
        self.report
    }

    /// Finish the build.
    pub fn finish(self) -> (FlowGraph, FlowBuildReport) {
        (self.graph, self.report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flow/graph.rs"]
mod tests;
