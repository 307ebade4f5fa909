use chrono::NaiveDate;

use crate::data::dataset::Category;
use crate::encode::legend::LegendEntry;
use crate::encode::marker::Marker;
use crate::flow::graph::FlowEdgeView;
use crate::foundation::core::{DateIndex, Raster};

/// Markers of one visible category.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MarkerLayer {
    /// Category drawn by this layer.
    pub category: Category,
    /// One marker per location with a positive count.
    pub markers: Vec<Marker>,
}

/// Immutable, renderer-agnostic description of everything drawn for one date.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneDescription {
    /// Selected date index.
    pub date_index: DateIndex,
    /// Calendar day of `date_index`.
    pub date: NaiveDate,
    /// `MM/DD/YYYY` label of `date`.
    pub date_label: String,
    /// Raster the positions and radii refer to.
    pub raster: Raster,
    /// Largest count across every category at this date.
    pub max_count: i64,
    /// Visible categories in draw order.
    pub layers: Vec<MarkerLayer>,
    /// Visible flow edges (date independent).
    pub edges: Vec<FlowEdgeView>,
    /// Legend rows, largest first.
    pub legend: Vec<LegendEntry>,
}

impl SceneDescription {
    /// Markers of `category`, or `None` when it is hidden.
    pub fn markers(&self, category: Category) -> Option<&[Marker]> {
        self.layers
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.markers.as_slice())
    }

    /// Total markers across visible layers.
    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.markers.len()).sum()
    }
}
