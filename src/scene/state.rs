use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::SceneConfig;
use crate::data::dataset::{Category, Dataset};
use crate::encode::legend::{LegendEntry, legend};
use crate::encode::marker::{Marker, MarkerCtx, MarkerStyle, build_markers};
use crate::eval::aggregate::max_at;
use crate::flow::graph::{FlowEdgeView, FlowGraph};
use crate::foundation::calendar::date_label;
use crate::foundation::core::{DateIndex, Raster};
use crate::foundation::error::{SceneError, SceneResult};
use crate::scene::description::{MarkerLayer, SceneDescription};

/// Produces a category's markers for the date and maximum carried by `ctx`.
///
/// [`SceneState`] calls this for every visible category on each date change and for a
/// single category when it is switched on.
pub trait MarkerRebuild: Send {
    /// Markers of `category` at `ctx.date`.
    fn markers(
        &mut self,
        ctx: &MarkerCtx<'_>,
        category: Category,
        style: &MarkerStyle,
    ) -> Vec<Marker>;
}

/// Rebuilds the whole marker set from the dataset every time.
#[derive(Clone, Copy, Debug, Default)]
pub struct FullRebuild;

impl MarkerRebuild for FullRebuild {
    fn markers(
        &mut self,
        ctx: &MarkerCtx<'_>,
        category: Category,
        style: &MarkerStyle,
    ) -> Vec<Marker> {
        build_markers(ctx, category, style)
    }
}

/// What a successful [`SceneState::set_date`] changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateChange {
    /// Date selected before the call.
    pub previous: DateIndex,
    /// Date selected now.
    pub current: DateIndex,
    /// The calendar month differs between `previous` and `current`.
    pub month_changed: bool,
}

/// Current date, visibility and cached drawables over a shared dataset and flow graph.
pub struct SceneState<R: MarkerRebuild = FullRebuild> {
    dataset: Arc<Dataset>,
    flows: Arc<FlowGraph>,
    config: SceneConfig,
    raster: Raster,

    date: DateIndex,
    calendar_date: NaiveDate,
    max_count: i64,
    visible: [bool; 3],

    markers: BTreeMap<Category, Vec<Marker>>,
    edges: Vec<FlowEdgeView>,
    legend: Vec<LegendEntry>,
    rebuild: R,
}

impl SceneState<FullRebuild> {
    /// Scene at date 0 with full marker rebuilds.
    pub fn new(
        dataset: Arc<Dataset>,
        flows: Arc<FlowGraph>,
        raster: Raster,
        config: SceneConfig,
    ) -> SceneResult<Self> {
        Self::with_rebuild(dataset, flows, raster, config, FullRebuild)
    }
}

impl<R: MarkerRebuild> SceneState<R> {
    /// Scene at date 0 using `rebuild` to produce markers.
    ///
    /// Initial visibility comes from the config; flow edges are filtered and projected
    /// here once.
    #[tracing::instrument(skip_all, fields(width = raster.width, height = raster.height))]
    pub fn with_rebuild(
        dataset: Arc<Dataset>,
        flows: Arc<FlowGraph>,
        raster: Raster,
        config: SceneConfig,
        rebuild: R,
    ) -> SceneResult<Self> {
        config.validate()?;
        let raster = Raster::new(raster.width, raster.height)?;
        if dataset.num_dates() == 0 {
            return Err(SceneError::malformed("dataset has no dates"));
        }

        let date = DateIndex(0);
        let calendar_date = config.epoch.date_for(date)?;
        let visible = Category::ALL.map(|c| config.categories.get(c).visible);
        let edges = flows.project(raster, &config.flow);
        tracing::debug!(
            edges = edges.len(),
            hidden = flows.len() - edges.len(),
            "projected flow edges"
        );

        let mut state = Self {
            dataset,
            flows,
            config,
            raster,
            date,
            calendar_date,
            max_count: 0,
            visible,
            markers: BTreeMap::new(),
            edges,
            legend: Vec::new(),
            rebuild,
        };
        state.refresh();
        Ok(state)
    }

    /// Select `date`, recomputing the global maximum, every visible category's markers
    /// and the legend.
    ///
    /// An out-of-range date is rejected and leaves the scene untouched.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn set_date(&mut self, date: DateIndex) -> SceneResult<DateChange> {
        let num_dates = self.dataset.num_dates();
        if date.0 >= num_dates {
            return Err(SceneError::DateOutOfRange {
                index: date.0,
                num_dates,
            });
        }
        let calendar_date = self.config.epoch.date_for(date)?;
        let month_changed = self.config.epoch.month_changed(self.date, date)?;

        let previous = self.date;
        self.date = date;
        self.calendar_date = calendar_date;
        self.refresh();

        tracing::debug!(
            max_count = self.max_count,
            markers = self.markers.values().map(Vec::len).sum::<usize>(),
            month_changed,
            "date changed"
        );
        Ok(DateChange {
            previous,
            current: date,
            month_changed,
        })
    }

    /// Show or hide `category`.
    ///
    /// Only that category's markers are built or dropped; the maximum and legend keep
    /// their values.
    pub fn set_visibility(&mut self, category: Category, on: bool) {
        let slot = category.slot();
        if self.visible[slot] == on {
            return;
        }
        self.visible[slot] = on;
        if on {
            let markers = self.build(category);
            self.markers.insert(category, markers);
        } else {
            self.markers.remove(&category);
        }
    }

    fn refresh(&mut self) {
        self.max_count = max_at(&self.dataset, self.date);
        self.markers.clear();
        for category in Category::ALL {
            if self.visible[category.slot()] {
                let markers = self.build(category);
                self.markers.insert(category, markers);
            }
        }
        self.legend = legend(
            self.max_count,
            &self.config.radius,
            self.config.legend_steps,
            self.config.legend_mode,
        );
    }

    fn build(&mut self, category: Category) -> Vec<Marker> {
        let ctx = MarkerCtx {
            dataset: &self.dataset,
            date: self.date,
            max_count: self.max_count,
            raster: self.raster,
            scale: self.config.radius,
        };
        let style = self.config.marker_style(category);
        self.rebuild.markers(&ctx, category, &style)
    }

    /// Selected date.
    pub fn date(&self) -> DateIndex {
        self.date
    }

    /// Calendar day of the selected date.
    pub fn calendar_date(&self) -> NaiveDate {
        self.calendar_date
    }

    /// Global maximum at the selected date.
    pub fn max_count(&self) -> i64 {
        self.max_count
    }

    /// Return `true` when `category` is drawn.
    pub fn is_visible(&self, category: Category) -> bool {
        self.visible[category.slot()]
    }

    /// Length of the date axis.
    pub fn num_dates(&self) -> usize {
        self.dataset.num_dates()
    }

    /// Raster positions and radii refer to.
    pub fn raster(&self) -> Raster {
        self.raster
    }

    /// Active configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Shared flow graph.
    pub fn flows(&self) -> &FlowGraph {
        &self.flows
    }

    /// Cached markers of `category`, or `None` while hidden.
    pub fn markers(&self, category: Category) -> Option<&[Marker]> {
        self.markers.get(&category).map(Vec::as_slice)
    }

    /// Visible flow edges.
    pub fn edges(&self) -> &[FlowEdgeView] {
        &self.edges
    }

    /// Legend rows for the selected date.
    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    /// Owned description of the current scene.
    pub fn snapshot(&self) -> SceneDescription {
        SceneDescription {
            date_index: self.date,
            date: self.calendar_date,
            date_label: date_label(self.calendar_date),
            raster: self.raster,
            max_count: self.max_count,
            layers: self
                .markers
                .iter()
                .map(|(&category, markers)| MarkerLayer {
                    category,
                    markers: markers.clone(),
                })
                .collect(),
            edges: self.edges.clone(),
            legend: self.legend.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
