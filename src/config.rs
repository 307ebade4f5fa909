use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::dataset::Category;
use crate::encode::legend::{DEFAULT_LEGEND_STEPS, LegendMode};
use crate::encode::marker::{DEFAULT_POLYGON_SIDES, MarkerStyle, RadiusScale};
use crate::flow::graph::FlowStyle;
use crate::foundation::calendar::Epoch;
use crate::foundation::core::Rgb;
use crate::foundation::error::{SceneError, SceneResult};

/// Fill style and initial visibility of one category.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CategoryStyle {
    /// Fill color.
    pub color: Rgb,
    /// Fill opacity in `[0, 1]`.
    #[serde(default = "default_marker_opacity")]
    pub opacity: f64,
    /// Whether the category starts visible.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_marker_opacity() -> f64 {
    0.6
}

fn default_visible() -> bool {
    true
}

impl CategoryStyle {
    fn with_color(color: Rgb) -> Self {
        Self {
            color,
            opacity: default_marker_opacity(),
            visible: default_visible(),
        }
    }
}

/// Per-category styles.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CategoryStyles {
    /// Confirmed infections (red).
    pub infections: CategoryStyle,
    /// Recovered (green).
    pub recovered: CategoryStyle,
    /// Deaths (black).
    pub deaths: CategoryStyle,
}

impl Default for CategoryStyles {
    fn default() -> Self {
        Self {
            infections: CategoryStyle::with_color(Rgb::RED),
            recovered: CategoryStyle::with_color(Rgb::GREEN),
            deaths: CategoryStyle::with_color(Rgb::BLACK),
        }
    }
}

impl CategoryStyles {
    /// Style of `category`.
    pub fn get(&self, category: Category) -> &CategoryStyle {
        match category {
            Category::Infections => &self.infections,
            Category::Recovered => &self.recovered,
            Category::Deaths => &self.deaths,
        }
    }

    /// Mutable style of `category`.
    pub fn get_mut(&mut self, category: Category) -> &mut CategoryStyle {
        match category {
            Category::Infections => &mut self.infections,
            Category::Recovered => &mut self.recovered,
            Category::Deaths => &mut self.deaths,
        }
    }
}

/// Every tunable of the scene builder.
///
/// Defaults mirror the desktop viewer: base-2 radii up to 40 px, 50-sided
/// circles, four parity legend rows, red/green/black markers at 0.6 opacity and
/// square-root flow opacity above a 5% cutoff. Any subset of fields may be given in
/// JSON; the rest fall back to these defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Calendar day of date index 0.
    pub epoch: Epoch,
    /// Count to radius mapping.
    pub radius: RadiusScale,
    /// Polygon sides used to draw marker circles (even, `>= 24`).
    pub polygon_sides: u32,
    /// Legend rows.
    pub legend_steps: usize,
    /// Legend sampling.
    pub legend_mode: LegendMode,
    /// Marker styles.
    pub categories: CategoryStyles,
    /// Flow edge styling and declutter threshold.
    pub flow: FlowStyle,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            epoch: Epoch::default(),
            radius: RadiusScale::default(),
            polygon_sides: DEFAULT_POLYGON_SIDES,
            legend_steps: DEFAULT_LEGEND_STEPS,
            legend_mode: LegendMode::default(),
            categories: CategoryStyles::default(),
            flow: FlowStyle::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SceneError::validation(format!("parse scene config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SceneError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> SceneResult<()> {
        self.radius.validate()?;
        if self.polygon_sides < 24 || !self.polygon_sides.is_multiple_of(2) {
            return Err(SceneError::validation("polygon_sides must be even and >= 24"));
        }
        for category in Category::ALL {
            let style = self.categories.get(category);
            if !(0.0..=1.0).contains(&style.opacity) {
                return Err(SceneError::validation(format!(
                    "{category} opacity must be within [0, 1]"
                )));
            }
            if !style.color.is_normalized() {
                return Err(SceneError::validation(format!(
                    "{category} color channels must be in [0, 1]"
                )));
            }
        }
        self.flow.validate()
    }

    /// Marker style for `category`.
    pub fn marker_style(&self, category: Category) -> MarkerStyle {
        let style = self.categories.get(category);
        MarkerStyle {
            color: style.color,
            opacity: style.opacity,
            sides: self.polygon_sides,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
