use std::fmt;
use std::str::FromStr;

use crate::foundation::core::{DateIndex, Location};
use crate::foundation::error::{SceneError, SceneResult};

/// One of the three case-count series.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Confirmed infections.
    Infections,
    /// Recovered cases.
    Recovered,
    /// Deaths.
    Deaths,
}

impl Category {
    /// All categories in draw order.
    pub const ALL: [Category; 3] = [Self::Infections, Self::Recovered, Self::Deaths];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Infections => "infections",
            Self::Recovered => "recovered",
            Self::Deaths => "deaths",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Infections => 0,
            Self::Recovered => 1,
            Self::Deaths => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "infections" | "confirmed" => Ok(Self::Infections),
            "recovered" => Ok(Self::Recovered),
            "deaths" => Ok(Self::Deaths),
            other => Err(SceneError::validation(format!(
                "unknown category '{other}' (expected infections, recovered or deaths)"
            ))),
        }
    }
}

/// Cumulative daily counts for one location.
#[derive(Clone, Debug, PartialEq)]
pub struct CategorySeries {
    /// Where the counts were reported.
    pub location: Location,
    counts: Vec<i64>,
}

impl CategorySeries {
    /// Pair a location with its per-day counts (index 0 is the epoch day).
    pub fn new(location: Location, counts: Vec<i64>) -> Self {
        Self { location, counts }
    }

    /// All counts, oldest first.
    pub fn counts(&self) -> &[i64] {
        &self.counts
    }

    /// Count at `date`, or `None` past the end of the series.
    pub fn count_at(&self, date: DateIndex) -> Option<i64> {
        self.counts.get(date.0).copied()
    }
}

/// Immutable per-category case series sharing one date axis.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    series: [Vec<CategorySeries>; 3],
    num_dates: usize,
}

impl Dataset {
    /// Start building a dataset.
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Length of the shared date axis.
    pub fn num_dates(&self) -> usize {
        self.num_dates
    }

    /// Return `true` when `date` lies in `[0, num_dates)`.
    pub fn contains_date(&self, date: DateIndex) -> bool {
        date.0 < self.num_dates
    }

    /// Series of `category` in insertion order.
    pub fn series(&self, category: Category) -> &[CategorySeries] {
        &self.series[category.slot()]
    }

    /// Count for the `location`-th series of `category` at `date`.
    pub fn count(&self, category: Category, location: usize, date: DateIndex) -> Option<i64> {
        self.series(category).get(location)?.count_at(date)
    }

    /// Total number of series across all categories.
    pub fn location_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }
}

/// Accumulates series and enforces the shared-length invariants.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    series: [Vec<CategorySeries>; 3],
}

impl DatasetBuilder {
    /// Add one row to `category`.
    ///
    /// Rows located at the `(0, 0)` sentinel carry no usable position and are dropped;
    /// the return value reports whether the row was kept. A row whose length differs
    /// from the category's earlier rows is a [`SceneError::MalformedDataset`].
    pub fn push(&mut self, category: Category, series: CategorySeries) -> SceneResult<bool> {
        if series.location.is_no_data() {
            return Ok(false);
        }

        let rows = &mut self.series[category.slot()];
        if let Some(first) = rows.first() {
            if first.counts.len() != series.counts.len() {
                return Err(SceneError::malformed(format!(
                    "{category} row {} has {} dates, expected {}",
                    rows.len(),
                    series.counts.len(),
                    first.counts.len()
                )));
            }
        }
        rows.push(series);
        Ok(true)
    }

    /// Number of rows accepted so far for `category`.
    pub fn len(&self, category: Category) -> usize {
        self.series[category.slot()].len()
    }

    /// Freeze into a [`Dataset`].
    ///
    /// Categories without rows do not vote on the date-axis length; all others must agree.
    pub fn build(self) -> SceneResult<Dataset> {
        let mut num_dates: Option<(Category, usize)> = None;
        for category in Category::ALL {
            let Some(first) = self.series[category.slot()].first() else {
                continue;
            };
            let len = first.counts.len();
            match num_dates {
                None => num_dates = Some((category, len)),
                Some((seen, n)) if n != len => {
                    return Err(SceneError::malformed(format!(
                        "{category} has {len} dates but {seen} has {n}"
                    )));
                }
                Some(_) => {}
            }
        }

        Ok(Dataset {
            series: self.series,
            num_dates: num_dates.map_or(0, |(_, n)| n),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
