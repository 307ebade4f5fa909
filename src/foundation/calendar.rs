use chrono::{Datelike, Days, NaiveDate};

use crate::foundation::core::DateIndex;
use crate::foundation::error::{SceneError, SceneResult};

/// First reported day of the JHU CSSE global time series.
pub(crate) fn default_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 22).unwrap_or_default()
}

/// Maps date indices onto calendar days counted from a fixed epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Epoch(pub NaiveDate);

impl Default for Epoch {
    fn default() -> Self {
        Self(default_epoch())
    }
}

impl Epoch {
    /// Calendar day for `index` (`epoch + index` days).
    pub fn date_for(self, index: DateIndex) -> SceneResult<NaiveDate> {
        self.0
            .checked_add_days(Days::new(index.0 as u64))
            .ok_or_else(|| SceneError::validation("date index overflows the calendar"))
    }

    /// Slider label for `index`, e.g. `01/22/2020`.
    pub fn label_for(self, index: DateIndex) -> SceneResult<String> {
        Ok(date_label(self.date_for(index)?))
    }

    /// Return `true` when moving from `prev` to `next` crosses a calendar month.
    ///
    /// Month-keyed raster layers (monthly climate normals) reload on this edge.
    pub fn month_changed(self, prev: DateIndex, next: DateIndex) -> SceneResult<bool> {
        let a = self.date_for(prev)?;
        let b = self.date_for(next)?;
        Ok(a.year() != b.year() || a.month() != b.month())
    }
}

/// `MM/DD/YYYY` as shown next to the date slider.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/calendar.rs"]
mod tests;
