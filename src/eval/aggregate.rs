use crate::data::dataset::{Category, Dataset};
use crate::foundation::core::DateIndex;

/// Largest count at `date` across every location of every category.
///
/// All three categories share this maximum so marker sizes stay comparable between
/// infections, recoveries and deaths. Returns 0 when every count is zero (or negative),
/// and for dates past the end of the dataset.
#[tracing::instrument(level = "trace", skip(dataset))]
pub fn max_at(dataset: &Dataset, date: DateIndex) -> i64 {
    Category::ALL
        .iter()
        .flat_map(|&c| dataset.series(c))
        .filter_map(|s| s.count_at(date))
        .fold(0, i64::max)
}

/// Per-category maxima at `date`, in [`Category::ALL`] order.
pub fn category_max_at(dataset: &Dataset, date: DateIndex) -> [(Category, i64); 3] {
    Category::ALL.map(|c| {
        let max = dataset
            .series(c)
            .iter()
            .filter_map(|s| s.count_at(date))
            .fold(0, i64::max);
        (c, max)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/eval/aggregate.rs"]
mod tests;
