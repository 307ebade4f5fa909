use crate::encode::marker::RadiusScale;
use crate::foundation::core::Point;

/// Number of legend rows drawn by default.
pub const DEFAULT_LEGEND_STEPS: usize = 4;

/// How representative legend counts are picked beneath the date's maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendMode {
    /// `2^(log2(max) / (i + 1))` for `i` in `0..steps`.
    ///
    /// Row 0 is the maximum itself, later rows are successive roots of it. The spacing
    /// is not even on either a linear or a log scale.
    #[default]
    Parity,
    /// The largest powers of ten not above the maximum, largest first.
    PowerOfTen,
}

/// One legend row: a sample count and the radius it is drawn with.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegendEntry {
    /// Sample count (may be fractional in [`LegendMode::Parity`]).
    pub cases: f64,
    /// Text shown beside the circle: `"<cases> cases"` with `cases` rounded to the
    /// nearest integer, so a row sampled at the maximum reads as the maximum even when
    /// `2^log2(max)` lands just below it.
    pub label: String,
    /// Radius in raster pixels.
    pub radius: f64,
    /// Circle anchor in normalized viewport coordinates (origin bottom-left).
    pub anchor: Point,
}

/// Legend rows for `max_count`, largest sample first.
///
/// Empty when `max_count <= 1`, where the radius scale is undefined.
pub fn legend(
    max_count: i64,
    scale: &RadiusScale,
    steps: usize,
    mode: LegendMode,
) -> Vec<LegendEntry> {
    if max_count <= 1 {
        return Vec::new();
    }
    let max = max_count as f64;

    let samples: Vec<f64> = match mode {
        LegendMode::Parity => (0..steps)
            .map(|i| 2f64.powf(max.log2() / (i + 1) as f64))
            .collect(),
        LegendMode::PowerOfTen => powers_of_ten_below(max_count, steps),
    };

    samples
        .into_iter()
        .enumerate()
        .filter_map(|(i, cases)| {
            let radius = scale.radius(cases, max)?;
            Some(LegendEntry {
                cases,
                label: format!("{} cases", cases.round() as i64),
                radius,
                anchor: Point::new(0.05, 0.1 + 0.075 * i as f64),
            })
        })
        .collect()
}

fn powers_of_ten_below(max_count: i64, steps: usize) -> Vec<f64> {
    let mut p: i64 = 1;
    while let Some(next) = p.checked_mul(10) {
        if next > max_count {
            break;
        }
        p = next;
    }

    let mut out = Vec::with_capacity(steps);
    while p >= 1 && out.len() < steps {
        out.push(p as f64);
        p /= 10;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/legend.rs"]
mod tests;
