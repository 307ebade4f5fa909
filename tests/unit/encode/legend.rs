use super::*;

fn labels(entries: &[LegendEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}

#[test]
fn parity_samples_roots_of_the_maximum() {
    let scale = RadiusScale::default();
    let entries = legend(256, &scale, DEFAULT_LEGEND_STEPS, LegendMode::Parity);

    assert_eq!(
        labels(&entries),
        vec!["256 cases", "16 cases", "6 cases", "4 cases"]
    );
    // radius_i = R / (i + 1) by construction.
    for (i, e) in entries.iter().enumerate() {
        assert!((e.radius - scale.max_radius / (i + 1) as f64).abs() < 1e-9);
    }
    assert!(entries.windows(2).all(|w| w[0].cases > w[1].cases));
}

#[test]
fn anchors_stack_upwards() {
    let entries = legend(1_000, &RadiusScale::default(), 4, LegendMode::Parity);
    assert_eq!(entries[0].anchor, Point::new(0.05, 0.1));
    assert!((entries[3].anchor.y - 0.325).abs() < 1e-12);
}

#[test]
fn power_of_ten_ticks() {
    let scale = RadiusScale::default();
    let entries = legend(12_345, &scale, 4, LegendMode::PowerOfTen);
    assert_eq!(
        labels(&entries),
        vec!["10000 cases", "1000 cases", "100 cases", "10 cases"]
    );

    let short = legend(40, &scale, 4, LegendMode::PowerOfTen);
    assert_eq!(labels(&short), vec!["10 cases", "1 cases"]);
    assert_eq!(short[1].radius, 0.0);

    let exact = legend(1_000, &scale, 2, LegendMode::PowerOfTen);
    assert_eq!(labels(&exact), vec!["1000 cases", "100 cases"]);
    assert_eq!(exact[0].radius, scale.max_radius);
}

#[test]
fn degenerate_maximum_has_no_legend() {
    let scale = RadiusScale::default();
    assert!(legend(0, &scale, 4, LegendMode::Parity).is_empty());
    assert!(legend(1, &scale, 4, LegendMode::PowerOfTen).is_empty());
}

#[test]
fn step_count_is_respected() {
    let scale = RadiusScale::default();
    assert_eq!(legend(500, &scale, 2, LegendMode::Parity).len(), 2);
    assert!(legend(500, &scale, 0, LegendMode::Parity).is_empty());
}

#[test]
fn labels_round_to_nearest_case() {
    let scale = RadiusScale::default();
    // sqrt(1000) = 31.62...
    let entries = legend(1_000, &scale, 2, LegendMode::Parity);
    assert_eq!(labels(&entries), vec!["1000 cases", "32 cases"]);

    for max in [3, 7, 40, 99, 12_345, 987_654] {
        let top = &legend(max, &scale, 1, LegendMode::Parity)[0];
        assert_eq!(top.label, format!("{max} cases"));
    }
}
