use super::*;
use crate::encode::marker::LogBase;
use crate::flow::graph::FlowOpacity;
use serde_json::json;

#[test]
fn defaults_match_desktop_viewer() {
    let cfg = SceneConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.radius.base, LogBase::Two);
    assert_eq!(cfg.radius.max_radius, 40.0);
    assert_eq!(cfg.polygon_sides, 50);
    assert_eq!(cfg.legend_steps, 4);
    assert_eq!(cfg.legend_mode, LegendMode::Parity);
    assert_eq!(cfg.categories.get(Category::Infections).color, Rgb::RED);
    assert_eq!(cfg.categories.get(Category::Recovered).color, Rgb::GREEN);
    assert_eq!(cfg.categories.get(Category::Deaths).color, Rgb::BLACK);
    assert!(Category::ALL.iter().all(|&c| {
        let s = cfg.categories.get(c);
        s.visible && s.opacity == 0.6
    }));
    assert_eq!(cfg.flow.threshold_fraction, 0.05);
    assert_eq!(cfg.flow.opacity, FlowOpacity::Perceptual);
    assert_eq!(cfg.flow.color, Rgb::WHITE);
}

#[test]
fn partial_json_overrides_defaults() {
    let v = json!({
        "epoch": "2020-03-01",
        "radius": { "base": "e", "max_radius": 25.0 },
        "legend_mode": "power_of_ten",
        "categories": {
            "deaths": { "color": "#808080", "visible": false }
        },
        "flow": { "opacity": "linear" }
    });
    let cfg = SceneConfig::from_reader(v.to_string().as_bytes()).unwrap();
    assert!(cfg.validate().is_ok());

    assert_eq!(cfg.radius.base, LogBase::E);
    assert_eq!(cfg.radius.max_radius, 25.0);
    assert_eq!(cfg.legend_mode, LegendMode::PowerOfTen);
    assert_eq!(cfg.polygon_sides, 50);

    let deaths = cfg.categories.get(Category::Deaths);
    assert!(!deaths.visible);
    assert_eq!(deaths.opacity, 0.6);
    assert!((deaths.color.r - 128.0 / 255.0).abs() < 1e-12);
    assert_eq!(cfg.categories.get(Category::Infections).color, Rgb::RED);

    assert_eq!(cfg.flow.opacity, FlowOpacity::Linear);
    assert_eq!(cfg.flow.threshold_fraction, 0.05);
}

#[test]
fn rejects_bad_values() {
    let mut cfg = SceneConfig {
        polygon_sides: 25,
        ..SceneConfig::default()
    };
    assert!(cfg.validate().is_err());
    cfg.polygon_sides = 12;
    assert!(cfg.validate().is_err());
    cfg.polygon_sides = 24;
    assert!(cfg.validate().is_ok());

    cfg.categories.get_mut(Category::Recovered).opacity = 1.2;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_validation_error() {
    let err = SceneConfig::from_reader("{ not json".as_bytes()).unwrap_err();
    assert!(matches!(err, SceneError::Validation(_)));
    assert!(SceneConfig::from_path("does/not/exist.json").is_err());
}

#[test]
fn marker_style_combines_category_and_tessellation() {
    let cfg = SceneConfig::default();
    let style = cfg.marker_style(Category::Recovered);
    assert_eq!(style.color, Rgb::GREEN);
    assert_eq!(style.opacity, 0.6);
    assert_eq!(style.sides, 50);
}
