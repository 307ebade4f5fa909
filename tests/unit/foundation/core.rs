use super::*;
use serde_json::json;

#[test]
fn raster_rejects_zero_dimensions() {
    assert!(Raster::new(0, 10).is_err());
    assert!(Raster::new(10, 0).is_err());
    assert_eq!(
        Raster::new(360, 180).unwrap(),
        Raster {
            width: 360,
            height: 180
        }
    );
}

#[test]
fn null_island_is_no_data() {
    assert!(Location::new(0.0, 0.0).is_no_data());
    assert!(!Location::new(0.0, 12.5).is_no_data());
    assert!(!Location::named("Gabon", -0.8, 11.6).is_no_data());
}

#[test]
fn rgb_parses_hex_array_and_object() {
    let c: Rgb = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgb::RED);

    let c: Rgb = serde_json::from_value(json!([0.0, 1.0, 0.0])).unwrap();
    assert_eq!(c, Rgb::GREEN);

    let c: Rgb = serde_json::from_value(json!({"r": 1.0, "g": 1.0, "b": 1.0})).unwrap();
    assert_eq!(c, Rgb::WHITE);
}

#[test]
fn rgb_rejects_bad_hex_and_short_arrays() {
    assert!(serde_json::from_value::<Rgb>(json!("#ff00")).is_err());
    assert!(serde_json::from_value::<Rgb>(json!("#gg0000")).is_err());
    assert!(serde_json::from_value::<Rgb>(json!([1.0, 0.0])).is_err());
}

#[test]
fn rgb_serializes_as_object_and_reads_back() {
    let v = serde_json::to_value(Rgb::new(0.25, 0.5, 0.75)).unwrap();
    assert_eq!(v, json!({"r": 0.25, "g": 0.5, "b": 0.75}));
    let back: Rgb = serde_json::from_value(v).unwrap();
    assert_eq!(back, Rgb::new(0.25, 0.5, 0.75));
}

#[test]
fn rgb8_quantization_clamps() {
    assert_eq!(Rgb::new(1.5, 0.5, -1.0).to_rgb8(), [255, 128, 0]);
    assert!(!Rgb::new(1.5, 0.0, 0.0).is_normalized());
    assert!(Rgb::BLACK.is_normalized());
}
