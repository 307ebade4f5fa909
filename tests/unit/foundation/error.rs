use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SceneError::malformed("x")
            .to_string()
            .contains("malformed dataset:")
    );
    assert!(
        SceneError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SceneError::unknown_location("Atlantis")
            .to_string()
            .contains("unknown location: Atlantis")
    );
}

#[test]
fn date_out_of_range_names_both_bounds() {
    let msg = SceneError::DateOutOfRange {
        index: 7,
        num_dates: 3,
    }
    .to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains('3'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SceneError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
