use super::*;

fn row(lat: f64, lon: f64, counts: &[i64]) -> CategorySeries {
    CategorySeries::new(Location::new(lat, lon), counts.to_vec())
}

#[test]
fn builds_and_answers_counts_in_insertion_order() {
    let mut b = Dataset::builder();
    assert!(b.push(Category::Infections, row(1.0, 2.0, &[10, 20, 40])).unwrap());
    assert!(b.push(Category::Infections, row(3.0, 4.0, &[5, 5, 5])).unwrap());
    assert!(b.push(Category::Deaths, row(1.0, 2.0, &[0, 1, 2])).unwrap());
    let ds = b.build().unwrap();

    assert_eq!(ds.num_dates(), 3);
    assert_eq!(ds.location_count(), 3);
    assert_eq!(ds.series(Category::Infections)[1].location.lat, 3.0);
    assert_eq!(ds.count(Category::Infections, 0, DateIndex(2)), Some(40));
    assert_eq!(ds.count(Category::Deaths, 0, DateIndex(1)), Some(1));
    assert_eq!(ds.count(Category::Recovered, 0, DateIndex(0)), None);
    assert_eq!(ds.count(Category::Infections, 0, DateIndex(3)), None);
    assert!(ds.contains_date(DateIndex(2)));
    assert!(!ds.contains_date(DateIndex(3)));
}

#[test]
fn sentinel_location_is_dropped() {
    let mut b = Dataset::builder();
    assert!(!b.push(Category::Infections, row(0.0, 0.0, &[1, 2])).unwrap());
    assert_eq!(b.len(Category::Infections), 0);
    assert!(b.push(Category::Infections, row(0.0, 1.0, &[1, 2])).unwrap());
    assert_eq!(b.len(Category::Infections), 1);
}

#[test]
fn ragged_row_within_category_is_malformed() {
    let mut b = Dataset::builder();
    b.push(Category::Recovered, row(1.0, 1.0, &[1, 2, 3])).unwrap();
    let err = b
        .push(Category::Recovered, row(2.0, 2.0, &[1, 2]))
        .unwrap_err();
    assert!(matches!(err, SceneError::MalformedDataset(_)));
}

#[test]
fn categories_must_agree_on_num_dates() {
    let mut b = Dataset::builder();
    b.push(Category::Infections, row(1.0, 1.0, &[1, 2, 3]))
        .unwrap();
    b.push(Category::Deaths, row(1.0, 1.0, &[0, 1])).unwrap();
    let err = b.build().unwrap_err();
    assert!(matches!(err, SceneError::MalformedDataset(_)));
    assert!(err.to_string().contains("deaths"));
}

#[test]
fn empty_builder_yields_empty_axis() {
    let ds = Dataset::builder().build().unwrap();
    assert_eq!(ds.num_dates(), 0);
    assert!(!ds.contains_date(DateIndex(0)));
}

#[test]
fn category_names_round_trip() {
    for c in Category::ALL {
        assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
        assert_eq!(c.to_string(), c.as_str());
    }
    assert_eq!(" Confirmed ".parse::<Category>().unwrap(), Category::Infections);
    assert!("hospitalized".parse::<Category>().is_err());
}
