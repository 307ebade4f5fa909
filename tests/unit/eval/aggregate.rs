use super::*;
use crate::data::dataset::CategorySeries;
use crate::foundation::core::Location;

fn dataset() -> Dataset {
    let mut b = Dataset::builder();
    let mut push = |c: Category, lat: f64, counts: &[i64]| {
        b.push(c, CategorySeries::new(Location::new(lat, 1.0), counts.to_vec()))
            .unwrap();
    };
    push(Category::Infections, 1.0, &[0, 20, 40]);
    push(Category::Infections, 2.0, &[0, 5, 5]);
    push(Category::Recovered, 1.0, &[0, 30, 35]);
    push(Category::Deaths, 1.0, &[0, 1, 90]);
    b.build().unwrap()
}

#[test]
fn max_spans_all_categories() {
    let ds = dataset();
    assert_eq!(max_at(&ds, DateIndex(1)), 30);
    assert_eq!(max_at(&ds, DateIndex(2)), 90);
}

#[test]
fn all_zero_date_yields_zero() {
    assert_eq!(max_at(&dataset(), DateIndex(0)), 0);
    assert_eq!(max_at(&Dataset::default(), DateIndex(0)), 0);
}

#[test]
fn repeated_calls_agree() {
    let ds = dataset();
    assert_eq!(max_at(&ds, DateIndex(2)), max_at(&ds, DateIndex(2)));
}

#[test]
fn per_category_maxima() {
    let ds = dataset();
    assert_eq!(
        category_max_at(&ds, DateIndex(1)),
        [
            (Category::Infections, 20),
            (Category::Recovered, 30),
            (Category::Deaths, 1),
        ]
    );
}
