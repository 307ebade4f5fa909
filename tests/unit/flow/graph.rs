use super::*;

fn edge(weight: u64) -> MigrationEdge {
    MigrationEdge {
        src: Location::named("A", 10.0, 20.0),
        dst: Location::named("B", -10.0, -20.0),
        weight,
    }
}

fn graph(weights: &[u64]) -> FlowGraph {
    let mut g = FlowGraph::new();
    for &w in weights {
        g.push(edge(w));
    }
    g
}

#[test]
fn max_weight_tracks_pushes_and_never_decreases() {
    let mut g = FlowGraph::new();
    assert_eq!(g.max_weight(), 0);
    g.push(edge(10));
    g.push(edge(100));
    g.push(edge(1));
    assert_eq!(g.max_weight(), 100);
    assert_eq!(g.len(), 3);
}

#[test]
fn five_percent_filter_drops_small_edges() {
    let g = graph(&[1, 10, 100]);
    let visible: Vec<u64> = g.visible_edges().map(|e| e.weight).collect();
    assert_eq!(visible, vec![10, 100]);
}

#[test]
fn threshold_boundary_is_inclusive() {
    let g = graph(&[5, 4, 100]);
    let visible: Vec<u64> = g.visible_edges().map(|e| e.weight).collect();
    assert_eq!(visible, vec![5, 100]);
}

#[test]
fn zero_max_weight_shows_nothing() {
    assert_eq!(graph(&[]).visible_edges().count(), 0);
    let g = graph(&[0, 0]);
    assert_eq!(g.visible_edges().count(), 0);
    assert_eq!(g.opacity(0, FlowOpacity::Linear), 0.0);
}

#[test]
fn opacity_variants() {
    let g = graph(&[25, 100]);
    assert!((g.opacity(100, FlowOpacity::Linear) - 0.99).abs() < 1e-12);
    assert!((g.opacity(25, FlowOpacity::Linear) - (0.2 + 0.79 * 0.25)).abs() < 1e-12);
    assert!((g.opacity(100, FlowOpacity::Perceptual) - 0.99f64.sqrt()).abs() < 1e-12);
    assert!((g.opacity(25, FlowOpacity::Perceptual) - (0.99f64 * 0.25).sqrt()).abs() < 1e-12);
    assert_eq!(FlowOpacity::default(), FlowOpacity::Perceptual);
}

#[test]
fn projection_uses_style() {
    let g = graph(&[1, 100]);
    let raster = Raster::new(360, 180).unwrap();
    let style = FlowStyle {
        opacity: FlowOpacity::Linear,
        ..FlowStyle::default()
    };
    let views = g.project(raster, &style);
    assert_eq!(views.len(), 1);
    let v = &views[0];
    assert_eq!(v.src, Point::new(200.0, 100.0));
    assert_eq!(v.dst, Point::new(160.0, 80.0));
    assert_eq!(v.src_id.as_deref(), Some("A"));
    assert!((v.opacity - 0.99).abs() < 1e-12);
    assert_eq!(v.color, Rgb::WHITE);

    let everything = FlowStyle {
        threshold_fraction: 0.0,
        ..FlowStyle::default()
    };
    assert_eq!(g.project(raster, &everything).len(), 2);
}

#[test]
fn style_validation() {
    assert!(FlowStyle::default().validate().is_ok());
    let bad = FlowStyle {
        threshold_fraction: 1.5,
        ..FlowStyle::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn builder_skips_unknown_names_and_bad_weights() {
    let mut centroids = CentroidTable::new();
    centroids.insert("Italy", 41.9, 12.6);
    centroids.insert("Spain", 40.5, -3.7);
    centroids.insert("France", 46.2, 2.2);

    let mut b = FlowGraphBuilder::new(&centroids);
    let added = b.add_inbound(
        "Italy",
        [
            ("Spain", "100"),
            ("France", " 10 "),
            ("Atlantis", "50"),
            ("Spain", "n/a"),
            ("France", "-4"),
        ],
    );
    assert_eq!(added, 2);
    assert_eq!(b.add_inbound("Atlantis", [("Spain", "7")]), 0);
    assert!(b.knows("Spain"));
    assert!(!b.knows("Atlantis"));

    let (g, report) = b.finish();
    assert_eq!(g.len(), 2);
    assert_eq!(g.max_weight(), 100);
    assert_eq!(g.edges()[0].dst.id.as_deref(), Some("Italy"));
    assert_eq!(g.edges()[1].src.id.as_deref(), Some("France"));
    assert_eq!(
        report,
        FlowBuildReport {
            edges_added: 2,
            unknown_destinations: 1,
            unknown_sources: 1,
            bad_weights: 2,
        }
    );
    assert_eq!(report.skipped(), 4);
}
