use std::collections::BTreeSet;

use pixel_paint::raster::rasterize_line;
use pixel_paint::Point;

fn sample_pairs() -> Vec<(Point, Point)> {
    let coords = [-7, -3, -1, 0, 1, 2, 5, 11];
    let mut pairs = Vec::new();
    for &x0 in &coords {
        for &y0 in &coords {
            for &(dx, dy) in &[(0, 0), (9, 2), (2, 9), (-9, 3), (4, -13), (-6, -6), (1, 0), (0, -1)] {
                pairs.push((Point::new(x0, y0), Point::new(x0 + dx, y0 + dy)));
            }
        }
    }
    pairs
}

#[test]
fn test_line_is_symmetric() {
    for (p0, p1) in sample_pairs() {
        let forward: BTreeSet<Point> = rasterize_line(p0, p1).into_iter().collect();
        let backward: BTreeSet<Point> = rasterize_line(p1, p0).into_iter().collect();
        assert_eq!(forward, backward, "{p0:?} -> {p1:?}");
    }
}

#[test]
fn test_line_is_eight_connected_and_covers_endpoints() {
    for (p0, p1) in sample_pairs() {
        let points = rasterize_line(p0, p1);
        assert!(points.contains(&p0) && points.contains(&p1), "{p0:?} -> {p1:?}");
        for pair in points.windows(2) {
            assert!(pair[0].is_adjacent_to(pair[1]), "gap in {p0:?} -> {p1:?}");
            assert_ne!(pair[0], pair[1], "repeated point in {p0:?} -> {p1:?}");
        }
    }
}

#[test]
fn test_degenerate_line_is_single_point() {
    let p = Point::new(5, 5);
    assert_eq!(rasterize_line(p, p), vec![p]);
}

#[test]
fn test_line_length_matches_major_axis() {
    for (p0, p1) in sample_pairs() {
        let major = (p1.x - p0.x).abs().max((p1.y - p0.y).abs()) as usize;
        assert_eq!(rasterize_line(p0, p1).len(), major + 1, "{p0:?} -> {p1:?}");
    }
}
