use super::*;

fn poly(points: &[(f64, f64)]) -> Polygon {
    points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()
}

fn square() -> Polygon {
    poly(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

fn triangle() -> Polygon {
    poly(&[(0.0, 0.0), (0.0, 4.0), (3.0, 0.0)])
}

fn l_shape() -> Polygon {
    poly(&[(0.0, 0.0), (0.0, 2.0), (1.0, 2.0), (1.0, 1.0), (2.0, 1.0), (2.0, 0.0)])
}

// =============================================================
// point_in_polygon
// =============================================================

#[test]
fn empty_polygon_contains_nothing() {
    assert!(!point_in_polygon(0.0, 0.0, &[]));
    assert!(!point_in_polygon(12.5, -40.0, &[]));
}

#[test]
fn single_point_polygon_contains_nothing() {
    let p = poly(&[(0.0, 0.0)]);
    assert!(!point_in_polygon(0.0, 0.0, &p));
    assert!(!point_in_polygon(1.0, 1.0, &p));
}

#[test]
fn two_point_polygon_contains_nothing() {
    let p = poly(&[(0.0, 0.0), (2.0, 2.0)]);
    assert!(!point_in_polygon(1.0, 1.0, &p));
    assert!(!point_in_polygon(1.0, 0.5, &p));
}

#[test]
fn square_inside_and_outside() {
    assert!(point_in_polygon(0.5, 0.5, &square()));
    assert!(!point_in_polygon(2.0, 2.0, &square()));
}

#[test]
fn triangle_inside_and_outside() {
    assert!(point_in_polygon(0.5, 0.5, &triangle()));
    assert!(!point_in_polygon(3.0, 3.0, &triangle()));
}

#[test]
fn concave_arm_inside_notch_outside() {
    assert!(point_in_polygon(0.5, 0.5, &l_shape()));
    assert!(point_in_polygon(1.5, 0.5, &l_shape()));
    assert!(point_in_polygon(0.5, 1.5, &l_shape()));
    assert!(!point_in_polygon(1.5, 1.5, &l_shape()));
}

#[test]
fn winding_direction_does_not_matter() {
    let mut reversed = square();
    reversed.reverse();
    assert!(point_in_polygon(0.5, 0.5, &reversed));
    assert!(!point_in_polygon(-0.5, 0.5, &reversed));
}

#[test]
fn repeated_calls_agree() {
    let sq = square();
    for &(lat, lng) in &[(0.5, 0.5), (2.0, 2.0), (0.0, 0.0), (1.0, 0.5), (f64::NAN, 0.5)] {
        assert_eq!(point_in_polygon(lat, lng, &sq), point_in_polygon(lat, lng, &sq));
    }
}

#[test]
fn boundary_follows_strict_comparisons() {
    // Bottom edge (lat 0) counts as inside, top edge (lat 1) as outside.
    let sq = square();
    assert!(point_in_polygon(0.0, 0.5, &sq));
    assert!(!point_in_polygon(1.0, 0.5, &sq));
}

#[test]
fn nan_point_is_outside() {
    assert!(!point_in_polygon(f64::NAN, 0.5, &square()));
    assert!(!point_in_polygon(0.5, f64::NAN, &square()));
}

#[test]
fn works_with_real_coordinates() {
    // Rough box around central Paris.
    let paris = poly(&[(48.80, 2.25), (48.80, 2.42), (48.90, 2.42), (48.90, 2.25)]);
    assert!(point_in_polygon(48.8584, 2.2945, &paris));
    assert!(!point_in_polygon(51.5007, -0.1246, &paris));
}

// =============================================================
// LatLngBounds
// =============================================================

#[test]
fn bounds_from_empty_is_none() {
    assert!(LatLngBounds::from_points(&[]).is_none());
}

#[test]
fn bounds_cover_all_points() {
    let pts = poly(&[(10.0, -5.0), (-3.0, 20.0), (4.0, 1.0)]);
    let b = LatLngBounds::from_points(&pts).unwrap();
    assert_eq!(b.south_west, LatLng::new(-3.0, -5.0));
    assert_eq!(b.north_east, LatLng::new(10.0, 20.0));
    assert!(pts.iter().all(|p| b.contains(*p)));
    assert_eq!(b.north_west(), LatLng::new(10.0, -5.0));
    assert_eq!(b.south_east(), LatLng::new(-3.0, 20.0));
}

#[test]
fn single_point_bounds_are_degenerate() {
    let b = LatLngBounds::from_points(&[LatLng::new(1.0, 2.0)]).unwrap();
    assert_eq!(b.south_west, b.north_east);
    assert!(b.contains(LatLng::new(1.0, 2.0)));
    assert!(!b.contains(LatLng::new(1.0, 2.1)));
}
