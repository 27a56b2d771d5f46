//! Common operations on f64 points in D-dimensional space.

use parry3d_f64::na::Point;

/// Returns the distance between two points in D-dimensional space.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use cadwing::common::points::dist;
/// use cadwing::Point2;
/// let a = Point2::new(1.0, 2.0);
/// let b = Point2::new(3.0, 2.0);
/// assert_eq!(dist(&a, &b), 2.0);
/// ```
pub fn dist<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm()
}

/// Returns the midpoint between two points in D-dimensional space.
///
/// # Examples
///
/// ```
/// use cadwing::common::points::mid_point;
/// use cadwing::Point3;
/// let a = Point3::new(1.0, 2.0, 0.0);
/// let b = Point3::new(3.0, 4.0, 2.0);
/// assert_eq!(mid_point(&a, &b), Point3::new(2.0, 3.0, 1.0));
/// ```
pub fn mid_point<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> Point<f64, D> {
    b + (a - b) * 0.5
}

/// Returns true if two points are within `tol` of each other.
pub fn coincident<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>, tol: f64) -> bool {
    dist(a, b) <= tol
}

/// Removes consecutive points which are within `tol` of their predecessor, keeping the first
/// point of every run. Returns the filtered points and the number of points removed.
pub fn dedup_consecutive<const D: usize>(
    points: &[Point<f64, D>],
    tol: f64,
) -> (Vec<Point<f64, D>>, usize) {
    let mut result: Vec<Point<f64, D>> = Vec::with_capacity(points.len());
    for p in points {
        match result.last() {
            Some(last) if coincident(last, p, tol) => {}
            _ => result.push(*p),
        }
    }
    let removed = points.len() - result.len();
    (result, removed)
}
