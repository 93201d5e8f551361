//! Core geometry types for zellij.
//!
//! Motifs are built from construction lines: lines between known points,
//! intersected with each other to find the points the strapwork passes
//! through. Everything here works on infinite lines; the same `Line` type
//! doubles as a directed segment when drawing.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(Copy)]` on a small struct means it is copied implicitly, like
//! a number. Points are two `f64`s, so passing them by value is free and we
//! never have to think about borrowing them.

use std::ops::{Add, Mul, Sub};

use thiserror::Error;

/// Absolute tolerance used for every near-equality test.
///
/// Computed intersections drift by ~1e-13 at drawing scale; anything closer
/// than this is the same point.
pub const EPSILON: f64 = 1e-7;

/// Geometry that cannot be computed from the given construction lines.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BadGeometry {
    /// The lines are parallel or identical, so there is no single
    /// intersection point.
    #[error("lines are parallel or coincident and do not intersect")]
    Parallel,
}

/// A 2D point with x,y coordinates.
///
/// `==` is exact (bit-for-bit coordinates). Use [`Point::is_close`] for
/// anything that came out of a computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An infinite line through two distinct points.
///
/// When drawing, the line is the directed segment `p1 -> p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Are the two points the same, within [`EPSILON`] on each axis?
    #[inline]
    pub fn is_close(&self, other: Point) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }

    /// The spatial hash cell containing this point, for cells of `size`.
    #[inline]
    pub fn cell(&self, size: f64) -> (i64, i64) {
        ((self.x / size).floor() as i64, (self.y / size).floor() as i64)
    }

    #[inline]
    pub fn to_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Line {
    /// Create a line through two points.
    ///
    /// # Panics
    ///
    /// If `p1 == p2`. Motif construction must never build a degenerate line.
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        assert!(p1 != p2, "degenerate line: both points are {:?}", p1);
        Self { p1, p2 }
    }

    /// Direction vector `p2 - p1`.
    #[inline]
    pub fn direction(&self) -> Point {
        self.p2 - self.p1
    }

    /// Length of the segment `p1 -> p2`.
    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// The same line, drawn the other way.
    #[inline]
    pub fn reversed(&self) -> Line {
        Line { p1: self.p2, p2: self.p1 }
    }

    /// Find the point where two infinite lines cross.
    ///
    /// Solves `p1 + t·d1 = q1 + u·d2` with Cramer's rule. The determinant is
    /// the cross product of the two directions; when it is tiny relative to
    /// their lengths the lines are parallel (or the same line) and there is
    /// no answer.
    pub fn intersect(&self, other: &Line) -> Result<Point, BadGeometry> {
        let d1 = self.direction();
        let d2 = other.direction();

        let det = cross(d1, d2);
        let scale = (d1.x.hypot(d1.y)) * (d2.x.hypot(d2.y));
        if det.abs() <= EPSILON * scale {
            return Err(BadGeometry::Parallel);
        }

        let between = other.p1 - self.p1;
        let t = cross(between, d2) / det;
        Ok(self.p1 + d1 * t)
    }

    /// A parallel line, `distance` away.
    ///
    /// Positive distances move to the right of the direction of travel in
    /// y-up coordinates: `(10,10)->(13,14)` offset by 10 is
    /// `(18,4)->(21,8)`.
    ///
    /// # Panics
    ///
    /// On a zero-length line, which `Line::new` already rules out.
    pub fn offset(&self, distance: f64) -> Line {
        let d = self.direction();
        let len = d.x.hypot(d.y);
        assert!(len > 0.0, "cannot offset a zero-length line");

        // Multiply before dividing so integral inputs stay exact.
        let shift = Point::new(d.y * distance / len, -d.x * distance / len);
        Line {
            p1: self.p1 + shift,
            p2: self.p2 + shift,
        }
    }
}

/// 2D cross product (z component of the 3D one).
#[inline]
fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Is `p3` on the infinite line through `p1` and `p2`?
///
/// `|cross| / |p2 - p1|` is the perpendicular distance from `p3` to the
/// line, so comparing `|cross|` against `EPSILON * |p2 - p1|` tolerates the
/// same absolute wobble at any segment length.
///
/// # Panics
///
/// If `p1 == p2`: there is no line to be on.
pub fn collinear(p1: Point, p2: Point, p3: Point) -> bool {
    assert!(p1 != p2, "collinear needs two distinct points, got {:?} twice", p1);
    let separation = p1.distance(p2);
    cross(p2 - p1, p3 - p1).abs() < EPSILON * separation
}

/// The point `t` of the way from `p1` to `p2`.
#[inline]
pub fn along_the_way(p1: Point, p2: Point, t: f64) -> Point {
    p1 + (p2 - p1) * t
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn random_point(rng: &mut StdRng) -> Point {
        pt(rng.random_range(-1000.0..1000.0), rng.random_range(-1000.0..1000.0))
    }

    #[test]
    fn point_equality_is_exact() {
        assert_eq!(pt(0.0, 0.0), pt(0.0, 0.0));
        assert_ne!(pt(0.0, 0.0), pt(1.0, 0.0));
        assert_ne!(pt(0.0, 0.0), pt(0.000000001, 0.0));
        assert_ne!(pt(0.0, 0.0), pt(0.001, 0.0));
    }

    #[test]
    fn point_is_close() {
        assert!(pt(0.0, 0.0).is_close(pt(0.0, 0.0)));
        assert!(!pt(0.0, 0.0).is_close(pt(1.0, 0.0)));
        assert!(pt(0.0, 0.0).is_close(pt(0.000000001, 0.0)));
        assert!(!pt(0.0, 0.0).is_close(pt(0.001, 0.0)));
        assert!(!pt(0.0, 0.0).is_close(pt(0.0, 0.001)));
    }

    #[test]
    fn point_distance() {
        assert!((pt(0.0, 0.0).distance(pt(1.0, 1.0)) - 1.4142135623730951).abs() < 1e-12);
        assert_eq!(pt(10.0, 10.0).distance(pt(10.0, 10.0)), 0.0);
        assert_eq!(pt(100.0, 100.0).distance(pt(103.0, 104.0)), 5.0);
    }

    #[test]
    fn points_collinear() {
        let origin = pt(0.0, 0.0);
        let diag = pt(1.0, 1.0);
        assert!(collinear(origin, diag, pt(10.0, 10.0)));
        assert!(!collinear(origin, diag, pt(100.0, 200.0)));
        assert!(!collinear(origin, diag, pt(1000000.0, 1000001.0)));
        assert!(collinear(origin, diag, pt(10.000000001, 10.0)));
    }

    #[test]
    #[should_panic]
    fn collinear_rejects_coincident_points() {
        collinear(pt(1.0, 1.0), pt(1.0, 1.0), pt(2.0, 2.0));
    }

    #[test]
    fn interpolated_points_are_collinear() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p1 = random_point(&mut rng);
            let p2 = random_point(&mut rng);
            if p1 == p2 {
                continue;
            }
            let t = rng.random_range(0.0..=1.0);
            let p3 = along_the_way(p1, p2, t);
            assert!(collinear(p1, p2, p3), "{:?} {:?} t={}", p1, p2, t);
        }
    }

    #[test]
    fn interpolated_points_are_off_an_offset_line() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let p1 = random_point(&mut rng);
            let p2 = random_point(&mut rng);
            if p1.distance(p2) < 1.0 {
                continue;
            }
            let t = rng.random_range(0.0..=1.0);
            let p3 = along_the_way(p1, p2, t);
            let next_to = Line::new(p1, p2).offset(1.0);
            assert!(!collinear(next_to.p1, next_to.p2, p3));
        }
    }

    #[test]
    fn intersect_axes() {
        let l1 = Line::new(pt(-1.0, 0.0), pt(1.0, 0.0));
        let l2 = Line::new(pt(0.0, -1.0), pt(0.0, 1.0));
        assert!(l1.intersect(&l2).unwrap().is_close(pt(0.0, 0.0)));
    }

    #[test]
    fn intersect_general() {
        let l1 = Line::new(pt(17.0, 34.0), pt(23.0, 42.0));
        let l2 = Line::new(pt(100.0, 200.0), pt(300.0, 350.0));
        let expected = pt(194.857142857142857, 271.142857142857143);
        assert!(l1.intersect(&l2).unwrap().is_close(expected));
        // Argument order doesn't matter.
        assert!(l2.intersect(&l1).unwrap().is_close(expected));
    }

    #[test]
    fn intersect_identical_lines_fails() {
        let l1 = Line::new(pt(-1.0, 0.0), pt(1.0, 0.0));
        let l2 = Line::new(pt(-1.0, 0.0), pt(1.0, 0.0));
        assert_eq!(l1.intersect(&l2), Err(BadGeometry::Parallel));
    }

    #[test]
    fn intersect_parallel_lines_fails() {
        let l1 = Line::new(pt(-1.0, 0.0), pt(1.0, 0.0));
        let l2 = Line::new(pt(-2.0, 0.0), pt(2.0, 0.0));
        assert_eq!(l1.intersect(&l2), Err(BadGeometry::Parallel));

        let l3 = Line::new(pt(-2.0, 5.0), pt(2.0, 5.0));
        assert_eq!(l1.intersect(&l3), Err(BadGeometry::Parallel));
    }

    #[test]
    fn offset_moves_perpendicular() {
        let l1 = Line::new(pt(10.0, 10.0), pt(13.0, 14.0));
        let l2 = l1.offset(10.0);
        assert_eq!(l2.p1, pt(18.0, 4.0));
        assert_eq!(l2.p2, pt(21.0, 8.0));
    }

    #[test]
    fn negative_offset_goes_the_other_way() {
        let l1 = Line::new(pt(10.0, 10.0), pt(13.0, 14.0));
        let l2 = l1.offset(-10.0);
        assert_eq!(l2.p1, pt(2.0, 16.0));
        assert_eq!(l2.p2, pt(5.0, 20.0));
    }

    #[test]
    #[should_panic]
    fn degenerate_line_panics() {
        Line::new(pt(3.0, 3.0), pt(3.0, 3.0));
    }

    #[test]
    fn line_length_and_reverse() {
        let line = Line::new(pt(0.0, 0.0), pt(3.0, 4.0));
        assert_eq!(line.length(), 5.0);
        assert_eq!(line.reversed().p1, pt(3.0, 4.0));
        assert_eq!(line.reversed().p2, pt(0.0, 0.0));
    }
}
