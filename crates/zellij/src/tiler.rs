//! Path recording - a pen that remembers what it drew.
//!
//! `PathTiler` behaves like a drawing context: it has a current transform
//! that can be translated and rotated, and `move_to`/`line_to` calls that
//! describe strokes in local coordinates. Instead of drawing, it records
//! every stroke as a [`Path`] in canvas coordinates, so the paths can be
//! joined up before anything is rendered.
//!
//! ## Rust Lesson #12: RAII Guards
//!
//! Drawing libraries usually pair `save()` with `restore()` and trust the
//! caller to do both. Here `saved()` returns a guard whose `Drop` does the
//! restore, so an early `?` return (or even a panic) can't leak a transform
//! into the next tile.

use std::ops::{Deref, DerefMut};

use log::debug;
use lyon_geom::euclid::Angle;
use lyon_geom::{Transform, point, vector};

use crate::geometry::{BadGeometry, Point};

/// A polyline: the points visited by one `move_to` + `line_to`* run.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    /// Create a path from its points.
    ///
    /// # Panics
    ///
    /// If there are fewer than two points.
    pub fn new(points: Vec<Point>) -> Self {
        assert!(points.len() >= 2, "a path needs at least two points, got {}", points.len());
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of points (one more than the number of segments).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a path has at least two points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Does the path come back to where it started?
    pub fn is_closed(&self) -> bool {
        self.points.len() > 2 && self.start().is_close(self.end())
    }

    /// The same path, walked from the other end.
    pub fn reversed(&self) -> Path {
        let mut points = self.points.clone();
        points.reverse();
        Path { points }
    }

    /// Each segment as a `(from, to)` pair.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }
}

/// What the pen did last.
#[derive(Debug, Clone, Copy)]
enum Pen {
    /// `move_to` was called; nothing is recorded until a `line_to` follows.
    Moved(Point),
    /// The last path in `paths` is still being extended.
    Drawing,
}

/// Records pen strokes as paths, through a stack of transforms.
#[derive(Debug, Clone)]
pub struct PathTiler {
    transform: Transform<f64>,
    saved: Vec<Transform<f64>>,
    pen: Option<Pen>,
    paths: Vec<Path>,
}

impl Default for PathTiler {
    fn default() -> Self {
        Self::new()
    }
}

impl PathTiler {
    pub fn new() -> Self {
        Self {
            transform: Transform::identity(),
            saved: Vec::new(),
            pen: None,
            paths: Vec::new(),
        }
    }

    /// Move the origin by `(dx, dy)` in current coordinates.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(vector(dx, dy));
    }

    /// Rotate the axes by `degrees`, turning +x toward +y.
    pub fn rotate(&mut self, degrees: f64) {
        self.transform = self.transform.pre_rotate(Angle::degrees(degrees));
    }

    /// Map a point in current coordinates to canvas coordinates.
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        let p = self.transform.transform_point(point(x, y));
        Point::new(p.x, p.y)
    }

    /// Save the transform; it is restored when the guard drops.
    pub fn saved(&mut self) -> SavedGuard<'_> {
        self.saved.push(self.transform);
        SavedGuard { tiler: self }
    }

    /// Run `f` with the transform saved around it.
    pub fn with_saved<R>(&mut self, f: impl FnOnce(&mut PathTiler) -> R) -> R {
        let mut guard = self.saved();
        f(&mut *guard)
    }

    /// How many `saved()` scopes are currently open.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    /// Start a new path at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let at = self.transform_point(x, y);
        self.pen = Some(Pen::Moved(at));
    }

    /// Extend the current path to `(x, y)`.
    ///
    /// # Panics
    ///
    /// If no `move_to` has been made yet.
    pub fn line_to(&mut self, x: f64, y: f64) {
        let to = self.transform_point(x, y);
        match self.pen {
            Some(Pen::Moved(from)) => {
                self.paths.push(Path::new(vec![from, to]));
                self.pen = Some(Pen::Drawing);
            }
            Some(Pen::Drawing) => {
                // Invariant: Drawing is only set right after a push.
                if let Some(path) = self.paths.last_mut() {
                    path.points.push(to);
                }
            }
            None => panic!("line_to({}, {}) called before move_to", x, y),
        }
    }

    #[inline]
    pub fn move_to_point(&mut self, p: Point) {
        self.move_to(p.x, p.y);
    }

    #[inline]
    pub fn line_to_point(&mut self, p: Point) {
        self.line_to(p.x, p.y);
    }

    /// Paths recorded so far, in drawing order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Hand over the recorded paths.
    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

/// A saved transform scope. Derefs to the tiler; restores on drop.
pub struct SavedGuard<'a> {
    tiler: &'a mut PathTiler,
}

impl Deref for SavedGuard<'_> {
    type Target = PathTiler;

    fn deref(&self) -> &PathTiler {
        self.tiler
    }
}

impl DerefMut for SavedGuard<'_> {
    fn deref_mut(&mut self) -> &mut PathTiler {
        self.tiler
    }
}

impl Drop for SavedGuard<'_> {
    fn drop(&mut self) {
        self.tiler.restore();
    }
}

/// Where the tiles go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Horizontal step between tile origins.
    pub dx: f64,
    /// Vertical step between tile origins.
    pub dy: f64,
    /// X of the first tile origin.
    pub ox: f64,
    /// Y of the first tile origin.
    pub oy: f64,
}

impl TileGrid {
    /// Square tiles of `tile` size covering a `width` x `height` canvas.
    pub fn square(width: f64, height: f64, tile: f64) -> Self {
        Self { width, height, dx: tile, dy: tile, ox: 0.0, oy: 0.0 }
    }

    /// Tile origins, column by column.
    pub fn origins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        assert!(self.dx > 0.0 && self.dy > 0.0, "tile steps must be positive: {:?}", self);
        let steps = |origin: f64, limit: f64, step: f64| {
            (0..).map(move |i| origin + i as f64 * step).take_while(move |&v| v < limit)
        };
        steps(self.ox, self.width, self.dx)
            .flat_map(move |x| steps(self.oy, self.height, self.dy).map(move |y| (x, y)))
    }
}

/// Repeatedly call `draw` to tile the canvas.
///
/// Each call runs in its own saved scope, translated to its tile's origin.
/// Returns the number of tiles drawn, or the first geometry error.
pub fn tile<F>(pt: &mut PathTiler, grid: &TileGrid, mut draw: F) -> Result<usize, BadGeometry>
where
    F: FnMut(&mut PathTiler) -> Result<(), BadGeometry>,
{
    let mut count = 0;
    for (x, y) in grid.origins() {
        let mut scope = pt.saved();
        scope.translate(x, y);
        draw(&mut *scope)?;
        count += 1;
    }
    debug!("tiled {} cells, {} paths recorded", count, pt.paths().len());
    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================
