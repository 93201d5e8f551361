//! The "breathing" motif.
//!
//! A square tile with a bent strap in each quadrant. Each strap runs from
//! the midpoint of one edge to the midpoint of the next, kinking out to the
//! corner of a rotated inner square. The kinks are found by intersecting the
//! edge-to-edge diagonal with the inner square's sides.

use crate::geometry::{BadGeometry, Line, Point};
use crate::tiler::PathTiler;

/// The five points of one quadrant's strap, relative to the tile centre.
///
/// Order: west edge midpoint, diagonal ∩ vertical, inner corner,
/// diagonal ∩ horizontal, north edge midpoint.
pub fn breathing_strap(tile_width: f64) -> Result<[Point; 5], BadGeometry> {
    let half = tile_width / 2.0;
    let west = Point::new(-half, 0.0);
    let north = Point::new(0.0, half);

    let sqw = west.distance(north);
    let northwest = Point::new(-sqw / 2.0, sqw / 2.0);

    let diagonal = Line::new(west, north);
    let vert = Line::new(Point::new(-sqw / 2.0, -sqw / 2.0), northwest);
    let horz = Line::new(northwest, Point::new(sqw / 2.0, sqw / 2.0));

    let wnw = diagonal.intersect(&vert)?;
    let nnw = diagonal.intersect(&horz)?;

    Ok([west, wnw, northwest, nnw, north])
}

/// Draw one breathing tile with its origin at the tile's top-left corner.
pub fn draw_breathing(pt: &mut PathTiler, tile_width: f64) -> Result<(), BadGeometry> {
    pt.translate(tile_width / 2.0, tile_width / 2.0);

    let strap = breathing_strap(tile_width)?;
    for quarter in 0..4 {
        let mut scope = pt.saved();
        scope.rotate(quarter as f64 * 90.0);
        scope.move_to_point(strap[0]);
        for &p in &strap[1..] {
            scope.line_to_point(p);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::combine_paths;
    use crate::geometry::collinear;
    use crate::tiler::{TileGrid, tile};

    #[test]
    fn kinks_sit_on_the_construction_lines() {
        let [west, wnw, northwest, nnw, north] = breathing_strap(160.0).unwrap();

        assert!(collinear(west, north, wnw));
        assert!(collinear(west, north, nnw));
        assert!((wnw.x - northwest.x).abs() < 1e-9);
        assert!((nnw.y - northwest.y).abs() < 1e-9);

        let inner = 80.0 * std::f64::consts::SQRT_2 / 2.0;
        assert!(northwest.is_close(Point::new(-inner, inner)));
        assert!(wnw.is_close(Point::new(-inner, 80.0 - inner)));
        assert!(nnw.is_close(Point::new(inner - 80.0, inner)));
    }

    #[test]
    fn one_tile_is_one_closed_loop() {
        let mut pt = PathTiler::new();
        tile(&mut pt, &TileGrid::square(160.0, 160.0, 160.0), |pt| draw_breathing(pt, 160.0)).unwrap();

        let paths = pt.into_paths();
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.len() == 5));

        let combined = combine_paths(paths);
        assert_eq!(combined.len(), 1);
        assert!(combined[0].is_closed());
        assert_eq!(combined[0].len(), 17);
    }

    #[test]
    fn straps_touch_the_edge_midpoints() {
        let mut pt = PathTiler::new();
        draw_breathing(&mut pt, 100.0).unwrap();

        let mut ends: Vec<Point> = pt.paths().iter().flat_map(|p| [p.start(), p.end()]).collect();
        ends.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        let midpoints = [
            Point::new(0.0, 50.0),
            Point::new(50.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 50.0),
        ];
        for m in midpoints {
            assert_eq!(ends.iter().filter(|e| e.is_close(m)).count(), 2, "{:?}", m);
        }
    }
}
