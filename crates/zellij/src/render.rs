//! Rendering - replay joined paths onto a drawing surface.
//!
//! The library doesn't know about pixels. Anything that can stroke lines
//! implements [`Surface`]; the CLI writes SVG and rasterises that for PNG.
//!
//! ## Rust Lesson #14: Traits as Seams
//!
//! A trait is an interface. `stroke_paths` is generic over `S: Surface`, so
//! tests can hand it a recording fake while the CLI hands it an SVG writer,
//! and the compiler generates a specialised copy for each.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{Rgb, random_color};
use crate::tiler::Path;

/// How the ends of strokes are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn name(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Something that can stroke paths: a stateful pen over an image.
pub trait Surface {
    fn set_line_width(&mut self, width: f64);
    fn set_source_rgb(&mut self, color: Rgb);
    fn set_line_cap(&mut self, cap: LineCap);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Stroke the current path with the current settings, then clear it.
    fn stroke(&mut self);
}

/// One stroking pass over all the paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f64,
    /// Give every path its own random color.
    #[serde(default)]
    pub rainbow: bool,
    /// Color used when not in rainbow mode.
    #[serde(default = "default_color")]
    pub color: Rgb,
}

fn default_color() -> Rgb {
    Rgb::BLACK
}

impl StrokeStyle {
    pub fn solid(width: f64, color: Rgb) -> Self {
        Self { width, rainbow: false, color }
    }

    pub fn rainbow(width: f64) -> Self {
        Self { width, rainbow: true, color: Rgb::BLACK }
    }
}

/// Replay a path as `move_to` + `line_to` calls.
pub fn replay_path<S: Surface + ?Sized>(path: &Path, surface: &mut S) {
    let points = path.points();
    surface.move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        surface.line_to(p.x, p.y);
    }
}

/// Stroke every path once per style, in order.
///
/// Styles are layered: a wide dark pass followed by a narrower light one
/// gives outlined strapwork. Rainbow styles draw a fresh color from `rng`
/// for each path.
pub fn stroke_paths<S, R>(surface: &mut S, paths: &[Path], styles: &[StrokeStyle], rng: &mut R)
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    for style in styles {
        surface.set_line_width(style.width);
        surface.set_source_rgb(style.color);
        for path in paths {
            replay_path(path, surface);
            if style.rainbow {
                surface.set_source_rgb(random_color(rng));
            }
            surface.stroke();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Debug, PartialEq)]
    enum Op {
        Width(f64),
        Color(Rgb),
        Cap(LineCap),
        Move(f64, f64),
        Line(f64, f64),
        Stroke,
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn set_line_width(&mut self, width: f64) {
            self.ops.push(Op::Width(width));
        }
        fn set_source_rgb(&mut self, color: Rgb) {
            self.ops.push(Op::Color(color));
        }
        fn set_line_cap(&mut self, cap: LineCap) {
            self.ops.push(Op::Cap(cap));
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Move(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Line(x, y));
        }
        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }
    }

    fn paths() -> Vec<Path> {
        vec![
            Path::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]),
            Path::new(vec![Point::new(5.0, 5.0), Point::new(6.0, 6.0)]),
        ]
    }

    #[test]
    fn replay_emits_moves_and_lines() {
        let mut surface = Recorder::default();
        replay_path(&paths()[0], &mut surface);
        assert_eq!(surface.ops, vec![Op::Move(0.0, 0.0), Op::Line(1.0, 0.0), Op::Line(1.0, 1.0)]);
    }

    #[test]
    fn solid_style_strokes_each_path_in_one_color() {
        let mut surface = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        let red = Rgb::new(1.0, 0.0, 0.0);
        stroke_paths(&mut surface, &paths(), &[StrokeStyle::solid(3.0, red)], &mut rng);

        assert_eq!(surface.ops[0], Op::Width(3.0));
        assert_eq!(surface.ops[1], Op::Color(red));
        let strokes = surface.ops.iter().filter(|op| **op == Op::Stroke).count();
        assert_eq!(strokes, 2);
        let colors = surface.ops.iter().filter(|op| matches!(op, Op::Color(_))).count();
        assert_eq!(colors, 1);
    }

    #[test]
    fn rainbow_style_recolors_before_each_stroke() {
        let mut surface = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        stroke_paths(&mut surface, &paths(), &[StrokeStyle::rainbow(2.0)], &mut rng);

        // Width, base color, then per path: replay, color, stroke.
        assert!(matches!(surface.ops[5], Op::Color(_)));
        assert_eq!(surface.ops[6], Op::Stroke);
        let colors = surface.ops.iter().filter(|op| matches!(op, Op::Color(_))).count();
        assert_eq!(colors, 3);
    }

    #[test]
    fn styles_layer_in_order() {
        let mut surface = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        let styles = [StrokeStyle::solid(7.0, Rgb::BLACK), StrokeStyle::solid(5.0, Rgb::WHITE)];
        stroke_paths(&mut surface, &paths(), &styles, &mut rng);

        let widths: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| if let Op::Width(w) = op { Some(*w) } else { None })
            .collect();
        assert_eq!(widths, vec![7.0, 5.0]);
        assert_eq!(surface.ops.iter().filter(|op| **op == Op::Stroke).count(), 4);
    }
}
