//! SVG drawing surface.
//!
//! Each `stroke()` becomes one `<path>` element carrying the pen settings
//! at that moment, so joined contours come out as single elements.

use zellij::{LineCap, Rgb, Surface};

/// A [`Surface`] that writes SVG text.
pub struct SvgSurface {
    width: u32,
    height: u32,
    line_width: f64,
    color: Rgb,
    cap: LineCap,
    path_data: String,
    body: String,
    strokes: usize,
}

impl SvgSurface {
    /// An empty canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let body = format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            background.to_hex()
        );
        Self {
            width,
            height,
            line_width: 1.0,
            color: Rgb::BLACK,
            cap: LineCap::Butt,
            path_data: String::new(),
            body,
            strokes: 0,
        }
    }

    /// Number of `<path>` elements written so far.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
            self.width, self.height, self.width, self.height
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_source_rgb(&mut self, color: Rgb) {
        self.color = color;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.cap = cap;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.path_data.is_empty() {
            self.path_data.push(' ');
        }
        self.path_data.push_str(&format!("M{:.3},{:.3}", x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path_data.push_str(&format!(" L{:.3},{:.3}", x, y));
    }

    fn stroke(&mut self) {
        if self.path_data.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"{}\" stroke-linejoin=\"round\"/>\n",
            self.path_data,
            self.color.to_hex(),
            self.line_width,
            self.cap.name()
        ));
        self.path_data.clear();
        self.strokes += 1;
    }
}
