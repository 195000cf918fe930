//! Drawing surfaces.
//!
//! [`Canvas`] mirrors the small part of an immediate-mode 2D canvas API that is needed to draw an
//! automaton: clearing, building paths out of lines and arcs, filling and stroking them, and
//! writing text. Two surfaces are provided, [`Recording`] keeps the issued commands and [`Svg`]
//! turns them into an SVG document.
use std::f64::consts::TAU;

use itertools::Itertools;

use crate::Point;

/// A 2D drawing surface.
///
/// Paths work as on an HTML canvas: [`Canvas::begin_path`] starts a new path, lines and arcs extend
/// it, and [`Canvas::fill`] / [`Canvas::stroke`] paint the current path without discarding it.
pub trait Canvas {
    /// Width of the surface.
    fn width(&self) -> f64;
    /// Height of the surface.
    fn height(&self) -> f64;
    /// Erases everything drawn so far.
    fn clear(&mut self);
    /// Sets the font for subsequent text, given in CSS shorthand such as `16px Arial`.
    fn set_font(&mut self, font: &str);
    /// Sets the color used by [`Canvas::fill`] and [`Canvas::fill_text`].
    fn set_fill_style(&mut self, color: &str);
    /// Sets the color used by [`Canvas::stroke`].
    fn set_stroke_style(&mut self, color: &str);
    /// Starts a new, empty path.
    fn begin_path(&mut self);
    /// Starts a new subpath at `to`.
    fn move_to(&mut self, to: Point);
    /// Adds a straight line from the current point to `to`.
    fn line_to(&mut self, to: Point);
    /// Adds a clockwise arc around `center` from angle `start` to angle `end` (in radians).
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64);
    /// Closes the current subpath.
    fn close_path(&mut self);
    /// Fills the current path.
    fn fill(&mut self);
    /// Strokes the current path.
    fn stroke(&mut self);
    /// Writes `text` horizontally centered on `at`, with its baseline at `at.y`.
    fn fill_text(&mut self, text: &str, at: Point);
}

/// A single call on a [`Canvas`].
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Command {
    Clear,
    Font(String),
    FillStyle(String),
    StrokeStyle(String),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    ClosePath,
    Fill,
    Stroke,
    Text(String, Point),
}

/// Remembers the commands that make up the current picture. Clearing forgets everything recorded
/// before, so two recordings of the same picture compare equal.
#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    width: f64,
    height: f64,
    commands: Vec<Command>,
}

impl Recording {
    /// Creates an empty recording of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// The recorded commands.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// All texts that were written, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Text(t, _) => Some(t.as_str()),
            _ => None,
        })
    }
}

impl Canvas for Recording {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(Command::Clear);
    }
    fn set_font(&mut self, font: &str) {
        self.commands.push(Command::Font(font.to_string()));
    }
    fn set_fill_style(&mut self, color: &str) {
        self.commands.push(Command::FillStyle(color.to_string()));
    }
    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(Command::StrokeStyle(color.to_string()));
    }
    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }
    fn move_to(&mut self, to: Point) {
        self.commands.push(Command::MoveTo(to));
    }
    fn line_to(&mut self, to: Point) {
        self.commands.push(Command::LineTo(to));
    }
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        self.commands.push(Command::Arc {
            center,
            radius,
            start,
            end,
        });
    }
    fn close_path(&mut self) {
        self.commands.push(Command::ClosePath);
    }
    fn fill(&mut self) {
        self.commands.push(Command::Fill);
    }
    fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
    }
    fn fill_text(&mut self, text: &str, at: Point) {
        self.commands.push(Command::Text(text.to_string(), at));
    }
}

/// Produces an SVG document. Every fill, stroke and text becomes one element.
#[derive(Clone, Debug)]
pub struct Svg {
    width: f64,
    height: f64,
    font: String,
    fill: String,
    stroke: String,
    path: Vec<String>,
    current: Option<Point>,
    subpath_start: Option<Point>,
    elements: Vec<String>,
}

impl Svg {
    /// Creates an empty document of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            font: "10px sans-serif".to_string(),
            fill: "black".to_string(),
            stroke: "black".to_string(),
            path: Vec::new(),
            current: None,
            subpath_start: None,
            elements: Vec::new(),
        }
    }

    /// Number of elements drawn since the last clear.
    pub fn elements(&self) -> usize {
        self.elements.len()
    }

    /// Serializes the picture into a standalone SVG document.
    pub fn document(&self) -> String {
        let header = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = num(self.width),
            h = num(self.height)
        );
        let body = self
            .elements
            .iter()
            .map(|element| format!("  {element}\n"))
            .join("");
        format!("{header}\n{body}</svg>\n")
    }

    fn path_data(&self) -> String {
        self.path.iter().join(" ")
    }
}

fn num(x: f64) -> String {
    let x = if x.abs() < 0.005 { 0.0 } else { x };
    let rounded = format!("{x:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn escape(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&apos;".to_string(),
            c => c.to_string(),
        })
        .collect()
}

impl Canvas for Svg {
    fn width(&self) -> f64 {
        self.width
    }
    fn height(&self) -> f64 {
        self.height
    }
    fn clear(&mut self) {
        self.elements.clear();
        self.begin_path();
    }
    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }
    fn set_fill_style(&mut self, color: &str) {
        self.fill = color.to_string();
    }
    fn set_stroke_style(&mut self, color: &str) {
        self.stroke = color.to_string();
    }
    fn begin_path(&mut self) {
        self.path.clear();
        self.current = None;
        self.subpath_start = None;
    }
    fn move_to(&mut self, to: Point) {
        self.path.push(format!("M {} {}", num(to.x), num(to.y)));
        self.current = Some(to);
        self.subpath_start = Some(to);
    }
    fn line_to(&mut self, to: Point) {
        if self.current.is_none() {
            self.move_to(to);
            return;
        }
        self.path.push(format!("L {} {}", num(to.x), num(to.y)));
        self.current = Some(to);
    }
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) {
        let from = center.towards(start, radius);
        let to = center.towards(end, radius);
        // as on a canvas, an arc is connected to the current point
        if self.current.is_some() {
            self.line_to(from);
        } else {
            self.move_to(from);
        }
        let r = num(radius);
        let sweep = end - start;
        if sweep >= TAU - 1e-9 {
            // a single arc command cannot describe a full circle
            let opposite = center.towards(start + TAU / 2.0, radius);
            self.path.push(format!(
                "A {r} {r} 0 1 1 {} {} A {r} {r} 0 1 1 {} {}",
                num(opposite.x),
                num(opposite.y),
                num(from.x),
                num(from.y)
            ));
            self.current = Some(from);
        } else {
            let large = u8::from(sweep.rem_euclid(TAU) > TAU / 2.0);
            self.path.push(format!(
                "A {r} {r} 0 {large} 1 {} {}",
                num(to.x),
                num(to.y)
            ));
            self.current = Some(to);
        }
    }
    fn close_path(&mut self) {
        self.path.push("Z".to_string());
        self.current = self.subpath_start;
    }
    fn fill(&mut self) {
        if !self.path.is_empty() {
            self.elements.push(format!(
                r#"<path d="{}" fill="{}" stroke="none"/>"#,
                self.path_data(),
                escape(&self.fill)
            ));
        }
    }
    fn stroke(&mut self) {
        if !self.path.is_empty() {
            self.elements.push(format!(
                r#"<path d="{}" fill="none" stroke="{}"/>"#,
                self.path_data(),
                escape(&self.stroke)
            ));
        }
    }
    fn fill_text(&mut self, text: &str, at: Point) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" text-anchor="middle" style="font: {}" fill="{}">{}</text>"#,
            num(at.x),
            num(at.y),
            escape(&self.font),
            escape(&self.fill),
            escape(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(250.0), "250");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.004), "0");
        assert_eq!(num(-7.25), "-7.25");
    }

    #[test]
    fn full_circle_is_split() {
        let mut svg = Svg::new(100.0, 100.0);
        svg.begin_path();
        svg.arc(Point::new(50.0, 50.0), 10.0, 0.0, TAU);
        svg.stroke();
        assert_eq!(svg.elements(), 1);
        let doc = svg.document();
        assert!(
            doc.contains(r#"<path d="M 60 50 A 10 10 0 1 1 40 50 A 10 10 0 1 1 60 50" fill="none" stroke="black"/>"#),
            "{doc}"
        );
        assert!(doc.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100""#));
    }

    #[test]
    fn triangle_and_text() {
        let mut svg = Svg::new(100.0, 100.0);
        svg.set_fill_style("white");
        svg.begin_path();
        svg.move_to(Point::new(0.0, 0.0));
        svg.line_to(Point::new(10.0, 0.0));
        svg.line_to(Point::new(5.0, 5.0));
        svg.close_path();
        svg.fill();
        svg.set_font("16px Arial");
        svg.set_fill_style("black");
        svg.fill_text("a<b", Point::new(5.0, 20.0));
        let doc = svg.document();
        assert!(doc.contains(r#"<path d="M 0 0 L 10 0 L 5 5 Z" fill="white" stroke="none"/>"#));
        assert!(doc.contains(r#"style="font: 16px Arial" fill="black">a&lt;b</text>"#));

        svg.clear();
        assert_eq!(svg.elements(), 0);
    }

    #[test]
    fn document_lists_one_element_per_line() {
        let empty = Svg::new(20.0, 10.0);
        assert_eq!(
            empty.document(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"20\" height=\"10\" viewBox=\"0 0 20 10\">\n</svg>\n"
        );

        let mut svg = Svg::new(20.0, 10.0);
        svg.fill_text("x", Point::new(1.0, 2.0));
        svg.fill_text("y", Point::new(3.0, 4.0));
        let doc = svg.document();
        let lines = doc.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("  <text") && lines[1].ends_with(">x</text>"));
        assert!(lines[2].starts_with("  <text") && lines[2].ends_with(">y</text>"));
        assert_eq!(lines[3], "</svg>");
    }

    #[test]
    fn clearing_a_recording_forgets() {
        let mut rec = Recording::new(10.0, 10.0);
        rec.fill_text("x", Point::default());
        rec.clear();
        rec.fill_text("y", Point::default());
        assert_eq!(
            rec.commands(),
            &[Command::Clear, Command::Text("y".into(), Point::default())]
        );
        assert_eq!(rec.texts().collect::<Vec<_>>(), vec!["y"]);
    }
}
