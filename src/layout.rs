//! Placement of states and geometry of the transitions between them.
//!
//! States are placed evenly on a circle in declaration order, state `i` of `n` sits at angle
//! `2πi/n`. Transitions are then routed between the placed states:
//! - a self-loop becomes a small circle above its state, all symbols of the loop are written above
//!   it side by side in lexicographic order,
//! - all transitions between two distinct states become one straight [`Arrow`] running from
//!   boundary to boundary, labelled with the sorted symbols joined by `,`,
//! - if there also is an arrow in the opposite direction, the label is moved sideways so that the
//!   two labels do not overlap.
use std::{
    collections::{BTreeMap, BTreeSet},
    f64::consts::{FRAC_PI_6, TAU},
};

use itertools::Itertools;
use tracing::warn;

use crate::{Map, Style, Transition};

/// A point on the drawing surface, `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point at `distance` from `self` in direction `angle` (in radians).
    pub fn towards(self, angle: f64, distance: f64) -> Self {
        Self::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Moves `self` by the given amounts.
    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the direction from `self` to `other`.
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Positions of all states for one drawing.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    positions: Vec<(String, Point)>,
    index: Map<String, usize>,
}

impl Layout {
    /// Places `states` evenly on the circle around `center` with the given `radius`. An empty list
    /// yields an empty layout.
    pub fn circular<S: AsRef<str>>(states: &[S], center: Point, radius: f64) -> Self {
        if states.is_empty() {
            return Self::default();
        }
        let step = TAU / states.len() as f64;
        let positions = states
            .iter()
            .enumerate()
            .map(|(i, q)| (q.as_ref().to_string(), center.towards(i as f64 * step, radius)))
            .collect_vec();
        let index = positions
            .iter()
            .enumerate()
            .map(|(i, (q, _))| (q.clone(), i))
            .collect();
        Self { positions, index }
    }

    /// Like [`Layout::circular`], using the center of the surface and the radius given by `style`.
    pub fn for_style<S: AsRef<str>>(states: &[S], style: &Style) -> Self {
        Self::circular(
            states,
            Point::new(style.width / 2.0, style.height / 2.0),
            style.layout_radius,
        )
    }

    /// Position of `state`, if it was placed.
    pub fn position(&self, state: &str) -> Option<Point> {
        self.index.get(state).map(|&i| self.positions[i].1)
    }

    /// Index of `state` in placement order.
    pub fn index_of(&self, state: &str) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Iterates over the placed states in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        self.positions.iter().map(|(q, p)| (q.as_str(), *p))
    }

    /// Number of placed states.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no state was placed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Some text anchored at a point, the text is centered on the point horizontally.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    /// The text.
    pub text: String,
    /// Where to put it.
    pub at: Point,
}

/// A loop from a state to itself.
#[derive(Clone, Debug, PartialEq)]
pub struct SelfLoop {
    /// The state.
    pub state: String,
    /// Center of the loop circle.
    pub center: Point,
    /// Radius of the loop circle.
    pub radius: f64,
    /// One label per symbol, sorted.
    pub labels: Vec<Label>,
}

/// A straight arrow between two distinct states.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    /// Source state.
    pub source: String,
    /// Target state.
    pub target: String,
    /// Where the line leaves the boundary of the source.
    pub start: Point,
    /// Where the line hits the boundary of the target, this is the tip of the arrowhead.
    pub end: Point,
    /// The two outer corners of the arrowhead.
    pub head: [Point; 2],
    /// All symbols of the arrow.
    pub label: Label,
    /// Whether an arrow in the opposite direction exists.
    pub bidirectional: bool,
}

/// A routed edge.
#[derive(Clone, Debug, PartialEq)]
pub enum Edge {
    /// See [`SelfLoop`].
    SelfLoop(SelfLoop),
    /// See [`Arrow`].
    Arrow(Arrow),
}

/// Computes the geometry of all `transitions` for the states placed by `layout`. Edges are ordered
/// by source and then target in placement order, so routing the same automaton twice yields the
/// same result.
pub fn route<'a, I>(transitions: I, layout: &Layout, style: &Style) -> Vec<Edge>
where
    I: IntoIterator<Item = Transition<'a>>,
{
    let mut bundles: BTreeMap<(usize, usize), BTreeSet<&'a str>> = BTreeMap::new();
    for t in transitions {
        match (layout.index_of(t.source), layout.index_of(t.target)) {
            (Some(s), Some(q)) => {
                bundles.entry((s, q)).or_default().insert(t.symbol);
            }
            _ => warn!(
                "skipping transition {} -{}-> {} between unplaced states",
                t.source, t.symbol, t.target
            ),
        }
    }

    bundles
        .iter()
        .map(|(&(s, q), symbols)| {
            let (source, from) = &layout.positions[s];
            if s == q {
                Edge::SelfLoop(self_loop(source, *from, symbols, style))
            } else {
                let (target, to) = &layout.positions[q];
                let mut edge = arrow(source, *from, target, *to, symbols, style);
                if bundles.contains_key(&(q, s)) {
                    edge.bidirectional = true;
                    let angle = from.angle_to(*to);
                    let offset = style.bidirectional_offset;
                    edge.label.at = edge
                        .label
                        .at
                        .shifted(-offset * angle.sin(), offset * angle.cos());
                }
                Edge::Arrow(edge)
            }
        })
        .collect()
}

fn self_loop(state: &str, at: Point, symbols: &BTreeSet<&str>, style: &Style) -> SelfLoop {
    let middle = (symbols.len() as f64 - 1.0) / 2.0;
    let labels = symbols
        .iter()
        .enumerate()
        .map(|(i, sym)| Label {
            text: sym.to_string(),
            at: at.shifted(
                (i as f64 - middle) * style.loop_label_spacing,
                -style.loop_label_offset,
            ),
        })
        .collect();
    SelfLoop {
        state: state.to_string(),
        center: at.shifted(0.0, -style.loop_offset),
        radius: style.loop_radius,
        labels,
    }
}

fn arrow(
    source: &str,
    from: Point,
    target: &str,
    to: Point,
    symbols: &BTreeSet<&str>,
    style: &Style,
) -> Arrow {
    let angle = from.angle_to(to);
    let start = from.towards(angle, style.state_radius);
    let end = to.towards(angle, -style.state_radius);
    let head = [
        end.towards(angle - FRAC_PI_6, -style.arrow_head),
        end.towards(angle + FRAC_PI_6, -style.arrow_head),
    ];
    Arrow {
        source: source.to_string(),
        target: target.to_string(),
        start,
        end,
        head,
        label: Label {
            text: symbols.iter().join(","),
            at: start.midpoint(end),
        },
        bidirectional: false,
    }
}
