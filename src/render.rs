//! Painting automata onto a [`Canvas`].
use std::f64::consts::TAU;

use tracing::debug;

use crate::{
    layout::{route, Edge},
    Canvas, Dfa, Layout, Point, Style,
};

/// A state as it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Name of the state, written in its center.
    pub state: String,
    /// Center of the state.
    pub at: Point,
    /// Whether an inner ring is drawn.
    pub accepting: bool,
    /// Whether the start marker is drawn.
    pub initial: bool,
}

/// Everything that is needed to draw an automaton, computed from its states and transitions once
/// per drawing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    /// The states in placement order.
    pub nodes: Vec<Node>,
    /// The routed transitions.
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Lays out `dfa` according to `style`.
    pub fn of(dfa: &Dfa, style: &Style) -> Self {
        let layout = Layout::for_style(dfa.states(), style);
        let nodes = layout
            .iter()
            .map(|(state, at)| Node {
                state: state.to_string(),
                at,
                accepting: dfa.is_accepting(state),
                initial: state == dfa.start_state(),
            })
            .collect();
        let edges = route(dfa.transitions(), &layout, style);
        Self { nodes, edges }
    }

    /// Returns true if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Draws [`Diagram`]s with a fixed [`Style`].
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    style: Style,
}

impl Renderer {
    /// Creates a renderer using `style`.
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// The style in use.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Clears `canvas` and draws `dfa` onto it.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C, dfa: &Dfa) {
        let diagram = Diagram::of(dfa, &self.style);
        debug!(
            "drawing {} states and {} edges",
            diagram.nodes.len(),
            diagram.edges.len()
        );
        self.render_diagram(canvas, &diagram);
    }

    /// Clears `canvas` and draws `diagram` onto it. Transitions are drawn first, so that states are
    /// painted over the ends of the arrows.
    pub fn render_diagram<C: Canvas + ?Sized>(&self, canvas: &mut C, diagram: &Diagram) {
        canvas.clear();
        if diagram.is_empty() {
            return;
        }
        canvas.set_font(&self.style.font);
        canvas.set_stroke_style(&self.style.ink);
        canvas.set_fill_style(&self.style.ink);

        for edge in &diagram.edges {
            self.draw_edge(canvas, edge);
        }
        for node in &diagram.nodes {
            self.draw_node(canvas, node);
        }
    }

    fn draw_edge<C: Canvas + ?Sized>(&self, canvas: &mut C, edge: &Edge) {
        match edge {
            Edge::SelfLoop(l) => {
                canvas.begin_path();
                canvas.arc(l.center, l.radius, 0.0, TAU);
                canvas.stroke();
                for label in &l.labels {
                    canvas.fill_text(&label.text, label.at);
                }
            }
            Edge::Arrow(a) => {
                canvas.begin_path();
                canvas.move_to(a.start);
                canvas.line_to(a.end);
                canvas.stroke();

                canvas.begin_path();
                canvas.move_to(a.end);
                canvas.line_to(a.head[0]);
                canvas.line_to(a.head[1]);
                canvas.close_path();
                canvas.fill();

                canvas.fill_text(&a.label.text, a.label.at);
            }
        }
    }

    fn draw_node<C: Canvas + ?Sized>(&self, canvas: &mut C, node: &Node) {
        let style = &self.style;
        let Point { x, y } = node.at;

        canvas.set_fill_style(&style.state_fill);
        canvas.begin_path();
        canvas.arc(node.at, style.state_radius, 0.0, TAU);
        canvas.fill();
        canvas.stroke();

        if node.accepting {
            canvas.begin_path();
            canvas.arc(node.at, style.accept_radius, 0.0, TAU);
            canvas.stroke();
        }

        canvas.set_fill_style(&style.ink);
        if node.initial {
            let tip = x - style.state_radius;
            let base = tip - style.start_marker_length;
            let half = style.start_marker_width / 2.0;
            canvas.begin_path();
            canvas.move_to(Point::new(tip, y));
            canvas.line_to(Point::new(base, y - half));
            canvas.line_to(Point::new(base, y + half));
            canvas.close_path();
            canvas.fill();
        }

        canvas.fill_text(&node.state, Point::new(x, y + 5.0));
    }
}
