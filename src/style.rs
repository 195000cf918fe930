use serde::{Deserialize, Serialize};

/// All constants that determine how an automaton is drawn.
///
/// Every field has a default, so a style file only needs to list what it overrides:
/// ```json
/// { "width": 800, "height": 600, "layout_radius": 200 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Width of the drawing surface.
    pub width: f64,
    /// Height of the drawing surface.
    pub height: f64,
    /// Radius of the circle the states are placed on.
    pub layout_radius: f64,
    /// Radius of a state.
    pub state_radius: f64,
    /// Radius of the inner ring marking accepting states.
    pub accept_radius: f64,
    /// Font used for state names and transition labels.
    pub font: String,
    /// Radius of a self-loop.
    pub loop_radius: f64,
    /// Distance between the center of a state and the center of its self-loop.
    pub loop_offset: f64,
    /// Distance between the center of a state and the baseline of its self-loop labels.
    pub loop_label_offset: f64,
    /// Horizontal distance between neighboring self-loop labels.
    pub loop_label_spacing: f64,
    /// Length of the two strokes forming an arrowhead.
    pub arrow_head: f64,
    /// How far labels of opposing edges are moved apart.
    pub bidirectional_offset: f64,
    /// Length of the start marker, measured from the state's boundary.
    pub start_marker_length: f64,
    /// Width of the start marker at its base.
    pub start_marker_width: f64,
    /// Fill color of states.
    pub state_fill: String,
    /// Color of lines, arrowheads and text.
    pub ink: String,
    /// Color for reporting acceptance.
    pub accept_color: String,
    /// Color for reporting rejection.
    pub reject_color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 500.0,
            layout_radius: 120.0,
            state_radius: 30.0,
            accept_radius: 25.0,
            font: "16px Arial".to_string(),
            loop_radius: 20.0,
            loop_offset: 40.0,
            loop_label_offset: 65.0,
            loop_label_spacing: 12.0,
            arrow_head: 10.0,
            bidirectional_offset: 12.0,
            start_marker_length: 15.0,
            start_marker_width: 20.0,
            state_fill: "white".to_string(),
            ink: "black".to_string(),
            accept_color: "lime".to_string(),
            reject_color: "red".to_string(),
        }
    }
}

impl Style {
    /// Reads a (partial) style from JSON, missing fields keep their default.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override() {
        let style = Style::from_json(r#"{ "width": 800, "accept_color": "green" }"#).unwrap();
        assert_eq!(style.width, 800.0);
        assert_eq!(style.accept_color, "green");
        assert_eq!(style.height, Style::default().height);
        assert_eq!(style.font, "16px Arial");
    }

    #[test]
    fn unknown_values_are_errors() {
        assert!(Style::from_json(r#"{ "width": "wide" }"#).is_err());
    }
}
