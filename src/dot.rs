//! Conversion into the [graphviz](https://graphviz.org/) DOT format.
use std::collections::BTreeMap;

use itertools::Itertools;

use crate::Dfa;

/// Trait that encapsulates the functionality of converting an object
/// into a graphviz representation.
pub trait ToDot {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    fn dot_representation(&self) -> String;

    /// Pipes the DOT representation through the `dot` executable and returns the PNG it
    /// produces. Only available with the `graphviz` feature.
    #[cfg(feature = "graphviz")]
    fn render_png(&self) -> std::io::Result<Vec<u8>> {
        use std::{
            io::Write,
            process::{Command, Stdio},
        };

        let mut dot = Command::new("dot")
            .arg("-Tpng")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        // stdin is closed when the handle goes out of scope, which lets `dot` finish
        dot.stdin
            .take()
            .ok_or_else(|| std::io::Error::other("stdin of `dot` is not piped"))?
            .write_all(self.dot_representation().as_bytes())?;

        let output = dot.wait_with_output()?;
        if !output.status.success() {
            return Err(std::io::Error::other(format!(
                "`dot` failed with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        tracing::debug!("rendered {} bytes of png", output.stdout.len());
        Ok(output.stdout)
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl ToDot for Dfa {
    fn dot_representation(&self) -> String {
        let mut lines = vec![
            "fontname=\"Helvetica,Arial,sans-serif\"\nrankdir=LR".to_string(),
            "init [label=\"\", shape=none]".into(),
        ];
        for state in self.states() {
            let shape = if self.is_accepting(state) {
                "doublecircle"
            } else {
                "circle"
            };
            lines.push(format!("{} [shape={shape}]", quote(state)));
        }
        lines.push(format!("init -> {}", quote(self.start_state())));

        let mut bundles: BTreeMap<(usize, usize), Vec<&str>> = BTreeMap::new();
        for t in self.transitions() {
            if let (Some(s), Some(q)) = (self.state_index(t.source), self.state_index(t.target)) {
                bundles.entry((s, q)).or_default().push(t.symbol);
            }
        }
        for ((s, q), symbols) in bundles {
            lines.push(format!(
                "{} -> {} [label = {}]",
                quote(&self.states()[s]),
                quote(&self.states()[q]),
                quote(&symbols.into_iter().sorted().join(","))
            ));
        }

        format!(
            "digraph A {{\n{}\n}}\n",
            lines.into_iter().map(|line| format!("{line};")).join("\n")
        )
    }
}
