//! Library for loading deterministic finite automata from JSON descriptions, deriving their
//! complement, running input strings through both and drawing them onto a 2D surface.
//!
//! The typical flow is
//! - obtain a [`Dfa`] through a [`Loader`] (or build a [`DfaDefinition`] by hand and convert it),
//! - derive the complement automaton with [`Complement::complement`],
//! - evaluate strings with [`Acceptor::evaluate`],
//! - compute a [`Diagram`] and paint it onto any [`Canvas`] with a [`Renderer`].
//!
//! [`Session`] ties all of these together for an interactive front end.
#![warn(missing_docs)]

pub mod alphabet;
pub use alphabet::Alphabet;

pub mod dfa;
pub use dfa::{Dfa, DfaDefinition, Transition};

mod error;
pub use error::{Error, LoadError, MalformedDfa};

pub mod loader;
pub use loader::{Directory, InMemory, Loader, Source};

mod complement;
pub use complement::Complement;

pub mod run;
pub use run::{Acceptor, Outcome};

mod style;
pub use style::Style;

pub mod layout;
pub use layout::{Layout, Point};

pub mod canvas;
pub use canvas::Canvas;

pub mod render;
pub use render::{Diagram, Renderer};

pub mod session;
pub use session::{Report, Session};

pub mod dot;
pub use dot::ToDot;

mod display;

/// Type alias for hash maps, uses [`ahash`] when the corresponding feature is enabled.
#[cfg(feature = "ahash")]
pub type Map<K, V> = ahash::HashMap<K, V>;
/// Type alias for hash maps, uses [`ahash`] when the corresponding feature is enabled.
#[cfg(not(feature = "ahash"))]
pub type Map<K, V> = std::collections::HashMap<K, V>;

/// Commonly used items, importable with `use dfa_complement::prelude::*`.
pub mod prelude {
    pub use super::{
        Acceptor, Alphabet, Canvas, Complement, Dfa, DfaDefinition, Error, Loader, Outcome,
        Renderer, Source, Style, ToDot,
    };
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{Dfa, DfaDefinition};

    /// Builds a definition from borrowed parts, transitions are given as `(source, symbol, target)`.
    pub fn definition(
        states: &[&str],
        alphabet: Option<&[&str]>,
        start: &str,
        accepting: &[&str],
        transitions: &[(&str, &str, &str)],
    ) -> DfaDefinition {
        let mut def = DfaDefinition {
            states: states.iter().map(|q| q.to_string()).collect(),
            alphabet: alphabet.map(|syms| syms.iter().map(|s| s.to_string()).collect()),
            start_state: start.to_string(),
            accept_states: accepting.iter().map(|q| q.to_string()).collect(),
            transitions: Default::default(),
        };
        for (source, symbol, target) in transitions {
            def.transitions
                .entry(source.to_string())
                .or_default()
                .insert(symbol.to_string(), target.to_string());
        }
        def
    }

    /// Two states, reading `a` leads to and stays in the accepting state `q1`.
    pub fn reaches_q1_on_a() -> Dfa {
        Dfa::try_from(definition(
            &["q0", "q1"],
            None,
            "q0",
            &["q1"],
            &[("q0", "a", "q1"), ("q1", "a", "q1")],
        ))
        .unwrap()
    }

    /// Like [`reaches_q1_on_a`] but without any transition leaving `q1`.
    pub fn stuck_in_q1() -> Dfa {
        Dfa::try_from(definition(
            &["q0", "q1"],
            None,
            "q0",
            &["q1"],
            &[("q0", "a", "q1")],
        ))
        .unwrap()
    }

    /// Accepts binary strings ending in `1`, with explicit alphabet.
    pub fn ends_with_one() -> Dfa {
        Dfa::try_from(definition(
            &["q0", "q1"],
            Some(&["0", "1"][..]),
            "q0",
            &["q1"],
            &[
                ("q0", "0", "q0"),
                ("q0", "1", "q1"),
                ("q1", "0", "q0"),
                ("q1", "1", "q1"),
            ],
        ))
        .unwrap()
    }

    /// Counts `a`s modulo three, accepting when the count is one.
    pub fn one_mod_three_times_a() -> Dfa {
        Dfa::try_from(definition(
            &["q0", "q1", "q2"],
            None,
            "q0",
            &["q1"],
            &[
                ("q0", "a", "q1"),
                ("q0", "b", "q0"),
                ("q1", "a", "q2"),
                ("q1", "b", "q1"),
                ("q2", "a", "q0"),
                ("q2", "b", "q2"),
            ],
        ))
        .unwrap()
    }
}
