use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain an automaton description as JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The name cannot be turned into a resource, e.g. because it is empty or escapes the
    /// directory it should be looked up in.
    #[error("`{0}` is not a valid automaton name")]
    InvalidName(String),
    /// The resource exists in principle but could not be read.
    #[error("could not read automaton `{name}` from {}", path.display())]
    Unreachable {
        /// Name that was requested.
        name: String,
        /// Location that was tried.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The source does not know the name at all.
    #[error("no automaton named `{0}`")]
    Missing(String),
    /// The resource was read, but it is not valid JSON for an automaton.
    #[error("automaton `{name}` is not valid JSON")]
    InvalidJson {
        /// Name that was requested.
        name: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}

/// Violation of one of the structural invariants of a [`crate::Dfa`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedDfa {
    /// The same state identifier is listed twice.
    #[error("state `{0}` is listed more than once")]
    DuplicateState(String),
    /// The start state is not among the states.
    #[error("start state `{0}` is not a state")]
    UnknownStartState(String),
    /// An accepting state is not among the states.
    #[error("accepting state `{0}` is not a state")]
    UnknownAcceptState(String),
    /// The transition table has an entry for something that is not a state.
    #[error("transitions are given for `{0}`, which is not a state")]
    UnknownSource(String),
    /// A transition leads to something that is not a state.
    #[error("transition from `{source_state}` on `{symbol}` leads to unknown state `{target}`")]
    UnknownTarget {
        /// Source of the transition.
        source_state: String,
        /// Symbol of the transition.
        symbol: String,
        /// The offending target.
        target: String,
    },
    /// A symbol is not exactly one character long.
    #[error("symbol `{0}` must consist of exactly one character")]
    InvalidSymbol(String),
    /// An explicit alphabet is given, but a transition uses a symbol outside of it.
    #[error("transition from `{source_state}` uses `{symbol}`, which is not in the alphabet")]
    SymbolOutsideAlphabet {
        /// Source of the transition.
        source_state: String,
        /// The offending symbol.
        symbol: String,
    },
}

/// Errors that can occur while working with automata.
#[derive(Debug, Error)]
pub enum Error {
    /// The automaton description could not be obtained.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The description was obtained but does not form a valid automaton.
    #[error("automaton `{name}` is malformed")]
    Malformed {
        /// Name of the automaton.
        name: String,
        /// The violated invariant.
        #[source]
        source: MalformedDfa,
    },
    /// A string was to be tested before any automaton was loaded.
    #[error("no automaton has been selected yet")]
    NothingSelected,
}
