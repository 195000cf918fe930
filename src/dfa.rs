use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    alphabet::{is_single_symbol, Origin},
    Alphabet, MalformedDfa, Map,
};

/// The transition table of an automaton description, mapping a state to a map from symbols to
/// target states.
pub type TransitionTable = BTreeMap<String, BTreeMap<String, String>>;

/// The JSON shape of an automaton description, as it is read from and written to files.
///
/// ```json
/// {
///   "states": ["q0", "q1"],
///   "alphabet": ["0", "1"],
///   "startState": "q0",
///   "acceptStates": ["q1"],
///   "transitions": { "q0": { "0": "q0", "1": "q1" }, "q1": { "0": "q0", "1": "q1" } }
/// }
/// ```
/// The `alphabet` field is optional, as is `transitions`. A definition is not checked in any way,
/// use [`Dfa::try_from`] to obtain a validated automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DfaDefinition {
    /// State identifiers, their order determines the layout.
    pub states: Vec<String>,
    /// Explicit alphabet, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<Vec<String>>,
    /// Identifier of the start state.
    pub start_state: String,
    /// Identifiers of the accepting states.
    pub accept_states: Vec<String>,
    /// Transition table, missing entries are undefined transitions.
    #[serde(default)]
    pub transitions: TransitionTable,
}

/// A single transition of a [`Dfa`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Transition<'a> {
    /// State the transition leaves.
    pub source: &'a str,
    /// Symbol that triggers it.
    pub symbol: &'a str,
    /// State the transition leads to.
    pub target: &'a str,
}

impl Transition<'_> {
    /// Returns true if source and target coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A deterministic finite automaton consists of a finite set of states, a finite set of input
/// symbols, a (partial) transition function, a start state, and a set of accepting states.
///
/// Values of this type can only be obtained through [`Dfa::try_from`] on a [`DfaDefinition`], which
/// checks that
/// - no state is listed twice,
/// - the start state and all accepting states are states,
/// - every transition leaves and enters a state,
/// - every symbol is a single character that belongs to the [`Alphabet`].
///
/// A `Dfa` is immutable, deriving a new automaton (see [`crate::Complement`]) always yields an
/// independent copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    states: Vec<String>,
    index: Map<String, usize>,
    alphabet: Alphabet,
    start: String,
    accepting: BTreeSet<String>,
    transitions: TransitionTable,
}

impl Dfa {
    /// The states in the order in which they were declared.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Position of `state` in the declaration order.
    pub fn state_index(&self, state: &str) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// The effective alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The start state.
    pub fn start_state(&self) -> &str {
        &self.start
    }

    /// The accepting states, sorted.
    pub fn accept_states(&self) -> &BTreeSet<String> {
        &self.accepting
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the target of the transition from `state` on `symbol`, or `None` if that transition
    /// is undefined.
    pub fn successor(&self, state: &str, symbol: &str) -> Option<&str> {
        self.transitions
            .get(state)
            .and_then(|edges| edges.get(symbol))
            .map(String::as_str)
    }

    /// Iterates over all transitions, grouped by source state in declaration order and sorted by
    /// symbol within each group.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<'_>> + '_ {
        self.states.iter().flat_map(move |source| {
            self.transitions
                .get(source)
                .into_iter()
                .flatten()
                .map(move |(symbol, target)| Transition {
                    source,
                    symbol,
                    target,
                })
        })
    }

    /// Returns an automaton that differs from `self` only in its set of accepting states.
    pub(crate) fn with_accepting(&self, accepting: BTreeSet<String>) -> Self {
        Self {
            accepting,
            ..self.clone()
        }
    }

    /// Serializes the automaton into the JSON format it is loaded from.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&DfaDefinition::from(self))
    }
}

impl TryFrom<DfaDefinition> for Dfa {
    type Error = MalformedDfa;

    fn try_from(def: DfaDefinition) -> Result<Self, Self::Error> {
        let mut index = Map::default();
        for (i, state) in def.states.iter().enumerate() {
            if index.insert(state.clone(), i).is_some() {
                return Err(MalformedDfa::DuplicateState(state.clone()));
            }
        }

        if !index.contains_key(&def.start_state) {
            return Err(MalformedDfa::UnknownStartState(def.start_state));
        }
        if let Some(q) = def.accept_states.iter().find(|q| !index.contains_key(*q)) {
            return Err(MalformedDfa::UnknownAcceptState(q.clone()));
        }

        let explicit = match def.alphabet {
            Some(symbols) => {
                if let Some(sym) = symbols.iter().find(|s| !is_single_symbol(s)) {
                    return Err(MalformedDfa::InvalidSymbol(sym.clone()));
                }
                Some(Alphabet::explicit(symbols))
            }
            None => None,
        };

        for (source, edges) in &def.transitions {
            if !index.contains_key(source) {
                return Err(MalformedDfa::UnknownSource(source.clone()));
            }
            for (symbol, target) in edges {
                if !is_single_symbol(symbol) {
                    return Err(MalformedDfa::InvalidSymbol(symbol.clone()));
                }
                if let Some(alphabet) = &explicit {
                    if !alphabet.contains(symbol) {
                        return Err(MalformedDfa::SymbolOutsideAlphabet {
                            source_state: source.clone(),
                            symbol: symbol.clone(),
                        });
                    }
                }
                if !index.contains_key(target) {
                    return Err(MalformedDfa::UnknownTarget {
                        source_state: source.clone(),
                        symbol: symbol.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        let alphabet = explicit.unwrap_or_else(|| {
            Alphabet::derived(def.transitions.values().flat_map(|edges| edges.keys().cloned()))
        });

        Ok(Self {
            states: def.states,
            index,
            alphabet,
            start: def.start_state,
            accepting: def.accept_states.into_iter().collect(),
            transitions: def.transitions,
        })
    }
}

impl From<&Dfa> for DfaDefinition {
    fn from(dfa: &Dfa) -> Self {
        Self {
            states: dfa.states.clone(),
            alphabet: match dfa.alphabet.origin() {
                Origin::Explicit => Some(dfa.alphabet.symbols().map(String::from).collect()),
                Origin::Derived => None,
            },
            start_state: dfa.start.clone(),
            accept_states: dfa
                .states
                .iter()
                .filter(|q| dfa.accepting.contains(*q))
                .cloned()
                .collect(),
            transitions: dfa.transitions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tests::{definition, ends_with_one, reaches_q1_on_a};

    #[test]
    fn parse_json_without_alphabet() {
        let json = r#"{
            "states": ["q0", "q1"],
            "startState": "q0",
            "acceptStates": ["q1"],
            "transitions": { "q0": { "a": "q1" }, "q1": { "a": "q1", "b": "q0" } }
        }"#;
        let def: DfaDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.alphabet, None);
        let dfa = Dfa::try_from(def).unwrap();
        assert_eq!(dfa.alphabet().origin(), Origin::Derived);
        assert_eq!(dfa.alphabet().symbols().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(dfa.successor("q1", "b"), Some("q0"));
        assert_eq!(dfa.successor("q0", "b"), None);
    }

    #[test]
    fn explicit_alphabet_wins() {
        let dfa = Dfa::try_from(definition(
            &["q0"],
            Some(&["a", "b", "c"][..]),
            "q0",
            &[],
            &[("q0", "a", "q0")],
        ))
        .unwrap();
        assert_eq!(dfa.alphabet().origin(), Origin::Explicit);
        assert_eq!(dfa.alphabet().size(), 3);
        assert!(dfa.alphabet().contains("c"));
    }

    #[test]
    fn transitions_are_ordered() {
        let dfa = ends_with_one();
        let listed: Vec<_> = dfa
            .transitions()
            .map(|t| (t.source, t.symbol, t.target))
            .collect();
        assert_eq!(
            listed,
            vec![
                ("q0", "0", "q0"),
                ("q0", "1", "q1"),
                ("q1", "0", "q0"),
                ("q1", "1", "q1"),
            ]
        );
        assert_eq!(dfa.transitions().filter(|t| t.is_self_loop()).count(), 2);
    }

    #[test]
    fn invariant_violations() {
        let cases = [
            (
                definition(&["q0", "q0"], None, "q0", &[], &[]),
                MalformedDfa::DuplicateState("q0".into()),
            ),
            (
                definition(&["q0"], None, "q9", &[], &[]),
                MalformedDfa::UnknownStartState("q9".into()),
            ),
            (
                definition(&["q0"], None, "q0", &["q1"], &[]),
                MalformedDfa::UnknownAcceptState("q1".into()),
            ),
            (
                definition(&["q0"], None, "q0", &[], &[("q1", "a", "q0")]),
                MalformedDfa::UnknownSource("q1".into()),
            ),
            (
                definition(&["q0"], None, "q0", &[], &[("q0", "a", "q1")]),
                MalformedDfa::UnknownTarget {
                    source_state: "q0".into(),
                    symbol: "a".into(),
                    target: "q1".into(),
                },
            ),
            (
                definition(&["q0"], None, "q0", &[], &[("q0", "ab", "q0")]),
                MalformedDfa::InvalidSymbol("ab".into()),
            ),
            (
                definition(&["q0"], Some(&["a", ""][..]), "q0", &[], &[]),
                MalformedDfa::InvalidSymbol("".into()),
            ),
            (
                definition(&["q0"], Some(&["a"][..]), "q0", &[], &[("q0", "b", "q0")]),
                MalformedDfa::SymbolOutsideAlphabet {
                    source_state: "q0".into(),
                    symbol: "b".into(),
                },
            ),
            (
                definition(&[], None, "q0", &[], &[]),
                MalformedDfa::UnknownStartState("q0".into()),
            ),
        ];
        for (def, expected) in cases {
            assert_eq!(Dfa::try_from(def), Err(expected));
        }
    }

    #[test]
    fn json_output_matches_input_format() {
        let dfa = reaches_q1_on_a();
        let json = dfa.to_json().unwrap();
        let def: DfaDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(def, DfaDefinition::from(&dfa));
        assert!(!json.contains("alphabet"));
        assert!(json.contains("\"startState\": \"q0\""));
        assert!(ends_with_one().to_json().unwrap().contains("\"alphabet\""));
    }
}
