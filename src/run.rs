//! Running input strings through a [`Dfa`].
use std::fmt::Display;

use itertools::Itertools;
use tracing::trace;

use crate::{alphabet::symbols_of, Dfa};

/// An escape prefix for an automaton is a triple `(u, q, a)`, where `u` is the sequence of
/// `(state, symbol)` pairs that could be read, `q` is the state that `u` leads to and `a` is a
/// symbol such that no transition is defined for `a` in `q`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EscapePrefix {
    /// The prefix on which a run was possible, consists of state symbol pairs.
    pub prefix: Vec<(String, String)>,
    /// The state at which the automaton is left.
    pub state: String,
    /// The symbol on which the automaton is left.
    pub symbol: String,
    /// Position of `symbol` in the input.
    pub position: usize,
}

impl Display for EscapePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} then no transition from {} on `{}`",
            self.prefix
                .iter()
                .map(|(q, a)| format!("{q} -{a}->"))
                .join(" "),
            self.state,
            self.symbol
        )
    }
}

/// Why an input was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The whole input was read but the reached state is not accepting.
    NonAccepting {
        /// The reached state.
        state: String,
    },
    /// Some transition on the way was undefined.
    Escaped(EscapePrefix),
}

/// An input symbol that is not part of the alphabet of the automaton.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlphabetViolation {
    /// The offending symbol.
    pub symbol: String,
    /// Its position in the input.
    pub position: usize,
}

impl Display for AlphabetViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "symbol `{}` at position {} is not in the alphabet",
            self.symbol, self.position
        )
    }
}

/// Result of evaluating an input string on an automaton. All three variants are regular outcomes,
/// an alphabet violation is deliberately distinct from a rejection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The input was read completely and ended in an accepting state.
    Accepted {
        /// The reached state.
        state: String,
    },
    /// The input is rejected.
    Rejected(Rejection),
    /// The input contains a symbol outside of the alphabet.
    AlphabetError(AlphabetViolation),
}

impl Outcome {
    /// Returns true if the input was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    /// Returns true if the input was rejected (but consisted of alphabet symbols only).
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// Returns true if the input was not over the alphabet.
    pub fn is_alphabet_error(&self) -> bool {
        matches!(self, Outcome::AlphabetError(_))
    }

    /// Returns true if the run hit an undefined transition.
    pub fn escaped(&self) -> bool {
        matches!(self, Outcome::Rejected(Rejection::Escaped(_)))
    }

    /// The state the run ended in, if the input could be read completely.
    pub fn reached(&self) -> Option<&str> {
        match self {
            Outcome::Accepted { state } | Outcome::Rejected(Rejection::NonAccepting { state }) => {
                Some(state.as_str())
            }
            _ => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Accepted { state } => write!(f, "accepted in {state}"),
            Outcome::Rejected(Rejection::NonAccepting { state }) => {
                write!(f, "rejected, {state} is not accepting")
            }
            Outcome::Rejected(Rejection::Escaped(escape)) => write!(f, "rejected, {escape}"),
            Outcome::AlphabetError(violation) => write!(f, "{violation}"),
        }
    }
}

/// Abstracts the evaluation of finite input strings.
pub trait Acceptor {
    /// Evaluates `input`, see [`Outcome`].
    fn evaluate(&self, input: &str) -> Outcome;

    /// Returns true if `input` is accepted.
    fn accepts(&self, input: &str) -> bool {
        self.evaluate(input).is_accepted()
    }
}

impl Acceptor for Dfa {
    /// First checks that every symbol of `input` belongs to the alphabet, then runs the input from
    /// the start state. Reaching an undefined transition rejects immediately.
    fn evaluate(&self, input: &str) -> Outcome {
        if let Some((position, symbol)) = self.alphabet().first_violation(input) {
            trace!("symbol `{symbol}` at {position} is not in {}", self.alphabet());
            return Outcome::AlphabetError(AlphabetViolation {
                symbol: symbol.to_string(),
                position,
            });
        }

        let mut state = self.start_state();
        let mut prefix = Vec::new();
        for (position, symbol) in symbols_of(input).enumerate() {
            match self.successor(state, symbol) {
                Some(next) => {
                    trace!("{state} -{symbol}-> {next}");
                    prefix.push((state.to_string(), symbol.to_string()));
                    state = next;
                }
                None => {
                    trace!("no transition from {state} on `{symbol}`");
                    return Outcome::Rejected(Rejection::Escaped(EscapePrefix {
                        prefix,
                        state: state.to_string(),
                        symbol: symbol.to_string(),
                        position,
                    }));
                }
            }
        }

        if self.is_accepting(state) {
            Outcome::Accepted {
                state: state.to_string(),
            }
        } else {
            Outcome::Rejected(Rejection::NonAccepting {
                state: state.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        tests::{ends_with_one, one_mod_three_times_a, reaches_q1_on_a, stuck_in_q1},
        Complement,
    };

    #[test]
    fn accepts_after_reading_a() {
        let dfa = reaches_q1_on_a();
        assert_eq!(dfa.evaluate("a"), Outcome::Accepted { state: "q1".into() });
        assert_eq!(
            dfa.evaluate(""),
            Outcome::Rejected(Rejection::NonAccepting { state: "q0".into() })
        );
        assert_eq!(
            dfa.evaluate("b"),
            Outcome::AlphabetError(AlphabetViolation {
                symbol: "b".into(),
                position: 0
            })
        );
    }

    #[test]
    fn complement_of_reaches_q1() {
        let comp = reaches_q1_on_a().complement();
        assert!(comp.evaluate("a").is_rejected());
        assert!(comp.accepts(""));
        assert!(comp.evaluate("ab").is_alphabet_error());
    }

    #[test]
    #[traced_test]
    fn undefined_transition_rejects() {
        let dfa = stuck_in_q1();
        let outcome = dfa.evaluate("aa");
        assert_eq!(
            outcome,
            Outcome::Rejected(Rejection::Escaped(EscapePrefix {
                prefix: vec![("q0".into(), "a".into())],
                state: "q1".into(),
                symbol: "a".into(),
                position: 1,
            }))
        );
        assert!(outcome.escaped());
        assert_eq!(outcome.reached(), None);
        assert!(logs_contain("no transition from q1"));
    }

    #[test]
    fn alphabet_is_checked_before_running() {
        // `c` comes after an undefined transition, still the violation wins
        let dfa = stuck_in_q1();
        assert!(dfa.evaluate("aac").is_alphabet_error());
        // an explicit alphabet may contain symbols without transitions
        let dfa = ends_with_one();
        assert_eq!(dfa.evaluate("0112").to_string(), "symbol `2` at position 3 is not in the alphabet");
    }

    #[test]
    fn counting_modulo_three() {
        let dfa = one_mod_three_times_a();
        for (word, accepted) in [
            ("a", true),
            ("ba", true),
            ("bab", true),
            ("aa", false),
            ("aaaa", true),
            ("", false),
        ] {
            assert_eq!(dfa.accepts(word), accepted, "on {word:?}");
        }
        assert_eq!(dfa.evaluate("aab").reached(), Some("q2"));
    }
}
