use tracing::debug;

use crate::Dfa;

/// Automata that can be complemented, i.e. turned into an automaton accepting exactly those
/// words over the same alphabet that `self` rejects.
pub trait Complement {
    /// Computes the complement of `self`.
    fn complement(&self) -> Self;
}

impl Complement for Dfa {
    /// Swaps accepting and non-accepting states. States, alphabet, start state and transitions are
    /// copied unchanged, the result shares nothing with `self`.
    ///
    /// Since undefined transitions reject in both automata, a word that runs into one is rejected by
    /// the complement as well.
    fn complement(&self) -> Self {
        let accepting = self
            .states()
            .iter()
            .filter(|q| !self.is_accepting(q))
            .cloned()
            .collect();
        let out = self.with_accepting(accepting);
        debug!(
            "complemented automaton with {} accepting states into one with {}",
            self.accept_states().len(),
            out.accept_states().len()
        );
        out
    }
}
