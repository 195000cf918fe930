use std::collections::BTreeSet;

use itertools::Itertools;

/// Where the symbols of an [`Alphabet`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The automaton description listed its alphabet explicitly.
    Explicit,
    /// No alphabet was given, so it was collected from the symbols used by the transitions.
    Derived,
}

/// The effective alphabet of a [`crate::Dfa`], i.e. the set of symbols that an input string may
/// consist of.
///
/// If an automaton description carries an explicit `alphabet` field, that set is used as is. If the
/// field is absent, the alphabet is the set of all symbols that appear on some transition. Either
/// way, the symbols are kept sorted, which gives every consumer (matcher, layout, table output) the
/// same deterministic order.
///
/// Every symbol is a single character, as input strings are read one character at a time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: BTreeSet<String>,
    origin: Origin,
}

impl Alphabet {
    /// Creates an alphabet from an explicitly given collection of symbols. Duplicates are dropped.
    pub fn explicit<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            origin: Origin::Explicit,
        }
    }

    /// Collects the alphabet from the symbols that label transitions.
    pub fn derived<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            origin: Origin::Derived,
        }
    }

    /// Returns whether the alphabet was listed explicitly or derived from transitions.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns true if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Iterates over the symbols in lexicographic order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    /// Number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if there are no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Finds the first symbol of `input` that is not part of the alphabet, together with its
    /// position (counted in symbols, not bytes).
    pub fn first_violation<'a>(&self, input: &'a str) -> Option<(usize, &'a str)> {
        symbols_of(input)
            .enumerate()
            .find(|(_, sym)| !self.contains(sym))
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.symbols.iter().join(", "))
    }
}

/// Splits an input string into its symbols, which are the individual characters.
pub fn symbols_of(input: &str) -> impl Iterator<Item = &str> + '_ {
    input
        .char_indices()
        .map(move |(i, c)| &input[i..i + c.len_utf8()])
}

/// Checks whether `symbol` can ever be produced by [`symbols_of`].
pub(crate) fn is_single_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitting_input() {
        assert_eq!(symbols_of("abä1").collect_vec(), vec!["a", "b", "ä", "1"]);
        assert_eq!(symbols_of("").count(), 0);
    }

    #[test]
    fn violations() {
        let alphabet = Alphabet::derived(["a", "b"]);
        assert_eq!(alphabet.first_violation("abba"), None);
        assert_eq!(alphabet.first_violation("abca"), Some((2, "c")));
        assert_eq!(alphabet.first_violation(""), None);
        assert_eq!(alphabet.to_string(), "{a, b}");
    }

    #[test]
    fn single_symbols() {
        assert!(is_single_symbol("a"));
        assert!(is_single_symbol("ß"));
        assert!(!is_single_symbol(""));
        assert!(!is_single_symbol("10"));
    }
}
