//! Obtaining automata by name.
//!
//! A [`Source`] hands out the raw JSON text for a name, the [`Loader`] turns that text into a
//! validated [`Dfa`]. Keeping the two apart allows fetching the text somewhere else (a different
//! thread, a network request) and only handing the result to [`Loader::parse`] once it arrived.
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::{Dfa, DfaDefinition, Error, LoadError, Map};

/// Something that can produce the JSON description of an automaton for a given name.
pub trait Source {
    /// Fetches the raw description for `name`.
    fn fetch(&self, name: &str) -> Result<String, LoadError>;
}

impl<S: Source + ?Sized> Source for &S {
    fn fetch(&self, name: &str) -> Result<String, LoadError> {
        (**self).fetch(name)
    }
}

/// Reads `<name>.json` from a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Creates a source reading files from `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// The directory files are looked up in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file that would be read for `name`.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, LoadError> {
        check_name(name)?;
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl Source for Directory {
    fn fetch(&self, name: &str) -> Result<String, LoadError> {
        let path = self.path_for(name)?;
        trace!("reading automaton `{name}` from {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| LoadError::Unreachable {
            name: name.to_string(),
            path,
            source,
        })
    }
}

/// Keeps descriptions in memory, mostly useful for embedding a fixed set of automata and for tests.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    entries: Map<String, String>,
}

impl InMemory {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the description for `name`.
    pub fn insert<N: Into<String>, J: Into<String>>(&mut self, name: N, json: J) -> &mut Self {
        self.entries.insert(name.into(), json.into());
        self
    }
}

impl<N: Into<String>, J: Into<String>> FromIterator<(N, J)> for InMemory {
    fn from_iter<T: IntoIterator<Item = (N, J)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(n, j)| (n.into(), j.into()))
                .collect(),
        }
    }
}

impl Source for InMemory {
    fn fetch(&self, name: &str) -> Result<String, LoadError> {
        check_name(name)?;
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::Missing(name.to_string()))
    }
}

fn check_name(name: &str) -> Result<(), LoadError> {
    let escapes = name.contains(['/', '\\']) || name == "." || name == "..";
    if name.is_empty() || escapes {
        Err(LoadError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}

/// Loads automata from a [`Source`], validating every description before handing it out.
#[derive(Clone, Debug)]
pub struct Loader<S> {
    source: S,
}

impl<S: Source> Loader<S> {
    /// Creates a loader on top of `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Gives access to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the raw description for `name` without interpreting it.
    pub fn fetch(&self, name: &str) -> Result<String, LoadError> {
        self.source.fetch(name)
    }

    /// Fetches, parses and validates the automaton called `name`.
    pub fn load(&self, name: &str) -> Result<Dfa, Error> {
        let json = self.fetch(name)?;
        Self::parse(name, &json)
    }

    /// Parses and validates an already fetched description.
    pub fn parse(name: &str, json: &str) -> Result<Dfa, Error> {
        let def: DfaDefinition =
            serde_json::from_str(json).map_err(|source| LoadError::InvalidJson {
                name: name.to_string(),
                source,
            })?;
        let dfa = Dfa::try_from(def).map_err(|source| Error::Malformed {
            name: name.to_string(),
            source,
        })?;
        debug!(
            "loaded automaton `{name}` with {} states over {}",
            dfa.size(),
            dfa.alphabet()
        );
        Ok(dfa)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tracing_test::traced_test;

    use super::*;
    use crate::MalformedDfa;

    const ENDS_WITH_ONE: &str = r#"{
        "states": ["q0", "q1"],
        "alphabet": ["0", "1"],
        "startState": "q0",
        "acceptStates": ["q1"],
        "transitions": {
            "q0": { "0": "q0", "1": "q1" },
            "q1": { "0": "q0", "1": "q1" }
        }
    }"#;

    #[test]
    #[traced_test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ends-with-one.json"), ENDS_WITH_ONE).unwrap();
        let loader = Loader::new(Directory::new(dir.path()));

        let dfa = loader.load("ends-with-one").unwrap();
        assert_eq!(dfa.size(), 2);
        assert_eq!(dfa.start_state(), "q0");
        assert!(logs_contain("loaded automaton `ends-with-one`"));

        assert!(matches!(
            loader.load("absent"),
            Err(Error::Load(LoadError::Unreachable { .. }))
        ));
    }

    #[test]
    fn names_cannot_escape() {
        let loader = Loader::new(Directory::new("."));
        for name in ["", "..", "../secret", "a/b", "a\\b"] {
            assert!(
                matches!(loader.load(name), Err(Error::Load(LoadError::InvalidName(_)))),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn invalid_json_is_a_load_error() {
        let source: InMemory = [("broken", "{ \"states\": [")].into_iter().collect();
        let loader = Loader::new(source);
        assert!(matches!(
            loader.load("broken"),
            Err(Error::Load(LoadError::InvalidJson { .. }))
        ));
        assert!(matches!(
            loader.load("other"),
            Err(Error::Load(LoadError::Missing(_)))
        ));
    }

    #[test]
    fn malformed_is_reported_separately() {
        let mut source = InMemory::new();
        source.insert(
            "bad",
            r#"{"states":["q0"],"startState":"q0","acceptStates":[],"transitions":{"q0":{"a":"q7"}}}"#,
        );
        match Loader::new(&source).load("bad") {
            Err(Error::Malformed { name, source }) => {
                assert_eq!(name, "bad");
                assert!(matches!(source, MalformedDfa::UnknownTarget { .. }));
            }
            other => panic!("expected malformed automaton, got {other:?}"),
        }
    }
}
