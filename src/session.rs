//! Glue between a front end and the automata: selecting an automaton draws it and its complement,
//! testing a string evaluates it on both.
//!
//! Loading is split into [`Session::begin`] and [`Session::complete`] so that the text can be
//! fetched elsewhere. Every request gets a fresh id and only the completion of the most recent
//! request is applied, so a slow response to an older selection can never overwrite a newer one.
use std::fmt::Display;

use tracing::{debug, info, warn};

use crate::{
    Acceptor, Canvas, Complement, Dfa, Error, LoadError, Loader, Outcome, Renderer, Source, Style,
};

/// Identifies a load that was started with [`Session::begin`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Request {
    id: u64,
    name: String,
}

impl Request {
    /// Name of the requested automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sequence number of the request, later requests have larger ids.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// What happened to a completed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The automaton was loaded and drawn.
    Applied,
    /// A newer request was issued in the meantime, the result was dropped.
    Stale,
}

/// An automaton together with its complement, always replaced as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    /// Name under which the automaton was loaded.
    pub name: String,
    /// The automaton.
    pub dfa: Dfa,
    /// Its complement.
    pub complement: Dfa,
}

/// A status line for one automaton, as shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    /// Human readable verdict.
    pub message: String,
    /// Color to show the message in.
    pub color: String,
}

/// Result of testing a string on the current automaton and its complement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    /// The tested string.
    pub input: String,
    /// Outcome on the automaton.
    pub original: Outcome,
    /// Outcome on the complement.
    pub complement: Outcome,
}

impl Report {
    /// Status of the automaton and of its complement, colored according to `style`.
    pub fn statuses(&self, style: &Style) -> (Status, Status) {
        (
            status(&self.input, &self.original, style),
            status(&self.input, &self.complement, style),
        )
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "original:   {}", self.original)?;
        write!(f, "complement: {}", self.complement)
    }
}

fn status(input: &str, outcome: &Outcome, style: &Style) -> Status {
    match outcome {
        Outcome::Accepted { .. } => Status {
            message: format!("\"{input}\" is accepted"),
            color: style.accept_color.clone(),
        },
        Outcome::Rejected(_) => Status {
            message: format!("\"{input}\" is rejected"),
            color: style.reject_color.clone(),
        },
        Outcome::AlphabetError(violation) => Status {
            message: violation.to_string(),
            color: style.reject_color.clone(),
        },
    }
}

/// Keeps the currently selected automaton and draws it, and its complement, onto two canvases.
///
/// Everything the session works with is handed in on construction: where automata come from,
/// how they are drawn and the two surfaces to draw on.
pub struct Session<S, C> {
    loader: Loader<S>,
    renderer: Renderer,
    original: C,
    complement: C,
    current: Option<Loaded>,
    issued: u64,
}

impl<S: Source, C: Canvas> Session<S, C> {
    /// Creates a session that has not loaded anything yet.
    pub fn new(loader: Loader<S>, renderer: Renderer, original: C, complement: C) -> Self {
        Self {
            loader,
            renderer,
            original,
            complement,
            current: None,
            issued: 0,
        }
    }

    /// Starts loading the automaton called `name`. Any earlier request that has not completed yet
    /// becomes stale.
    pub fn begin(&mut self, name: &str) -> Request {
        self.issued += 1;
        debug!("request {} for `{name}`", self.issued);
        Request {
            id: self.issued,
            name: name.to_string(),
        }
    }

    /// Hands in the fetched text for `request`. If the request is still the most recent one, the
    /// text is parsed, the complement is derived and both are drawn. If anything fails, the
    /// previously loaded automata and drawings stay as they are.
    pub fn complete(
        &mut self,
        request: Request,
        fetched: Result<String, LoadError>,
    ) -> Result<Completion, Error> {
        if request.id != self.issued {
            warn!(
                "dropping response for `{}` (request {}), request {} is newer",
                request.name, request.id, self.issued
            );
            return Ok(Completion::Stale);
        }
        let dfa = Loader::<S>::parse(&request.name, &fetched?)?;
        let complement = dfa.complement();

        self.renderer.render(&mut self.original, &dfa);
        self.renderer.render(&mut self.complement, &complement);
        info!("showing `{}` and its complement", request.name);
        self.current = Some(Loaded {
            name: request.name,
            dfa,
            complement,
        });
        Ok(Completion::Applied)
    }

    /// Loads and draws the automaton called `name` right away.
    pub fn select(&mut self, name: &str) -> Result<&Loaded, Error> {
        let request = self.begin(name);
        let fetched = self.loader.fetch(name);
        self.complete(request, fetched)?;
        self.current.as_ref().ok_or(Error::NothingSelected)
    }

    /// Evaluates `input` on the current automaton and its complement.
    pub fn test(&self, input: &str) -> Result<Report, Error> {
        let loaded = self.current.as_ref().ok_or(Error::NothingSelected)?;
        let report = Report {
            input: input.to_string(),
            original: loaded.dfa.evaluate(input),
            complement: loaded.complement.evaluate(input),
        };
        debug!("tested {input:?} on `{}`:\n{report}", loaded.name);
        Ok(report)
    }

    /// The currently shown automata, if any.
    pub fn current(&self) -> Option<&Loaded> {
        self.current.as_ref()
    }

    /// The surface the automaton is drawn on.
    pub fn original_canvas(&self) -> &C {
        &self.original
    }

    /// The surface the complement is drawn on.
    pub fn complement_canvas(&self) -> &C {
        &self.complement
    }

    /// The renderer in use.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Consumes the session and returns both surfaces.
    pub fn into_canvases(self) -> (C, C) {
        (self.original, self.complement)
    }
}
