// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Failure kinds raised while turning patterns into regexes. Matching a
//! document never fails; a non-match is an empty capture result.

use thiserror::Error;

/// An atom that does not conform to the token grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized mini-language token {atom:?}")]
pub struct BadTokenError {
    /// The offending atom, verbatim.
    pub atom: String,
}

impl BadTokenError {
    pub(crate) fn new(atom: &str) -> Self {
        BadTokenError {
            atom: atom.to_owned(),
        }
    }
}

/// A line pattern that cannot be compiled to a regex fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineCompileError {
    #[error(transparent)]
    BadToken(#[from] BadTokenError),
    /// The atom lexer reached the end of the line inside a quoted literal.
    #[error("unterminated quote in line pattern {0:?}")]
    UnterminatedQuote(String),
}

/// A parser that cannot be assembled from its sections.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Head and tail are optional; a body is not.
    #[error("parser has no body section")]
    MissingBody,
    #[error(transparent)]
    Line(#[from] LineCompileError),
    /// The assembled pattern was rejected by the regex engine. Compiled
    /// fragments are escaped before assembly, so this surfacing outside of
    /// crate development is a bug.
    #[error("assembled pattern failed to compile: {0}")]
    Pattern(#[from] Box<fancy_regex::Error>),
}
