// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Compiling one line pattern (an ordered run of atoms) into a regex
//! fragment that matches exactly one line of input.

use crate::error::LineCompileError;
use crate::patterns::{wordify_close, wordify_open};
use crate::token::{Quantity, SpaceAfter, Token};

/// Zero-width anchor at the start of a line (start of input or just after a
/// newline), then any leading horizontal whitespace.
const LINE_OPEN: &str = r"(^|(?<=\n))[ \t]*";

/// Trailing horizontal whitespace, then a zero-width anchor at the end of a
/// line (end of input or just before a newline).
const LINE_CLOSE: &str = r"[ \t]*($|(?=\n))";

/// Split a line pattern into atoms. Shell-style quoting is honored so a
/// string literal can contain spaces; a quote may open anywhere in an atom
/// and must be closed before the end of the line.
pub(crate) fn split_atoms(line: &str) -> Result<Vec<String>, LineCompileError> {
    let mut atoms = Vec::new();
    let mut current = String::new();
    let mut in_atom = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '\'' || c == '"' => {
                quote = Some(c);
                in_atom = true;
            }
            None if c.is_whitespace() => {
                if in_atom {
                    atoms.push(std::mem::take(&mut current));
                    in_atom = false;
                }
            }
            None => {
                current.push(c);
                in_atom = true;
            }
        }
    }
    if quote.is_some() {
        return Err(LineCompileError::UnterminatedQuote(line.to_owned()));
    }
    if in_atom {
        atoms.push(current);
    }
    Ok(atoms)
}

/// Compiles line patterns into anchored regex fragments, assigning capture
/// group names in source order.
///
/// One compiler can be threaded across several lines so that group ids stay
/// unique within a multi-line section:
///
/// ```
/// use numex::LineCompiler;
///
/// let mut lc = LineCompiler::new(true);
/// let first = lc.compile("~ @!.one: #!.+i")?; // g0, g1
/// let second = lc.compile("~ @!.two: #!.-s")?; // g2, g3
/// assert!(first.contains("(?P<g0>") && second.contains("(?P<g2>"));
/// # Ok::<(), numex::LineCompileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LineCompiler {
    capture_groups: bool,
    next_group: usize,
    run_groups: Vec<bool>,
}

impl LineCompiler {
    pub fn new(capture_groups: bool) -> Self {
        LineCompiler {
            capture_groups,
            next_group: 0,
            run_groups: Vec::new(),
        }
    }

    /// Start group numbering at `group_id` instead of zero.
    pub fn starting_at(mut self, group_id: usize) -> Self {
        self.next_group = group_id;
        self
    }

    /// The id the next capturing token will receive.
    pub fn next_group(&self) -> usize {
        self.next_group
    }

    /// For each group allocated so far, in allocation order: whether its
    /// token is one-or-more-quantified, so the group's text is a
    /// whitespace-separated run of values rather than a single value.
    pub fn run_groups(&self) -> &[bool] {
        &self.run_groups
    }

    /// Compile one line pattern. The empty pattern compiles to the
    /// blank-line fragment: anchors and optional horizontal whitespace only.
    pub fn compile(&mut self, line: &str) -> Result<String, LineCompileError> {
        let tokens = split_atoms(line)?
            .iter()
            .map(|atom| Token::parse(atom, self.capture_groups))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pattern = String::from(LINE_OPEN);
        // Set while the previous token suppressed its trailing separator, in
        // which case the next match continues without a left boundary.
        let mut prior_no_space = false;

        for (i, token) in tokens.iter().enumerate() {
            let mut fragment = if token.needs_group_id() {
                let id = self.next_group;
                self.next_group += 1;
                self.run_groups
                    .push(token.match_quantity() == Some(Quantity::OneOrMore));
                token.pattern(Some(id))
            } else {
                token.pattern(None)
            };

            if token.is_any() {
                prior_no_space = false;
            } else {
                if !prior_no_space {
                    fragment = wordify_open(&fragment);
                }
                if token.space_after() == SpaceAfter::Required {
                    fragment = wordify_close(&fragment);
                    prior_no_space = false;
                } else {
                    prior_no_space = true;
                }
            }
            pattern.push_str(&fragment);

            if i + 1 < tokens.len() {
                match token.space_after() {
                    SpaceAfter::Required => pattern.push_str(r"[ \t]+"),
                    SpaceAfter::Optional => pattern.push_str(r"[ \t]*"),
                    SpaceAfter::Prohibited => {}
                }
            }
        }

        pattern.push_str(LINE_CLOSE);
        Ok(pattern)
    }
}
