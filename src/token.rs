// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The token mini-language. One whitespace-separated atom describes one
//! primitive match on a line: arbitrary content (`~`), a literal string
//! (`@…`), or a number (`#…`).
//!
//! The atom grammar, by leading character:
//!
//! ```text
//! ~  [!]
//! @  [x] [o] [!] <quantity> <literal…>
//! #  [x] [o] [!] <quantity> <sign> <format>
//! ```
//!
//! `!` captures the match as a named group, `x` removes the mandatory
//! whitespace after the match, and `o` makes that whitespace optional.
//! Quantity, sign, and format are the single-character codes of
//! [`Quantity`], [`Sign`], and [`NumberFormat`].

use std::fmt;
use std::str::FromStr;

use crate::error::BadTokenError;
use crate::patterns::number_pattern;

/// Prefix for generated capture group names. Groups are named `g0`, `g1`, …
/// in the order their tokens appear in the assembled pattern.
pub const GROUP_PREFIX: &str = "g";

/// Top-level category of a token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum ContentKind {
    /// Arbitrary content, including nothing at all.
    #[strum(serialize = "~")]
    Any,
    /// A literal string.
    #[strum(serialize = "@")]
    String,
    /// A numeric literal.
    #[strum(serialize = "#")]
    Number,
}

/// Literal shape accepted by a number token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum NumberFormat {
    /// Digits only.
    #[strum(serialize = "i")]
    Integer,
    /// Mandatory decimal point, no exponent.
    #[strum(serialize = "f")]
    Float,
    /// Mandatory exponent.
    #[strum(serialize = "s")]
    SciNot,
    /// Mandatory decimal point, optional exponent.
    #[strum(serialize = "d")]
    Decimal,
    /// Integer, float, or scientific notation.
    #[strum(serialize = "g")]
    General,
}

/// Signs accepted by a number token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum Sign {
    /// Optional leading `+`; includes zero.
    #[strum(serialize = "+")]
    Positive,
    /// Mandatory leading `-`; includes negative zero.
    #[strum(serialize = "-")]
    Negative,
    /// Either sign.
    #[strum(serialize = ".")]
    Any,
}

/// Repetition of the matched primitive.
///
/// `Optional` and `ZeroOrMore` are reserved codes: they parse, and currently
/// compile the same way as `Single`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
pub enum Quantity {
    #[strum(serialize = ".")]
    Single,
    #[strum(serialize = "?")]
    Optional,
    #[strum(serialize = "+")]
    OneOrMore,
    #[strum(serialize = "*")]
    ZeroOrMore,
}

/// Separator policy between a token's match and the following token.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpaceAfter {
    /// Mandatory horizontal whitespace (the default).
    Required,
    /// The `o` flag: whitespace may be present or absent.
    Optional,
    /// The `x` flag: the next match continues immediately.
    Prohibited,
}

/// Characters that must be escaped when a string literal is embedded in a
/// regex fragment.
const ESCAPED_IN_LITERAL: &str = r"[\^$.|?*+(){}";

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Any,
    Str {
        literal: String,
        quantity: Quantity,
    },
    Num {
        format: NumberFormat,
        sign: Sign,
        quantity: Quantity,
    },
}

/// One validated atom of the mini-language, with its derived regex fragment.
///
/// Tokens are immutable once parsed and are normally produced through
/// [`LineCompiler`](crate::line::LineCompiler), which also assigns group
/// ids to capturing tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    atom: String,
    kind: TokenKind,
    capture: bool,
    emit_group: bool,
    space_after: SpaceAfter,
}

/// Parse a single-character enum code.
fn char_code<T: FromStr>(c: char) -> Option<T> {
    T::from_str(c.encode_utf8(&mut [0u8; 4])).ok()
}

impl Token {
    /// Parse one atom. When `capture_groups` is false the atom is read
    /// exactly as usual, but [`Token::needs_group_id`] stays false and the
    /// rendered fragment never contains a group.
    pub fn parse(atom: &str, capture_groups: bool) -> Result<Token, BadTokenError> {
        let bad = || BadTokenError::new(atom);
        let mut rest = atom;
        let lead = rest.chars().next().ok_or_else(bad)?;
        rest = &rest[lead.len_utf8()..];

        let (kind, capture, space_after) = match lead {
            '~' => {
                let capture = match rest {
                    "" => false,
                    "!" => true,
                    _ => return Err(bad()),
                };
                (TokenKind::Any, capture, SpaceAfter::Prohibited)
            }
            '@' | '#' => {
                let mut space_after = SpaceAfter::Required;
                if let Some(r) = rest.strip_prefix('x') {
                    space_after = SpaceAfter::Prohibited;
                    rest = r;
                }
                if let Some(r) = rest.strip_prefix('o') {
                    // `x` already prohibits the separator; `o` cannot relax it.
                    if space_after == SpaceAfter::Required {
                        space_after = SpaceAfter::Optional;
                    }
                    rest = r;
                }
                let mut capture = false;
                if let Some(r) = rest.strip_prefix('!') {
                    capture = true;
                    rest = r;
                }

                let qty_char = rest.chars().next().ok_or_else(bad)?;
                let quantity: Quantity = char_code(qty_char).ok_or_else(bad)?;
                rest = &rest[qty_char.len_utf8()..];

                let kind = if lead == '@' {
                    if rest.is_empty() {
                        return Err(bad());
                    }
                    TokenKind::Str {
                        literal: rest.to_owned(),
                        quantity,
                    }
                } else {
                    let mut tail = rest.chars();
                    let (sign_char, fmt_char) = match (tail.next(), tail.next(), tail.next()) {
                        (Some(s), Some(f), None) => (s, f),
                        _ => return Err(bad()),
                    };
                    TokenKind::Num {
                        sign: char_code(sign_char).ok_or_else(bad)?,
                        format: char_code(fmt_char).ok_or_else(bad)?,
                        quantity,
                    }
                };
                (kind, capture, space_after)
            }
            _ => return Err(bad()),
        };

        Ok(Token {
            atom: atom.to_owned(),
            kind,
            capture,
            emit_group: capture_groups && capture,
            space_after,
        })
    }

    /// The atom this token was parsed from, verbatim.
    pub fn atom(&self) -> &str {
        &self.atom
    }

    pub fn kind(&self) -> ContentKind {
        match self.kind {
            TokenKind::Any => ContentKind::Any,
            TokenKind::Str { .. } => ContentKind::String,
            TokenKind::Num { .. } => ContentKind::Number,
        }
    }

    pub fn is_any(&self) -> bool {
        self.kind() == ContentKind::Any
    }

    pub fn is_str(&self) -> bool {
        self.kind() == ContentKind::String
    }

    pub fn is_num(&self) -> bool {
        self.kind() == ContentKind::Number
    }

    /// Whether the `!` flag was present on the atom.
    pub fn capture(&self) -> bool {
        self.capture
    }

    /// True iff the rendered fragment contains a named group awaiting an id.
    pub fn needs_group_id(&self) -> bool {
        self.emit_group
    }

    pub fn space_after(&self) -> SpaceAfter {
        self.space_after
    }

    /// Match quantity; absent for Any tokens.
    pub fn match_quantity(&self) -> Option<Quantity> {
        match self.kind {
            TokenKind::Any => None,
            TokenKind::Str { quantity, .. } | TokenKind::Num { quantity, .. } => Some(quantity),
        }
    }

    /// Number format; present iff the token matches a number.
    pub fn number_format(&self) -> Option<NumberFormat> {
        match self.kind {
            TokenKind::Num { format, .. } => Some(format),
            _ => None,
        }
    }

    /// Accepted signs; present iff the token matches a number.
    pub fn sign(&self) -> Option<Sign> {
        match self.kind {
            TokenKind::Num { sign, .. } => Some(sign),
            _ => None,
        }
    }

    /// The raw text to match; present iff the token matches a string.
    pub fn literal(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Str { literal, .. } => Some(literal),
            _ => None,
        }
    }

    /// The regex fragment for this token alone, without word boundaries.
    /// When the token captures and `group_id` is supplied, the fragment is
    /// enclosed in a named group `(?P<g{id}>…)`.
    pub fn pattern(&self, group_id: Option<usize>) -> String {
        let base = self.base_pattern();
        match (self.emit_group, group_id) {
            (true, Some(id)) => format!("(?P<{}{}>{})", GROUP_PREFIX, id, base),
            _ => base,
        }
    }

    fn base_pattern(&self) -> String {
        match &self.kind {
            TokenKind::Any => ".*?".to_owned(),
            TokenKind::Str { literal, quantity } => {
                let lit = escape_literal(literal);
                match quantity {
                    Quantity::OneOrMore => format!("(?:{})+", lit),
                    _ => lit,
                }
            }
            TokenKind::Num {
                format,
                sign,
                quantity,
            } => {
                let num = number_pattern(*format, *sign);
                match quantity {
                    // Repetitions of a number are themselves separated by
                    // horizontal whitespace; the capture spans the whole run.
                    Quantity::OneOrMore => format!(r"{0}(?:[ \t]+{0})*", num),
                    _ => num.to_owned(),
                }
            }
        }
    }
}

impl FromStr for Token {
    type Err = BadTokenError;

    fn from_str(atom: &str) -> Result<Self, Self::Err> {
        Token::parse(atom, true)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.atom)
    }
}

fn escape_literal(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for c in literal.chars() {
        if ESCAPED_IN_LITERAL.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
