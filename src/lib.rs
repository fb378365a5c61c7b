// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Extraction of structured numerical data from semi-regular plain text:
//! scientific program output, tabular dumps, log files.
//!
//! The shape of the region of interest is described in a compact
//! mini-language, one *line pattern* per line of input, each a
//! whitespace-separated run of atoms ([`Token`]). The [`LineCompiler`]
//! translates a line pattern into an anchored regex fragment, and a
//! [`Parser`] frames a repeating body with an optional head and tail,
//! nesting parsers when blocks themselves repeat, and returns the captured
//! substrings grouped by block, line, and value.
//!
//! ```
//! use numex::Parser;
//!
//! let report = "\
//! $gradient
//!    1    0.0021   -0.0073    0.0004
//!    2   -0.0016    0.0058   -0.0021
//! ";
//! let parser = Parser::builder()
//!     .head("@.$gradient")
//!     .body("#.+i #!+.f")
//!     .build()?;
//! let blocks = parser.capture_body(report);
//! assert_eq!(blocks.len(), 1);
//! # Ok::<(), numex::BuildError>(())
//! ```
//!
//! Patterns, compiled lines, and parsers are immutable after construction
//! and safe to share across threads; matching allocates only the result.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate strum_macros;

pub mod error;
pub mod line;
pub mod parser;
pub mod patterns;
pub mod token;

pub use self::error::{BadTokenError, BuildError, LineCompileError};
pub use self::line::LineCompiler;
pub use self::parser::{Body, Captures, Parser, ParserBuilder, Section};
pub use self::patterns::number_pattern;
pub use self::token::{
    ContentKind, NumberFormat, Quantity, Sign, SpaceAfter, Token, GROUP_PREFIX,
};
