// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Precomputed regex fragments for numeric literals, and the word-boundary
//! lookarounds that keep matches from starting or ending inside a larger
//! word.

use fnv::FnvHashMap;
use strum::IntoEnumIterator;

use crate::token::{NumberFormat, Sign};

/// Characters treated as word-interior on either side of a non-Any match.
/// Sign, decimal point, and exponent characters count as interior, so the
/// integer reading of `+.543` is rejected outright instead of matching
/// `543`.
pub(crate) const WORD_CHARS: &str = "a-zA-Z0-9+.-";

/// Require a word boundary on the left of `pattern`.
pub(crate) fn wordify_open(pattern: &str) -> String {
    format!("(?<![{}]){}", WORD_CHARS, pattern)
}

/// Require a word boundary on the right of `pattern`.
pub(crate) fn wordify_close(pattern: &str) -> String {
    format!("{}(?![{}])", pattern, WORD_CHARS)
}

fn sign_fragment(sign: Sign) -> &'static str {
    match sign {
        Sign::Positive => "[+]?",
        Sign::Negative => "-",
        Sign::Any => "[+-]?",
    }
}

fn magnitude_fragment(format: NumberFormat) -> &'static str {
    match format {
        NumberFormat::Integer => r"\d+",
        NumberFormat::Float => r"(?:\d+\.\d*|\.\d+)",
        NumberFormat::SciNot => r"(?:\d+\.?\d*|\.\d+)[eE][+-]?\d+",
        NumberFormat::Decimal => r"(?:\d+\.\d*|\.\d+)(?:[eE][+-]?\d+)?",
        NumberFormat::General => r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?",
    }
}

lazy_static! {
    static ref NUMBER_PATTERNS: FnvHashMap<(NumberFormat, Sign), String> = {
        let mut map = FnvHashMap::default();
        for format in NumberFormat::iter() {
            for sign in Sign::iter() {
                let pattern = format!("{}{}", sign_fragment(sign), magnitude_fragment(format));
                map.insert((format, sign), pattern);
            }
        }
        map
    };
}

/// The fragment matching exactly one numeric literal of the given shape.
///
/// Fragments group only with `(?:…)`; a capture, when requested, is applied
/// around the whole fragment by the token layer. They carry no boundary
/// assumptions of their own; the line compiler adds the lookarounds.
pub fn number_pattern(format: NumberFormat, sign: Sign) -> &'static str {
    &NUMBER_PATTERNS[&(format, sign)]
}
