// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Exhaustive format/sign matching over a grid of representative literals,
//! both as bare lines and embedded mid-sentence.

use fancy_regex::Regex;
use numex::{LineCompiler, NumberFormat, Sign};
use strum::IntoEnumIterator;

/// A literal, the format codes whose shape admits it, and its polarity.
/// The format codes are the single-character spellings of [`NumberFormat`];
/// polarity feeds the sign axis (`Positive` takes `+`, `Negative` takes
/// `-`, `Any` takes both).
const CASES: &[(&str, &str, char)] = &[
    ("0", "ig", '+'),
    ("+0", "ig", '+'),
    ("-0", "ig", '-'),
    ("23", "ig", '+'),
    ("+23", "ig", '+'),
    ("-23", "ig", '-'),
    ("23.", "fdg", '+'),
    ("-23.", "fdg", '-'),
    (".54", "fdg", '+'),
    ("-.54", "fdg", '-'),
    ("+.54", "fdg", '+'),
    ("23.54", "fdg", '+'),
    ("+23.54", "fdg", '+'),
    ("-23.54", "fdg", '-'),
    ("2e4", "sg", '+'),
    ("+2e-4", "sg", '+'),
    ("-2e+4", "sg", '-'),
    ("-2.e4", "sdg", '-'),
    ("23.54e-2", "sdg", '+'),
    ("-.5E+3", "sdg", '-'),
    ("0.00000", "fdg", '+'),
    ("+3E6", "sg", '+'),
];

fn admitted(formats: &str, polarity: char, format: NumberFormat, sign: Sign) -> bool {
    let sign_ok = match sign {
        Sign::Positive => polarity == '+',
        Sign::Negative => polarity == '-',
        Sign::Any => true,
    };
    formats.contains(format.as_ref()) && sign_ok
}

fn single_number_regex(format: NumberFormat, sign: Sign, template: &str) -> Regex {
    let line = template.replace("{}", &format!("#!.{}{}", sign.as_ref(), format.as_ref()));
    let pattern = LineCompiler::new(true).compile(&line).unwrap();
    Regex::new(&pattern).unwrap()
}

fn captured<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .unwrap()
        .and_then(|caps| caps.name("g0"))
        .map(|m| m.as_str())
}

#[test]
fn bare_literal_grid() {
    for &(literal, formats, polarity) in CASES {
        for format in NumberFormat::iter() {
            for sign in Sign::iter() {
                let re = single_number_regex(format, sign, "{}");
                let expected = admitted(formats, polarity, format, sign);
                let got = captured(&re, literal);
                assert_eq!(
                    got.is_some(),
                    expected,
                    "{:?} against {:?}/{:?}",
                    literal,
                    format,
                    sign
                );
                if expected {
                    assert_eq!(got, Some(literal));
                }
            }
        }
    }
}

#[test]
fn in_sentence_grid() {
    for &(literal, formats, polarity) in CASES {
        let text = format!("This line contains the value {} with space delimit.", literal);
        for format in NumberFormat::iter() {
            for sign in Sign::iter() {
                let re = single_number_regex(format, sign, "~ {} ~");
                let expected = admitted(formats, polarity, format, sign);
                let got = captured(&re, &text);
                assert_eq!(
                    got.is_some(),
                    expected,
                    "{:?} in-sentence against {:?}/{:?}",
                    literal,
                    format,
                    sign
                );
                if expected {
                    assert_eq!(got, Some(literal));
                }
            }
        }
    }
}

/// A number glued to surrounding word characters is never matched, whatever
/// the requested shape.
#[test]
fn no_interior_matches() {
    for text in &["value12 close", "x23.54y", "take1 23here"] {
        for format in NumberFormat::iter() {
            let re = single_number_regex(format, Sign::Any, "~ {} ~");
            assert_eq!(captured(&re, text), None, "{:?} / {:?}", text, format);
        }
    }
}
