// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Head/body/tail composition over multi-line documents.
//!
//! A [`Parser`] frames a repeating *body* with an optional *head* above and
//! an optional *tail* below. Head and tail are sequences of line patterns;
//! the body is either a sequence of line patterns matched over consecutive
//! lines, or a whole nested parser matched over repeated blocks. Assembly
//! happens once, at construction; matching is read-only and a parser can be
//! shared freely across threads.

use fancy_regex::Regex;

use crate::error::{BuildError, LineCompileError};
use crate::line::LineCompiler;
use crate::token::GROUP_PREFIX;

const HEAD: &str = "head";
const BODY: &str = "body";
const TAIL: &str = "tail";

/// One or more line patterns making up a head, a tail, or a flat body.
///
/// The empty string is a deliberate pattern: it matches a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    lines: Vec<String>,
}

impl Section {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl From<&str> for Section {
    fn from(line: &str) -> Self {
        Section {
            lines: vec![line.to_owned()],
        }
    }
}

impl From<String> for Section {
    fn from(line: String) -> Self {
        Section { lines: vec![line] }
    }
}

impl From<Vec<String>> for Section {
    fn from(lines: Vec<String>) -> Self {
        Section { lines }
    }
}

impl From<Vec<&str>> for Section {
    fn from(lines: Vec<&str>) -> Self {
        Section {
            lines: lines.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Section {
    fn from(lines: [&str; N]) -> Self {
        Section {
            lines: lines.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// The required middle of a parser.
#[derive(Debug, Clone)]
pub enum Body {
    /// Line patterns matched over consecutive lines, the whole sequence
    /// repeating one or more times.
    Lines(Section),
    /// A nested parser whose full window repeats one or more times.
    Nested(Box<Parser>),
}

impl From<&str> for Body {
    fn from(line: &str) -> Self {
        Body::Lines(line.into())
    }
}

impl From<String> for Body {
    fn from(line: String) -> Self {
        Body::Lines(line.into())
    }
}

impl From<Vec<String>> for Body {
    fn from(lines: Vec<String>) -> Self {
        Body::Lines(lines.into())
    }
}

impl From<Vec<&str>> for Body {
    fn from(lines: Vec<&str>) -> Self {
        Body::Lines(lines.into())
    }
}

impl<const N: usize> From<[&str; N]> for Body {
    fn from(lines: [&str; N]) -> Self {
        Body::Lines(lines.into())
    }
}

impl From<Section> for Body {
    fn from(section: Section) -> Self {
        Body::Lines(section)
    }
}

impl From<Parser> for Body {
    fn from(parser: Parser) -> Self {
        Body::Nested(Box::new(parser))
    }
}

/// Captured values from one head/body/tail window.
///
/// The nesting depth mirrors the parser: a flat body yields [`Rows`], and
/// each nested parser level wraps the result in one more [`Blocks`].
///
/// [`Rows`]: Captures::Rows
/// [`Blocks`]: Captures::Blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captures {
    /// One row per body match: the captured groups' text in source order.
    /// A one-or-more capture is split on whitespace into one value per
    /// word; every other capture is one value, interior whitespace intact.
    Rows(Vec<Vec<String>>),
    /// One entry per inner block of a nested body.
    Blocks(Vec<Captures>),
}

#[derive(Debug, Clone)]
struct CompiledSection {
    section: Section,
    /// Fragment without token captures, embedded in the window pattern.
    fragment: String,
    /// The same lines with token captures, applied to a matched region.
    capture_re: Regex,
    /// Per group id: whether the group's token is one-or-more-quantified,
    /// so its text is a whitespace-separated run rather than one value.
    run_groups: Vec<bool>,
}

fn join_lines(
    section: &Section,
    capture_groups: bool,
) -> Result<(String, Vec<bool>), LineCompileError> {
    let mut lc = LineCompiler::new(capture_groups);
    let mut fragments = Vec::with_capacity(section.lines.len());
    for line in &section.lines {
        fragments.push(lc.compile(line)?);
    }
    Ok((fragments.join(r"\n"), lc.run_groups().to_vec()))
}

fn compile_section(section: Section) -> Result<CompiledSection, BuildError> {
    let (fragment, _) = join_lines(&section, false)?;
    let (capture_pattern, run_groups) = join_lines(&section, true)?;
    let capture_re = Regex::new(&capture_pattern).map_err(|e| BuildError::Pattern(Box::new(e)))?;
    Ok(CompiledSection {
        section,
        fragment,
        capture_re,
        run_groups,
    })
}

#[derive(Debug, Clone)]
enum CompiledBody {
    Lines(CompiledSection),
    Nested(Box<Parser>),
}

/// Assembles [`Parser`] values; head and tail stay optional.
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    head: Option<Section>,
    body: Option<Body>,
    tail: Option<Section>,
}

impl ParserBuilder {
    pub fn head(mut self, head: impl Into<Section>) -> Self {
        self.head = Some(head.into());
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn tail(mut self, tail: impl Into<Section>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Compile every section and assemble the window pattern.
    pub fn build(self) -> Result<Parser, BuildError> {
        let body = self.body.ok_or(BuildError::MissingBody)?;
        Parser::assemble(self.head, body, self.tail)
    }
}

/// A compiled head/body/tail extractor.
///
/// ```
/// use numex::{Captures, Parser};
///
/// let text = "energies:\n  1   -12.5\n  2    -7.25\n";
/// let parser = Parser::builder()
///     .head("@.energies:")
///     .body("#.+i #!..f")
///     .build()?;
/// assert_eq!(
///     parser.capture_body(text),
///     vec![Captures::Rows(vec![
///         vec!["-12.5".to_string()],
///         vec!["-7.25".to_string()],
///     ])]
/// );
/// # Ok::<(), numex::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    head: Option<CompiledSection>,
    body: CompiledBody,
    tail: Option<CompiledSection>,
    /// Window pattern with the `head`/`body`/`tail` section groups.
    pattern: String,
    /// The same pattern with anonymous sections, for embedding in an outer
    /// parser.
    plain: String,
    window_re: Regex,
}

impl Parser {
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    fn assemble(
        head: Option<Section>,
        body: Body,
        tail: Option<Section>,
    ) -> Result<Self, BuildError> {
        let head = head.map(compile_section).transpose()?;
        let tail = tail.map(compile_section).transpose()?;
        let body = match body {
            Body::Lines(section) => CompiledBody::Lines(compile_section(section)?),
            Body::Nested(parser) => CompiledBody::Nested(parser),
        };

        let pattern = assemble_pattern(&head, &body, &tail, true);
        let plain = assemble_pattern(&head, &body, &tail, false);
        debug!("assembled window pattern: {}", pattern);
        let window_re = Regex::new(&pattern).map_err(|e| BuildError::Pattern(Box::new(e)))?;

        Ok(Parser {
            head,
            body,
            tail,
            pattern,
            plain,
            window_re,
        })
    }

    /// The assembled regex for one head/body/tail window. The three regions
    /// are exposed as the named groups `head`, `body`, and `tail`; token
    /// captures are left to the `capture_*` entry points.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The head's line patterns, if a head was configured.
    pub fn head(&self) -> Option<&Section> {
        self.head.as_ref().map(|c| &c.section)
    }

    pub fn tail(&self) -> Option<&Section> {
        self.tail.as_ref().map(|c| &c.section)
    }

    /// Captured values from the head of the first matched window, in group
    /// order; one-or-more captures are whitespace-split into one value per
    /// word. Empty when there is no head, no match, or no captures.
    pub fn capture_head(&self, text: &str) -> Vec<String> {
        self.capture_edge(self.head.as_ref(), HEAD, text)
    }

    /// Captured values from the tail of the first matched window; see
    /// [`Parser::capture_head`].
    pub fn capture_tail(&self, text: &str) -> Vec<String> {
        self.capture_edge(self.tail.as_ref(), TAIL, text)
    }

    fn capture_edge(
        &self,
        section: Option<&CompiledSection>,
        name: &str,
        text: &str,
    ) -> Vec<String> {
        let section = match section {
            Some(section) => section,
            None => return Vec::new(),
        };
        let window = match self.window_re.captures(text) {
            Ok(Some(window)) => window,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("window search aborted: {}", err);
                return Vec::new();
            }
        };
        let region = match window.name(name) {
            Some(m) => m.as_str(),
            None => return Vec::new(),
        };
        match section.capture_re.captures(region) {
            Ok(Some(caps)) => collect_values(&caps, &section.run_groups),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("section search aborted: {}", err);
                Vec::new()
            }
        }
    }

    /// Captured values from the body of every matched window, one
    /// [`Captures`] per window. A document with no matching window yields
    /// the empty vector; match-time failures are never errors.
    pub fn capture_body(&self, text: &str) -> Vec<Captures> {
        let mut windows = Vec::new();
        for window in self.window_re.captures_iter(text) {
            let window = match window {
                Ok(window) => window,
                Err(err) => {
                    warn!("window search aborted: {}", err);
                    break;
                }
            };
            let region = match window.name(BODY) {
                Some(m) => m.as_str(),
                None => continue,
            };
            windows.push(match &self.body {
                CompiledBody::Lines(section) => Captures::Rows(capture_rows(section, region)),
                CompiledBody::Nested(inner) => Captures::Blocks(inner.capture_blocks(region)),
            });
        }
        windows
    }

    /// Run this parser over the body region of an outer parser, one entry
    /// per window of ours found there.
    fn capture_blocks(&self, region: &str) -> Vec<Captures> {
        let mut blocks = Vec::new();
        for window in self.window_re.find_iter(region) {
            match window {
                Ok(window) => blocks.extend(self.capture_body(window.as_str())),
                Err(err) => {
                    warn!("nested window search aborted: {}", err);
                    break;
                }
            }
        }
        blocks
    }
}

fn assemble_pattern(
    head: &Option<CompiledSection>,
    body: &CompiledBody,
    tail: &Option<CompiledSection>,
    sections: bool,
) -> String {
    let group = |name: &str, inner: &str| {
        if sections {
            format!("(?P<{}>{})", name, inner)
        } else {
            format!("(?:{})", inner)
        }
    };

    let mut pattern = String::new();
    if let Some(head) = head {
        pattern.push_str(&group(HEAD, &head.fragment));
        pattern.push_str(r"\n+");
    }
    let unit = match body {
        CompiledBody::Lines(section) => format!("(?:{})", section.fragment),
        CompiledBody::Nested(inner) => format!("(?:{})", inner.plain),
    };
    pattern.push_str(&group(BODY, &format!(r"{0}(?:\n+{0})*", unit)));
    if let Some(tail) = tail {
        pattern.push_str(r"\n+");
        pattern.push_str(&group(TAIL, &tail.fragment));
    }
    pattern
}

fn capture_rows(section: &CompiledSection, region: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for caps in section.capture_re.captures_iter(region) {
        match caps {
            Ok(caps) => rows.push(collect_values(&caps, &section.run_groups)),
            Err(err) => {
                warn!("body row search aborted: {}", err);
                break;
            }
        }
    }
    rows
}

/// Flatten a section match: every group's text in id order. A one-or-more
/// capture spans a whitespace-separated run and contributes one value per
/// word; any other capture is one value, interior whitespace intact.
fn collect_values(caps: &fancy_regex::Captures<'_>, run_groups: &[bool]) -> Vec<String> {
    let mut values = Vec::new();
    for (id, is_run) in run_groups.iter().enumerate() {
        let name = format!("{}{}", GROUP_PREFIX, id);
        if let Some(m) = caps.name(&name) {
            if *is_run {
                values.extend(m.as_str().split_whitespace().map(str::to_owned));
            } else {
                values.push(m.as_str().to_owned());
            }
        }
    }
    values
}

#[cfg(test)]
mod test {
    use super::*;

    fn rows(rows: &[&[&str]]) -> Captures {
        Captures::Rows(
            rows.iter()
                .map(|row| row.iter().map(|v| (*v).to_owned()).collect())
                .collect(),
        )
    }

    #[test]
    fn body_is_required() {
        assert!(matches!(
            Parser::builder().head("~").build(),
            Err(BuildError::MissingBody)
        ));
    }

    #[test]
    fn bad_token_fails_the_build() {
        assert!(matches!(
            Parser::builder().body("~ nonsense").build(),
            Err(BuildError::Line(LineCompileError::BadToken(_)))
        ));
    }

    #[test]
    fn empty_body_matches_only_a_blank_line() {
        let parser = Parser::builder().body("").build().unwrap();
        let re = Regex::new(parser.pattern()).unwrap();
        assert!(re.is_match("").unwrap());
        assert!(!re.is_match("3").unwrap());
    }

    #[test]
    fn window_pattern_has_section_groups_only() {
        let parser = Parser::builder()
            .head("#!++i")
            .body("#!+.f")
            .tail("~!")
            .build()
            .unwrap();
        let pattern = parser.pattern();
        for name in &["(?P<head>", "(?P<body>", "(?P<tail>"] {
            assert!(pattern.contains(name), "{} missing from {}", name, pattern);
        }
        assert!(!pattern.contains("(?P<g"));
    }

    #[test]
    fn missing_sections_capture_nothing() {
        let parser = Parser::builder().body("#!..i").build().unwrap();
        assert!(parser.head().is_none());
        assert_eq!(parser.capture_head("5"), Vec::<String>::new());
        assert_eq!(parser.capture_tail("5"), Vec::<String>::new());
        assert_eq!(parser.capture_body("5"), vec![rows(&[&["5"]])]);
    }

    #[test]
    fn non_matching_document_is_empty_not_an_error() {
        let parser = Parser::builder()
            .head("@.results")
            .body("#!..i")
            .build()
            .unwrap();
        assert_eq!(parser.capture_head("no such section"), Vec::<String>::new());
        assert_eq!(parser.capture_body("no such section"), Vec::<Captures>::new());
    }

    #[test]
    fn blank_lines_between_body_repetitions() {
        let parser = Parser::builder().body("#!.+i").build().unwrap();
        assert_eq!(
            parser.capture_body("1\n\n2\n\n\n4"),
            vec![rows(&[&["1"], &["2"], &["4"]])]
        );
    }

    #[test]
    fn multi_line_body_with_deliberate_blanks() {
        let parser = Parser::builder()
            .body(["", "#!.+i", "", "#!.+i", "", "", "#!.+i"])
            .build()
            .unwrap();
        assert_eq!(
            parser.capture_body("\n1\n\n2\n\n\n4"),
            vec![rows(&[&["1", "2", "4"]])]
        );
    }
}
