//! Inline color markup parser.
//!
//! Recognized tags:
//!
//! | Tag                 | Effect                                         |
//! |---------------------|------------------------------------------------|
//! | `<col=RRGGBB[AA]>`  | push a color                                   |
//! | `</col>`            | pop back to the previous color                 |
//! | `<br>`              | end the current line, start a new one          |
//! | `<lt>` / `<gt>`     | literal `<` / `>`                              |
//!
//! Anything else that looks like a tag is kept verbatim so user text is never
//! swallowed. The parser never fails.

use super::color::Rgba;
use super::line::ColorRun;

/// Parses `input` into one `Vec<ColorRun>` per `<br>`-separated line.
///
/// Always returns at least one line. A line may hold zero runs when it is
/// empty. Malformed `<col=...>` values re-push the color already in effect so
/// a later `</col>` stays balanced.
#[must_use]
pub fn parse(input: &str, base: Rgba) -> Vec<Vec<ColorRun>> {
    let mut parser = Parser::new(base);
    let mut rest = input;

    while let Some(open) = rest.find('<') {
        parser.text.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        // The tag ends at the first '>' unless another '<' comes first,
        // in which case this '<' is just text.
        let close = after.find('>');
        let reopen = after.find('<');
        match close {
            Some(end) if reopen.is_none_or(|r| r > end) => {
                let tag = &after[..end];
                if !parser.apply_tag(tag) {
                    parser.text.push('<');
                    parser.text.push_str(tag);
                    parser.text.push('>');
                }
                rest = &after[end + 1..];
            }
            _ => {
                parser.text.push('<');
                rest = after;
            }
        }
    }

    parser.text.push_str(rest);
    parser.finish()
}

/// Strips all recognized markup, returning the plain text of every line joined by `\n`.
#[must_use]
pub fn strip(input: &str) -> String {
    parse(input, Rgba::WHITE)
        .iter()
        .map(|runs| runs.iter().map(|run| run.text.as_str()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escapes `<` and `>` so arbitrary user text survives a round trip through [`parse`].
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("<lt>"),
            '>' => out.push_str("<gt>"),
            other => out.push(other),
        }
    }
    out
}

struct Parser {
    base: Rgba,
    stack: Vec<Rgba>,
    text: String,
    runs: Vec<ColorRun>,
    lines: Vec<Vec<ColorRun>>,
}

impl Parser {
    fn new(base: Rgba) -> Self {
        Self {
            base,
            stack: Vec::new(),
            text: String::new(),
            runs: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn current_color(&self) -> Rgba {
        self.stack.last().copied().unwrap_or(self.base)
    }

    fn flush_run(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let color = self.current_color();
        let text = std::mem::take(&mut self.text);
        match self.runs.last_mut() {
            Some(last) if last.color == color => last.text.push_str(&text),
            _ => self.runs.push(ColorRun { text, color }),
        }
    }

    /// Applies a recognized tag. Returns false for unknown tags.
    fn apply_tag(&mut self, tag: &str) -> bool {
        if tag.eq_ignore_ascii_case("lt") {
            self.text.push('<');
        } else if tag.eq_ignore_ascii_case("gt") {
            self.text.push('>');
        } else if tag.eq_ignore_ascii_case("br") {
            self.flush_run();
            self.lines.push(std::mem::take(&mut self.runs));
        } else if tag.eq_ignore_ascii_case("/col") {
            self.flush_run();
            self.stack.pop();
        } else if let Some(hex) = strip_prefix_ignore_case(tag, "col=") {
            self.flush_run();
            let color = Rgba::from_hex(hex).unwrap_or_else(|_| self.current_color());
            self.stack.push(color);
        } else {
            return false;
        }
        true
    }

    fn finish(mut self) -> Vec<Vec<ColorRun>> {
        self.flush_run();
        self.lines.push(self.runs);
        self.lines
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}
