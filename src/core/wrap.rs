//! Word-wrap layout engine.
//!
//! Turns a [`StoredLine`] into fixed-height [`DisplayRow`]s no wider than a
//! pixel budget. Layout is run by run: every run's text is split into
//! `(word, single trailing whitespace)` pairs, words are placed greedily, and
//! words wider than the whole budget are broken with a binary search over
//! their character prefixes.
//!
//! The output depends only on the line, the metrics and the width, so it is
//! safe to cache per `(line, width)`.

use super::color::Rgba;
use super::line::{ColorRun, DisplayRow, StoredLine};
use super::metrics::FontMetrics;

/// Wraps a stored line, decorations included, to `max_width` pixels.
///
/// Always returns at least one row; an empty line yields one empty row.
/// Every row is at most `max_width` wide unless it holds a single glyph
/// that is wider than `max_width` on its own.
#[must_use]
pub fn wrap<M>(line: &StoredLine, metrics: &M, max_width: i32) -> Vec<DisplayRow>
where
    M: FontMetrics + ?Sized,
{
    wrap_runs(line.layout_runs(), metrics, max_width)
}

/// Wraps an arbitrary sequence of runs. See [`wrap`].
#[must_use]
pub fn wrap_runs<'a, I, M>(runs: I, metrics: &M, max_width: i32) -> Vec<DisplayRow>
where
    I: IntoIterator<Item = &'a ColorRun>,
    M: FontMetrics + ?Sized,
{
    let mut rows = RowBuilder::new(max_width);
    for run in runs {
        let mut rest = run.text.as_str();
        while !rest.is_empty() {
            let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (word, tail) = rest.split_at(word_end);
            let ws_len = tail.chars().next().map_or(0, char::len_utf8);
            let (ws, next) = tail.split_at(ws_len);

            place_word(&mut rows, word, run.color, metrics);
            place_whitespace(&mut rows, ws, run.color, metrics);
            rest = next;
        }
    }
    rows.finish()
}

/// Pixel width of a laid-out row.
#[must_use]
pub fn row_width<M>(row: &DisplayRow, metrics: &M) -> i32
where
    M: FontMetrics + ?Sized,
{
    row.runs.iter().map(|run| metrics.string_width(&run.text)).sum()
}

fn place_word<M>(rows: &mut RowBuilder, word: &str, color: Rgba, metrics: &M)
where
    M: FontMetrics + ?Sized,
{
    if word.is_empty() {
        return;
    }

    let width = metrics.string_width(word);
    if width <= rows.max_width {
        if !rows.is_empty() && rows.width + width > rows.max_width {
            rows.flush();
        }
        rows.push(word, color, width);
        return;
    }

    // Wider than the whole row: break it wherever it stops fitting.
    let mut remaining = word;
    while !remaining.is_empty() {
        let mut take = fit_prefix(remaining, metrics, rows.max_width - rows.width);
        if take == 0 {
            if !rows.is_empty() {
                rows.flush();
                continue;
            }
            // A single glyph wider than the row still has to go somewhere.
            take = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
        }
        let (head, tail) = remaining.split_at(take);
        rows.push(head, color, metrics.string_width(head));
        remaining = tail;
    }
}

fn place_whitespace<M>(rows: &mut RowBuilder, ws: &str, color: Rgba, metrics: &M)
where
    M: FontMetrics + ?Sized,
{
    if ws.is_empty() {
        return;
    }
    let width = metrics.string_width(ws);
    if !rows.is_empty() && rows.width + width > rows.max_width {
        rows.flush();
    }
    rows.push(ws, color, width);
}

/// Byte length of the longest char prefix of `text` that fits in `available` pixels.
fn fit_prefix<M>(text: &str, metrics: &M, available: i32) -> usize
where
    M: FontMetrics + ?Sized,
{
    if available <= 0 {
        return 0;
    }

    // ends[k] is the byte offset after k chars.
    let ends: Vec<usize> = std::iter::once(0)
        .chain(text.char_indices().map(|(i, ch)| i + ch.len_utf8()))
        .collect();

    let (mut lo, mut hi) = (0, ends.len() - 1);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if metrics.string_width(&text[..ends[mid]]) <= available {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    ends[lo]
}

struct RowBuilder {
    max_width: i32,
    rows: Vec<DisplayRow>,
    current: Vec<ColorRun>,
    width: i32,
}

impl RowBuilder {
    fn new(max_width: i32) -> Self {
        Self {
            max_width,
            rows: Vec::new(),
            current: Vec::new(),
            width: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    fn push(&mut self, text: &str, color: Rgba, width: i32) {
        if text.is_empty() {
            return;
        }
        match self.current.last_mut() {
            Some(last) if last.color == color => last.text.push_str(text),
            _ => self.current.push(ColorRun::new(text, color)),
        }
        self.width += width;
    }

    fn flush(&mut self) {
        self.rows.push(DisplayRow {
            runs: std::mem::take(&mut self.current),
        });
        self.width = 0;
    }

    fn finish(mut self) -> Vec<DisplayRow> {
        if !self.current.is_empty() || self.rows.is_empty() {
            self.flush();
        }
        self.rows
    }
}
