//! Bounded scrollback buffer with a per-line wrap cache.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::line::{ChannelColors, DisplayRow, LabelPolicy, LineId, StoredLine};
use super::metrics::FontMetrics;
use super::wrap::wrap;

/// Default number of lines kept in the scrollback.
pub const DEFAULT_CAPACITY: usize = 40;

/// Wrapped rows of one line, valid for exactly one width.
#[derive(Debug, Clone)]
struct CachedWrap {
    width: i32,
    rows: Vec<DisplayRow>,
}

/// Insertion-ordered buffer of stored lines, oldest first.
///
/// Pushing past `capacity` evicts the oldest line. Wrapped layout is kept in
/// a side cache keyed by line id and width, so [`wrap`] itself stays a pure
/// function.
#[derive(Debug, Clone)]
pub struct ScrollbackStore {
    lines: VecDeque<StoredLine>,
    capacity: usize,
    next_id: u64,
    wraps: HashMap<LineId, CachedWrap>,
}

impl Default for ScrollbackStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ScrollbackStore {
    /// Creates an empty store. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
            wraps: HashMap::with_capacity(capacity + 1),
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a line, evicting the oldest ones beyond capacity.
    ///
    /// Returns the id assigned to the new line.
    pub fn push(&mut self, mut line: StoredLine) -> LineId {
        let id = LineId(self.next_id);
        self.next_id += 1;
        line.id = id;
        self.lines.push_back(line);

        while self.lines.len() > self.capacity {
            if let Some(evicted) = self.lines.pop_front() {
                self.wraps.remove(&evicted.id);
                debug!(line = evicted.id.0, "evicted oldest scrollback line");
            }
        }
        id
    }

    /// Shrinks or grows the capacity, evicting oldest lines as needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.lines.len() > self.capacity {
            if let Some(evicted) = self.lines.pop_front() {
                self.wraps.remove(&evicted.id);
            }
        }
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.wraps.clear();
    }

    /// Drops every cached wrap so the next frame lays everything out again.
    pub fn mark_all_dirty(&mut self) {
        if !self.wraps.is_empty() {
            debug!(lines = self.wraps.len(), "invalidated all wrap caches");
        }
        self.wraps.clear();
    }

    /// Recomputes every line's prefix and timestamp label, then invalidates layout.
    pub fn apply_policy(&mut self, policy: &LabelPolicy, colors: &dyn ChannelColors) {
        for line in &mut self.lines {
            line.apply_policy(policy, colors);
        }
        self.mark_all_dirty();
    }

    /// Stored lines, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &StoredLine> + ExactSizeIterator {
        self.lines.iter()
    }

    #[must_use]
    pub fn get(&self, id: LineId) -> Option<&StoredLine> {
        // Ids are assigned in increasing order, so the deque is sorted by id.
        self.lines
            .binary_search_by_key(&id, StoredLine::id)
            .ok()
            .and_then(|index| self.lines.get(index))
    }

    /// Wraps every line whose cache is missing or was built for another width.
    pub fn ensure_wrapped<M>(&mut self, metrics: &M, width: i32)
    where
        M: FontMetrics + ?Sized,
    {
        for line in &self.lines {
            let fresh = self
                .wraps
                .get(&line.id)
                .is_some_and(|cached| cached.width == width);
            if !fresh {
                trace!(line = line.id.0, width, "wrap cache miss");
                self.wraps.insert(
                    line.id,
                    CachedWrap {
                        width,
                        rows: wrap(line, metrics, width),
                    },
                );
            }
        }
    }

    /// Cached rows of a line, if it has been wrapped.
    #[must_use]
    pub fn rows(&self, id: LineId) -> Option<&[DisplayRow]> {
        self.wraps.get(&id).map(|cached| cached.rows.as_slice())
    }

    /// Number of cached rows of a line; zero when not wrapped.
    #[must_use]
    pub fn row_count(&self, id: LineId) -> usize {
        self.rows(id).map_or(0, <[DisplayRow]>::len)
    }

    /// Sum of cached row counts over every line.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.lines.iter().map(|line| self.row_count(line.id)).sum()
    }

    /// Lines paired with their cached rows, oldest first.
    ///
    /// Lines without a populated cache are skipped.
    pub fn wrapped(&self) -> impl Iterator<Item = (&StoredLine, &[DisplayRow])> {
        self.lines
            .iter()
            .filter_map(|line| self.rows(line.id).map(|rows| (line, rows)))
    }
}
