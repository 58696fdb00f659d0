//! Per-document highlighting cache
//!
//! The scanner only ever sees one line. This module plays the host side
//! of that contract: it remembers which state each line was classified
//! with, and after an edit re-classifies lines until the carried state
//! matches what was recorded before.

use std::ops::Range;

use tracing::{debug, warn};

use super::highlighter::{classify_line, HighlightOptions, LineTokens};
use super::state::ScannerState;

/// One classified line and the state it was classified from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLine {
    pub initial_state: ScannerState,
    pub line: LineTokens,
}

impl CachedLine {
    pub fn end_state(&self) -> ScannerState {
        self.line.end_state
    }
}

/// Per-document highlighting cache
#[derive(Debug, Clone, Default)]
pub struct HighlightCache {
    options: HighlightOptions,
    /// Cached result per line (None = not computed)
    entries: Vec<Option<CachedLine>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new(options: HighlightOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Change classifier options; everything cached becomes stale
    pub fn set_options(&mut self, options: HighlightOptions) {
        self.options = options;
        self.invalidate_from(0);
    }

    /// Number of lines tracked
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached entry for a line, if it has been computed
    pub fn cached(&self, idx: usize) -> Option<&CachedLine> {
        self.entries.get(idx).and_then(|e| e.as_ref())
    }

    /// Recorded end state of a line, if it has been computed
    pub fn end_state(&self, idx: usize) -> Option<ScannerState> {
        self.cached(idx).map(CachedLine::end_state)
    }

    /// State a line was classified from, if it has been computed
    pub fn initial_state(&self, idx: usize) -> Option<ScannerState> {
        self.cached(idx).map(|e| e.initial_state)
    }

    /// Throw away cached results from a line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        for entry in self.entries.iter_mut().skip(line) {
            *entry = None;
        }
    }

    /// Classify every line from scratch
    pub fn rehighlight_all<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.entries.clear();
        self.entries.resize(lines.len(), None);
        self.cascade(lines, 0, lines.len());
    }

    /// Classified tokens for a line, computing it and any unknown lines
    /// above it first
    pub fn line<S: AsRef<str>>(&mut self, lines: &[S], idx: usize) -> Option<&LineTokens> {
        if idx >= lines.len() {
            return None;
        }
        self.ensure_size(lines.len());
        self.ensure_up_to(lines, idx + 1);
        self.cached(idx).map(|e| &e.line)
    }

    /// Update the cache after an edit.
    ///
    /// `lines` is the document after the edit and `changed` the range of
    /// lines in it whose text differs from before. Lines outside `changed`
    /// keep their cached results, shifted when the line count changed.
    /// Returns the range of lines that were re-classified, which extends
    /// past `changed` for as long as the carried state differs.
    pub fn edit<S: AsRef<str>>(&mut self, lines: &[S], changed: Range<usize>) -> Range<usize> {
        let old_len = self.entries.len();
        // Old lines `changed.start..old_end` were replaced by the new `changed` lines
        let old_end = changed
            .end
            .checked_add(old_len)
            .and_then(|n| n.checked_sub(lines.len()))
            .filter(|&end| {
                changed.start <= changed.end
                    && changed.end <= lines.len()
                    && (changed.start..=old_len).contains(&end)
            });
        let Some(old_end) = old_end else {
            warn!(
                ?changed,
                old_len,
                new_len = lines.len(),
                "edit range does not fit cache, rebuilding"
            );
            self.rehighlight_all(lines);
            return 0..lines.len();
        };

        let fresh = changed.len();
        self.entries
            .splice(changed.start..old_end, std::iter::repeat_with(|| None).take(fresh));

        self.ensure_up_to(lines, changed.start);
        self.cascade(lines, changed.start, changed.end)
    }

    fn ensure_size(&mut self, line_count: usize) {
        if self.entries.len() < line_count {
            self.entries.resize(line_count, None);
        }
    }

    /// Make sure every line before `end` has a result
    fn ensure_up_to<S: AsRef<str>>(&mut self, lines: &[S], end: usize) {
        if let Some(first) = self.entries[..end].iter().position(Option::is_none) {
            self.cascade(lines, first, end);
        }
    }

    fn state_before(&self, idx: usize) -> ScannerState {
        match idx.checked_sub(1) {
            Some(prev) => self.end_state(prev).unwrap_or_default(),
            None => ScannerState::Default,
        }
    }

    /// Classify lines from `from`, at least up to `must_reach`, then
    /// continue while recorded lines were classified from a different
    /// state than the one now carried into them
    fn cascade<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        from: usize,
        must_reach: usize,
    ) -> Range<usize> {
        let mut state = self.state_before(from);
        let mut idx = from;

        while idx < lines.len() {
            if idx >= must_reach {
                match &self.entries[idx] {
                    Some(entry) if entry.initial_state == state => break,
                    None => break,
                    Some(_) => {}
                }
            }

            let line = classify_line(lines[idx].as_ref(), state, &self.options);
            let initial_state = state;
            state = line.end_state;
            self.entries[idx] = Some(CachedLine { initial_state, line });
            idx += 1;
        }

        if idx > must_reach {
            debug!(from, must_reach, to = idx, "state change cascaded past edit");
        }
        from..idx
    }
}
