//! Text edits for auto-update fixes.
//!
//! Edits are collected in a [`ChangeTracker`] and applied from the end of the
//! file to the start so earlier offsets stay valid.

use std::fmt;

use tyexpect_ir::Span;

/// Replace `span` with `new_text`. An empty span inserts.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

impl TextEdit {
    /// Create a replacement edit.
    pub fn replace(span: Span, new_text: impl Into<String>) -> Self {
        TextEdit {
            span,
            new_text: new_text.into(),
        }
    }

    /// Create an insertion edit at a specific position.
    pub fn insert(at: u32, text: impl Into<String>) -> Self {
        Self::replace(Span::point(at), text)
    }

    /// An edit that leaves the text unchanged.
    pub fn is_noop(&self) -> bool {
        self.span.is_empty() && self.new_text.is_empty()
    }
}

/// Two edits touch overlapping text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditConflict {
    pub first: TextEdit,
    pub second: TextEdit,
}

impl fmt::Display for EditConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edits overlap: {:?} and {:?}",
            self.first.span, self.second.span
        )
    }
}

impl std::error::Error for EditConflict {}

/// Collects text edits and applies them in one pass.
#[derive(Clone, Debug, Default)]
pub struct ChangeTracker {
    edits: Vec<TextEdit>,
}

impl ChangeTracker {
    /// Create a new empty change tracker.
    pub fn new() -> Self {
        ChangeTracker { edits: Vec::new() }
    }

    /// Add an edit. No-op edits are dropped.
    pub fn push(&mut self, edit: TextEdit) {
        if !edit.is_noop() {
            self.edits.push(edit);
        }
    }

    /// Pending edits.
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Check if there are no pending edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Returns the first pair of overlapping edits, if any.
    ///
    /// Edits that only touch (`a.end == b.start`) do not conflict, and
    /// neither do two insertions at the same offset.
    pub fn check_conflicts(&self) -> Option<EditConflict> {
        let mut sorted = self.edits.clone();
        sorted.sort_by_key(|e| (e.span.start, e.span.end));

        sorted.windows(2).find_map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            (a.span.end > b.span.start).then(|| EditConflict {
                first: a.clone(),
                second: b.clone(),
            })
        })
    }

    /// Apply all edits to `source`, or report the first conflict.
    ///
    /// Offsets past the end of `source` are clamped.
    pub fn apply(&self, source: &str) -> Result<String, EditConflict> {
        if let Some(conflict) = self.check_conflicts() {
            return Err(conflict);
        }

        let mut sorted: Vec<&TextEdit> = self.edits.iter().collect();
        sorted.sort_by(|a, b| {
            b.span
                .start
                .cmp(&a.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });

        let mut result = source.to_string();
        for edit in sorted {
            let start = (edit.span.start as usize).min(result.len());
            let end = (edit.span.end as usize).min(result.len()).max(start);
            result.replace_range(start..end, &edit.new_text);
        }
        Ok(result)
    }
}
