//! Line lookups for byte offsets.
//!
//! Directive scanning works in 0-based line indices (the index into the
//! line-start table); reports use 1-based line and column numbers. Both go
//! through [`LineOffsetTable`] so the conversion lives in one place.

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use tyexpect_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "line1\nline2\r\nline3";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_index(6), 1);
/// assert_eq!(table.line_text(source, 1), "line2");
/// assert_eq!(table.offset_to_line_col(source, 13), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start. `offsets[0] == 0`.
    offsets: Vec<u32>,
    /// Total source length in bytes.
    len: u32,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for pos in memchr::memchr_iter(b'\n', source.as_bytes()) {
            offsets.push(to_u32(pos + 1));
        }
        LineOffsetTable {
            offsets,
            len: to_u32(source.len()),
        }
    }

    /// 0-based index of the line containing `offset`.
    #[inline]
    pub fn line_index(&self, offset: u32) -> u32 {
        let idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        to_u32(idx)
    }

    /// Byte offset where the 0-based line `line` starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.offsets.get(line as usize).copied()
    }

    /// Byte offset where the 0-based line `line` ends, excluding the line
    /// terminator (`\n` or `\r\n`).
    pub fn line_end(&self, source: &str, line: u32) -> Option<u32> {
        let start = self.line_start(line)?;
        let mut end = self
            .line_start(line + 1)
            .map_or(self.len, |next| next.saturating_sub(1));
        if end > start && source.as_bytes().get(end as usize - 1) == Some(&b'\r') {
            end -= 1;
        }
        Some(end)
    }

    /// Text of the 0-based line `line` without its terminator. Empty when the
    /// line does not exist.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> &'a str {
        match (self.line_start(line), self.line_end(source, line)) {
            (Some(start), Some(end)) => source.get(start as usize..end as usize).unwrap_or(""),
            _ => "",
        }
    }

    /// Get 1-based (line, column) from a byte offset.
    ///
    /// The column counts characters, not bytes, from the start of the line.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line_idx = self.line_index(offset);
        let line_start = self.line_start(line_idx).unwrap_or(0) as usize;
        let offset = (offset as usize).min(source.len());

        let col_text = source.get(line_start..offset).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;

        (line_idx + 1, col)
    }

    /// Number of lines in the source. A trailing newline starts an empty line.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
