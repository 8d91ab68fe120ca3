use super::font::{self, GlyphRecord};
use super::{ConsoleError, Orientation};

/// Fixed-size grid of glyph records with a write cursor.
///
/// Storage is two parallel row-major grids, one for bytes 0..3 of each record
/// and one for bytes 3..6, allocated once at construction. Scrolling shifts rows
/// in place; nothing is reallocated afterwards.
///
/// Invariant: every cell is either all-zero or a record copied from the atlas.
#[derive(Debug, Clone)]
pub struct ScrollBuffer {
    rows: usize,
    cols: usize,
    orientation: Orientation,

    bytes_012: Vec<[u8; 3]>,
    bytes_345: Vec<[u8; 3]>,

    /// Row written last. `None` until the first write after construction or `clear`.
    current_row: Option<usize>,
}

impl ScrollBuffer {
    /// Creates a blank buffer. `rows` and `cols` must be non-zero.
    pub fn new(rows: usize, cols: usize, orientation: Orientation) -> Self {
        debug_assert!(rows > 0 && cols > 0, "scroll buffer needs at least one cell");
        Self {
            rows,
            cols,
            orientation,
            bytes_012: vec![[0; 3]; rows * cols],
            bytes_345: vec![[0; 3]; rows * cols],
            current_row: None,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Row written last, or `None` if nothing was written since the last clear.
    #[inline]
    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    /// Blanks every cell and rewinds the cursor.
    pub fn clear(&mut self) {
        self.bytes_012.fill([0; 3]);
        self.bytes_345.fill([0; 3]);
        self.current_row = None;
    }

    /// Writes `line` on a fresh row, scrolling if the grid is full.
    ///
    /// The line is stored byte by byte: ASCII maps through the atlas, every
    /// other byte shows the replacement glyph. Anything past `cols` cells is
    /// dropped. An empty line still advances the cursor.
    pub fn write(&mut self, line: &str) {
        let row = self.advance();
        self.blank_row(row);

        let start = row * self.cols;
        for (i, byte) in line.bytes().take(self.cols).enumerate() {
            let glyph = if byte.is_ascii() {
                font::lookup_byte(byte)
            } else {
                font::replacement()
            };
            self.bytes_012[start + i] = glyph.bytes_012();
            self.bytes_345[start + i] = glyph.bytes_345();
        }
    }

    /// Like [`write`](Self::write) for raw input that may not be text.
    ///
    /// Invalid UTF-8 is rejected and leaves the buffer untouched.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        let line = std::str::from_utf8(bytes)
            .map_err(|e| ConsoleError::NotText { offset: e.valid_up_to() })?;
        self.write(line);
        Ok(())
    }

    /// Record stored at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the cell is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> GlyphRecord {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside grid");
        let i = row * self.cols + col;
        GlyphRecord::from_halves(self.bytes_012[i], self.bytes_345[i])
    }

    /// First three bytes of every cell in `row`.
    ///
    /// # Panics
    /// Panics if `row` is outside the grid.
    pub fn row_bytes_012(&self, row: usize) -> &[[u8; 3]] {
        &self.bytes_012[self.row_range(row)]
    }

    /// Last three bytes of every cell in `row`.
    ///
    /// # Panics
    /// Panics if `row` is outside the grid.
    pub fn row_bytes_345(&self, row: usize) -> &[[u8; 3]] {
        &self.bytes_345[self.row_range(row)]
    }

    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        assert!(row < self.rows, "row {row} outside grid of {} rows", self.rows);
        row * self.cols..(row + 1) * self.cols
    }

    /// Whole grids, row-major.
    pub fn grids(&self) -> (&[[u8; 3]], &[[u8; 3]]) {
        (&self.bytes_012, &self.bytes_345)
    }

    pub fn is_blank(&self) -> bool {
        self.bytes_012.iter().chain(self.bytes_345.iter()).all(|b| *b == [0; 3])
    }

    /// Moves the cursor to the row the next line goes to, scrolling on overflow.
    fn advance(&mut self) -> usize {
        let last = self.rows - 1;
        let next = match (self.orientation, self.current_row) {
            (Orientation::ScrollDown, None) => 0,
            (Orientation::ScrollDown, Some(r)) if r < last => r + 1,
            (Orientation::ScrollDown, Some(_)) => {
                // Oldest line sits in row 0.
                self.shift_rows_down();
                last
            }
            (Orientation::ScrollUp, None) => last,
            (Orientation::ScrollUp, Some(r)) if r > 0 => r - 1,
            (Orientation::ScrollUp, Some(_)) => {
                // Oldest line sits in the last row.
                self.shift_rows_up();
                0
            }
        };
        self.current_row = Some(next);
        next
    }

    /// Drops row 0; every other row moves one index lower.
    fn shift_rows_down(&mut self) {
        let cols = self.cols;
        self.bytes_012.copy_within(cols.., 0);
        self.bytes_345.copy_within(cols.., 0);
    }

    /// Drops the last row; every other row moves one index higher.
    fn shift_rows_up(&mut self) {
        let keep = (self.rows - 1) * self.cols;
        self.bytes_012.copy_within(..keep, self.cols);
        self.bytes_345.copy_within(..keep, self.cols);
    }

    fn blank_row(&mut self, row: usize) {
        let range = row * self.cols..(row + 1) * self.cols;
        self.bytes_012[range.clone()].fill([0; 3]);
        self.bytes_345[range].fill([0; 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::font::lookup;

    use proptest::prelude::*;

    fn first_glyph(buf: &ScrollBuffer, row: usize) -> GlyphRecord {
        buf.cell(row, 0)
    }

    fn glyph(c: char) -> GlyphRecord {
        lookup(c as u32)
    }

    #[test]
    fn new_buffer_is_blank() {
        let buf = ScrollBuffer::new(3, 4, Orientation::ScrollUp);
        assert!(buf.is_blank());
        assert_eq!(buf.current_row(), None);
    }

    #[test]
    fn scroll_up_fills_from_last_row() {
        let mut buf = ScrollBuffer::new(3, 4, Orientation::ScrollUp);
        buf.write("A");
        assert_eq!(buf.current_row(), Some(2));
        buf.write("B");
        assert_eq!(buf.current_row(), Some(1));
        assert_eq!(first_glyph(&buf, 2), glyph('A'));
        assert_eq!(first_glyph(&buf, 1), glyph('B'));
        assert!(first_glyph(&buf, 0).is_blank());
    }

    #[test]
    fn scroll_up_evicts_oldest_line() {
        let mut buf = ScrollBuffer::new(3, 4, Orientation::ScrollUp);
        for line in ["A", "B", "C", "D"] {
            buf.write(line);
        }
        assert_eq!(buf.current_row(), Some(0));
        assert_eq!(first_glyph(&buf, 2), glyph('B'));
        assert_eq!(first_glyph(&buf, 1), glyph('C'));
        assert_eq!(first_glyph(&buf, 0), glyph('D'));
    }

    #[test]
    fn scroll_down_evicts_oldest_line() {
        let mut buf = ScrollBuffer::new(3, 4, Orientation::ScrollDown);
        for line in ["A", "B", "C", "D"] {
            buf.write(line);
        }
        assert_eq!(buf.current_row(), Some(2));
        assert_eq!(first_glyph(&buf, 0), glyph('B'));
        assert_eq!(first_glyph(&buf, 1), glyph('C'));
        assert_eq!(first_glyph(&buf, 2), glyph('D'));
    }

    #[test]
    fn scrolled_in_row_does_not_keep_stale_cells() {
        let mut buf = ScrollBuffer::new(2, 4, Orientation::ScrollDown);
        buf.write("abcd");
        buf.write("efgh");
        buf.write("i");
        assert_eq!(buf.cell(1, 0), glyph('i'));
        for col in 1..4 {
            assert!(buf.cell(1, col).is_blank());
        }
        assert_eq!(buf.cell(0, 3), glyph('h'));
    }

    #[test]
    fn single_row_buffer_keeps_latest_line() {
        for orientation in [Orientation::ScrollUp, Orientation::ScrollDown] {
            let mut buf = ScrollBuffer::new(1, 2, orientation);
            buf.write("x");
            buf.write("y");
            assert_eq!(buf.current_row(), Some(0));
            assert_eq!(buf.cell(0, 0), glyph('y'));
        }
    }

    #[test]
    fn row_matches_concatenated_lookups() {
        let mut buf = ScrollBuffer::new(2, 8, Orientation::ScrollDown);
        buf.write("Hi 42!");
        let row = buf.current_row().unwrap();

        let mut expected_012 = vec![[0u8; 3]; 8];
        let mut expected_345 = vec![[0u8; 3]; 8];
        for (i, c) in "Hi 42!".chars().enumerate() {
            expected_012[i] = glyph(c).bytes_012();
            expected_345[i] = glyph(c).bytes_345();
        }
        assert_eq!(buf.row_bytes_012(row), &expected_012[..]);
        assert_eq!(buf.row_bytes_345(row), &expected_345[..]);
    }

    #[test]
    fn empty_line_still_advances() {
        let mut once = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        once.write("");
        assert_eq!(once.current_row(), Some(1));
        assert!(once.is_blank());

        let mut twice = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        twice.write("");
        twice.write("");
        assert_eq!(twice.current_row(), Some(0));
        assert!(twice.is_blank());
    }

    #[test]
    fn empty_line_pushes_text_up() {
        let mut buf = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        buf.write("a");
        buf.write("b");
        buf.write("");
        assert_eq!(first_glyph(&buf, 1), glyph('b'));
        assert!(first_glyph(&buf, 0).is_blank());
    }

    #[test]
    fn clear_blanks_and_rewinds() {
        let mut buf = ScrollBuffer::new(2, 3, Orientation::ScrollDown);
        buf.write("abc");
        buf.write("def");
        buf.clear();
        assert!(buf.is_blank());
        assert_eq!(buf.current_row(), None);

        buf.write("z");
        assert_eq!(buf.current_row(), Some(0));
        assert_eq!(buf.cell(0, 0), glyph('z'));
    }

    #[test]
    fn row_views_match_cells() {
        let mut buf = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        buf.write("ab");
        let row = buf.current_row().unwrap();
        let (lo, hi) = (buf.row_bytes_012(row), buf.row_bytes_345(row));
        assert_eq!(lo.len(), 3);
        assert_eq!(GlyphRecord::from_halves(lo[1], hi[1]), glyph('b'));
    }

    #[test]
    #[should_panic(expected = "row 2 outside grid")]
    fn row_bytes_012_rejects_rows_past_the_grid() {
        let buf = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        let _ = buf.row_bytes_012(2);
    }

    #[test]
    #[should_panic(expected = "row 5 outside grid")]
    fn row_bytes_345_rejects_rows_past_the_grid() {
        let buf = ScrollBuffer::new(2, 3, Orientation::ScrollUp);
        let _ = buf.row_bytes_345(5);
    }

    #[test]
    fn non_ascii_uses_replacement_per_encoded_byte() {
        let mut buf = ScrollBuffer::new(1, 4, Orientation::ScrollUp);
        buf.write("aé");
        assert_eq!(buf.cell(0, 0), glyph('a'));
        assert_eq!(buf.cell(0, 1), font::replacement());
        assert_eq!(buf.cell(0, 2), font::replacement());
        assert_ne!(buf.cell(0, 1), glyph('~'));
        assert!(buf.cell(0, 3).is_blank());
    }

    #[test]
    fn control_bytes_render_as_space() {
        let mut buf = ScrollBuffer::new(1, 3, Orientation::ScrollUp);
        buf.write("\tx");
        assert!(buf.cell(0, 0).is_blank());
        assert_eq!(buf.cell(0, 1), glyph('x'));
    }

    #[test]
    fn write_bytes_rejects_invalid_utf8_without_mutation() {
        let mut buf = ScrollBuffer::new(2, 4, Orientation::ScrollUp);
        buf.write("ok");
        let before = buf.clone();

        let err = buf.write_bytes(&[b'o', 0xFF, b'k']).unwrap_err();
        assert_eq!(err, ConsoleError::NotText { offset: 1 });
        assert_eq!(buf.grids(), before.grids());
        assert_eq!(buf.current_row(), before.current_row());
    }

    #[test]
    fn write_bytes_accepts_text() {
        let mut buf = ScrollBuffer::new(1, 4, Orientation::ScrollUp);
        buf.write_bytes(b"hey").unwrap();
        assert_eq!(buf.cell(0, 2), glyph('y'));
    }

    proptest! {
        #[test]
        fn overflow_is_truncated(line in "[ -~]{0,40}", cols in 1usize..16) {
            let mut long = ScrollBuffer::new(2, cols, Orientation::ScrollDown);
            long.write(&line);

            let cut: String = line.chars().take(cols).collect();
            let mut short = ScrollBuffer::new(2, cols, Orientation::ScrollDown);
            short.write(&cut);

            prop_assert_eq!(long.grids(), short.grids());
            prop_assert_eq!(long.current_row(), short.current_row());
        }

        #[test]
        fn cells_are_blank_or_atlas_records(lines in proptest::collection::vec(".{0,12}", 0..10)) {
            let mut buf = ScrollBuffer::new(3, 6, Orientation::ScrollUp);
            for line in &lines {
                buf.write(line);
            }
            for r in 0..3 {
                for c in 0..6 {
                    let g = buf.cell(r, c);
                    let known = g.is_blank() || (32..=126).any(|code| lookup(code) == g);
                    prop_assert!(known);
                }
            }
        }
    }
}
