//! Built-in 6×8 bitmap font.
//!
//! Each printable ASCII character, plus a placeholder stored at DEL, is a
//! 48-bit record: six bytes, read MSB-first, six bits per glyph row, eight
//! rows. The renderer uploads the record as two
//! three-byte groups and the fragment stage decodes it per pixel.

/// Width of a glyph bitmap in pixels.
pub const GLYPH_WIDTH: usize = 6;

/// Height of a glyph bitmap in pixels.
pub const GLYPH_HEIGHT: usize = 8;

/// First code point with a glyph (space).
pub const FIRST_CODE: u32 = 32;

/// Last printable code point (`~`).
pub const LAST_CODE: u32 = 126;

/// Code point of the placeholder glyph (`⌂`, stored at DEL). Every code past
/// the printable range shows it.
pub const REPLACEMENT_CODE: u32 = LAST_CODE + 1;

/// Number of records in the atlas: printable ASCII plus the placeholder.
pub const GLYPH_COUNT: usize = (REPLACEMENT_CODE - FIRST_CODE + 1) as usize;

/// Packed 6×8 glyph bitmap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GlyphRecord([u8; 6]);

impl GlyphRecord {
    /// The all-zero record stored in blank cells.
    pub const BLANK: GlyphRecord = GlyphRecord([0; 6]);

    #[inline]
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn bytes(self) -> [u8; 6] {
        self.0
    }

    /// Byte `index` of the record, `0..6`.
    #[inline]
    pub fn byte(self, index: usize) -> u8 {
        self.0[index]
    }

    /// First half of the record (bytes 0, 1, 2).
    #[inline]
    pub const fn bytes_012(self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Second half of the record (bytes 3, 4, 5).
    #[inline]
    pub const fn bytes_345(self) -> [u8; 3] {
        [self.0[3], self.0[4], self.0[5]]
    }

    /// Rebuilds a record from its two halves.
    #[inline]
    pub const fn from_halves(lo: [u8; 3], hi: [u8; 3]) -> Self {
        Self([lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]])
    }

    #[inline]
    pub fn is_blank(self) -> bool {
        self.0 == [0; 6]
    }

    /// CPU mirror of the fragment-stage decode.
    ///
    /// `(u, v)` is the pixel inside the 8×8 sprite, `u` across and `v` down.
    /// Pixels outside the 6×8 glyph are never lit.
    pub fn pixel(self, u: usize, v: usize) -> bool {
        if u >= GLYPH_WIDTH || v >= GLYPH_HEIGHT {
            return false;
        }
        let k = v * GLYPH_WIDTH + u;
        let byte = self.0[k / 8];
        (byte >> (7 - k % 8)) & 1 == 1
    }

    /// Decodes the whole glyph, row by row from the top.
    pub fn mask(self) -> [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT] {
        let mut out = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
        for (v, row) in out.iter_mut().enumerate() {
            for (u, px) in row.iter_mut().enumerate() {
                *px = self.pixel(u, v);
            }
        }
        out
    }
}

/// Returns the record for `code`.
///
/// Codes below the printable range map to space; codes above it (including
/// every non-ASCII code point) map to the placeholder at [`REPLACEMENT_CODE`].
#[inline]
pub fn lookup(code: u32) -> GlyphRecord {
    let index = code.clamp(FIRST_CODE, REPLACEMENT_CODE) - FIRST_CODE;
    GlyphRecord(FONT_6X8[index as usize])
}

/// Returns the record for a single byte of encoded text.
#[inline]
pub fn lookup_byte(byte: u8) -> GlyphRecord {
    lookup(byte as u32)
}

/// Record shown for characters outside printable ASCII.
#[inline]
pub fn replacement() -> GlyphRecord {
    GlyphRecord(FONT_6X8[(REPLACEMENT_CODE - FIRST_CODE) as usize])
}

static FONT_6X8: [[u8; 6]; GLYPH_COUNT] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00], [0x10, 0xE3, 0x84, 0x10, 0x01, 0x00],
    [0x6D, 0xB4, 0x80, 0x00, 0x00, 0x00], [0x00, 0xA7, 0xCA, 0x29, 0xF2, 0x80],
    [0x20, 0xE4, 0x0C, 0x09, 0xC1, 0x00], [0x65, 0x90, 0x84, 0x21, 0x34, 0xC0],
    [0x21, 0x45, 0x08, 0x55, 0x23, 0x40], [0x30, 0xC2, 0x00, 0x00, 0x00, 0x00],
    [0x10, 0x82, 0x08, 0x20, 0x81, 0x00], [0x20, 0x41, 0x04, 0x10, 0x42, 0x00],
    [0x00, 0xA3, 0x9F, 0x38, 0xA0, 0x00], [0x00, 0x41, 0x1F, 0x10, 0x40, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0xC3, 0x08], [0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
    [0x00, 0x00, 0x00, 0x00, 0xC3, 0x00], [0x00, 0x10, 0x84, 0x21, 0x00, 0x00],
    [0x39, 0x14, 0xD5, 0x65, 0x13, 0x80], [0x10, 0xC1, 0x04, 0x10, 0x43, 0x80],
    [0x39, 0x10, 0x46, 0x21, 0x07, 0xC0], [0x39, 0x10, 0x4E, 0x05, 0x13, 0x80],
    [0x08, 0x62, 0x92, 0x7C, 0x20, 0x80], [0x7D, 0x04, 0x1E, 0x05, 0x13, 0x80],
    [0x18, 0x84, 0x1E, 0x45, 0x13, 0x80], [0x7C, 0x10, 0x84, 0x20, 0x82, 0x00],
    [0x39, 0x14, 0x4E, 0x45, 0x13, 0x80], [0x39, 0x14, 0x4F, 0x04, 0x23, 0x00],
    [0x00, 0x03, 0x0C, 0x00, 0xC3, 0x00], [0x00, 0x03, 0x0C, 0x00, 0xC3, 0x08],
    [0x08, 0x42, 0x10, 0x20, 0x40, 0x80], [0x00, 0x07, 0xC0, 0x01, 0xF0, 0x00],
    [0x20, 0x40, 0x81, 0x08, 0x42, 0x00], [0x39, 0x10, 0x46, 0x10, 0x01, 0x00],
    [0x39, 0x15, 0xD5, 0x5D, 0x03, 0x80], [0x39, 0x14, 0x51, 0x7D, 0x14, 0x40],
    [0x79, 0x14, 0x5E, 0x45, 0x17, 0x80], [0x39, 0x14, 0x10, 0x41, 0x13, 0x80],
    [0x79, 0x14, 0x51, 0x45, 0x17, 0x80], [0x7D, 0x04, 0x1E, 0x41, 0x07, 0xC0],
    [0x7D, 0x04, 0x1E, 0x41, 0x04, 0x00], [0x39, 0x14, 0x17, 0x45, 0x13, 0xC0],
    [0x45, 0x14, 0x5F, 0x45, 0x14, 0x40], [0x38, 0x41, 0x04, 0x10, 0x43, 0x80],
    [0x04, 0x10, 0x41, 0x45, 0x13, 0x80], [0x45, 0x25, 0x18, 0x51, 0x24, 0x40],
    [0x41, 0x04, 0x10, 0x41, 0x07, 0xC0], [0x45, 0xB5, 0x51, 0x45, 0x14, 0x40],
    [0x45, 0x95, 0x53, 0x45, 0x14, 0x40], [0x39, 0x14, 0x51, 0x45, 0x13, 0x80],
    [0x79, 0x14, 0x5E, 0x41, 0x04, 0x00], [0x39, 0x14, 0x51, 0x55, 0x23, 0x40],
    [0x79, 0x14, 0x5E, 0x49, 0x14, 0x40], [0x39, 0x14, 0x0E, 0x05, 0x13, 0x80],
    [0x7C, 0x41, 0x04, 0x10, 0x41, 0x00], [0x45, 0x14, 0x51, 0x45, 0x13, 0x80],
    [0x45, 0x14, 0x51, 0x44, 0xA1, 0x00], [0x45, 0x15, 0x55, 0x55, 0x52, 0x80],
    [0x45, 0x12, 0x84, 0x29, 0x14, 0x40], [0x45, 0x14, 0x4A, 0x10, 0x41, 0x00],
    [0x78, 0x21, 0x08, 0x41, 0x07, 0x80], [0x38, 0x82, 0x08, 0x20, 0x83, 0x80],
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x00], [0x38, 0x20, 0x82, 0x08, 0x23, 0x80],
    [0x10, 0xA4, 0x40, 0x00, 0x00, 0x00], [0x00, 0x00, 0x00, 0x00, 0x00, 0x3F],
    [0x30, 0xC1, 0x00, 0x00, 0x00, 0x00], [0x00, 0x03, 0x81, 0x3D, 0x13, 0xC0],
    [0x41, 0x07, 0x91, 0x45, 0x17, 0x80], [0x00, 0x03, 0x91, 0x41, 0x13, 0x80],
    [0x04, 0x13, 0xD1, 0x45, 0x13, 0xC0], [0x00, 0x03, 0x91, 0x79, 0x03, 0x80],
    [0x18, 0x82, 0x1E, 0x20, 0x82, 0x00], [0x00, 0x03, 0xD1, 0x44, 0xF0, 0x4E],
    [0x41, 0x07, 0x12, 0x49, 0x24, 0x80], [0x10, 0x01, 0x04, 0x10, 0x41, 0x80],
    [0x08, 0x01, 0x82, 0x08, 0x24, 0x8C], [0x41, 0x04, 0x94, 0x61, 0x44, 0x80],
    [0x10, 0x41, 0x04, 0x10, 0x41, 0x80], [0x00, 0x06, 0x95, 0x55, 0x14, 0x40],
    [0x00, 0x07, 0x12, 0x49, 0x24, 0x80], [0x00, 0x03, 0x91, 0x45, 0x13, 0x80],
    [0x00, 0x07, 0x91, 0x45, 0x17, 0x90], [0x00, 0x03, 0xD1, 0x45, 0x13, 0xC1],
    [0x00, 0x05, 0x89, 0x20, 0x87, 0x00], [0x00, 0x03, 0x90, 0x38, 0x13, 0x80],
    [0x00, 0x87, 0x88, 0x20, 0xA1, 0x00], [0x00, 0x04, 0x92, 0x49, 0x62, 0x80],
    [0x00, 0x04, 0x51, 0x44, 0xA1, 0x00], [0x00, 0x04, 0x51, 0x55, 0xF2, 0x80],
    [0x00, 0x04, 0x92, 0x31, 0x24, 0x80], [0x00, 0x04, 0x92, 0x48, 0xE1, 0x18],
    [0x00, 0x07, 0x82, 0x31, 0x07, 0x80], [0x18, 0x82, 0x18, 0x20, 0x81, 0x80],
    [0x10, 0x41, 0x00, 0x10, 0x41, 0x00], [0x30, 0x20, 0x83, 0x08, 0x23, 0x00],
    [0x29, 0x40, 0x00, 0x00, 0x00, 0x00], [0x10, 0xE6, 0xD1, 0x45, 0xF0, 0x00],
];
