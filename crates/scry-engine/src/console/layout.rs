//! Fixed per-cell placement of the console grid.
//!
//! Offsets are in pixels relative to the console's anchor position, +X right,
//! +Y up: row 0 is the lowest row on screen.

use super::{AnchorX, AnchorY};

/// Horizontal advance per cell (glyph width).
pub const CELL_WIDTH: f32 = 6.0;

/// Vertical advance per cell (glyph height plus line spacing).
pub const CELL_HEIGHT: f32 = 10.0;

/// Gap between the anchor point and the grid.
pub const PADDING: f32 = 4.0;

/// Computes one `(x, y)` offset per cell, row-major (`index = row * cols + col`).
pub fn compute_offsets(
    rows: usize,
    cols: usize,
    cell_w: f32,
    cell_h: f32,
    anchor_x: AnchorX,
    anchor_y: AnchorY,
) -> Vec<[f32; 2]> {
    let x_off = match anchor_x {
        AnchorX::Left => 0.0,
        AnchorX::Right => -cell_w * cols as f32,
        AnchorX::Center => -cell_w * cols as f32 / 2.0,
    };
    let y_off = match anchor_y {
        AnchorY::Bottom => 0.0,
        AnchorY::Top => -cell_h * rows as f32,
        AnchorY::Center | AnchorY::Middle => -cell_h * rows as f32 / 2.0,
    };

    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let y = PADDING + cell_h * r as f32 + y_off;
        for c in 0..cols {
            out.push([PADDING + cell_w * c as f32 + x_off, y]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_bottom_starts_at_padding() {
        let o = compute_offsets(2, 3, CELL_WIDTH, CELL_HEIGHT, AnchorX::Left, AnchorY::Bottom);
        assert_eq!(o.len(), 6);
        assert_eq!(o[0], [4.0, 4.0]);
        assert_eq!(o[2], [16.0, 4.0]);
        assert_eq!(o[3], [4.0, 14.0]);
    }

    #[test]
    fn right_top_shifts_by_grid_extent() {
        let o = compute_offsets(2, 3, CELL_WIDTH, CELL_HEIGHT, AnchorX::Right, AnchorY::Top);
        assert_eq!(o[0], [4.0 - 18.0, 4.0 - 20.0]);
        assert_eq!(o[5], [4.0 - 18.0 + 12.0, 4.0 - 20.0 + 10.0]);
    }

    #[test]
    fn single_cell_centered() {
        let (w, h) = (4.0, 8.0);
        for ay in [AnchorY::Middle, AnchorY::Center] {
            let o = compute_offsets(1, 1, w, h, AnchorX::Center, ay);
            assert_eq!(o, vec![[PADDING - w / 2.0, PADDING - h / 2.0]]);
        }
    }

    #[test]
    fn rows_advance_upward() {
        let o = compute_offsets(3, 1, CELL_WIDTH, CELL_HEIGHT, AnchorX::Left, AnchorY::Top);
        assert!(o[0][1] < o[1][1] && o[1][1] < o[2][1]);
    }
}
