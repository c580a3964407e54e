//! Rectangular piece matrix.
//!
//! A `Shape` is a small (at most 4x4) grid of filled/empty cells stored inline,
//! so pieces and snapshots stay `Copy`. On the wire it is an array of rows of
//! `0`/`1`, e.g. the T piece is `[[0,1,0],[1,1,1]]`.

use serde::de::{Error as _, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest row/column count a shape may have
pub const MAX_SHAPE_SIZE: usize = 4;

type Grid = [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: Grid,
}

impl Shape {
    /// Build from a 4x4 grid of `0`/`1`, keeping the top-left `rows` x `cols` block.
    ///
    /// Dimensions are clamped to `1..=MAX_SHAPE_SIZE`.
    pub const fn from_grid(rows: u8, cols: u8, grid: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        let rows = clamp_dim(rows);
        let cols = clamp_dim(cols);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                cells[r][c] = grid[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, cells }
    }

    /// An all-empty shape of the given size.
    pub const fn blank(rows: u8, cols: u8) -> Self {
        Self {
            rows: clamp_dim(rows),
            cols: clamp_dim(cols),
            cells: [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
        }
    }

    /// Build from row slices; `None` if empty, ragged or larger than 4x4.
    ///
    /// ```
    /// use proof_tetris_types::Shape;
    ///
    /// let t = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]).unwrap();
    /// assert_eq!((t.rows(), t.cols()), (2, 3));
    /// assert!(Shape::from_rows(&[vec![1, 1], vec![1]]).is_none());
    /// ```
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if height == 0 || height > MAX_SHAPE_SIZE || width == 0 || width > MAX_SHAPE_SIZE {
            return None;
        }
        let mut shape = Self::blank(height as u8, width as u8);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (c, &v) in row.iter().enumerate() {
                shape.cells[r][c] = v != 0;
            }
        }
        Some(shape)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether cell `(row, col)` is filled; out-of-range cells are empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Set cell `(row, col)`; returns false if out of range.
    pub fn set(&mut self, row: usize, col: usize, filled: bool) -> bool {
        if row >= self.rows as usize || col >= self.cols as usize {
            return false;
        }
        self.cells[row][col] = filled;
        true
    }

    /// Offsets `(dx, dy)` of every filled cell relative to the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    pub fn filled_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rows as `0`/`1` vectors (wire form)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows as usize)
            .map(|r| {
                (0..self.cols as usize)
                    .map(|c| u8::from(self.cells[r][c]))
                    .collect()
            })
            .collect()
    }
}

const fn clamp_dim(v: u8) -> u8 {
    if v == 0 {
        1
    } else if v as usize > MAX_SHAPE_SIZE {
        MAX_SHAPE_SIZE as u8
    } else {
        v
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.rows as usize))?;
        for row in self.to_rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct V;
        impl<'de> Visitor<'de> for V {
            type Value = Shape;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "a rectangular array of 0/1 rows, at most 4x4")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut rows: Vec<Vec<u8>> = Vec::new();
                while let Some(row) = seq.next_element::<Vec<u8>>()? {
                    if row.iter().any(|&v| v > 1) {
                        return Err(A::Error::custom("shape cells must be 0 or 1"));
                    }
                    rows.push(row);
                }
                Shape::from_rows(&rows).ok_or_else(|| A::Error::custom("malformed shape matrix"))
            }
        }

        deserializer.deserialize_seq(V)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_grid_ignores_cells_outside_dimensions() {
        let s = Shape::from_grid(1, 2, [[1, 1, 1, 0], [1, 0, 0, 0], [0; 4], [0; 4]]);
        assert_eq!(s.filled_count(), 2);
        assert!(!s.is_filled(1, 0));
    }

    #[test]
    fn filled_cells_are_column_row_offsets() {
        let s = Shape::from_rows(&[&[0, 1], &[1, 0]]).unwrap();
        let cells: Vec<_> = s.filled_cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn json_form_is_rows_of_bits() {
        let s = Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[[1,0,0],[1,1,1]]");
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn rejects_ragged_and_oversized_json() {
        assert!(serde_json::from_str::<Shape>("[[1,1],[1]]").is_err());
        assert!(serde_json::from_str::<Shape>("[[1,1,1,1,1]]").is_err());
        assert!(serde_json::from_str::<Shape>("[[2]]").is_err());
        assert!(serde_json::from_str::<Shape>("[]").is_err());
    }
}
