use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional board coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, size)
    }
}

/// Walks the up-to-8 in-bounds cells around `center`, skipping `center`
/// itself: 3 at a corner, 5 on an edge, 8 in the interior.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    row: Coord,
    col: Coord,
    col_start: Coord,
    row_end: Coord,
    col_end: Coord,
    done: bool,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;

        if rows == 0 || cols == 0 || row >= rows || col >= cols {
            return Self {
                center,
                row: 0,
                col: 0,
                col_start: 0,
                row_end: 0,
                col_end: 0,
                done: true,
            };
        }

        let col_start = col.saturating_sub(1);
        Self {
            center,
            row: row.saturating_sub(1),
            col: col_start,
            col_start,
            row_end: row.saturating_add(1).min(rows - 1),
            col_end: col.saturating_add(1).min(cols - 1),
            done: false,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            let item = (self.row, self.col);
            if self.col < self.col_end {
                self.col += 1;
            } else if self.row < self.row_end {
                self.col = self.col_start;
                self.row += 1;
            } else {
                self.done = true;
            }

            if item != self.center {
                return Some(item);
            }
        }
    }
}
