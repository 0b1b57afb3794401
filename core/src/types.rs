/// Single coordinate axis, used for the board side length and for row/column positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Cell position as `(row, col)`.
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

/// Number of cells on a square board with `size` cells per side.
pub const fn square(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the up-to-8 in-bounds neighbours of a cell on a square board. Positions past an
/// edge are skipped, never wrapped.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord,
    next: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            next: 0,
        }
    }

    fn shifted(&self, (d_row, d_col): (i8, i8)) -> Option<Coord2> {
        let (row, col) = self.center;
        let row = row.checked_add_signed(d_row).filter(|&r| r < self.size)?;
        let col = col.checked_add_signed(d_col).filter(|&c| c < self.size)?;
        Some((row, col))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(pos) = self.shifted(offset) {
                return Some(pos);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.next))
    }
}

/// Row-major iterator over every position of a square board.
pub fn positions(size: Coord) -> impl Iterator<Item = Coord2> {
    (0..size).flat_map(move |row| (0..size).map(move |col| (row, col)))
}
