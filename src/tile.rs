use std::sync::LazyLock;

/// A cell offset relative to a tile's own origin. Offsets are signed:
/// rotation can move cells above or to the left of the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    pub row: i8,
    pub col: i8,
}

impl Offset {
    pub fn new(row: i8, col: i8) -> Self {
        Offset { row, col }
    }
}

/// A quarter-turn rotation, applied clockwise around the tile origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Rotation> {
        match index {
            0 => Some(Rotation::R0),
            1 => Some(Rotation::R90),
            2 => Some(Rotation::R180),
            3 => Some(Rotation::R270),
            _ => None,
        }
    }
}

/// Rotate and flip a single canonical offset.
///
/// Rotation is around the origin, clockwise; flipping negates the row
/// coordinate of the rotated result. This is the one and only transform in
/// the crate: legality checking and placement both go through it.
#[inline]
fn transform(row: i8, col: i8, rotation: Rotation, flip: bool) -> Offset {
    let (r, c) = match rotation {
        Rotation::R0 => (row, col),
        Rotation::R90 => (-col, row),
        Rotation::R180 => (-row, -col),
        Rotation::R270 => (col, -row),
    };
    Offset {
        row: if flip { -r } else { r },
        col: c,
    }
}

/// A canonical polyomino shape.
///
/// Every tile is defined on a 5×5 grid with an occupied cell at (0, 0).
/// All eight rotation/flip variants are expanded into offset lists at
/// construction, so [`Tile::placed`] is a borrow with no per-call work.
#[derive(Clone, Debug)]
pub struct Tile {
    index: usize,
    transforms: [[Vec<Offset>; 2]; 4],
}

impl Tile {
    fn from_rows(index: usize, rows: [u8; 5]) -> Self {
        let mut transforms: [[Vec<Offset>; 2]; 4] = Default::default();
        for rotation in Rotation::ALL {
            for flip in [false, true] {
                let coords = &mut transforms[rotation.index()][flip as usize];
                for (r, row_bits) in rows.iter().enumerate() {
                    for c in 0..5 {
                        if row_bits >> c & 1 != 0 {
                            coords.push(transform(r as i8, c as i8, rotation, flip));
                        }
                    }
                }
            }
        }
        Tile { index, transforms }
    }

    /// Index of this tile in [`TILES`].
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of cells in the tile (1 through 5).
    pub fn size(&self) -> usize {
        self.transforms[0][0].len()
    }

    /// The tile's cell offsets under the given rotation and flip.
    ///
    /// The order is deterministic for a given input but otherwise
    /// unspecified; callers must treat the result as a set.
    #[inline]
    pub fn placed(&self, rotation: Rotation, flip: bool) -> &[Offset] {
        &self.transforms[rotation.index()][flip as usize]
    }
}

pub const NUM_TILES: usize = 21;

// Shapes as row bitmasks, least significant bit = column 0, row 0 first.
// Rows beyond the shape's extent are zero.
const SHAPE_ROWS: [[u8; 5]; NUM_TILES] = [
    // 1 cell.
    [0b00001, 0, 0, 0, 0],
    // 2 cells.
    [0b00011, 0, 0, 0, 0],
    // 3 cells.
    [0b00011, 0b00010, 0, 0, 0],
    [0b00111, 0, 0, 0, 0],
    // 4 cells.
    [0b00011, 0b00011, 0, 0, 0],
    [0b00010, 0b00111, 0, 0, 0],
    [0b01111, 0, 0, 0, 0],
    [0b00111, 0b00100, 0, 0, 0],
    [0b00011, 0b00110, 0, 0, 0],
    // 5 cells.
    [0b00001, 0b01111, 0, 0, 0],
    [0b00001, 0b00111, 0b00001, 0, 0],
    [0b00001, 0b00001, 0b00111, 0, 0],
    [0b00011, 0b01110, 0, 0, 0],
    [0b00001, 0b00111, 0b00100, 0, 0],
    [0b11111, 0, 0, 0, 0],
    [0b00111, 0b00110, 0, 0, 0],
    [0b00001, 0b00011, 0b00110, 0, 0],
    [0b00011, 0b00001, 0b00011, 0, 0],
    [0b00011, 0b00110, 0b00010, 0, 0],
    [0b00010, 0b00111, 0b00010, 0, 0],
    [0b01111, 0b00010, 0, 0, 0],
];

/// The 21 canonical tiles, built once and shared read-only for the lifetime
/// of the process.
pub static TILES: LazyLock<[Tile; NUM_TILES]> =
    LazyLock::new(|| std::array::from_fn(|i| Tile::from_rows(i, SHAPE_ROWS[i])));
