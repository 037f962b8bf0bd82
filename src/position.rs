/// A board coordinate. (0, 0) is the upper-left corner; rows grow downward
/// and columns grow to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        Position { row, col }
    }

    pub fn from_index(index: usize, cols: u8) -> Self {
        let w = cols as usize;
        Position {
            row: (index / w) as u8,
            col: (index % w) as u8,
        }
    }

    pub fn to_index(&self, cols: u8) -> usize {
        self.row as usize * cols as usize + self.col as usize
    }

    pub fn is_valid(&self, rows: u8, cols: u8) -> bool {
        self.row < rows && self.col < cols
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
