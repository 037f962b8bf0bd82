use crate::color::{Color, ColorSet};
use crate::position::Position;
use crate::r#move::Move;
use crate::tile::{Offset, Rotation, Tile};

pub const NUM_ROWS: usize = 20;
pub const NUM_COLS: usize = 20;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returned by [`Board::place`] when the requested move fails the legality
/// check. The board is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalMove {
    pub color: Color,
    pub mov: Move,
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "illegal move for {}: {}", self.color, self.mov)
    }
}

impl std::error::Error for IllegalMove {}

/// Resolve `anchor + offset` to a board cell, or `None` if it falls outside
/// the grid.
#[inline]
fn offset_cell(anchor: Position, offset: Offset) -> Option<Position> {
    let row = anchor.row as i16 + offset.row as i16;
    let col = anchor.col as i16 + offset.col as i16;
    if (0..NUM_ROWS as i16).contains(&row) && (0..NUM_COLS as i16).contains(&col) {
        Some(Position::new(row as u8, col as u8))
    } else {
        None
    }
}

#[inline]
fn neighbor(row: usize, col: usize, dr: i8, dc: i8) -> Option<(usize, usize)> {
    let r = row as i16 + dr as i16;
    let c = col as i16 + dc as i16;
    if (0..NUM_ROWS as i16).contains(&r) && (0..NUM_COLS as i16).contains(&c) {
        Some((r as usize, c as usize))
    } else {
        None
    }
}

/// The shared 20×20 grid and the per-cell legality masks derived from it.
///
/// `allowed` holds, per cell, the colors not excluded from occupying it on
/// their next move; `frontier` holds the colors that may start building from
/// it by corner contact. Both are recomputed in full after every placement,
/// so every query is a plain read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: [[Option<Color>; NUM_COLS]; NUM_ROWS],
    allowed: [[ColorSet; NUM_COLS]; NUM_ROWS],
    frontier: [[ColorSet; NUM_COLS]; NUM_ROWS],
}

impl Board {
    /// An empty board: every cell open to every color, and each color's
    /// starting corner pre-seeded into its frontier so first moves have
    /// something to touch.
    pub fn new() -> Self {
        let mut board = Board {
            pieces: [[None; NUM_COLS]; NUM_ROWS],
            allowed: [[ColorSet::ALL; NUM_COLS]; NUM_ROWS],
            frontier: [[ColorSet::EMPTY; NUM_COLS]; NUM_ROWS],
        };
        board.seed_starting_corners();
        board
    }

    /// The corner a color must cover with its first move. Corners are handed
    /// out clockwise from the top-left, in turn order.
    pub fn starting_corner(color: Color) -> Position {
        match color {
            Color::Blue => Position::new(0, 0),
            Color::Yellow => Position::new(0, (NUM_COLS - 1) as u8),
            Color::Red => Position::new((NUM_ROWS - 1) as u8, (NUM_COLS - 1) as u8),
            Color::Green => Position::new((NUM_ROWS - 1) as u8, 0),
        }
    }

    pub fn rows(&self) -> u8 {
        NUM_ROWS as u8
    }

    pub fn cols(&self) -> u8 {
        NUM_COLS as u8
    }

    /// The color occupying a cell, or `None` if empty or out of bounds.
    pub fn get_piece(&self, pos: &Position) -> Option<Color> {
        if pos.is_valid(self.rows(), self.cols()) {
            self.pieces[pos.row as usize][pos.col as usize]
        } else {
            None
        }
    }

    /// Colors permitted to cover this cell on their next move. Empty for
    /// occupied or out-of-bounds cells.
    pub fn allowed(&self, pos: &Position) -> ColorSet {
        if pos.is_valid(self.rows(), self.cols()) {
            self.allowed[pos.row as usize][pos.col as usize]
        } else {
            ColorSet::EMPTY
        }
    }

    /// Colors whose next move may start from this cell by corner contact.
    pub fn frontier(&self, pos: &Position) -> ColorSet {
        if pos.is_valid(self.rows(), self.cols()) {
            self.frontier[pos.row as usize][pos.col as usize]
        } else {
            ColorSet::EMPTY
        }
    }

    /// Whether placing `tile` with `mov` is legal for `color`.
    ///
    /// Every transformed cell must be on the board and open to `color`, and
    /// at least one must land on `color`'s frontier. Never mutates.
    pub fn is_legal(&self, tile: &Tile, color: Color, mov: &Move) -> bool {
        let mut touches_frontier = false;
        for offset in tile.placed(mov.rotation, mov.flip) {
            let Some(pos) = offset_cell(mov.anchor, *offset) else {
                return false;
            };
            if !self.allowed[pos.row as usize][pos.col as usize].contains(color) {
                return false;
            }
            touches_frontier |= self.frontier[pos.row as usize][pos.col as usize].contains(color);
        }
        touches_frontier
    }

    /// Place `tile` for `color`, or refuse with [`IllegalMove`] and leave the
    /// board unchanged. On success the occupancy grid and both masks reflect
    /// the move before this returns.
    pub fn place(&mut self, tile: &Tile, color: Color, mov: &Move) -> Result<(), IllegalMove> {
        if !self.is_legal(tile, color, mov) {
            return Err(IllegalMove { color, mov: *mov });
        }
        for offset in tile.placed(mov.rotation, mov.flip) {
            if let Some(pos) = offset_cell(mov.anchor, *offset) {
                self.pieces[pos.row as usize][pos.col as usize] = Some(color);
            }
        }
        self.recompute_masks();
        Ok(())
    }

    /// All legal moves for a tile and color, by brute force over every
    /// anchor, rotation, and flip. Symmetric tiles yield geometrically
    /// duplicate placements under distinct transforms.
    pub fn possible_moves(&self, tile: &Tile, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..NUM_ROWS as u8 {
            for col in 0..NUM_COLS as u8 {
                for rotation in Rotation::ALL {
                    for flip in [false, true] {
                        let mov = Move::new(Position::new(row, col), rotation, flip);
                        if self.is_legal(tile, color, &mov) {
                            moves.push(mov);
                        }
                    }
                }
            }
        }
        moves
    }

    /// Rebuild `allowed` and `frontier` for every cell from the occupancy
    /// grid. Full-board recompute is the reference algorithm; the affected
    /// neighborhood of one move is bounded, but one pass over 400 cells is
    /// cheap and always correct.
    fn recompute_masks(&mut self) {
        for row in 0..NUM_ROWS {
            for col in 0..NUM_COLS {
                if self.pieces[row][col].is_some() {
                    self.allowed[row][col] = ColorSet::EMPTY;
                    self.frontier[row][col] = ColorSet::EMPTY;
                    continue;
                }
                // An edge-adjacent piece bars its own color from this cell.
                let mut allowed = ColorSet::ALL;
                for (dr, dc) in ORTHOGONAL {
                    if let Some((r, c)) = neighbor(row, col, dr, dc) {
                        if let Some(color) = self.pieces[r][c] {
                            allowed.remove(color);
                        }
                    }
                }
                // A corner-adjacent piece extends its color's frontier here,
                // but only while the cell stays open to that color.
                let mut frontier = ColorSet::EMPTY;
                for (dr, dc) in DIAGONAL {
                    if let Some((r, c)) = neighbor(row, col, dr, dc) {
                        if let Some(color) = self.pieces[r][c] {
                            frontier.insert(color);
                        }
                    }
                }
                self.allowed[row][col] = allowed;
                self.frontier[row][col] = frontier & allowed;
            }
        }
        self.seed_starting_corners();
    }

    /// The starting corners stay valid first-move anchors for colors that
    /// have not played yet, so they are re-imposed after every recompute.
    fn seed_starting_corners(&mut self) {
        for color in Color::ALL {
            let corner = Self::starting_corner(color);
            self.frontier[corner.row as usize][corner.col as usize] = ColorSet::single(color);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..NUM_ROWS {
            write!(f, "|")?;
            for col in 0..NUM_COLS {
                let c = match self.pieces[row][col] {
                    Some(color) => color.to_char(),
                    None => '.',
                };
                write!(f, "{}|", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Rotation, NUM_TILES, TILES};
    use rand::prelude::IndexedRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mv(row: u8, col: u8, rotation: Rotation, flip: bool) -> Move {
        Move::new(Position::new(row, col), rotation, flip)
    }

    /// Every mask invariant that must hold after any number of placements.
    fn assert_mask_invariants(board: &Board) {
        let corners: Vec<Position> = Color::ALL.iter().map(|c| Board::starting_corner(*c)).collect();
        for row in 0..NUM_ROWS as u8 {
            for col in 0..NUM_COLS as u8 {
                let pos = Position::new(row, col);
                let is_corner = corners.contains(&pos);
                if board.get_piece(&pos).is_some() {
                    assert!(board.allowed(&pos).is_empty(), "occupied {} has allowed", pos);
                    if !is_corner {
                        assert!(board.frontier(&pos).is_empty(), "occupied {} has frontier", pos);
                    }
                } else if !is_corner {
                    assert!(
                        board.frontier(&pos).is_subset_of(board.allowed(&pos)),
                        "frontier not subset of allowed at {}",
                        pos
                    );
                }
            }
        }
    }

    #[test]
    fn test_seed_invariant() {
        let board = Board::new();
        for color in Color::ALL {
            let corner = Board::starting_corner(color);
            assert_eq!(board.frontier(&corner), ColorSet::single(color));
        }
        let corners: Vec<Position> = Color::ALL.iter().map(|c| Board::starting_corner(*c)).collect();
        for row in 0..NUM_ROWS as u8 {
            for col in 0..NUM_COLS as u8 {
                let pos = Position::new(row, col);
                assert_eq!(board.allowed(&pos), ColorSet::ALL);
                if !corners.contains(&pos) {
                    assert!(board.frontier(&pos).is_empty(), "unexpected frontier at {}", pos);
                }
            }
        }
    }

    #[test]
    fn test_first_move_must_cover_starting_corner() {
        // The monomino is legal for Blue only when anchored on (0, 0),
        // in any orientation.
        let board = Board::new();
        let tile = &TILES[0];
        for rotation in Rotation::ALL {
            for flip in [false, true] {
                for row in 0..NUM_ROWS as u8 {
                    for col in 0..NUM_COLS as u8 {
                        let legal = board.is_legal(tile, Color::Blue, &mv(row, col, rotation, flip));
                        assert_eq!(legal, row == 0 && col == 0, "anchor ({}, {})", row, col);
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_bounds_is_illegal() {
        let board = Board::new();
        // 1×5 line sticking off the right edge.
        let line = &TILES[14];
        assert!(board.is_legal(line, Color::Yellow, &mv(0, 15, Rotation::R0, false)));
        assert!(!board.is_legal(line, Color::Yellow, &mv(0, 16, Rotation::R0, false)));
        // Rotation sending cells above row 0.
        let triple = &TILES[3];
        assert!(!board.is_legal(triple, Color::Blue, &mv(0, 0, Rotation::R90, false)));
    }

    #[test]
    fn test_place_first_move_end_to_end() {
        let mut board = Board::new();
        let mono = &TILES[0];
        board
            .place(mono, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");

        assert_eq!(board.get_piece(&Position::new(0, 0)), Some(Color::Blue));
        assert!(board.allowed(&Position::new(0, 0)).is_empty());

        // Frontier propagates to the diagonal neighbor.
        assert!(board.frontier(&Position::new(1, 1)).contains(Color::Blue));

        // Edge neighbors lose Blue but stay open to everyone else.
        for pos in [Position::new(0, 1), Position::new(1, 0)] {
            let allowed = board.allowed(&pos);
            assert!(!allowed.contains(Color::Blue));
            assert!(allowed.contains(Color::Yellow));
            assert!(allowed.contains(Color::Red));
            assert!(allowed.contains(Color::Green));
        }
        assert_mask_invariants(&board);
    }

    #[test]
    fn test_edge_contact_is_rejected_without_mutation() {
        let mut board = Board::new();
        let mono = &TILES[0];
        board
            .place(mono, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");

        let before = board.clone();
        let edge_touch = mv(0, 1, Rotation::R0, false);
        assert!(!board.is_legal(mono, Color::Blue, &edge_touch));

        let err = board
            .place(mono, Color::Blue, &edge_touch)
            .expect_err("edge contact must be refused");
        assert_eq!(err.color, Color::Blue);
        assert_eq!(err.mov, edge_touch);
        assert_eq!(board, before);
    }

    #[test]
    fn test_corner_contact_resumes() {
        let mut board = Board::new();
        let mono = &TILES[0];
        board
            .place(mono, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");
        board
            .place(mono, Color::Blue, &mv(1, 1, Rotation::R0, false))
            .expect("diagonal continuation must succeed");

        assert_eq!(board.get_piece(&Position::new(1, 1)), Some(Color::Blue));
        assert!(board.frontier(&Position::new(2, 2)).contains(Color::Blue));
        assert_mask_invariants(&board);
    }

    #[test]
    fn test_colors_are_independent() {
        let mut board = Board::new();
        let mono = &TILES[0];
        board
            .place(mono, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");

        // Blue's frontier is not Yellow's.
        assert!(!board.is_legal(mono, Color::Yellow, &mv(1, 1, Rotation::R0, false)));
        // Yellow's own corner still works.
        assert!(board.is_legal(mono, Color::Yellow, &mv(0, 19, Rotation::R0, false)));
        // A cell edge-adjacent to a Blue piece stays open to Yellow.
        assert!(board.allowed(&Position::new(0, 1)).contains(Color::Yellow));
    }

    #[test]
    fn test_line_opening_and_frontier_spread() {
        let mut board = Board::new();
        // 1×3 line along the top edge: covers (0,0)..(0,2).
        let triple = &TILES[3];
        board
            .place(triple, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening line must succeed");

        for col in 0..3 {
            assert_eq!(board.get_piece(&Position::new(0, col)), Some(Color::Blue));
        }
        // Frontier appears past the line's far corner.
        assert!(board.frontier(&Position::new(1, 3)).contains(Color::Blue));
        // The cell flush under the line is blocked for Blue.
        assert!(!board.allowed(&Position::new(1, 1)).contains(Color::Blue));
        assert_mask_invariants(&board);
    }

    #[test]
    fn test_is_legal_is_idempotent() {
        let mut board = Board::new();
        let mono = &TILES[0];
        board
            .place(mono, Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");

        let snapshot = board.clone();
        let candidate = mv(1, 1, Rotation::R270, true);
        let first = board.is_legal(mono, Color::Blue, &candidate);
        for _ in 0..100 {
            assert_eq!(board.is_legal(mono, Color::Blue, &candidate), first);
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_possible_moves_opening_monomino() {
        let board = Board::new();
        let moves = board.possible_moves(&TILES[0], Color::Green);
        // One anchor, four rotations, two flips; all geometrically the same.
        assert_eq!(moves.len(), 8);
        for mov in moves {
            assert_eq!(mov.anchor, Board::starting_corner(Color::Green));
        }
    }

    #[test]
    fn test_possible_moves_agree_with_is_legal() {
        let mut board = Board::new();
        board
            .place(&TILES[8], Color::Red, &mv(18, 17, Rotation::R0, false))
            .expect("opening corner move must succeed");

        let tile = &TILES[4];
        let moves = board.possible_moves(tile, Color::Red);
        assert!(!moves.is_empty());
        for mov in &moves {
            assert!(board.is_legal(tile, Color::Red, mov));
        }
    }

    #[test]
    fn test_random_playout_preserves_invariants() {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut used = [[false; NUM_TILES]; 4];
        let mut placed = 0;

        // Enough rounds to tangle all four colors in the middle of the
        // board; bounded so the brute-force enumeration stays quick.
        'rounds: for _ in 0..7 {
            let mut progressed = false;
            for (color_idx, color) in Color::ALL.into_iter().enumerate() {
                let candidates: Vec<(usize, Move)> = TILES
                    .iter()
                    .filter(|t| !used[color_idx][t.index()])
                    .flat_map(|t| {
                        board
                            .possible_moves(t, color)
                            .into_iter()
                            .map(move |m| (t.index(), m))
                    })
                    .collect();
                let Some((tile_index, mov)) = candidates.choose(&mut rng).copied() else {
                    continue;
                };
                board
                    .place(&TILES[tile_index], color, &mov)
                    .expect("enumerated move must place");
                used[color_idx][tile_index] = true;
                placed += 1;
                progressed = true;
                assert_mask_invariants(&board);
            }
            if !progressed {
                break 'rounds;
            }
        }

        // Four colors on a 20×20 board always fit more than one round.
        assert!(placed > 8, "playout only placed {} tiles", placed);

        // The final position rejects an obviously bad move without damage.
        let snapshot = board.clone();
        let bad = mv(10, 10, Rotation::R0, false);
        if !board.is_legal(&TILES[0], Color::Blue, &bad) {
            assert!(board.place(&TILES[0], Color::Blue, &bad).is_err());
        }
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_illegal_move_error_is_reportable() {
        let mut board = Board::new();
        let err = board
            .place(&TILES[0], Color::Red, &mv(5, 5, Rotation::R0, false))
            .expect_err("middle of an empty board is not an opening");
        assert_eq!(err.to_string(), "illegal move for Red: (5, 5) r0 unflipped");
    }

    #[test]
    fn test_display_grid() {
        let mut board = Board::new();
        board
            .place(&TILES[0], Color::Blue, &mv(0, 0, Rotation::R0, false))
            .expect("opening corner move must succeed");
        let rendered = board.to_string();
        assert!(rendered.starts_with("|B|"));
        assert_eq!(rendered.lines().count(), NUM_ROWS);
    }
}
