use crate::position::Position;
use crate::tile::Rotation;

/// How to place a tile on the board: the board cell the tile origin lands
/// on, plus the transform to apply first. The tile and color are supplied
/// alongside the move; a move is meaningless without them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub anchor: Position,
    pub rotation: Rotation,
    pub flip: bool,
}

impl Move {
    pub fn new(anchor: Position, rotation: Rotation, flip: bool) -> Self {
        Move {
            anchor,
            rotation,
            flip,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} r{} {}",
            self.anchor,
            self.rotation.index(),
            if self.flip { "flipped" } else { "unflipped" }
        )
    }
}
