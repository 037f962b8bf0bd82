pub mod board;
pub mod color;
pub mod r#move;
pub mod position;
pub mod tile;

#[cfg(feature = "serde")]
pub mod serde_support;

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn blokus_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use color::Color;
    use python_bindings::*;
    m.add_class::<PyBoard>()?;
    m.add_class::<PyMove>()?;
    m.add("BLUE", Color::Blue.bit())?;
    m.add("YELLOW", Color::Yellow.bit())?;
    m.add("RED", Color::Red.bit())?;
    m.add("GREEN", Color::Green.bit())?;
    m.add("NUM_TILES", tile::NUM_TILES)?;
    m.add("NUM_ROWS", board::NUM_ROWS)?;
    m.add("NUM_COLS", board::NUM_COLS)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::board::Board;
    use crate::color::Color;
    use crate::position::Position;
    use crate::r#move::Move;
    use crate::tile::{Rotation, Tile, NUM_TILES, TILES};

    fn color_arg(bit: u8) -> PyResult<Color> {
        Color::from_bit(bit).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(
                "Color must be one of BLUE, YELLOW, RED, GREEN",
            )
        })
    }

    fn tile_arg(index: usize) -> PyResult<&'static Tile> {
        TILES.get(index).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Tile index must be below {}",
                NUM_TILES
            ))
        })
    }

    #[pyclass(name = "Board")]
    #[derive(Clone)]
    pub struct PyBoard {
        board: Board,
    }

    #[pymethods]
    impl PyBoard {
        #[new]
        pub fn new() -> Self {
            PyBoard {
                board: Board::new(),
            }
        }

        pub fn get_piece(&self, row: usize, col: usize) -> Option<u8> {
            let pos = Position::new(row as u8, col as u8);
            self.board.get_piece(&pos).map(|c| c.bit())
        }

        /// Bitmask of colors still permitted to cover this cell.
        pub fn allowed(&self, row: usize, col: usize) -> u8 {
            let pos = Position::new(row as u8, col as u8);
            self.board.allowed(&pos).bits()
        }

        /// Bitmask of colors whose next move may start from this cell.
        pub fn frontier(&self, row: usize, col: usize) -> u8 {
            let pos = Position::new(row as u8, col as u8);
            self.board.frontier(&pos).bits()
        }

        pub fn is_legal(&self, tile: usize, color: u8, move_: &PyMove) -> PyResult<bool> {
            let tile = tile_arg(tile)?;
            let color = color_arg(color)?;
            Ok(self.board.is_legal(tile, color, &move_.move_))
        }

        pub fn place(&mut self, tile: usize, color: u8, move_: &PyMove) -> PyResult<()> {
            let tile = tile_arg(tile)?;
            let color = color_arg(color)?;
            self.board
                .place(tile, color, &move_.move_)
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
        }

        pub fn possible_moves(&self, tile: usize, color: u8) -> PyResult<Vec<PyMove>> {
            let tile = tile_arg(tile)?;
            let color = color_arg(color)?;
            Ok(self
                .board
                .possible_moves(tile, color)
                .into_iter()
                .map(|move_| PyMove { move_ })
                .collect())
        }

        pub fn __str__(&self) -> String {
            self.board.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Board({}x{})",
                crate::board::NUM_ROWS,
                crate::board::NUM_COLS
            )
        }
    }

    #[pyclass(name = "Move")]
    #[derive(Clone, Debug)]
    pub struct PyMove {
        pub(crate) move_: Move,
    }

    #[pymethods]
    impl PyMove {
        #[new]
        pub fn new(row: usize, col: usize, rotation: usize, flip: bool) -> PyResult<Self> {
            let rotation = Rotation::from_index(rotation).ok_or_else(|| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>("Rotation must be 0..4")
            })?;
            Ok(PyMove {
                move_: Move::new(Position::new(row as u8, col as u8), rotation, flip),
            })
        }

        pub fn row(&self) -> usize {
            self.move_.anchor.row as usize
        }

        pub fn col(&self) -> usize {
            self.move_.anchor.col as usize
        }

        pub fn rotation(&self) -> usize {
            self.move_.rotation.index()
        }

        pub fn flip(&self) -> bool {
            self.move_.flip
        }

        pub fn __str__(&self) -> String {
            self.move_.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Move({}, {}, {}, {})",
                self.row(),
                self.col(),
                self.rotation(),
                self.flip()
            )
        }

        pub fn __eq__(&self, other: &PyMove) -> bool {
            self.move_ == other.move_
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.move_.hash(&mut hasher);
            hasher.finish()
        }
    }
}
