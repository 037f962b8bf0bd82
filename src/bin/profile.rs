//! Plays random four-color games to completion. Useful under a profiler or
//! as a quick smoke test of the placement engine.

use blokus_engine::board::Board;
use blokus_engine::color::Color;
use blokus_engine::r#move::Move;
use blokus_engine::tile::{NUM_TILES, TILES};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

const GAMES: usize = 100;

fn play_one(rng: &mut StdRng) -> (Board, usize) {
    let mut board = Board::new();
    let mut used = [[false; NUM_TILES]; 4];
    let mut placed = 0;

    loop {
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
            if let Some((tile_index, mov)) = candidates.choose(rng).copied() {
                if board.place(&TILES[tile_index], color, &mov).is_ok() {
                    used[color_idx][tile_index] = true;
                    placed += 1;
                    progressed = true;
                }
            }
        }
        if !progressed {
            return (board, placed);
        }
    }
}

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut total_placed = 0;
    let mut last_board = Board::new();

    let start = std::time::Instant::now();
    for _ in 0..GAMES {
        let (board, placed) = play_one(&mut rng);
        total_placed += placed;
        last_board = board;
    }
    let elapsed = start.elapsed();

    println!("{}", last_board);
    println!(
        "{} games, {} tiles placed, {:.2?} total ({:.2?}/game)",
        GAMES,
        total_placed,
        elapsed,
        elapsed / GAMES as u32
    );
}
