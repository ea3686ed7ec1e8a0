//! Random placement of food and power-ups on free cells.

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::GameConfig;
use super::state::Position;

/// Rejection-sampling budget, as a multiple of the board's cell count.
const ATTEMPTS_PER_CELL: usize = 4;

/// Pick a uniformly random board cell that is not listed in `excluded`.
///
/// Draws are rejection-sampled first. When the budget runs out (a nearly full
/// board), the free cells are enumerated and one is chosen directly. Returns
/// `None` only when every cell is excluded.
pub fn random_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    excluded: &[Position],
) -> Option<Position> {
    let boundary = config.boundary();
    let attempts = config.cell_count().saturating_mul(ATTEMPTS_PER_CELL);

    for _ in 0..attempts {
        let pos = Position::new(
            rng.gen_range(-boundary..=boundary),
            rng.gen_range(-boundary..=boundary),
        );
        if !excluded.contains(&pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = board_cells(boundary)
        .filter(|pos| !excluded.contains(pos))
        .collect();
    free.choose(rng).copied()
}

/// Every cell of the board, row by row
pub fn board_cells(boundary: i32) -> impl Iterator<Item = Position> {
    (-boundary..=boundary)
        .flat_map(move |y| (-boundary..=boundary).map(move |x| Position::new(x, y)))
}
