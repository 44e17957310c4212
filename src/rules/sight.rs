//! Line-of-sight ray casting
//!
//! A ray walks outward from a cell until it leaves the board or meets a
//! stone. The first stone met is the only one visible along that ray.

use crate::board::{Board, Player, Pos};

/// The eight compass directions
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, -1),  // W
    (0, 1),   // E
    (1, -1),  // SW
    (1, 0),   // S
    (1, 1),   // SE
];

/// First stone met walking from `pos` along `(dr, dc)`
#[inline]
fn first_stone(board: &Board, pos: Pos, dr: i32, dc: i32) -> Option<Player> {
    let size = board.size();
    (1..)
        .map_while(|step| pos.offset(dr, dc, step, size))
        .find_map(|p| board.get(p))
}

/// Count the rays from `pos` whose first stone belongs to `player`.
///
/// Opponent stones block the ray without counting. At most 8.
pub fn friendly_sightings(board: &Board, pos: Pos, player: Player) -> usize {
    DIRECTIONS
        .iter()
        .filter(|&&(dr, dc)| first_stone(board, pos, dr, dc) == Some(player))
        .count()
}

/// Whether an unobstructed ray connects `pos` to the center.
///
/// The center itself returns false. Stones on the way block the view; the
/// center's own occupant does not matter.
pub fn can_see_center(board: &Board, pos: Pos) -> bool {
    let center = board.center();
    if pos == center {
        return false;
    }

    let size = board.size();
    for &(dr, dc) in &DIRECTIONS {
        for step in 1.. {
            let Some(p) = pos.offset(dr, dc, step, size) else {
                break;
            };
            if p == center {
                return true;
            }
            if !board.is_empty(p) {
                break;
            }
        }
    }
    false
}
