//! Combatant placement
//!
//! Each round both combatants are set on rooftops near their own edge of
//! the playfield: the 2nd or 3rd structure in from either side, footprint
//! centered over the roof.

use glam::IVec2;
use rand::Rng;

use super::skyline::{Skyline, baseline};
use crate::consts::COMBATANT_SIZE;

/// Pick rooftop positions for the left and right combatants.
///
/// The two chosen structures are guaranteed distinct whenever the skyline
/// has at least five structures; callers may rely on that.
pub fn place(skyline: &Skyline, rng: &mut impl Rng) -> [IVec2; 2] {
    let count = skyline.structures.len();
    debug_assert!(count >= 5, "generated skylines always span several structures");

    let left_idx = rng.random_range(1..=2usize);
    let mut right_idx = count - rng.random_range(2..=3usize);
    if right_idx == left_idx {
        // Only reachable on a five-structure skyline; shift outward.
        right_idx = count - 2;
    }

    [
        roof_position(skyline, left_idx),
        roof_position(skyline, right_idx),
    ]
}

/// Top-left corner of a combatant footprint resting on the structure's roof
fn roof_position(skyline: &Skyline, idx: usize) -> IVec2 {
    let s = &skyline.structures[idx];
    IVec2::new(
        s.x + s.width / 2 - COMBATANT_SIZE / 2,
        baseline(skyline.field_height) - s.height - COMBATANT_SIZE,
    )
}
