//! Procedural skyline generation
//!
//! Every round gets a fresh row of rectangular structures spanning the
//! playfield, plus the round's wind. A slope mode shapes the overall city
//! profile; a bounded random offset keeps the rooftops ragged.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::palette;

/// Overall profile of a generated skyline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeMode {
    Upward,
    Downward,
    /// Rises to the midpoint, then falls
    Ridge,
    /// Falls to the midpoint, then rises
    Valley,
}

impl SlopeMode {
    fn draw(rng: &mut impl Rng) -> Self {
        match rng.random_range(0..4u8) {
            0 => SlopeMode::Upward,
            1 => SlopeMode::Downward,
            2 => SlopeMode::Ridge,
            _ => SlopeMode::Valley,
        }
    }

    /// Baseline height the first structure grows from
    fn initial_baseline(self) -> i32 {
        match self {
            SlopeMode::Upward | SlopeMode::Ridge => 15,
            SlopeMode::Downward | SlopeMode::Valley => 130,
        }
    }

    /// Baseline delta for a structure starting at `x`
    fn step(self, x: i32, midpoint: i32) -> i32 {
        match self {
            SlopeMode::Upward => 10,
            SlopeMode::Downward => -10,
            SlopeMode::Ridge => {
                if x > midpoint {
                    -20
                } else {
                    20
                }
            }
            SlopeMode::Valley => {
                if x > midpoint {
                    20
                } else {
                    -20
                }
            }
        }
    }
}

/// One window mark on a structure face. Visual data only; windows never
/// participate in collision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Window {
    /// Top-left corner in playfield coordinates
    pub pos: IVec2,
    pub lit: bool,
}

impl Window {
    pub fn color(&self) -> u8 {
        if self.lit {
            palette::WINDOW_LIT
        } else {
            palette::WINDOW_UNLIT
        }
    }
}

/// One rectangular building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub x: i32,
    pub width: i32,
    /// Vertical extent above the ground baseline
    pub height: i32,
    /// Palette id the renderer fills the body with
    pub color: u8,
    pub windows: Vec<Window>,
}

impl Structure {
    /// One past the rightmost column
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Screen y of the roof line
    pub fn top(&self, field_height: i32) -> i32 {
        baseline(field_height) - self.height
    }
}

/// Screen y of the ground baseline
#[inline]
pub fn baseline(field_height: i32) -> i32 {
    field_height - BASELINE_MARGIN
}

/// An ordered row of structures spanning the playfield, left to right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skyline {
    pub structures: Vec<Structure>,
    pub field_width: i32,
    pub field_height: i32,
}

/// Generate a skyline and the round's wind.
///
/// Always succeeds; the construction leaves no gaps wider than the fixed
/// 2-px separation and never overruns the playfield edge.
pub fn generate(field_width: i32, field_height: i32, rng: &mut impl Rng) -> (Skyline, i32) {
    let mode = SlopeMode::draw(rng);
    let midpoint = field_width / 2;
    let bottom = baseline(field_height);

    let mut structures = Vec::new();
    let mut base = mode.initial_baseline();
    let mut x = 2;
    while x < field_width - 10 {
        base += mode.step(x, midpoint);

        let mut width = rng.random_range(MIN_STRUCTURE_WIDTH..=MAX_STRUCTURE_WIDTH);
        if x + width > field_width {
            width = field_width - x - STRUCTURE_GAP;
        }

        let height =
            (base + rng.random_range(0..=120)).clamp(MIN_STRUCTURE_HEIGHT, MAX_STRUCTURE_HEIGHT);
        let color = palette::STRUCTURE_FILLS[rng.random_range(0..palette::STRUCTURE_FILLS.len())];

        let top = bottom - height;
        let mut windows = Vec::new();
        let mut wx = x + WINDOW_MARGIN;
        while wx < x + width - WINDOW_MARGIN {
            let mut wy = top + WINDOW_MARGIN;
            while wy < bottom - WINDOW_MARGIN {
                windows.push(Window {
                    pos: IVec2::new(wx, wy),
                    lit: rng.random_bool(0.75),
                });
                wy += WINDOW_STRIDE_Y;
            }
            wx += WINDOW_STRIDE_X;
        }

        structures.push(Structure {
            x,
            width,
            height,
            color,
            windows,
        });
        x += width + STRUCTURE_GAP;
    }

    let wind = draw_wind(rng);
    (
        Skyline {
            structures,
            field_width,
            field_height,
        },
        wind,
    )
}

/// Wind for the round: a moderate symmetric draw, occasionally gusting
/// further in the same direction
fn draw_wind(rng: &mut impl Rng) -> i32 {
    let mut wind: i32 = rng.random_range(-10..=10);
    if rng.random_range(1..=3) == 1 {
        if wind > 0 {
            wind += rng.random_range(1..=10);
        } else {
            wind -= rng.random_range(1..=10);
        }
    }
    wind
}
